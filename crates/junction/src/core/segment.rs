//! Drawable connector segments
//!
//! A routed connector is an ordered list of [`Segment`]s. Each variant is
//! anchored at a grid point and knows which cells it covers, but carries no
//! glyphs: choosing characters is the renderer's job.

use std::fmt;

use super::{Direction, Point};

/// Marker at either end of a connector
///
/// The end marker records the direction of travel on arrival so renderers can
/// point an arrowhead the right way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl TerminalKind {
    /// End marker for a connector arriving along `direction`
    ///
    /// `positive` is true when travel is rightwards or downwards.
    pub fn arriving(direction: Direction, positive: bool) -> Self {
        match (direction, positive) {
            (Direction::Horizontal, true) => TerminalKind::Right,
            (Direction::Horizontal, false) => TerminalKind::Left,
            (Direction::Vertical, true) => TerminalKind::Down,
            (Direction::Vertical, false) => TerminalKind::Up,
        }
    }

    /// Reverse the arrival direction; `Start` has no direction and is kept
    pub fn opposite(self) -> Self {
        match self {
            TerminalKind::Start => TerminalKind::Start,
            TerminalKind::Up => TerminalKind::Down,
            TerminalKind::Down => TerminalKind::Up,
            TerminalKind::Left => TerminalKind::Right,
            TerminalKind::Right => TerminalKind::Left,
        }
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalKind::Start => write!(f, "start"),
            TerminalKind::Up => write!(f, "up"),
            TerminalKind::Down => write!(f, "down"),
            TerminalKind::Left => write!(f, "left"),
            TerminalKind::Right => write!(f, "right"),
        }
    }
}

/// Shape of an elbow cell, named by the two neighbours it joins
///
/// ```text
/// NE  ╰    NW  ╯    SE  ╭    SW  ╮
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    NE,
    NW,
    SE,
    SW,
}

impl Orientation {
    /// Mirror east and west arms (NE↔NW, SE↔SW)
    pub fn flip_horizontal(self) -> Self {
        match self {
            Orientation::NE => Orientation::NW,
            Orientation::NW => Orientation::NE,
            Orientation::SE => Orientation::SW,
            Orientation::SW => Orientation::SE,
        }
    }

    /// Mirror north and south arms (NE↔SE, NW↔SW)
    pub fn flip_vertical(self) -> Self {
        match self {
            Orientation::NE => Orientation::SE,
            Orientation::SE => Orientation::NE,
            Orientation::NW => Orientation::SW,
            Orientation::SW => Orientation::NW,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::NE => write!(f, "NE"),
            Orientation::NW => write!(f, "NW"),
            Orientation::SE => write!(f, "SE"),
            Orientation::SW => write!(f, "SW"),
        }
    }
}

/// One drawable piece of a routed connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Endpoint marker occupying a single cell
    Terminal { point: Point, kind: TerminalKind },
    /// Straight run of `length` cells starting at `point`
    ///
    /// `sign` is true when the run extends towards increasing coordinates.
    /// `point` is always the first cell reached when travelling from the
    /// connector's start, so a negative run ends `length - 1` cells before it.
    Line {
        point: Point,
        direction: Direction,
        length: usize,
        sign: bool,
    },
    /// Single-cell turn
    Elbow {
        point: Point,
        orientation: Orientation,
    },
}

impl Segment {
    /// Anchor point of the segment
    pub fn point(&self) -> Point {
        match *self {
            Segment::Terminal { point, .. }
            | Segment::Line { point, .. }
            | Segment::Elbow { point, .. } => point,
        }
    }

    /// Number of grid cells the segment covers
    pub fn cell_count(&self) -> usize {
        match *self {
            Segment::Line { length, .. } => length,
            Segment::Terminal { .. } | Segment::Elbow { .. } => 1,
        }
    }

    /// Offset from the first covered cell to the last one
    ///
    /// Single-cell segments do not move the pen.
    pub fn advance(&self) -> Point {
        match *self {
            Segment::Line {
                direction,
                length,
                sign,
                ..
            } => {
                let extent = i32::try_from(length.saturating_sub(1)).unwrap_or(i32::MAX);
                Point::default().step(direction, if sign { extent } else { -extent })
            }
            Segment::Terminal { .. } | Segment::Elbow { .. } => Point::default(),
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line { .. })
    }

    /// Covered cells in travel order
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let (point, direction, length, step) = match *self {
            Segment::Line {
                point,
                direction,
                length,
                sign,
            } => (point, direction, length, if sign { 1 } else { -1 }),
            Segment::Terminal { point, .. } | Segment::Elbow { point, .. } => {
                (point, Direction::Horizontal, 1, 0)
            }
        };
        (0..length).map(move |i| point.step(direction, i as i32 * step))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Terminal { point, kind } => write!(f, "terminal {} {}", point, kind),
            Segment::Line {
                point,
                direction,
                length,
                sign,
            } => write!(
                f,
                "line     {} {} {}{}",
                point,
                direction,
                if *sign { '+' } else { '-' },
                length
            ),
            Segment::Elbow { point, orientation } => {
                write!(f, "elbow    {} {}", point, orientation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_arrival_mapping() {
        assert_eq!(
            TerminalKind::arriving(Direction::Horizontal, true),
            TerminalKind::Right
        );
        assert_eq!(
            TerminalKind::arriving(Direction::Horizontal, false),
            TerminalKind::Left
        );
        assert_eq!(
            TerminalKind::arriving(Direction::Vertical, true),
            TerminalKind::Down
        );
        assert_eq!(
            TerminalKind::arriving(Direction::Vertical, false),
            TerminalKind::Up
        );
    }

    #[test]
    fn test_terminal_opposite() {
        assert_eq!(TerminalKind::Up.opposite(), TerminalKind::Down);
        assert_eq!(TerminalKind::Left.opposite(), TerminalKind::Right);
        assert_eq!(TerminalKind::Start.opposite(), TerminalKind::Start);
    }

    #[test]
    fn test_orientation_flips_are_involutions() {
        for o in [
            Orientation::NE,
            Orientation::NW,
            Orientation::SE,
            Orientation::SW,
        ] {
            assert_eq!(o.flip_horizontal().flip_horizontal(), o);
            assert_eq!(o.flip_vertical().flip_vertical(), o);
            assert_ne!(o.flip_horizontal(), o);
            assert_ne!(o.flip_vertical(), o);
        }
        assert_eq!(Orientation::NE.flip_horizontal(), Orientation::NW);
        assert_eq!(Orientation::SW.flip_vertical(), Orientation::NW);
    }

    #[test]
    fn test_line_cells_follow_sign() {
        let forward = Segment::Line {
            point: Point::new(1, 0),
            direction: Direction::Horizontal,
            length: 3,
            sign: true,
        };
        let cells: Vec<_> = forward.cells().collect();
        assert_eq!(
            cells,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );

        let backward = Segment::Line {
            point: Point::new(0, 4),
            direction: Direction::Vertical,
            length: 2,
            sign: false,
        };
        let cells: Vec<_> = backward.cells().collect();
        assert_eq!(cells, vec![Point::new(0, 4), Point::new(0, 3)]);
        assert_eq!(backward.point() + backward.advance(), Point::new(0, 3));
        assert_eq!(forward.point() + forward.advance(), Point::new(3, 0));
    }

    #[test]
    fn test_single_cell_segments() {
        let elbow = Segment::Elbow {
            point: Point::new(2, 2),
            orientation: Orientation::SE,
        };
        assert_eq!(elbow.cell_count(), 1);
        assert_eq!(elbow.cells().collect::<Vec<_>>(), vec![Point::new(2, 2)]);
        assert!(!elbow.is_line());
    }

    #[test]
    fn test_segment_display() {
        let line = Segment::Line {
            point: Point::new(4, 0),
            direction: Direction::Horizontal,
            length: 4,
            sign: false,
        };
        assert_eq!(line.to_string(), "line     (4, 0) H -4");

        let terminal = Segment::Terminal {
            point: Point::new(0, 0),
            kind: TerminalKind::Left,
        };
        assert_eq!(terminal.to_string(), "terminal (0, 0) left");
    }
}
