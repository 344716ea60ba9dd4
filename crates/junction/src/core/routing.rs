//! Orthogonal connector routing
//!
//! Turns a start and end point into the ordered [`Segment`]s that join them
//! with axis-aligned strokes. The longer axis is the *dominant* one (ties go
//! to horizontal). Aligned points get a single straight run. Anything else
//! gets a Z-shaped path with one perpendicular jog:
//!
//! ```text
//! ●──╮
//!    │
//!    ╰──▶
//! ```
//!
//! Routing is a pure function of its two endpoints and touches no shared state.

use tracing::trace;

use super::{comparison, Direction, Orientation, Point, Segment, TerminalKind};

/// A routed connector between two grid points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    start: Point,
    end: Point,
    direction: Direction,
    segments: Vec<Segment>,
}

impl Connector {
    /// Route a new connector from `start` to `end`
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            direction: dominant_direction(start, end),
            segments: route(start, end),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Dominant axis the connector was routed along
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True for zero-length connectors, which draw nothing
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every covered cell, from start to end
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(Segment::cells)
    }
}

/// Axis carrying the larger delta; horizontal wins ties
pub fn dominant_direction(start: Point, end: Point) -> Direction {
    if start.x.abs_diff(end.x) >= start.y.abs_diff(end.y) {
        Direction::Horizontal
    } else {
        Direction::Vertical
    }
}

/// Route an orthogonal path from `start` to `end`
///
/// Returns an empty list when both points coincide. Otherwise the list opens
/// with a [`TerminalKind::Start`] terminal and closes with a terminal whose
/// kind gives the arrival direction along the dominant axis.
///
/// # Example
/// ```rust
/// use junction::core::{route, Direction, Point, Segment, TerminalKind};
///
/// let segments = route(Point::new(5, 0), Point::new(0, 0));
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Terminal { point: Point::new(5, 0), kind: TerminalKind::Start },
///         Segment::Line {
///             point: Point::new(4, 0),
///             direction: Direction::Horizontal,
///             length: 4,
///             sign: false,
///         },
///         Segment::Terminal { point: Point::new(0, 0), kind: TerminalKind::Left },
///     ]
/// );
/// ```
pub fn route(start: Point, end: Point) -> Vec<Segment> {
    if start.distance(end) == 0 {
        return Vec::new();
    }

    let direction = dominant_direction(start, end);
    let cursor = Cursor {
        point: start,
        rightwards: comparison(end.x, start.x),
        downwards: comparison(end.y, start.y),
    };

    let (body, cursor) = if cursor.rightwards == 0 || cursor.downwards == 0 {
        straight(cursor.nudge(direction), end, direction)
    } else if start.distance(end) == 1 {
        corner(cursor, direction)
    } else {
        jogged(cursor.nudge(direction), end, direction)
    };

    debug_assert_eq!(
        cursor.point, end,
        "route from {} to {} did not close",
        start, end
    );

    let arrival = TerminalKind::arriving(direction, cursor.sign(direction) > 0);
    let segments: Vec<Segment> = std::iter::once(Segment::Terminal {
        point: start,
        kind: TerminalKind::Start,
    })
    .chain(body)
    .chain(std::iter::once(Segment::Terminal {
        point: end,
        kind: arrival,
    }))
    .collect();

    trace!(
        %start,
        %end,
        %direction,
        segment_count = segments.len(),
        "Routed connector"
    );
    segments
}

/// Pen position while a route is being laid down
///
/// Steps never mutate a cursor; each returns the segment it produced together
/// with the advanced cursor.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    point: Point,
    rightwards: i32,
    downwards: i32,
}

impl Cursor {
    fn sign(self, direction: Direction) -> i32 {
        match direction {
            Direction::Horizontal => self.rightwards,
            Direction::Vertical => self.downwards,
        }
    }

    /// Cells left between the cursor and `end` along one axis
    fn remaining(self, end: Point, direction: Direction) -> u32 {
        end.along(direction).abs_diff(self.point.along(direction))
    }

    /// Advance a single cell towards the end along `direction`
    fn nudge(self, direction: Direction) -> Self {
        Self {
            point: self.point.step(direction, self.sign(direction)),
            ..self
        }
    }

    /// Straight run of `length` cells; zero-length runs produce no segment
    fn run(self, direction: Direction, length: u32) -> (Option<Segment>, Self) {
        let sign = self.sign(direction);
        let line = (length > 0).then_some(Segment::Line {
            point: self.point,
            direction,
            length: length as usize,
            sign: sign > 0,
        });
        // A run never passes `end`, so the target always fits back in i32
        let target = i64::from(self.point.along(direction)) + i64::from(length) * i64::from(sign);
        let target = target.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let point = match direction {
            Direction::Horizontal => Point::new(target, self.point.y),
            Direction::Vertical => Point::new(self.point.x, target),
        };
        (line, Self { point, ..self })
    }

    /// Elbow at the cursor, then one cell onto the `next` axis
    fn turn(self, base: Orientation, next: Direction) -> (Segment, Self) {
        let mut orientation = base;
        if self.rightwards == 1 {
            orientation = orientation.flip_horizontal();
        }
        if self.downwards == 1 {
            orientation = orientation.flip_vertical();
        }
        let elbow = Segment::Elbow {
            point: self.point,
            orientation,
        };
        (elbow, self.nudge(next))
    }
}

/// Base orientations of the (leaving, rejoining) elbows for a dominant axis
///
/// The bases describe a path towards the upper left; [`Cursor::turn`] mirrors
/// them into the actual quadrant. Vertical routes swap the pair so each
/// elbow's arms still point at the cells before and after it.
fn elbow_bases(direction: Direction) -> (Orientation, Orientation) {
    match direction {
        Direction::Horizontal => (Orientation::NE, Orientation::SW),
        Direction::Vertical => (Orientation::SW, Orientation::NE),
    }
}

fn straight(cursor: Cursor, end: Point, direction: Direction) -> (Vec<Segment>, Cursor) {
    let (line, cursor) = cursor.run(direction, cursor.remaining(end, direction));
    (line.into_iter().collect(), cursor)
}

/// Both deltas are exactly one cell: a single elbow, arriving along `direction`
fn corner(cursor: Cursor, direction: Direction) -> (Vec<Segment>, Cursor) {
    let (_, rejoin) = elbow_bases(direction);
    let (elbow, cursor) = cursor.nudge(direction.other()).turn(rejoin, direction);
    (vec![elbow], cursor)
}

/// Half-line, elbow, step line, elbow, half-line
///
/// The dominant-axis cells between the terminals, minus the elbow column, are
/// split with the first half rounded down, so an odd remainder lands on the
/// second half.
fn jogged(cursor: Cursor, end: Point, direction: Direction) -> (Vec<Segment>, Cursor) {
    let other = direction.other();
    let (leave, rejoin) = elbow_bases(direction);

    let body = cursor.remaining(end, direction).saturating_sub(1);
    let (first, cursor) = cursor.run(direction, body / 2);
    let (elbow_out, cursor) = cursor.turn(leave, other);
    let (step, cursor) = cursor.run(other, cursor.remaining(end, other));
    let (elbow_in, cursor) = cursor.turn(rejoin, direction);
    let (second, cursor) = cursor.run(direction, cursor.remaining(end, direction));

    let segments = first
        .into_iter()
        .chain(std::iter::once(elbow_out))
        .chain(step)
        .chain(std::iter::once(elbow_in))
        .chain(second)
        .collect();
    (segments, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(x: i32, y: i32, kind: TerminalKind) -> Segment {
        Segment::Terminal {
            point: Point::new(x, y),
            kind,
        }
    }

    fn line(x: i32, y: i32, direction: Direction, length: usize, sign: bool) -> Segment {
        Segment::Line {
            point: Point::new(x, y),
            direction,
            length,
            sign,
        }
    }

    fn elbow(x: i32, y: i32, orientation: Orientation) -> Segment {
        Segment::Elbow {
            point: Point::new(x, y),
            orientation,
        }
    }

    fn line_lengths(segments: &[Segment]) -> Vec<usize> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Line { length, .. } => Some(*length),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_null_connectors() {
        assert!(route(Point::new(0, 0), Point::new(0, 0)).is_empty());
        assert!(route(Point::new(1, 2), Point::new(1, 2)).is_empty());
        assert!(Connector::new(Point::new(-3, 9), Point::new(-3, 9)).is_empty());
    }

    #[test]
    fn test_straight_connectors_without_body() {
        use TerminalKind::*;
        let cases = [
            ((0, 0), (1, 0), Right),
            ((0, 0), (0, 1), Down),
            ((1, 0), (0, 0), Left),
            ((0, 1), (0, 0), Up),
        ];
        for ((sx, sy), (ex, ey), kind) in cases {
            let segments = route(Point::new(sx, sy), Point::new(ex, ey));
            assert_eq!(segments, vec![terminal(sx, sy, Start), terminal(ex, ey, kind)]);
        }
    }

    #[test]
    fn test_straight_connectors_with_body() {
        use Direction::*;
        use TerminalKind::*;

        assert_eq!(
            route(Point::new(0, 0), Point::new(2, 0)),
            vec![
                terminal(0, 0, Start),
                line(1, 0, Horizontal, 1, true),
                terminal(2, 0, Right)
            ]
        );
        assert_eq!(
            route(Point::new(2, 0), Point::new(0, 0)),
            vec![
                terminal(2, 0, Start),
                line(1, 0, Horizontal, 1, false),
                terminal(0, 0, Left)
            ]
        );
        assert_eq!(
            route(Point::new(0, 0), Point::new(5, 0)),
            vec![
                terminal(0, 0, Start),
                line(1, 0, Horizontal, 4, true),
                terminal(5, 0, Right)
            ]
        );
        assert_eq!(
            route(Point::new(5, 0), Point::new(0, 0)),
            vec![
                terminal(5, 0, Start),
                line(4, 0, Horizontal, 4, false),
                terminal(0, 0, Left)
            ]
        );
        assert_eq!(
            route(Point::new(0, 0), Point::new(0, 5)),
            vec![
                terminal(0, 0, Start),
                line(0, 1, Vertical, 4, true),
                terminal(0, 5, Down)
            ]
        );
        assert_eq!(
            route(Point::new(0, 5), Point::new(0, 0)),
            vec![
                terminal(0, 5, Start),
                line(0, 4, Vertical, 4, false),
                terminal(0, 0, Up)
            ]
        );
    }

    #[test]
    fn test_jogged_connector() {
        // ●──╮
        //    │
        //    ╰──▶
        use Direction::*;
        use TerminalKind::*;

        let connector = Connector::new(Point::new(0, 0), Point::new(6, 2));
        assert_eq!(connector.direction(), Horizontal);
        assert_eq!(
            connector.segments(),
            &[
                terminal(0, 0, Start),
                line(1, 0, Horizontal, 2, true),
                elbow(3, 0, Orientation::SW),
                line(3, 1, Vertical, 1, true),
                elbow(3, 2, Orientation::NE),
                line(4, 2, Horizontal, 2, true),
                terminal(6, 2, Right),
            ]
        );
    }

    #[test]
    fn test_vertical_jog_upwards_and_left() {
        use Direction::*;
        use TerminalKind::*;

        let connector = Connector::new(Point::new(4, 8), Point::new(0, 0));
        assert_eq!(connector.direction(), Vertical);
        assert_eq!(
            connector.segments(),
            &[
                terminal(4, 8, Start),
                line(4, 7, Vertical, 3, false),
                elbow(4, 4, Orientation::SW),
                line(3, 4, Horizontal, 3, false),
                elbow(0, 4, Orientation::NE),
                line(0, 3, Vertical, 3, false),
                terminal(0, 0, Up),
            ]
        );
    }

    #[test]
    fn test_odd_split_favours_second_half() {
        let segments = route(Point::new(0, 0), Point::new(7, 2));
        assert_eq!(line_lengths(&segments), vec![2, 1, 3]);

        let segments = route(Point::new(0, 0), Point::new(0, -9));
        assert_eq!(line_lengths(&segments), vec![8]);

        // nine body rows around the elbow row
        let segments = route(Point::new(0, 0), Point::new(-3, 11));
        assert_eq!(line_lengths(&segments), vec![4, 2, 5]);
    }

    #[test]
    fn test_zero_length_lines_are_omitted_in_jog() {
        use TerminalKind::*;
        assert_eq!(
            route(Point::new(0, 0), Point::new(2, 1)),
            vec![
                terminal(0, 0, Start),
                elbow(1, 0, Orientation::SW),
                elbow(1, 1, Orientation::NE),
                terminal(2, 1, Right),
            ]
        );
    }

    #[test]
    fn test_unit_diagonal_uses_single_elbow() {
        use TerminalKind::*;
        assert_eq!(
            route(Point::new(0, 0), Point::new(1, 1)),
            vec![
                terminal(0, 0, Start),
                elbow(0, 1, Orientation::NE),
                terminal(1, 1, Right),
            ]
        );
        assert_eq!(
            route(Point::new(1, 1), Point::new(0, 0)),
            vec![
                terminal(1, 1, Start),
                elbow(1, 0, Orientation::SW),
                terminal(0, 0, Left),
            ]
        );
    }

    #[test]
    fn test_diagonal_tie_breaks_horizontal() {
        let connector = Connector::new(Point::new(0, 0), Point::new(3, 3));
        assert_eq!(connector.direction(), Direction::Horizontal);
        assert_eq!(
            connector.segments().last(),
            Some(&terminal(3, 3, TerminalKind::Right))
        );
    }

    #[test]
    fn test_route_spans_full_coordinate_range() {
        use TerminalKind::*;
        let (start, end) = (Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert_eq!(
            route(start, end),
            vec![
                terminal(i32::MIN, 0, Start),
                line(i32::MIN + 1, 0, Direction::Horizontal, (u32::MAX - 1) as usize, true),
                terminal(i32::MAX, 0, Right),
            ]
        );
        assert_eq!(route(end, start).last(), Some(&terminal(i32::MIN, 0, Left)));
    }

    #[test]
    fn test_jog_between_opposite_corners_of_the_grid() {
        let segments = route(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX));
        assert_eq!(segments.len(), 7);
        assert_eq!(segments[2], elbow(-1, i32::MIN, Orientation::SW));
        assert_eq!(
            line_lengths(&segments),
            vec![2_147_483_646, (u32::MAX - 1) as usize, 2_147_483_647]
        );
        assert_eq!(
            segments.last(),
            Some(&terminal(i32::MAX, i32::MAX, TerminalKind::Right))
        );
    }

    #[test]
    fn test_connector_cells_walk_to_end() {
        let connector = Connector::new(Point::new(-2, 3), Point::new(9, -1));
        let cells: Vec<_> = connector.cells().collect();
        assert_eq!(cells.first(), Some(&Point::new(-2, 3)));
        assert_eq!(cells.last(), Some(&Point::new(9, -1)));
        for pair in cells.windows(2) {
            assert_eq!(pair[0].distance(pair[1]), 1, "gap at {:?}", pair);
        }
    }
}
