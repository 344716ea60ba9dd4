//! Segment renderer
//!
//! Projects routed [`Segment`]s onto the character grid. The renderer does no
//! routing and touches no canvas: each segment becomes a [`GlyphRun`], a pure
//! layout descriptor that the canvas applies.

use super::{CharacterSet, ConnectorGlyphs, Connector, Direction, Point, RenderConfig, Segment};

/// A straight run of identical glyphs
///
/// `origin` is always the top-left cell of the run, whatever direction the
/// segment was travelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRun {
    pub origin: Point,
    pub direction: Direction,
    pub length: usize,
    pub glyph: char,
}

impl GlyphRun {
    /// A one-cell run
    pub fn single(origin: Point, glyph: char) -> Self {
        Self {
            origin,
            direction: Direction::Horizontal,
            length: 1,
            glyph,
        }
    }

    /// Covered cells, top-left first
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let (origin, direction) = (self.origin, self.direction);
        (0..self.length).map(move |i| origin.step(direction, i as i32))
    }

    /// Bottom-right cell of the run
    pub fn last(&self) -> Point {
        self.origin
            .step(self.direction, self.length.saturating_sub(1) as i32)
    }
}

/// Maps segments to glyph runs for one character set
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentRenderer {
    glyphs: ConnectorGlyphs,
}

impl SegmentRenderer {
    pub fn new(style: CharacterSet) -> Self {
        Self {
            glyphs: ConnectorGlyphs::new(style),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self::new(config.style)
    }

    pub fn style(&self) -> CharacterSet {
        self.glyphs.style()
    }

    /// Lay out a single segment
    pub fn draw(&self, segment: &Segment) -> GlyphRun {
        match *segment {
            Segment::Terminal { point, kind } => {
                GlyphRun::single(point, self.glyphs.terminal(kind))
            }
            Segment::Line {
                point,
                direction,
                length,
                sign,
            } => {
                // Negative runs are anchored at their trailing cell
                let origin = if sign {
                    point
                } else {
                    point + segment.advance()
                };
                GlyphRun {
                    origin,
                    direction,
                    length,
                    glyph: self.glyphs.line(direction),
                }
            }
            Segment::Elbow { point, orientation } => {
                GlyphRun::single(point, self.glyphs.elbow(orientation))
            }
        }
    }

    /// Lay out every segment of a connector, in routing order
    pub fn draw_connector(&self, connector: &Connector) -> Vec<GlyphRun> {
        connector.segments().iter().map(|s| self.draw(s)).collect()
    }
}
