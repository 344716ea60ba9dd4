//! Diagram composition
//!
//! A [`Diagram`] owns named nodes and routed connectors. Composing it paints
//! every connector first and every node box on top, then hands back a
//! [`Frame`] whose top-left corner is the top-left of the drawing.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, info_span, trace};
use unicode_width::UnicodeWidthStr;

use super::{
    dominant_direction, BoxChars, Canvas, Connector, DiagramError, Direction, GlyphRun, Layer,
    Point, RenderConfig, SegmentRenderer,
};

/// Rows taken by a node box: border, label, border
const NODE_HEIGHT: usize = 3;

/// A labelled box centred on a grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub position: Point,
}

impl Node {
    /// Create a node labelled with its own id
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            position,
        }
    }

    pub fn with_label(id: impl Into<String>, label: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
        }
    }

    /// Box width: label, one column of padding each side, two borders
    pub fn width(&self) -> usize {
        self.label.width() + 4
    }

    pub fn height(&self) -> usize {
        NODE_HEIGHT
    }

    pub fn top_left(&self) -> Point {
        Point::new(
            self.position.x.saturating_sub((self.width() / 2) as i32),
            self.position.y.saturating_sub((NODE_HEIGHT / 2) as i32),
        )
    }

    pub fn bottom_right(&self) -> Point {
        let top_left = self.top_left();
        Point::new(
            top_left.x.saturating_add(self.width() as i32 - 1),
            top_left.y.saturating_add(NODE_HEIGHT as i32 - 1),
        )
    }

    /// Cell just outside the box on the side facing `toward`
    ///
    /// The side is picked with the same dominant-axis rule the router uses,
    /// so a connector leaving a port heads straight away from its node.
    pub fn port(&self, toward: Point) -> Point {
        let (top_left, bottom_right) = (self.top_left(), self.bottom_right());
        match dominant_direction(self.position, toward) {
            Direction::Horizontal if toward.x >= self.position.x => {
                Point::new(bottom_right.x.saturating_add(1), self.position.y)
            }
            Direction::Horizontal => Point::new(top_left.x.saturating_sub(1), self.position.y),
            Direction::Vertical if toward.y >= self.position.y => {
                Point::new(self.position.x, bottom_right.y.saturating_add(1))
            }
            Direction::Vertical => Point::new(self.position.x, top_left.y.saturating_sub(1)),
        }
    }
}

/// Nodes and connectors to be drawn together
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    connectors: Vec<Connector>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; ids must be unique within the diagram
    pub fn add_node(&mut self, node: Node) -> Result<(), DiagramError> {
        trace!(node_id = %node.id, node_label = %node.label, position = %node.position, "Adding node");
        if self.index.contains_key(&node.id) {
            return Err(DiagramError::duplicate_node(node.id));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        debug!(node_count = self.node_count(), "Node added");
        Ok(())
    }

    /// Route a connector between two raw grid points
    pub fn connect(&mut self, start: Point, end: Point) {
        trace!(%start, %end, "Adding connector");
        self.connectors.push(Connector::new(start, end));
    }

    /// Route a connector between the facing sides of two nodes
    pub fn connect_nodes(&mut self, from: &str, to: &str) -> Result<(), DiagramError> {
        let from = self
            .node(from)
            .ok_or_else(|| DiagramError::unknown_node(from))?;
        let to = self.node(to).ok_or_else(|| DiagramError::unknown_node(to))?;
        let (start, end) = (from.port(to.position), to.port(from.position));
        self.connect(start, end);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connectors.is_empty()
    }

    /// Paint connectors, then nodes over them, onto a fresh frame
    pub fn compose(&self, renderer: &SegmentRenderer) -> Frame {
        let _span = info_span!(
            "compose",
            nodes = self.nodes.len(),
            connectors = self.connectors.len()
        )
        .entered();

        let runs: Vec<GlyphRun> = self
            .connectors
            .iter()
            .flat_map(|connector| {
                debug!(
                    start = %connector.start(),
                    end = %connector.end(),
                    segments = connector.segments().len(),
                    "Drawing connector"
                );
                renderer.draw_connector(connector)
            })
            .collect();

        let Some((min, max)) = self.bounds(&runs) else {
            debug!("Nothing to draw");
            return Frame {
                canvas: Canvas::new(0, 0),
            };
        };

        let offset = (min.x, min.y);
        let mut canvas = Canvas::new(
            (max.x - min.x + 1) as usize,
            (max.y - min.y + 1) as usize,
        );

        for run in &runs {
            canvas.paint(run, offset, Layer::Connector);
        }

        let chars = BoxChars::rounded(renderer.style());
        for node in &self.nodes {
            draw_node(&mut canvas, node, &chars, min);
        }

        info!(
            width = canvas.width(),
            height = canvas.height(),
            "Diagram composed"
        );
        Frame { canvas }
    }

    /// Compose with a fresh renderer for `config`
    pub fn render(&self, config: RenderConfig) -> Frame {
        self.compose(&SegmentRenderer::with_config(config))
    }

    /// Top-left and bottom-right corners covering every run and node box
    fn bounds(&self, runs: &[GlyphRun]) -> Option<(Point, Point)> {
        let corners = runs
            .iter()
            .map(|run| (run.origin, run.last()))
            .chain(self.nodes.iter().map(|n| (n.top_left(), n.bottom_right())));

        corners.fold(None, |acc, (lo, hi)| {
            Some(match acc {
                None => (lo, hi),
                Some((min, max)) => (
                    Point::new(min.x.min(lo.x), min.y.min(lo.y)),
                    Point::new(max.x.max(hi.x), max.y.max(hi.y)),
                ),
            })
        })
    }
}

/// Clear the box area, then draw the border and the label
fn draw_node(canvas: &mut Canvas, node: &Node, chars: &BoxChars, origin: Point) {
    let top_left = node.top_left() - origin;
    let (x, y) = (top_left.x as usize, top_left.y as usize);
    let (width, height) = (node.width(), node.height());
    let (right, bottom) = (x + width - 1, y + height - 1);

    canvas.fill(x, y, width, height, Layer::Node);

    for col in x + 1..right {
        canvas.set_char(col, y, chars.horizontal, Layer::Node);
        canvas.set_char(col, bottom, chars.horizontal, Layer::Node);
    }
    for row in y + 1..bottom {
        canvas.set_char(x, row, chars.vertical, Layer::Node);
        canvas.set_char(right, row, chars.vertical, Layer::Node);
    }
    canvas.set_char(x, y, chars.top_left, Layer::Node);
    canvas.set_char(right, y, chars.top_right, Layer::Node);
    canvas.set_char(x, bottom, chars.bottom_left, Layer::Node);
    canvas.set_char(right, bottom, chars.bottom_right, Layer::Node);

    canvas.draw_text(x + 2, y + 1, &node.label, Layer::Node);
}

/// A finished, composited diagram
#[derive(Debug, Clone)]
pub struct Frame {
    canvas: Canvas,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.canvas.width()
    }

    pub fn height(&self) -> usize {
        self.canvas.height()
    }

    /// The underlying grid, with the layer of every painted cell
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canvas)
    }
}
