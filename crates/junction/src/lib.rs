//! Junction - Orthogonal connector diagrams for the terminal
//!
//! A library for routing right-angle connectors between points on a character
//! grid and drawing them, together with labelled node boxes, as text.
//!
//! # Quick Start
//!
//! ```rust
//! use junction::render;
//!
//! let input = "node a at 0,0\nnode b at 20,4\nconnect a -> b";
//! let text = render(input).unwrap();
//! println!("{}", text);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use junction::prelude::*;
//!
//! // Route a single connector
//! let connector = Connector::new(Point::new(0, 0), Point::new(6, 2));
//! assert_eq!(connector.direction(), Direction::Horizontal);
//! assert_eq!(connector.segments().len(), 7);
//!
//! // Build a diagram by hand
//! let mut diagram = Diagram::new();
//! diagram.add_node(Node::new("a", Point::new(0, 0))).unwrap();
//! diagram.add_node(Node::new("b", Point::new(0, 10))).unwrap();
//! diagram.connect_nodes("a", "b").unwrap();
//!
//! let frame = diagram.compose(&SegmentRenderer::new(CharacterSet::Ascii));
//! assert!(frame.to_string().contains('v'));
//! ```

pub mod core;
pub mod markup;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        route, CharacterSet, Connector, Diagram, DiagramError, Direction, Frame, GlyphRun, Node,
        Orientation, Point, RenderConfig, Segment, SegmentRenderer, TerminalKind,
    };
    pub use crate::markup::{parse_diagram, MarkupParser};
}

/// Render diagram markup to text
///
/// Uses the default Unicode character set.
///
/// # Arguments
/// * `input` - Diagram markup (e.g., "node a at 0,0; node b at 12,0; connect a -> b")
///
/// # Returns
/// * `Ok(String)` - The rendered diagram
/// * `Err` - If the markup cannot be parsed or names an unknown node
///
/// # Example
/// ```rust
/// use junction::render;
///
/// let text = render("node a \"Start\" at 0,0; node b \"End\" at 20,0; connect a -> b").unwrap();
/// assert!(text.contains("Start"));
/// assert!(text.contains("End"));
/// assert!(text.contains('▶'));
/// ```
pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_style(input, CharacterSet::default())
}

/// Render diagram markup with a specific character set
///
/// # Example
/// ```rust
/// use junction::{render_with_style, CharacterSet};
///
/// // Pure ASCII for maximum compatibility
/// let ascii = render_with_style("connect 0,0 -> 4,0", CharacterSet::Ascii).unwrap();
/// assert_eq!(ascii, "o--->");
/// ```
pub fn render_with_style(input: &str, style: CharacterSet) -> anyhow::Result<String> {
    let diagram = parse(input)?;
    Ok(diagram.render(RenderConfig::new(style)).to_string())
}

/// Parse diagram markup without rendering
///
/// Useful when you need to inspect the routed connectors before drawing.
///
/// # Example
/// ```rust
/// use junction::parse;
///
/// let diagram = parse("node a at 0,0\nnode b at 0,12\nconnect a -> b").unwrap();
/// assert_eq!(diagram.node_count(), 2);
/// assert_eq!(diagram.connector_count(), 1);
/// ```
pub fn parse(input: &str) -> anyhow::Result<Diagram> {
    Ok(markup::parse_diagram(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_style() {
        let output = render("node a at 0,0\nnode b at 16,6\nconnect a -> b").unwrap();
        assert!(output.contains('╭'));
        assert!(output.contains('▶'));
    }

    #[test]
    fn test_render_with_style_ascii() {
        let output = render_with_style("node a at 0,0; connect a -> 0,8", CharacterSet::Ascii).unwrap();
        assert!(output.is_ascii());
        assert!(output.ends_with('v'));
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render("").unwrap(), "");
    }

    #[test]
    fn test_parse_reports_errors() {
        let err = parse("node a at 0,0\nconnect a -> nowhere").unwrap_err();
        assert!(err.to_string().contains("Unknown node: nowhere"));

        let err = parse("node at at").unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }

    #[test]
    fn test_render_rejects_coordinates_beyond_limit() {
        let err = render("node a at 2147483647,0").unwrap_err();
        assert!(err.to_string().contains("coordinate out of range"));

        let err = render("connect 0,0 -> 0,100000000").unwrap_err();
        assert!(err.to_string().contains("coordinate out of range"));

        let edge = render_with_style("connect -1000,0 -> 1000,0", CharacterSet::Ascii).unwrap();
        assert_eq!(edge.len(), 2001);
        assert!(edge.ends_with('>'));
    }
}
