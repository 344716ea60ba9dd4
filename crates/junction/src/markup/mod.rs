//! Text markup for connector diagrams
//!
//! A line-oriented format declaring nodes and the connectors between them.
//! See [`MarkupParser`] for the grammar.

mod parser;

pub use parser::*;

use crate::core::{Diagram, DiagramError};

/// Parse markup into a [`Diagram`] with the default parser
pub fn parse_diagram(input: &str) -> Result<Diagram, DiagramError> {
    MarkupParser::new().parse(input)
}
