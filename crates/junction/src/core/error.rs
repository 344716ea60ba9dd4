//! Core error types for diagram processing
//!
//! Routing itself cannot fail; these errors come from building diagrams out
//! of markup or node references.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Duplicate node: {id}")]
    DuplicateNode { id: String },

    #[error("Unknown node: {id}")]
    UnknownNode { id: String },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    /// Parse error at a byte offset into `input`, with 1-based line and column
    pub fn parse_error_at(message: String, input: &str, offset: usize) -> Self {
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;
        Self::parse_error(message, line, column)
    }

    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = DiagramError::parse_error("Invalid syntax".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("Invalid syntax"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
    }

    #[test]
    fn test_parse_error_at_offset() {
        let input = "node a at 0,0\nnode b at x";
        let offset = input.find('x').unwrap();
        match DiagramError::parse_error_at("bad".to_string(), input, offset) {
            DiagramError::ParseError { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 11);
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_node_errors() {
        let error = DiagramError::duplicate_node("a");
        assert_eq!(error.to_string(), "Duplicate node: a");

        let error = DiagramError::unknown_node("ghost");
        assert_eq!(error.to_string(), "Unknown node: ghost");
    }
}
