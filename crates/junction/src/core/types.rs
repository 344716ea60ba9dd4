//! Rendering configuration types
//!
//! This module contains the knobs shared by the renderer, the composer and
//! the CLI: which character set to draw with, bundled into a [`RenderConfig`].

use std::fmt;
use std::str::FromStr;

/// Character set for rendering output
///
/// Controls which characters are used for drawing nodes and connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII characters only: - | + < > ^ v o
    /// Maximum compatibility
    Ascii,
    /// Unicode box-drawing characters: ─ │ ╭ ╮ ╰ ╯ ▶ ●
    #[default]
    Unicode,
}

impl CharacterSet {
    /// Returns true if this character set uses only ASCII
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }

    /// Get all valid character set names
    pub fn variants() -> &'static [&'static str] {
        &["ascii", "unicode"]
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

impl FromStr for CharacterSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(CharacterSet::Ascii),
            "unicode" => Ok(CharacterSet::Unicode),
            _ => Err(format!("Unknown character set: {}", s)),
        }
    }
}

/// Rendering options for a diagram frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    pub style: CharacterSet,
}

impl RenderConfig {
    pub fn new(style: CharacterSet) -> Self {
        Self { style }
    }
}
