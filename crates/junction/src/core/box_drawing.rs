//! Box drawing characters for nodes and connectors
//!
//! Every glyph lookup is an exhaustive match over the segment vocabulary, so
//! adding a terminal kind or elbow shape fails to compile until each
//! character set knows how to draw it.

use super::{CharacterSet, Direction, Orientation, TerminalKind};

/// Box drawing characters for node borders
#[derive(Debug, Clone, Copy)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxChars {
    /// Rounded rectangle, the node border
    pub fn rounded(style: CharacterSet) -> Self {
        match style {
            CharacterSet::Ascii => Self::ascii(),
            CharacterSet::Unicode => Self {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
        }
    }

    /// ASCII-only box characters
    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::rounded(CharacterSet::Unicode)
    }
}

/// Glyphs for the three connector segment kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorGlyphs {
    style: CharacterSet,
}

impl ConnectorGlyphs {
    pub fn new(style: CharacterSet) -> Self {
        Self { style }
    }

    pub fn style(&self) -> CharacterSet {
        self.style
    }

    /// Endpoint marker; end terminals point along the arrival direction
    pub fn terminal(&self, kind: TerminalKind) -> char {
        match (self.style, kind) {
            (CharacterSet::Unicode, TerminalKind::Start) => '●',
            (CharacterSet::Unicode, TerminalKind::Up) => '▲',
            (CharacterSet::Unicode, TerminalKind::Down) => '▼',
            (CharacterSet::Unicode, TerminalKind::Left) => '◀',
            (CharacterSet::Unicode, TerminalKind::Right) => '▶',
            (CharacterSet::Ascii, TerminalKind::Start) => 'o',
            (CharacterSet::Ascii, TerminalKind::Up) => '^',
            (CharacterSet::Ascii, TerminalKind::Down) => 'v',
            (CharacterSet::Ascii, TerminalKind::Left) => '<',
            (CharacterSet::Ascii, TerminalKind::Right) => '>',
        }
    }

    pub fn line(&self, direction: Direction) -> char {
        match (self.style, direction) {
            (CharacterSet::Unicode, Direction::Horizontal) => '─',
            (CharacterSet::Unicode, Direction::Vertical) => '│',
            (CharacterSet::Ascii, Direction::Horizontal) => '-',
            (CharacterSet::Ascii, Direction::Vertical) => '|',
        }
    }

    pub fn elbow(&self, orientation: Orientation) -> char {
        match (self.style, orientation) {
            (CharacterSet::Unicode, Orientation::NE) => '╰',
            (CharacterSet::Unicode, Orientation::NW) => '╯',
            (CharacterSet::Unicode, Orientation::SE) => '╭',
            (CharacterSet::Unicode, Orientation::SW) => '╮',
            (CharacterSet::Ascii, _) => '+',
        }
    }
}

impl Default for ConnectorGlyphs {
    fn default() -> Self {
        Self::new(CharacterSet::Unicode)
    }
}
