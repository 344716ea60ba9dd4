//! Character grid that diagrams are painted onto
//!
//! The canvas grows on demand and remembers which layer painted each cell, so
//! output stages (such as the CLI colouriser) can tell connectors from nodes.

use unicode_width::UnicodeWidthChar;

use super::GlyphRun;

/// Which part of the diagram painted a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Connector,
    Node,
}

/// A single canvas cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub layer: Option<Layer>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        layer: None,
    };

    /// Right half of a double-width glyph; skipped on output
    const CONTINUATION: char = '\0';

    pub fn is_continuation(&self) -> bool {
        self.glyph == Self::CONTINUATION
    }
}

/// Canvas representing a character grid for diagram rendering
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
}

impl Canvas {
    /// Create a new canvas with the specified dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![Cell::BLANK; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ensure the canvas is at least the specified size, expanding if needed
    pub fn ensure_size(&mut self, min_width: usize, min_height: usize) {
        if min_width > self.width {
            for row in &mut self.grid {
                row.resize(min_width, Cell::BLANK);
            }
            self.width = min_width;
        }
        if min_height > self.height {
            let extra_rows = min_height - self.height;
            self.grid
                .extend((0..extra_rows).map(|_| vec![Cell::BLANK; self.width]));
            self.height = min_height;
        }
    }

    /// Set a character at the specified position
    pub fn set_char(&mut self, x: usize, y: usize, glyph: char, layer: Layer) {
        self.ensure_size(x + 1, y + 1);
        self.grid[y][x] = Cell {
            glyph,
            layer: Some(layer),
        };
    }

    /// Cell at the given position; blank outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::BLANK)
    }

    /// Paint a glyph run, translating grid points by `-offset`
    ///
    /// Cells that land left of or above the canvas are dropped.
    pub fn paint(&mut self, run: &GlyphRun, offset: (i32, i32), layer: Layer) {
        for cell in run.cells() {
            let (x, y) = (cell.x - offset.0, cell.y - offset.1);
            if x >= 0 && y >= 0 {
                self.set_char(x as usize, y as usize, run.glyph, layer);
            }
        }
    }

    /// Blank a rectangle while claiming it for `layer`
    pub fn fill(&mut self, x: usize, y: usize, width: usize, height: usize, layer: Layer) {
        for row in y..y + height {
            for col in x..x + width {
                self.set_char(col, row, ' ', layer);
            }
        }
    }

    /// Draw text at the specified position (left-aligned)
    ///
    /// Double-width characters take two cells.
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str, layer: Layer) {
        let mut col = x;
        for c in text.chars() {
            let width = c.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            self.set_char(col, y, c, layer);
            if width == 2 {
                self.set_char(col + 1, y, Cell::CONTINUATION, layer);
            }
            col += width;
        }
    }

    /// Iterate rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows: Vec<String> = self
            .rows()
            .map(|row| {
                let s: String = row
                    .iter()
                    .filter(|cell| !cell.is_continuation())
                    .map(|cell| cell.glyph)
                    .collect();
                s.trim_end().to_string()
            })
            .collect();

        // Trim empty rows from top and bottom
        while rows.first().is_some_and(|row| row.is_empty()) {
            rows.remove(0);
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        write!(f, "{}", rows.join("\n"))
    }
}
