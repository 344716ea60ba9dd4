//! Terminal colorization for rendered frames
//!
//! Applies ANSI escape codes using crossterm. Colours follow the canvas layer
//! each cell was painted on, so node borders that share glyphs with
//! connectors are left alone.

use crossterm::style::{Color, Stylize};
use junction::{Cell, Frame, Layer};

/// Colour for a connector glyph
///
/// - Start markers: Green
/// - Arrowheads: Yellow
/// - Lines and elbows: Cyan
fn connector_color(glyph: char) -> Color {
    match glyph {
        '●' | 'o' => Color::Green,
        '▲' | '▼' | '◀' | '▶' | '^' | 'v' | '<' | '>' => Color::Yellow,
        _ => Color::Cyan,
    }
}

fn paint(cell: &Cell) -> String {
    match cell.layer {
        Some(Layer::Connector) if cell.glyph != ' ' => {
            format!("{}", cell.glyph.to_string().with(connector_color(cell.glyph)))
        }
        _ => cell.glyph.to_string(),
    }
}

/// Colorize a frame, trimming blank edges the same way its `Display` does
pub fn colorize_frame(frame: &Frame) -> String {
    let rows: Vec<Vec<&Cell>> = frame
        .canvas()
        .rows()
        .map(|row| {
            let mut cells: Vec<&Cell> = row.iter().filter(|c| !c.is_continuation()).collect();
            while cells.last().is_some_and(|c| c.glyph == ' ') {
                cells.pop();
            }
            cells
        })
        .collect();

    let first = rows.iter().position(|row| !row.is_empty());
    let last = rows.iter().rposition(|row| !row.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };

    rows[first..=last]
        .iter()
        .map(|row| row.iter().map(|cell| paint(cell)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
