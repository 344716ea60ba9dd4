//! Core building blocks for connector diagrams
//!
//! Geometry and routing are pure; rendering turns routed segments into glyph
//! runs; composition paints them, together with node boxes, onto a canvas.

mod box_drawing;
mod canvas;
mod diagram;
mod error;
mod geometry;
pub mod logging;
mod renderer;
mod routing;
mod segment;
mod types;

pub use box_drawing::*;
pub use canvas::*;
pub use diagram::*;
pub use error::*;
pub use geometry::*;
pub use logging::*;
pub use renderer::*;
pub use routing::*;
pub use segment::*;
pub use types::*;
