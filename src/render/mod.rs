//! Rendering of the parsed table.
//!
//! - `table`: walks rows and cells and clips them to the print window
//! - `backend`: the drawing interface the walker talks to
//! - `svg`: the in-memory SVG canvas

pub mod backend;
pub mod svg;
pub mod table;

pub use backend::RenderBackend;
pub use svg::{SvgCanvas, SvgElement};
pub use table::{render_table, RenderCursor, RenderStats};
