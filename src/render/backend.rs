//! Drawing backend trait for pluggable output formats.
//!
//! The table renderer walks the grid and hands every visible cell to a
//! `RenderBackend`; the backend owns the emitted nodes and the final canvas
//! size. [`crate::render::SvgCanvas`] is the SVG implementation.

use crate::layout::{CellRect, TextFormat, TextLayout};

pub trait RenderBackend {
    /// Draw the outlined background rectangle of one visible cell.
    fn draw_cell(&mut self, rect: &CellRect);

    /// Draw laid-out cell text.
    fn draw_text(&mut self, text: &TextLayout, format: &TextFormat);

    /// Fix the final canvas size in mm. Called once, after the last row.
    fn finish(&mut self, width: f64, height: f64);
}
