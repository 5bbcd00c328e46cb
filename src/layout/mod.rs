//! Layout engine for turning a parsed table into positioned geometry.
//!
//! This module handles:
//! - Expanding column/row definitions into per-index widths and heights
//! - Choosing the print window and clipping column spans against it
//! - Anchoring, wrapping and stacking cell text

mod grid;
mod text;
mod window;

pub use grid::{ColumnSpec, GridGeometry, RowSpec};
pub use text::{
    chars_per_line, wrap_words, BoxAlignment, CellRect, HorizontalAnchor, TextFormat, TextLayout,
    VerticalAnchor,
};
pub use window::{AxisPosition, PrintWindow, SpanClip};
