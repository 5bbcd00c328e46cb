//! Render configuration.
//!
//! Every layout constant lives here. `RenderOptions::default()` reproduces the
//! standard schedule look; callers can override single fields, e.g. from a
//! JSON file where absent keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default column width in mm when a column has no width of its own.
pub const DEFAULT_COLUMN_WIDTH: f64 = 50.0;

/// Default row height in mm when a row has no height of its own.
pub const DEFAULT_ROW_HEIGHT: f64 = 6.0;

/// Largest grid rendered without an explicit print range.
pub const DEFAULT_CELL_LIMIT: u64 = 10_000;

/// Layout and styling parameters of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Blank border around the table, in mm, on both axes.
    pub margin: f64,
    /// Distance between text and the cell edge it is aligned to, in mm.
    pub padding: f64,
    /// Rendered text size in mm for a cell at `base_font_size_pt`.
    pub font_size: f64,
    /// Point size that maps onto `font_size`; other sizes scale linearly.
    pub base_font_size_pt: f64,
    /// Estimated glyph width as a fraction of the font size, used for wrapping.
    pub char_width_ratio: f64,
    pub font_family: String,
    /// Stroke width of cell rectangles, in mm.
    pub stroke_width: f64,
    pub default_column_width: f64,
    pub default_row_height: f64,
    /// Cell count at which a grid without print range is refused.
    pub cell_limit: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 1.0,
            padding: 1.0,
            font_size: 4.13,
            base_font_size_pt: 12.0,
            char_width_ratio: 0.45,
            font_family: "OpenGost Type B TT".to_string(),
            stroke_width: 0.125,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            cell_limit: DEFAULT_CELL_LIMIT,
        }
    }
}

impl RenderOptions {
    /// Load options from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rendered text size in mm for a cell font of `size_pt` points.
    pub fn scaled_font_size(&self, size_pt: f64) -> f64 {
        size_pt / self.base_font_size_pt * self.font_size
    }

    /// Estimated width in mm of one character at `font_size` mm.
    pub fn char_width(&self, font_size: f64) -> f64 {
        font_size * self.char_width_ratio
    }
}
