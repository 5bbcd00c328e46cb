//! Per-index column widths and row heights in millimeters.
//!
//! Column and row definitions compress runs of identical entries with a
//! repeat count; the builder expands them into one entry per physical index.

use serde::Serialize;

use crate::error::Result;
use crate::options::RenderOptions;
use crate::styles::StyleLookup;
use crate::types::{StyleTable, TableDef};
use crate::units::convert_to_mm;

use super::PrintWindow;

/// One physical column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec<'a> {
    /// Width in mm.
    pub width: f64,
    /// Style that formats text of cells without a style of their own.
    pub style: Option<&'a str>,
}

/// One physical row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSpec<'a> {
    /// Height in mm.
    pub height: f64,
    /// Parsed for inheritance only; cell formatting never consults row styles.
    pub style: Option<&'a str>,
}

/// Expanded grid geometry of a table.
#[derive(Debug, Clone, Serialize)]
pub struct GridGeometry<'a> {
    pub columns: Vec<ColumnSpec<'a>>,
    pub rows: Vec<RowSpec<'a>>,
    default_column_width: f64,
    default_row_height: f64,
}

/// Convert the `key` length of a style, or fall back to `default`.
fn style_length(style: &crate::types::StyleProps, key: &str, default: f64) -> Result<f64> {
    style.get(key).map_or(Ok(default), convert_to_mm)
}

impl<'a> GridGeometry<'a> {
    /// Expand the table's column and row definitions.
    ///
    /// Geometry reads `column-width` / `row-height` from the raw (unresolved)
    /// styles. With a `window`, expansion stops past its last row and column:
    /// nothing beyond is ever rendered.
    ///
    /// # Errors
    /// Returns [`crate::error::OdsvgError::MalformedUnit`] for a width or height
    /// with an unknown unit.
    pub fn build(
        table: &'a TableDef,
        styles: &StyleTable,
        options: &RenderOptions,
        window: Option<&PrintWindow>,
    ) -> Result<Self> {
        let lookup = StyleLookup::new(styles);
        let column_cap = window.map_or(u64::MAX, |w| u64::from(w.max_col) + 1);
        let row_cap = window.map_or(u64::MAX, |w| u64::from(w.max_row) + 1);

        let mut columns = Vec::new();
        for col in &table.columns {
            let remaining = column_cap.saturating_sub(columns.len() as u64);
            if remaining == 0 {
                break;
            }
            let style = lookup.get(col.style_name.as_deref());
            let width = style_length(style, "column-width", options.default_column_width)?;
            let count = remaining.min(u64::from(col.repeat));
            columns.extend((0..count).map(|_| ColumnSpec {
                width,
                style: col.text_style(),
            }));
        }

        let mut rows = Vec::new();
        for row in &table.rows {
            let remaining = row_cap.saturating_sub(rows.len() as u64);
            if remaining == 0 {
                break;
            }
            let style = lookup.get(row.style_name.as_deref());
            let height = style_length(style, "row-height", options.default_row_height)?;
            let count = remaining.min(u64::from(row.repeat));
            rows.extend((0..count).map(|_| RowSpec {
                height,
                style: row.style_name.as_deref(),
            }));
        }

        Ok(Self {
            columns,
            rows,
            default_column_width: options.default_column_width,
            default_row_height: options.default_row_height,
        })
    }

    /// Width of column `idx`; undeclared columns get the default width.
    pub fn column_width(&self, idx: u32) -> f64 {
        self.columns
            .get(idx as usize)
            .map_or(self.default_column_width, |c| c.width)
    }

    /// Sum of widths over the inclusive column range `start..=end`.
    pub fn span_width(&self, start: u32, end: u32) -> f64 {
        (start..=end).map(|idx| self.column_width(idx)).sum()
    }

    /// Height of row `idx`; undeclared rows get the default height.
    pub fn row_height(&self, idx: u32) -> f64 {
        self.rows
            .get(idx as usize)
            .map_or(self.default_row_height, |r| r.height)
    }

    pub fn column_style(&self, idx: u32) -> Option<&'a str> {
        self.columns.get(idx as usize).and_then(|c| c.style)
    }

    pub fn total_width(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    pub fn total_height(&self) -> f64 {
        self.rows.iter().map(|r| r.height).sum()
    }
}
