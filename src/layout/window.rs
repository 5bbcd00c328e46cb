//! The print window: the rectangle of cell indices that gets rendered.

use serde::Serialize;

use crate::cell_ref::parse_print_range;
use crate::error::{OdsvgError, Result};
use crate::types::TableDef;

/// Inclusive, 0-based cell index bounds of the rendered area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintWindow {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

/// Where an index lies relative to the window along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Before,
    Inside,
    Past,
}

/// Outcome of clipping a column span against the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanClip {
    /// The whole span lies left of the window.
    Skip,
    /// The span starts right of the window; nothing further in the row is visible.
    Stop,
    /// Visible column range, inclusive.
    Visible { start: u32, end: u32 },
}

impl PrintWindow {
    /// Window for the table: its print range if it has one, otherwise the
    /// whole declared grid.
    ///
    /// Returns `None` when there is nothing to render (empty grid).
    ///
    /// # Errors
    /// - [`OdsvgError::OversizedGrid`] if there is no print range and the grid
    ///   holds `cell_limit` cells or more.
    /// - [`OdsvgError::CellRef`] if the print range is malformed.
    pub fn resolve(table: &TableDef, cell_limit: u64) -> Result<Option<Self>> {
        if let Some(ranges) = table.print_ranges.as_deref() {
            if let Some(((start_row, start_col), (end_row, end_col))) = parse_print_range(ranges)? {
                return Ok(Some(Self {
                    min_row: start_row.min(end_row),
                    min_col: start_col.min(end_col),
                    max_row: start_row.max(end_row),
                    max_col: start_col.max(end_col),
                }));
            }
        }
        Self::full_grid(table.row_count(), table.column_count(), cell_limit)
    }

    /// Window spanning a `rows` x `cols` grid, refused at `cell_limit` cells.
    pub fn full_grid(rows: u64, cols: u64, cell_limit: u64) -> Result<Option<Self>> {
        let cells = rows.saturating_mul(cols);
        if cells >= cell_limit {
            return Err(OdsvgError::OversizedGrid {
                rows,
                cols,
                cells,
                limit: cell_limit,
            });
        }
        if cells == 0 {
            return Ok(None);
        }
        let last = |n: u64| u32::try_from(n - 1).unwrap_or(u32::MAX);
        Ok(Some(Self {
            min_row: 0,
            min_col: 0,
            max_row: last(rows),
            max_col: last(cols),
        }))
    }

    pub fn row_position(&self, row: u32) -> AxisPosition {
        if row < self.min_row {
            AxisPosition::Before
        } else if row > self.max_row {
            AxisPosition::Past
        } else {
            AxisPosition::Inside
        }
    }

    /// Clip a cell covering `span` columns from `start` to the window's columns.
    pub fn clip_span(&self, start: u32, span: u32) -> SpanClip {
        let mut start = start;
        let mut end = start.saturating_add(span.max(1) - 1);

        if start < self.min_col {
            if end < self.min_col {
                return SpanClip::Skip;
            }
            start = self.min_col;
        }
        if start > self.max_col {
            return SpanClip::Stop;
        }
        if end > self.max_col {
            end = self.max_col;
        }

        SpanClip::Visible { start, end }
    }

    pub fn row_count(&self) -> u64 {
        u64::from(self.max_row - self.min_row) + 1
    }

    pub fn column_count(&self) -> u64 {
        u64::from(self.max_col - self.min_col) + 1
    }
}
