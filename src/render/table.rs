//! Walks the table row by row and cell by cell, clipping against the print
//! window and handing every visible cell to a [`RenderBackend`].

use serde::Serialize;

use crate::error::Result;
use crate::layout::{
    AxisPosition, CellRect, GridGeometry, PrintWindow, SpanClip, TextFormat, TextLayout,
};
use crate::options::RenderOptions;
use crate::styles::{resolve_styles, StyleLookup};
use crate::types::{CellDef, Document};

use super::RenderBackend;

/// Drawing position in canvas mm.
///
/// `row_end` is where the last finished row stopped; the canvas width is
/// taken from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub x: f64,
    pub y: f64,
    pub row_end: f64,
}

impl RenderCursor {
    pub fn new(margin: f64) -> Self {
        Self {
            x: margin,
            y: margin,
            row_end: margin,
        }
    }

    /// Step right past a cell of `width`.
    #[must_use]
    pub fn advance(self, width: f64) -> Self {
        Self {
            x: self.x + width,
            ..self
        }
    }

    /// Move to the start of the next row, `height` further down.
    #[must_use]
    pub fn next_row(self, height: f64, margin: f64) -> Self {
        Self {
            x: margin,
            y: self.y + height,
            row_end: self.x,
        }
    }
}

/// Counters of one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    pub rows: u64,
    pub cells: u64,
    pub texts: u64,
    pub width: f64,
    pub height: f64,
}

/// Render the document's table onto `backend`.
///
/// The oversized-grid guard runs before anything is drawn.
///
/// # Errors
/// - [`crate::error::OdsvgError::OversizedGrid`] for a huge grid without print range.
/// - [`crate::error::OdsvgError::MalformedUnit`] for unreadable widths, heights or font sizes.
/// - [`crate::error::OdsvgError::CellRef`] for a malformed print range.
pub fn render_table<B: RenderBackend>(
    doc: &Document,
    options: &RenderOptions,
    backend: &mut B,
) -> Result<RenderStats> {
    let table = &doc.table;
    let window = PrintWindow::resolve(table, options.cell_limit)?;

    let mut stats = RenderStats::default();
    let mut cursor = RenderCursor::new(options.margin);

    if let Some(window) = window {
        let grid = GridGeometry::build(table, &doc.styles, options, Some(&window))?;
        log::debug!(
            "grid expanded to {} columns ({}mm) x {} rows ({}mm)",
            grid.columns.len(),
            grid.total_width(),
            grid.rows.len(),
            grid.total_height()
        );
        let resolved = resolve_styles(&doc.styles, &table.style_relations());
        let walker = TableWalker {
            grid: &grid,
            styles: StyleLookup::new(&resolved),
            window: &window,
            options,
        };
        log::debug!(
            "rendering table {:?}: {} x {} declared, window rows {}..={} cols {}..={}",
            table.name,
            table.row_count(),
            table.column_count(),
            window.min_row,
            window.max_row,
            window.min_col,
            window.max_col
        );
        cursor = walker.walk(doc, backend, cursor, &mut stats)?;
    } else {
        log::debug!("table {:?} is empty, nothing to render", table.name);
    }

    stats.width = cursor.row_end + options.margin;
    stats.height = cursor.y + options.margin;
    backend.finish(stats.width, stats.height);

    log::debug!(
        "rendered {} rows, {} cells, {} texts on {}mm x {}mm",
        stats.rows,
        stats.cells,
        stats.texts,
        stats.width,
        stats.height
    );
    Ok(stats)
}

struct TableWalker<'g, 's> {
    grid: &'g GridGeometry<'g>,
    styles: StyleLookup<'s>,
    window: &'g PrintWindow,
    options: &'g RenderOptions,
}

impl TableWalker<'_, '_> {
    fn walk<B: RenderBackend>(
        &self,
        doc: &Document,
        backend: &mut B,
        mut cursor: RenderCursor,
        stats: &mut RenderStats,
    ) -> Result<RenderCursor> {
        let mut tri: u32 = 0;

        'rows: for row in &doc.table.rows {
            // Whole runs of rows above the window are skipped at once
            let run_end = tri.saturating_add(row.repeat);
            if run_end <= self.window.min_row {
                tri = run_end;
                continue;
            }

            for _ in 0..row.repeat {
                match self.window.row_position(tri) {
                    AxisPosition::Before => {}
                    AxisPosition::Past => break 'rows,
                    AxisPosition::Inside => {
                        let height = self.grid.row_height(tri);
                        cursor = self.row(&row.cells, height, backend, cursor, stats)?;
                        cursor = cursor.next_row(height, self.options.margin);
                        stats.rows += 1;
                    }
                }
                tri = tri.saturating_add(1);
            }
        }

        Ok(cursor)
    }

    fn row<B: RenderBackend>(
        &self,
        cells: &[CellDef],
        height: f64,
        backend: &mut B,
        mut cursor: RenderCursor,
        stats: &mut RenderStats,
    ) -> Result<RenderCursor> {
        let mut tdi: u32 = 0;

        for cell in cells {
            let span = cell.column_span.max(1);
            for _ in 0..cell.repeat {
                let (start, end) = match self.window.clip_span(tdi, span) {
                    SpanClip::Skip => {
                        tdi = tdi.saturating_add(span);
                        continue;
                    }
                    SpanClip::Stop => return Ok(cursor),
                    SpanClip::Visible { start, end } => (start, end),
                };

                let rect = CellRect {
                    x: cursor.x,
                    y: cursor.y,
                    width: self.grid.span_width(start, end),
                    height,
                };
                backend.draw_cell(&rect);
                stats.cells += 1;

                if cell.has_text() {
                    // An unnamed, undefined or empty cell style defers to the column
                    let cell_style = self.styles.get(cell.style_name.as_deref());
                    let style = if cell_style.is_empty() {
                        self.styles.get(self.grid.column_style(tdi))
                    } else {
                        cell_style
                    };
                    let format = TextFormat::from_style(style, self.options)?;
                    let layout = TextLayout::new(&cell.paragraphs, &format, &rect, self.options);
                    backend.draw_text(&layout, &format);
                    stats.texts += 1;
                }

                cursor = cursor.advance(rect.width);
                tdi = tdi.saturating_add(span);
            }
        }

        Ok(cursor)
    }
}
