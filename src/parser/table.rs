//! Table parsing - reads the first `table:table` of `content.xml`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

use crate::error::Result;
use crate::types::{CellDef, ColumnDef, RowDef, TableDef};
use crate::xml_helpers::{attr_count_local, attr_string_local};

fn parse_column(e: &BytesStart) -> Result<ColumnDef> {
    Ok(ColumnDef {
        style_name: attr_string_local(e, b"style-name"),
        default_cell_style: attr_string_local(e, b"default-cell-style-name"),
        repeat: attr_count_local(e, b"number-columns-repeated", 1)?,
    })
}

fn parse_row(e: &BytesStart) -> Result<RowDef> {
    Ok(RowDef {
        style_name: attr_string_local(e, b"style-name"),
        default_cell_style: attr_string_local(e, b"default-cell-style-name"),
        repeat: attr_count_local(e, b"number-rows-repeated", 1)?,
        cells: Vec::new(),
    })
}

fn parse_cell(e: &BytesStart) -> Result<CellDef> {
    Ok(CellDef {
        style_name: attr_string_local(e, b"style-name"),
        column_span: attr_count_local(e, b"number-columns-spanned", 1)?,
        repeat: attr_count_local(e, b"number-columns-repeated", 1)?,
        paragraphs: Vec::new(),
    })
}

fn start_table(e: &BytesStart) -> TableDef {
    TableDef {
        name: attr_string_local(e, b"name").unwrap_or_default(),
        print_ranges: attr_string_local(e, b"print-ranges").filter(|r| !r.trim().is_empty()),
        ..TableDef::default()
    }
}

/// Characters contributed by inline `text:s`, `text:tab` and `text:line-break`.
fn inline_text(e: &BytesStart) -> Result<Option<String>> {
    Ok(match e.local_name().as_ref() {
        b"s" => {
            let count = attr_count_local(e, b"c", 1)?;
            Some(" ".repeat(count as usize))
        }
        b"tab" => Some("\t".to_string()),
        b"line-break" => Some("\n".to_string()),
        _ => None,
    })
}

/// Walks the table body, tracking the open row, cell and paragraph.
#[derive(Default)]
struct TableWalker {
    table: TableDef,
    row: Option<RowDef>,
    cell: Option<CellDef>,
    paragraph: Option<String>,
    /// Depth inside a subtree whose content is ignored (covered cells,
    /// annotations, nested tables).
    skip_depth: usize,
}

impl TableWalker {
    fn new(table: TableDef) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    fn open(&mut self, e: &BytesStart) -> Result<()> {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }
        match e.local_name().as_ref() {
            b"table-column" => self.table.columns.push(parse_column(e)?),
            b"table-row" => self.row = Some(parse_row(e)?),
            b"table-cell" if self.row.is_some() => self.cell = Some(parse_cell(e)?),
            b"covered-table-cell" | b"annotation" | b"table" => self.skip_depth = 1,
            b"p" if self.cell.is_some() => self.paragraph = Some(String::new()),
            _ => self.push_inline(e)?,
        }
        Ok(())
    }

    fn empty(&mut self, e: &BytesStart) -> Result<()> {
        if self.skip_depth > 0 {
            return Ok(());
        }
        match e.local_name().as_ref() {
            b"table-column" => self.table.columns.push(parse_column(e)?),
            b"table-row" => self.table.rows.push(parse_row(e)?),
            b"table-cell" => {
                if let Some(row) = self.row.as_mut() {
                    row.cells.push(parse_cell(e)?);
                }
            }
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.paragraphs.push(String::new());
                }
            }
            _ => self.push_inline(e)?,
        }
        Ok(())
    }

    fn push_inline(&mut self, e: &BytesStart) -> Result<()> {
        if let Some(paragraph) = self.paragraph.as_mut() {
            if let Some(text) = inline_text(e)? {
                paragraph.push_str(&text);
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.skip_depth == 0 {
            if let Some(paragraph) = self.paragraph.as_mut() {
                paragraph.push_str(text);
            }
        }
    }

    /// Returns `true` once the table element itself closes.
    fn close(&mut self, local_name: &[u8]) -> bool {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return false;
        }
        match local_name {
            b"p" => {
                if let (Some(paragraph), Some(cell)) = (self.paragraph.take(), self.cell.as_mut()) {
                    cell.paragraphs.push(paragraph);
                }
            }
            b"table-cell" => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.cells.push(cell);
                }
            }
            b"table-row" => {
                if let Some(row) = self.row.take() {
                    self.table.rows.push(row);
                }
            }
            b"table" => return true,
            _ => {}
        }
        false
    }
}

/// Parse the first `table:table` found in an ODF content part.
///
/// Returns `None` if the part contains no table. Parsing stops as soon as the
/// first table closes.
pub fn parse_first_table<R: BufRead>(xml: &mut Reader<R>) -> Result<Option<TableDef>> {
    let mut buf = Vec::new();
    let mut walker: Option<TableWalker> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match walker.as_mut() {
                Some(w) => w.open(e)?,
                None if e.local_name().as_ref() == b"table" => {
                    walker = Some(TableWalker::new(start_table(e)));
                }
                None => {}
            },
            Event::Empty(ref e) => match walker.as_mut() {
                Some(w) => w.empty(e)?,
                None if e.local_name().as_ref() == b"table" => return Ok(Some(start_table(e))),
                None => {}
            },
            Event::Text(ref t) => {
                if let Some(w) = walker.as_mut() {
                    w.text(&t.unescape()?);
                }
            }
            Event::CData(ref t) => {
                if let Some(w) = walker.as_mut() {
                    w.text(&String::from_utf8_lossy(t));
                }
            }
            Event::End(ref e) => {
                if let Some(w) = walker.as_mut() {
                    if w.close(e.local_name().as_ref()) {
                        return Ok(walker.map(|w| w.table));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(walker.map(|w| w.table))
}
