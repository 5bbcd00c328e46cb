//! Utilities for parsing A1-style cell references and ODF print ranges.

use crate::error::{OdsvgError, Result};

/// Convert column letters to a 1-based column number: `"A" -> 1`, `"AA" -> 27`.
///
/// Non-letter characters are ignored, so `"$B"` is column 2.
pub fn col_to_index(col: &str) -> u32 {
    let mut num: u32 = 0;
    for ch in col.chars() {
        if ch.is_ascii_alphabetic() {
            let upper = ch.to_ascii_uppercase();
            num = num
                .saturating_mul(26)
                .saturating_add(upper as u32 - 'A' as u32 + 1);
        }
    }
    num
}

/// Parse a cell reference like `"D10"` into a 0-based `(row, col)` pair.
///
/// `$` markers are skipped.
///
/// # Errors
/// Returns [`OdsvgError::CellRef`] if the reference lacks letters or digits,
/// has digits before letters, or names row 0.
pub fn cell_to_rowcol(cell: &str) -> Result<(u32, u32)> {
    let cleaned: String = cell.trim().chars().filter(|&c| c != '$').collect();
    let digits_at = cleaned
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| OdsvgError::CellRef(cell.to_string()))?;
    let (letters, digits) = cleaned.split_at(digits_at);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(OdsvgError::CellRef(cell.to_string()));
    }
    let row: u32 = digits
        .parse()
        .map_err(|_| OdsvgError::CellRef(cell.to_string()))?;
    if row == 0 {
        return Err(OdsvgError::CellRef(cell.to_string()));
    }

    Ok((row - 1, col_to_index(letters) - 1))
}

/// Strip the sheet qualifier from an ODF cell address: `"$Sheet1.$B$2" -> "$B$2"`.
///
/// Sheet names may themselves contain dots, so the split happens at the last one.
fn strip_sheet(address: &str) -> &str {
    address
        .rsplit_once('.')
        .map_or(address, |(_, cell)| cell)
}

/// Parse an ODF range address like `"Sheet1.A1:Sheet1.D10"` into
/// `((min_row, min_col), (max_row, max_col))`, all 0-based.
///
/// A single cell address yields a one-cell range.
pub fn parse_range_address(range: &str) -> Result<((u32, u32), (u32, u32))> {
    let (start, end) = range.split_once(':').unwrap_or((range, range));
    let start = cell_to_rowcol(strip_sheet(start))?;
    let end = cell_to_rowcol(strip_sheet(end))?;
    Ok((start, end))
}

/// Parse the `table:print-ranges` attribute.
///
/// The attribute is a whitespace-separated list of range addresses. Only the
/// first range is honored; the rest are reported and dropped.
pub fn parse_print_range(print_ranges: &str) -> Result<Option<((u32, u32), (u32, u32))>> {
    let mut ranges = print_ranges.split_whitespace();
    let Some(first) = ranges.next() else {
        return Ok(None);
    };
    let ignored = ranges.count();
    if ignored > 0 {
        log::warn!("print range {first:?} used, {ignored} further print range(s) ignored");
    }
    parse_range_address(first).map(Some)
}
