use serde::Serialize;

use super::StyleTable;

/// A parsed ODS document: its named styles and the table to render.
#[derive(Debug, Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Raw (unresolved) styles from `styles.xml` and `content.xml`.
    pub styles: StyleTable,
    pub table: TableDef,
}

/// The first `table:table` of the spreadsheet.
#[derive(Debug, Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<RowDef>,
    /// Raw `table:print-ranges` attribute, e.g. `Sheet1.A1:Sheet1.D10`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_ranges: Option<String>,
}

impl TableDef {
    /// Number of physical columns after expanding repeat counts.
    pub fn column_count(&self) -> u64 {
        self.columns.iter().map(|c| u64::from(c.repeat)).sum()
    }

    /// Number of physical rows after expanding repeat counts.
    pub fn row_count(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.repeat)).sum()
    }

    /// `(child, parent)` style pairs: every column or row that names both its
    /// own style and a default cell style inherits from the latter.
    pub fn style_relations(&self) -> Vec<(&str, &str)> {
        let columns = self
            .columns
            .iter()
            .map(|c| (c.style_name.as_deref(), c.default_cell_style.as_deref()));
        let rows = self
            .rows
            .iter()
            .map(|r| (r.style_name.as_deref(), r.default_cell_style.as_deref()));

        columns
            .chain(rows)
            .filter_map(|pair| match pair {
                (Some(child), Some(parent)) => Some((child, parent)),
                _ => None,
            })
            .collect()
    }
}

/// A `table:table-column` definition (before repeat expansion).
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cell_style: Option<String>,
    pub repeat: u32,
}

impl ColumnDef {
    /// Style consulted for text formatting of cells without their own style.
    pub fn text_style(&self) -> Option<&str> {
        self.style_name
            .as_deref()
            .or(self.default_cell_style.as_deref())
    }
}

/// A `table:table-row` definition with its cells (before repeat expansion).
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cell_style: Option<String>,
    pub repeat: u32,
    pub cells: Vec<CellDef>,
}

/// A `table:table-cell`. Covered cells of a span are not represented.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CellDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    pub column_span: u32,
    /// `repeat > 1` stands for that many identical adjacent cells.
    pub repeat: u32,
    /// Text of each `text:p`, in order.
    pub paragraphs: Vec<String>,
}

impl CellDef {
    pub fn has_text(&self) -> bool {
        !self.paragraphs.is_empty()
    }
}

impl Default for CellDef {
    fn default() -> Self {
        Self {
            style_name: None,
            column_span: 1,
            repeat: 1,
            paragraphs: Vec::new(),
        }
    }
}
