//! Test fixtures for generating valid ODS files in memory.
//!
//! This module provides builders for creating ODS spreadsheets
//! programmatically, useful for testing the odsvg parser and renderer with
//! known inputs.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{OdsBuilder, RowBuilder, StyleBuilder};
//!
//! let ods = OdsBuilder::new()
//!     .style(StyleBuilder::column("co1").column_width("30mm"))
//!     .style(StyleBuilder::cell("ce1").bold().align("middle", "center"))
//!     .column(Some("co1"), 2)
//!     .row(RowBuilder::new().styled_cell("Hello", "ce1").empty())
//!     .build();
//!
//! let doc = odsvg::parser::parse(&ods).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::approx_constant,
    clippy::cast_possible_truncation,
    clippy::absurd_extreme_comparisons,
    clippy::cast_lossless
)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = concat!(
    r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
    r#"xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" "#,
    r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" "#,
    r#"xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" "#,
    r#"xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" "#,
    r#"office:version="1.3""#
);

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Style Builder
// ============================================================================

/// Builder for a `style:style` element.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    pub name: String,
    pub family: String,
    // Geometry
    pub column_width: Option<String>,
    pub row_height: Option<String>,
    // Cell properties
    pub vertical_align: Option<String>,
    pub wrap: bool,
    // Paragraph properties
    pub text_align: Option<String>,
    // Text properties
    pub bold: bool,
    pub italic: bool,
    pub font_size: Option<String>,
}

impl StyleBuilder {
    /// A `table-column` style.
    #[must_use]
    pub fn column(name: &str) -> Self {
        Self {
            name: name.to_string(),
            family: "table-column".to_string(),
            ..Self::default()
        }
    }

    /// A `table-row` style.
    #[must_use]
    pub fn row(name: &str) -> Self {
        Self {
            name: name.to_string(),
            family: "table-row".to_string(),
            ..Self::default()
        }
    }

    /// A `table-cell` style.
    #[must_use]
    pub fn cell(name: &str) -> Self {
        Self {
            name: name.to_string(),
            family: "table-cell".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn column_width(mut self, width: &str) -> Self {
        self.column_width = Some(width.to_string());
        self
    }

    #[must_use]
    pub fn row_height(mut self, height: &str) -> Self {
        self.row_height = Some(height.to_string());
        self
    }

    /// Set `style:vertical-align` and `fo:text-align`.
    #[must_use]
    pub fn align(mut self, vertical: &str, horizontal: &str) -> Self {
        self.vertical_align = Some(vertical.to_string());
        self.text_align = Some(horizontal.to_string());
        self
    }

    #[must_use]
    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: &str) -> Self {
        self.font_size = Some(size.to_string());
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = format!(
            r#"<style:style style:name="{}" style:family="{}">"#,
            escape(&self.name),
            self.family
        );

        if let Some(width) = &self.column_width {
            xml.push_str(&format!(
                r#"<style:table-column-properties fo:break-before="auto" style:column-width="{width}"/>"#
            ));
        }
        if let Some(height) = &self.row_height {
            xml.push_str(&format!(
                r#"<style:table-row-properties style:row-height="{height}" style:use-optimal-row-height="false"/>"#
            ));
        }

        let mut cell_props = String::new();
        if let Some(v) = &self.vertical_align {
            cell_props.push_str(&format!(r#" style:vertical-align="{v}""#));
        }
        if self.wrap {
            cell_props.push_str(r#" fo:wrap-option="wrap""#);
        }
        if !cell_props.is_empty() {
            xml.push_str(&format!("<style:table-cell-properties{cell_props}/>"));
        }

        if let Some(h) = &self.text_align {
            xml.push_str(&format!(r#"<style:paragraph-properties fo:text-align="{h}"/>"#));
        }

        let mut text_props = String::new();
        if self.bold {
            text_props.push_str(r#" fo:font-weight="bold""#);
        }
        if self.italic {
            text_props.push_str(r#" fo:font-style="italic""#);
        }
        if let Some(size) = &self.font_size {
            text_props.push_str(&format!(r#" fo:font-size="{size}""#));
        }
        if !text_props.is_empty() {
            xml.push_str(&format!("<style:text-properties{text_props}/>"));
        }

        xml.push_str("</style:style>");
        xml
    }
}

// ============================================================================
// Row Builder
// ============================================================================

#[derive(Debug, Clone, Default)]
struct CellSpec {
    style: Option<String>,
    paragraphs: Vec<String>,
    span: u32,
    repeat: u32,
}

/// Builder for a `table:table-row` and its cells.
#[derive(Debug, Clone, Default)]
pub struct RowBuilder {
    style: Option<String>,
    default_cell_style: Option<String>,
    repeat: u32,
    cells: Vec<CellSpec>,
}

impl RowBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            repeat: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn style(mut self, name: &str) -> Self {
        self.style = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn default_cell_style(mut self, name: &str) -> Self {
        self.default_cell_style = Some(name.to_string());
        self
    }

    /// `table:number-rows-repeated`.
    #[must_use]
    pub fn repeat(mut self, count: u32) -> Self {
        self.repeat = count;
        self
    }

    fn push(mut self, cell: CellSpec) -> Self {
        self.cells.push(cell);
        self
    }

    /// A cell with one paragraph of text.
    #[must_use]
    pub fn cell(self, text: &str) -> Self {
        self.paragraphs(&[text])
    }

    /// A cell with one paragraph per entry.
    #[must_use]
    pub fn paragraphs(self, lines: &[&str]) -> Self {
        self.push(CellSpec {
            paragraphs: lines.iter().map(|s| (*s).to_string()).collect(),
            span: 1,
            repeat: 1,
            ..CellSpec::default()
        })
    }

    #[must_use]
    pub fn styled_cell(self, text: &str, style: &str) -> Self {
        self.push(CellSpec {
            style: Some(style.to_string()),
            paragraphs: vec![text.to_string()],
            span: 1,
            repeat: 1,
        })
    }

    /// A cell spanning `span` columns, followed by its covered cells.
    #[must_use]
    pub fn spanned(self, text: &str, span: u32) -> Self {
        self.push(CellSpec {
            style: None,
            paragraphs: vec![text.to_string()],
            span,
            repeat: 1,
        })
    }

    #[must_use]
    pub fn empty(self) -> Self {
        self.empty_repeated(1)
    }

    /// `count` empty cells written as one repeated cell.
    #[must_use]
    pub fn empty_repeated(self, count: u32) -> Self {
        self.push(CellSpec {
            span: 1,
            repeat: count,
            ..CellSpec::default()
        })
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from("<table:table-row");
        if let Some(style) = &self.style {
            xml.push_str(&format!(r#" table:style-name="{}""#, escape(style)));
        }
        if let Some(style) = &self.default_cell_style {
            xml.push_str(&format!(
                r#" table:default-cell-style-name="{}""#,
                escape(style)
            ));
        }
        if self.repeat > 1 {
            xml.push_str(&format!(r#" table:number-rows-repeated="{}""#, self.repeat));
        }
        xml.push('>');

        for cell in &self.cells {
            xml.push_str("<table:table-cell");
            if let Some(style) = &cell.style {
                xml.push_str(&format!(r#" table:style-name="{}""#, escape(style)));
            }
            if cell.span > 1 {
                xml.push_str(&format!(
                    r#" table:number-columns-spanned="{}" table:number-rows-spanned="1""#,
                    cell.span
                ));
            }
            if cell.repeat > 1 {
                xml.push_str(&format!(
                    r#" table:number-columns-repeated="{}""#,
                    cell.repeat
                ));
            }
            if cell.paragraphs.is_empty() {
                xml.push_str("/>");
            } else {
                xml.push_str(r#" office:value-type="string">"#);
                for p in &cell.paragraphs {
                    xml.push_str(&format!("<text:p>{}</text:p>", escape(p)));
                }
                xml.push_str("</table:table-cell>");
            }
            if cell.span > 1 {
                xml.push_str(&format!(
                    r#"<table:covered-table-cell table:number-columns-repeated="{}"/>"#,
                    cell.span - 1
                ));
            }
        }

        xml.push_str("</table:table-row>");
        xml
    }
}

// ============================================================================
// ODS Builder
// ============================================================================

#[derive(Debug, Clone)]
struct ColumnSpec {
    style: Option<String>,
    default_cell_style: Option<String>,
    repeat: u32,
}

/// Builder for a complete `.ods` archive holding one table.
#[derive(Debug, Clone)]
pub struct OdsBuilder {
    sheet_name: String,
    /// Automatic styles, written to `content.xml`.
    styles: Vec<StyleBuilder>,
    /// Common styles, written to `styles.xml`.
    common_styles: Vec<StyleBuilder>,
    columns: Vec<ColumnSpec>,
    rows: Vec<RowBuilder>,
    print_range: Option<String>,
    with_styles_part: bool,
}

impl Default for OdsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OdsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            styles: Vec::new(),
            common_styles: Vec::new(),
            columns: Vec::new(),
            rows: Vec::new(),
            print_range: None,
            with_styles_part: true,
        }
    }

    #[must_use]
    pub fn sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = name.to_string();
        self
    }

    /// Add an automatic style (`content.xml`).
    #[must_use]
    pub fn style(mut self, style: StyleBuilder) -> Self {
        self.styles.push(style);
        self
    }

    /// Add a common style (`styles.xml`).
    #[must_use]
    pub fn common_style(mut self, style: StyleBuilder) -> Self {
        self.common_styles.push(style);
        self
    }

    /// Leave `styles.xml` out of the archive.
    #[must_use]
    pub fn without_styles_part(mut self) -> Self {
        self.with_styles_part = false;
        self
    }

    #[must_use]
    pub fn column(mut self, style: Option<&str>, repeat: u32) -> Self {
        self.columns.push(ColumnSpec {
            style: style.map(str::to_string),
            default_cell_style: None,
            repeat,
        });
        self
    }

    /// A column naming both its own style and a default cell style.
    #[must_use]
    pub fn column_with_default(
        mut self,
        style: Option<&str>,
        default_cell_style: &str,
        repeat: u32,
    ) -> Self {
        self.columns.push(ColumnSpec {
            style: style.map(str::to_string),
            default_cell_style: Some(default_cell_style.to_string()),
            repeat,
        });
        self
    }

    #[must_use]
    pub fn row(mut self, row: RowBuilder) -> Self {
        self.rows.push(row);
        self
    }

    /// Raw `table:print-ranges` value, e.g. `Sheet1.A1:Sheet1.D10`.
    #[must_use]
    pub fn print_range(mut self, range: &str) -> Self {
        self.print_range = Some(range.to_string());
        self
    }

    /// Render `content.xml`.
    pub fn content_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content {NAMESPACES}><office:automatic-styles>"#
        );
        for style in &self.styles {
            xml.push_str(&style.to_xml());
        }
        xml.push_str("</office:automatic-styles><office:body><office:spreadsheet>");

        xml.push_str(&format!(r#"<table:table table:name="{}""#, escape(&self.sheet_name)));
        if let Some(range) = &self.print_range {
            xml.push_str(&format!(r#" table:print-ranges="{}""#, escape(range)));
        }
        xml.push('>');

        for col in &self.columns {
            xml.push_str("<table:table-column");
            if let Some(style) = &col.style {
                xml.push_str(&format!(r#" table:style-name="{}""#, escape(style)));
            }
            if col.repeat > 1 {
                xml.push_str(&format!(
                    r#" table:number-columns-repeated="{}""#,
                    col.repeat
                ));
            }
            if let Some(style) = &col.default_cell_style {
                xml.push_str(&format!(
                    r#" table:default-cell-style-name="{}""#,
                    escape(style)
                ));
            }
            xml.push_str("/>");
        }
        for row in &self.rows {
            xml.push_str(&row.to_xml());
        }

        xml.push_str("</table:table></office:spreadsheet></office:body></office:document-content>");
        xml
    }

    /// Render `styles.xml`.
    pub fn styles_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><office:document-styles {NAMESPACES}><office:styles>"#
        );
        for style in &self.common_styles {
            xml.push_str(&style.to_xml());
        }
        xml.push_str("</office:styles></office:document-styles>");
        xml
    }

    /// Build the `.ods` archive bytes.
    pub fn build(self) -> Vec<u8> {
        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let stored = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let _ = zip.start_file("mimetype", stored);
        let _ = zip.write_all(b"application/vnd.oasis.opendocument.spreadsheet");

        let _ = zip.start_file("content.xml", options);
        let _ = zip.write_all(self.content_xml().as_bytes());

        if self.with_styles_part {
            let _ = zip.start_file("styles.xml", options);
            let _ = zip.write_all(self.styles_xml().as_bytes());
        }

        let _ = zip.start_file("META-INF/manifest.xml", options);
        let _ = zip.write_all(MANIFEST.as_bytes());

        zip.finish().unwrap().into_inner()
    }
}

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.3">
 <manifest:file-entry manifest:full-path="/" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/>
 <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
 <manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml"/>
</manifest:manifest>"#;

// ============================================================================
// Convenience constructors
// ============================================================================

/// `rows` x `cols` grid of 50mm x 6mm cells, optionally holding one text.
pub fn uniform_grid(rows: u32, cols: u32, text: Option<&str>) -> OdsBuilder {
    let mut builder = OdsBuilder::new()
        .style(StyleBuilder::column("co1").column_width("50mm"))
        .style(StyleBuilder::row("ro1").row_height("6mm"))
        .column(Some("co1"), cols);

    for r in 0..rows {
        let mut row = RowBuilder::new().style("ro1");
        match text {
            Some(t) if r == 0 => {
                row = row.cell(t);
                if cols > 1 {
                    row = row.empty_repeated(cols - 1);
                }
            }
            _ => row = row.empty_repeated(cols),
        }
        builder = builder.row(row);
    }
    builder
}

/// A single-cell table of the given column width holding `text` in style `ce1`.
pub fn single_cell(width: &str, text: &str, style: StyleBuilder) -> Vec<u8> {
    OdsBuilder::new()
        .style(StyleBuilder::column("co1").column_width(width))
        .style(StyleBuilder::row("ro1").row_height("6mm"))
        .style(style)
        .column(Some("co1"), 1)
        .row(RowBuilder::new().style("ro1").styled_cell(text, "ce1"))
        .build()
}
