//! Structured error types for odsvg.
//!
//! Every failure aborts the whole render: there is no partial output mode.

/// All errors that can occur while parsing an ODS document or rendering it.
#[derive(Debug, thiserror::Error)]
pub enum OdsvgError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML attribute.
    #[error("XML attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The grid is too large to render without a print range.
    #[error(
        "refusing to build a table with {cells} cells ({rows} rows x {cols} cols); \
         the limit without a print range is {limit} cells. \
         Define a print range in the .ods file so the printed table has a reasonable size"
    )]
    OversizedGrid {
        rows: u64,
        cols: u64,
        cells: u64,
        limit: u64,
    },

    /// A length value with an unknown unit or unparseable number.
    #[error("Malformed length value: {0:?}")]
    MalformedUnit(String),

    /// Invalid cell reference in a print range.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// The document contains no table to render.
    #[error("Document contains no table")]
    MissingTable,

    /// General parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OdsvgError>;
