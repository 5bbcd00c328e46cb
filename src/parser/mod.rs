//! Main ODS parser
//!
//! Opens the OpenDocument zip archive and reads the parts the renderer needs:
//! style definitions from `styles.xml` and `content.xml`, and the first table
//! from `content.xml`.

pub(crate) mod styles;
pub(crate) mod table;

use quick_xml::Reader;
use std::io::{BufReader, Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{OdsvgError, Result};
use crate::types::{Document, StyleTable};

use styles::parse_styles;
use table::parse_first_table;

const STYLES_PART: &str = "styles.xml";
const CONTENT_PART: &str = "content.xml";

/// Read styles from one archive part into `styles`.
///
/// Returns `false` if the part does not exist.
fn read_styles_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
    styles: &mut StyleTable,
) -> Result<bool> {
    let file = match archive.by_name(path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);
    parse_styles(&mut xml, styles)?;
    Ok(true)
}

/// Parse an ODS file from bytes.
///
/// # Errors
/// Fails if the archive or its XML is malformed, `content.xml` is missing, or
/// the content holds no table.
pub fn parse(data: &[u8]) -> Result<Document> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)?;

    // Common styles first so automatic styles of the same name override them
    let mut styles = StyleTable::new();
    if !read_styles_part(&mut archive, STYLES_PART, &mut styles)? {
        log::debug!("{STYLES_PART} not present, using automatic styles only");
    }
    if !read_styles_part(&mut archive, CONTENT_PART, &mut styles)? {
        return Err(ZipError::FileNotFound.into());
    }

    let file = archive.by_name(CONTENT_PART)?;
    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);
    let table = parse_first_table(&mut xml)?.ok_or(OdsvgError::MissingTable)?;

    log::debug!(
        "parsed table {:?}: {} column defs, {} row defs, {} styles",
        table.name,
        table.columns.len(),
        table.rows.len(),
        styles.len()
    );

    Ok(Document { styles, table })
}
