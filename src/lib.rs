//! odsvg - render a spreadsheet table as an SVG drawing
//!
//! Reads the first table of an OpenDocument spreadsheet (`.ods`) and lays it
//! out as a printable SVG measured in millimeters:
//! - Column widths and row heights from the document's styles
//! - Style inheritance from default cell styles
//! - Print range clipping, including cells spanning the window edge
//! - Nine-point text alignment, bold/italic, word wrapping
//!
//! # Usage
//!
//! ```no_run
//! odsvg::schedule("door_schedule.ods", "door_schedule.svg")?;
//! # Ok::<(), odsvg::error::OdsvgError>(())
//! ```

pub mod cell_ref;
pub mod error;
pub mod layout;
pub mod options;
pub mod parser;
pub mod render;
pub mod styles;
pub mod types;
pub mod units;
pub mod xml_helpers;

use std::path::Path;

use wasm_bindgen::prelude::*;

pub use error::{OdsvgError, Result};
pub use options::RenderOptions;
pub use render::{RenderStats, SvgCanvas};
pub use types::*;

/// Render the `.ods` file at `input` into an SVG file at `output`.
///
/// Nothing is written unless the whole drawing was produced.
///
/// # Errors
/// Fails if the input cannot be read or parsed, if the grid is too large to
/// render without a print range, if a length uses an unknown unit, or if the
/// output cannot be written.
pub fn schedule(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    schedule_with_options(input, output, &RenderOptions::default())
}

/// [`schedule`] with custom layout options.
///
/// # Errors
/// See [`schedule`].
pub fn schedule_with_options(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<()> {
    let data = std::fs::read(input.as_ref())?;
    let svg = render_ods(&data, options)?;
    std::fs::write(output.as_ref(), svg)?;
    log::debug!(
        "wrote {} from {}",
        output.as_ref().display(),
        input.as_ref().display()
    );
    Ok(())
}

/// Render raw `.ods` bytes into an SVG document string.
///
/// # Errors
/// Returns an error if the archive is invalid or the table cannot be laid out.
pub fn render_ods(data: &[u8], options: &RenderOptions) -> Result<String> {
    let doc = parser::parse(data)?;
    render_document(&doc, options)
}

/// Render an already parsed document into an SVG document string.
///
/// # Errors
/// Returns an error if the table cannot be laid out.
pub fn render_document(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut canvas = SvgCanvas::new(options);
    render::render_table(doc, options, &mut canvas)?;
    canvas.to_svg_string()
}

/// Render an `.ods` file with default options and return the SVG markup
///
/// # Errors
/// Returns an error if the file is invalid or cannot be laid out.
#[wasm_bindgen]
pub fn render_ods_to_svg(data: &[u8]) -> std::result::Result<String, JsValue> {
    render_ods(data, &RenderOptions::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
