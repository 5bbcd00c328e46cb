//! Data types for the ODS schedule renderer.

mod document;
mod style;

pub use document::*;
pub use style::*;
