//! Length unit conversion.
//!
//! ODF lengths follow the XSL definitions: a number immediately followed by a
//! two-letter unit suffix, e.g. `2.258cm` or `0.1665in`. Everything is
//! normalized to millimeters, the unit of the output drawing.

use crate::error::{OdsvgError, Result};

const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;
const PICAS_TO_POINTS: f64 = 12.0;
/// `px` is treated as an absolute unit at 96 per inch, matching SVG.
const PIXELS_PER_INCH: f64 = 96.0;

/// A length unit accepted in ODF length attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Centimeter,
    Millimeter,
    Inch,
    Point,
    Pica,
    Pixel,
    /// Not font-relative here: converted with the pixel factor.
    Em,
}

impl LengthUnit {
    /// Look up a unit by its two-letter suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "cm" => Some(Self::Centimeter),
            "mm" => Some(Self::Millimeter),
            "in" => Some(Self::Inch),
            "pt" => Some(Self::Point),
            "pc" => Some(Self::Pica),
            "px" => Some(Self::Pixel),
            "em" => Some(Self::Em),
            _ => None,
        }
    }

    /// Millimeters per one of this unit.
    pub fn mm_factor(self) -> f64 {
        match self {
            Self::Centimeter => 10.0,
            Self::Millimeter => 1.0,
            Self::Inch => MM_PER_INCH,
            Self::Point => MM_PER_INCH / POINTS_PER_INCH,
            Self::Pica => PICAS_TO_POINTS * MM_PER_INCH / POINTS_PER_INCH,
            Self::Pixel | Self::Em => MM_PER_INCH / PIXELS_PER_INCH,
        }
    }
}

/// Split a length like `"1.5cm"` into its number and unit.
pub fn parse_length(value: &str) -> Result<(f64, LengthUnit)> {
    let trimmed = value.trim();
    let split = trimmed
        .len()
        .checked_sub(2)
        .filter(|&idx| trimmed.is_char_boundary(idx))
        .ok_or_else(|| OdsvgError::MalformedUnit(value.to_string()))?;
    let (number, suffix) = trimmed.split_at(split);

    let unit = LengthUnit::from_suffix(suffix)
        .ok_or_else(|| OdsvgError::MalformedUnit(value.to_string()))?;
    let number: f64 = number
        .trim()
        .parse()
        .map_err(|_| OdsvgError::MalformedUnit(value.to_string()))?;
    if !number.is_finite() {
        return Err(OdsvgError::MalformedUnit(value.to_string()));
    }

    Ok((number, unit))
}

/// Convert a length with a unit suffix to millimeters.
///
/// # Errors
/// Returns [`OdsvgError::MalformedUnit`] when the suffix is missing or unknown,
/// or the numeric part does not parse.
pub fn convert_to_mm(value: &str) -> Result<f64> {
    let (number, unit) = parse_length(value)?;
    Ok(number * unit.mm_factor())
}

/// Convert millimeters to typographic points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}
