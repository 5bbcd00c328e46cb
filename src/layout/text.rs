//! Text placement inside a cell box.
//!
//! Text is anchored to one of nine points of the cell (inset by the padding)
//! and rendered with the matching SVG `text-anchor` / `dominant-baseline`
//! hints, so no text measurement is needed for alignment. Wrapping estimates
//! line capacity from a fixed character width.

use std::fmt;

use crate::error::{OdsvgError, Result};
use crate::options::RenderOptions;
use crate::types::StyleProps;
use crate::units::{convert_to_mm, mm_to_pt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Middle,
    Right,
}

impl VerticalAnchor {
    /// Map an ODF `style:vertical-align` value; `automatic` and unknown
    /// values sit at the bottom.
    pub fn from_odf(value: Option<&str>) -> Self {
        match value {
            Some("top") => Self::Top,
            Some("middle") => Self::Middle,
            _ => Self::Bottom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl HorizontalAnchor {
    /// Map an ODF `fo:text-align` value; `start`, `justify`, and unset
    /// values align left.
    pub fn from_odf(value: Option<&str>) -> Self {
        match value {
            Some("center" | "middle") => Self::Middle,
            Some("end" | "right") => Self::Right,
            _ => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

/// Where text sits inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxAlignment {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
}

impl Default for BoxAlignment {
    fn default() -> Self {
        Self {
            vertical: VerticalAnchor::Bottom,
            horizontal: HorizontalAnchor::Left,
        }
    }
}

impl BoxAlignment {
    pub fn from_style(style: &StyleProps) -> Self {
        Self {
            vertical: VerticalAnchor::from_odf(style.get("vertical-align")),
            horizontal: HorizontalAnchor::from_odf(style.get("text-align")),
        }
    }

    pub fn is_center(&self) -> bool {
        self.vertical == VerticalAnchor::Middle && self.horizontal == HorizontalAnchor::Middle
    }

    /// SVG `text-anchor` for the horizontal anchor.
    pub fn text_anchor(&self) -> &'static str {
        match self.horizontal {
            HorizontalAnchor::Left => "start",
            HorizontalAnchor::Middle => "middle",
            HorizontalAnchor::Right => "end",
        }
    }

    /// SVG `dominant-baseline` for the vertical anchor.
    pub fn dominant_baseline(&self) -> &'static str {
        match self.vertical {
            VerticalAnchor::Top => "hanging",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Bottom => "baseline",
        }
    }

    /// The anchor point inside `cell`, inset by `padding` from aligned edges.
    pub fn anchor_point(&self, cell: &CellRect, padding: f64) -> (f64, f64) {
        let x = match self.horizontal {
            HorizontalAnchor::Left => cell.x + padding,
            HorizontalAnchor::Middle => cell.x + cell.width / 2.0,
            HorizontalAnchor::Right => cell.x + cell.width - padding,
        };
        let y = match self.vertical {
            VerticalAnchor::Top => cell.y + padding,
            VerticalAnchor::Middle => cell.y + cell.height / 2.0,
            VerticalAnchor::Bottom => cell.y + cell.height - padding,
        };
        (x, y)
    }
}

/// `"center"` when centered on both axes, else `"{vertical}-{horizontal}"`.
impl fmt::Display for BoxAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_center() {
            f.write_str("center")
        } else {
            write!(f, "{}-{}", self.vertical.as_str(), self.horizontal.as_str())
        }
    }
}

/// Visible rectangle of a cell in canvas millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Text formatting derived from a cell's resolved style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFormat {
    pub alignment: BoxAlignment,
    pub wrap: bool,
    pub bold: bool,
    pub italic: bool,
    /// Rendered size in mm.
    pub font_size: f64,
}

impl TextFormat {
    /// # Errors
    /// Returns [`OdsvgError::MalformedUnit`] for an unreadable `font-size`.
    pub fn from_style(style: &StyleProps, options: &RenderOptions) -> Result<Self> {
        let size_pt = match style.get("font-size") {
            None => options.base_font_size_pt,
            Some(value) => font_size_pt(value, options.base_font_size_pt)?,
        };
        Ok(Self {
            alignment: BoxAlignment::from_style(style),
            wrap: style.get("wrap-option") == Some("wrap"),
            bold: style.get("font-weight") == Some("bold"),
            italic: style.get("font-style") == Some("italic"),
            font_size: options.scaled_font_size(size_pt),
        })
    }
}

/// Read an ODF font size as points; percentages scale `base_pt`.
fn font_size_pt(value: &str, base_pt: f64) -> Result<f64> {
    if let Some(percent) = value.trim().strip_suffix('%') {
        let percent: f64 = percent
            .trim()
            .parse()
            .map_err(|_| OdsvgError::MalformedUnit(value.to_string()))?;
        return Ok(base_pt * percent / 100.0);
    }
    Ok(mm_to_pt(convert_to_mm(value)?))
}

/// How many characters of `char_width` mm fit into `cell_width` mm (at least 1).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn chars_per_line(cell_width: f64, char_width: f64) -> usize {
    if char_width <= 0.0 || !char_width.is_finite() {
        return usize::MAX;
    }
    let capacity = (cell_width / char_width).floor();
    if capacity.is_nan() || capacity < 1.0 {
        1
    } else if capacity >= usize::MAX as f64 {
        usize::MAX
    } else {
        capacity as usize
    }
}

/// Split a word after each hyphen that joins two word characters:
/// `"FIRE-RATED"` -> `["FIRE-", "RATED"]`.
fn hyphen_pieces(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = word.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let joins_words = ch == '-'
            && prev.is_some_and(char::is_alphanumeric)
            && chars.peek().is_some_and(|&(_, next)| next.is_alphabetic());
        if joins_words {
            let end = idx + ch.len_utf8();
            pieces.push(&word[start..end]);
            start = end;
        }
        prev = Some(ch);
    }
    pieces.push(&word[start..]);
    pieces
}

/// Greedy word wrap to at most `width` characters per line.
///
/// Lines break between words or after a hyphen inside a word, never
/// elsewhere: a piece longer than `width` gets a line of its own. Runs of
/// whitespace collapse; blank input yields no lines.
pub fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        for (i, piece) in hyphen_pieces(word).into_iter().enumerate() {
            let piece_len = piece.chars().count();
            // Pieces of one word join without a space
            let gap = usize::from(i == 0);
            if current.is_empty() {
                current.push_str(piece);
                current_len = piece_len;
            } else if current_len + gap + piece_len <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(piece);
                current_len += gap + piece_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(piece);
                current_len = piece_len;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Laid-out text of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Anchor point in canvas mm; the baseline of the bottom line.
    pub anchor: (f64, f64),
    /// Lines top to bottom, uppercased.
    pub lines: Vec<String>,
    /// Rendered as a container of stacked lines rather than a single text node.
    pub stacked: bool,
}

impl TextLayout {
    /// Lay out `paragraphs` inside `cell`.
    pub fn new(
        paragraphs: &[String],
        format: &TextFormat,
        cell: &CellRect,
        options: &RenderOptions,
    ) -> Self {
        let anchor = format.alignment.anchor_point(cell, options.padding);
        let upper: Vec<String> = paragraphs.iter().map(|p| p.to_uppercase()).collect();

        if upper.len() == 1 && !format.wrap {
            return Self {
                anchor,
                lines: upper,
                stacked: false,
            };
        }

        let lines = if format.wrap {
            let width = chars_per_line(cell.width, options.char_width(format.font_size));
            upper.iter().flat_map(|line| wrap_words(line, width)).collect()
        } else {
            upper
        };

        Self {
            anchor,
            lines,
            stacked: true,
        }
    }

    /// Lines bottom-up with their upward offset in line heights (`em`).
    pub fn stacked_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .rev()
            .enumerate()
            .map(|(offset, line)| (offset, line.as_str()))
    }
}
