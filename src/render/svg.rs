//! SVG canvas: collects drawing nodes in memory and serializes them with
//! quick-xml once the canvas size is known.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

use crate::error::{OdsvgError, Result};
use crate::layout::{CellRect, TextFormat, TextLayout};
use crate::options::RenderOptions;

use super::RenderBackend;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// One SVG element with its attributes, text, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub name: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<SvgElement>,
}

impl SvgElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Value of attribute `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name);
        for (key, value) in &self.attrs {
            start.push_attribute((*key, value.as_str()));
        }

        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name)))?;
        Ok(())
    }
}

/// In-memory SVG drawing measured in millimeters.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    pub elements: Vec<SvgElement>,
    pub width: f64,
    pub height: f64,
    cell_style: String,
    font_family: String,
}

impl SvgCanvas {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            elements: Vec::new(),
            width: 0.0,
            height: 0.0,
            cell_style: format!(
                "fill: #ffffff; stroke-width:{}; stroke: #000000;",
                options.stroke_width
            ),
            font_family: options.font_family.clone(),
        }
    }

    /// Font attributes shared by text and tspan nodes.
    fn font_attrs(&self, element: SvgElement, font_size: f64, format: &TextFormat) -> SvgElement {
        let mut element = element
            .attr("font-size", font_size)
            .attr("font-family", &self.font_family);
        if format.bold {
            element = element.attr("font-weight", "bold");
        }
        if format.italic {
            element = element.attr("font-style", "italic");
        }
        element
    }

    fn alignment_attrs(element: SvgElement, format: &TextFormat) -> SvgElement {
        element
            .attr("text-anchor", format.alignment.text_anchor())
            .attr("dominant-baseline", format.alignment.dominant_baseline())
    }

    /// Iterate over every `text` element.
    pub fn texts(&self) -> impl Iterator<Item = &SvgElement> {
        self.elements.iter().filter(|e| e.name == "text")
    }

    /// Iterate over every `rect` element.
    pub fn rects(&self) -> impl Iterator<Item = &SvgElement> {
        self.elements.iter().filter(|e| e.name == "rect")
    }

    /// Serialize the drawing as a standalone, indented SVG document.
    ///
    /// # Errors
    /// Fails only if the XML writer does.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let width = format!("{}mm", self.width);
        let height = format!("{}mm", self.height);
        let view_box = format!("0 0 {} {}", self.width, self.height);
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NS));
        root.push_attribute(("version", "1.1"));
        root.push_attribute(("id", "root"));
        root.push_attribute(("width", width.as_str()));
        root.push_attribute(("height", height.as_str()));
        root.push_attribute(("viewBox", view_box.as_str()));
        writer.write_event(Event::Start(root))?;

        for element in &self.elements {
            element.write(&mut writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("svg")))?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| OdsvgError::Parse(format!("SVG output: {e}")))
    }
}

impl RenderBackend for SvgCanvas {
    fn draw_cell(&mut self, rect: &CellRect) {
        self.elements.push(
            SvgElement::new("rect")
                .attr("x", rect.x)
                .attr("y", rect.y)
                .attr("width", rect.width)
                .attr("height", rect.height)
                .attr("style", &self.cell_style),
        );
    }

    fn draw_text(&mut self, text: &TextLayout, format: &TextFormat) {
        let (x, y) = text.anchor;

        if !text.stacked {
            let content = text.lines.first().cloned().unwrap_or_default();
            let node = self.font_attrs(SvgElement::new("text"), format.font_size, format);
            let node = Self::alignment_attrs(node, format)
                .attr("x", x)
                .attr("y", y)
                .with_text(content);
            self.elements.push(node);
            return;
        }

        // Zero-size container so only the positioned tspans are visible
        let mut container = self.font_attrs(SvgElement::new("text"), 0.0, format);
        container = Self::alignment_attrs(container, format);
        for (offset, line) in text.stacked_lines() {
            let span = SvgElement::new("tspan").attr("x", x).attr("y", y);
            let span = self
                .font_attrs(span, format.font_size, format)
                .attr("dy", format!("-{offset}em"))
                .with_text(line);
            container.children.push(span);
        }
        self.elements.push(container);
    }

    fn finish(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}
