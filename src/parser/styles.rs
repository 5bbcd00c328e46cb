//! Style collection - reads `style:style` elements into flat property sets.
//!
//! A cell style spreads its formatting over several property groups
//! (`style:table-cell-properties`, `style:paragraph-properties`,
//! `style:text-properties`); these are merged in document order. Column and
//! row styles keep only their geometry group.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

use crate::error::Result;
use crate::types::{StyleProps, StyleTable};
use crate::xml_helpers::{attr_string_local, attrs_local, local_name_string};

/// A `style:style` element whose children are still being read.
struct PendingStyle {
    name: Option<String>,
    /// Nesting depth below the `style:style` element.
    depth: usize,
    groups: Vec<PropertyGroup>,
}

/// One `style:*-properties` child.
struct PropertyGroup {
    kind: String,
    attrs: Vec<(String, String)>,
}

impl PropertyGroup {
    fn read(e: &BytesStart) -> Result<Self> {
        Ok(Self {
            kind: local_name_string(e),
            attrs: attrs_local(e)?,
        })
    }

    fn is_geometry(&self) -> bool {
        matches!(
            self.kind.as_str(),
            "table-column-properties" | "table-row-properties"
        )
    }
}

impl PendingStyle {
    fn new(e: &BytesStart) -> Self {
        Self {
            name: attr_string_local(e, b"name"),
            depth: 0,
            groups: Vec::new(),
        }
    }

    fn push_child(&mut self, e: &BytesStart) -> Result<()> {
        if self.depth == 0 && e.local_name().as_ref().ends_with(b"-properties") {
            self.groups.push(PropertyGroup::read(e)?);
        }
        Ok(())
    }

    fn flatten(self) -> (Option<String>, StyleProps) {
        let mut groups = self.groups.into_iter();
        let mut props = StyleProps::new();

        let Some(first) = groups.next() else {
            return (self.name, props);
        };
        let geometry_only = first.is_geometry();
        for (key, value) in first.attrs {
            props.insert(key, value);
        }
        if !geometry_only {
            for group in groups {
                for (key, value) in group.attrs {
                    props.insert(key, value);
                }
            }
        }

        (self.name, props)
    }
}

fn is_style_element(e: &BytesStart) -> bool {
    e.local_name().as_ref() == b"style"
}

/// Parse every `style:style` element of an ODF XML part into `styles`.
///
/// Later definitions of the same name replace earlier ones, so `content.xml`
/// (automatic styles) should be read after `styles.xml` (common styles).
pub fn parse_styles<R: BufRead>(xml: &mut Reader<R>, styles: &mut StyleTable) -> Result<()> {
    let mut buf = Vec::new();
    let mut pending: Option<PendingStyle> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if let Some(style) = pending.as_mut() {
                    style.push_child(e)?;
                    style.depth += 1;
                } else if is_style_element(e) {
                    pending = Some(PendingStyle::new(e));
                }
            }
            Event::Empty(ref e) => {
                if let Some(style) = pending.as_mut() {
                    style.push_child(e)?;
                } else if is_style_element(e) {
                    if let (Some(name), props) = PendingStyle::new(e).flatten() {
                        styles.insert(name, props);
                    }
                }
            }
            Event::End(_) => {
                if let Some(style) = pending.as_mut() {
                    if style.depth == 0 {
                        if let Some(finished) = pending.take() {
                            if let (Some(name), props) = finished.flatten() {
                                styles.insert(name, props);
                            }
                        }
                    } else {
                        style.depth -= 1;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
