//! Shared XML attribute parsing utilities for ODF parsing.
//!
//! ODF attributes are namespace-prefixed (`table:style-name`,
//! `fo:font-weight`); prefixes vary between producers, so lookups go by
//! local name.

use quick_xml::events::BytesStart;

use crate::error::{OdsvgError, Result};

/// Extract an attribute by local name (ignoring namespace prefix), unescaped.
///
/// Returns `None` if the attribute is missing or not valid UTF-8.
pub fn attr_string_local(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == key {
            return attr.unescape_value().ok().map(|v| v.into_owned());
        }
    }
    None
}

/// Extract a positive count attribute (repeat or span) by local name.
///
/// A missing attribute is `default`; zero is clamped to 1.
///
/// # Errors
/// Returns [`OdsvgError::Parse`] if the value is present but not a number.
pub fn attr_count_local(e: &BytesStart, key: &[u8], default: u32) -> Result<u32> {
    match attr_string_local(e, key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<u32>().map(|n| n.max(1)).map_err(|_| {
            OdsvgError::Parse(format!(
                "attribute {} on <{}> is not a count: {raw:?}",
                String::from_utf8_lossy(key),
                local_name_string(e)
            ))
        }),
    }
}

/// Collect every attribute as `(local_name, value)`, in document order.
pub fn attrs_local(e: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.local_name().into_inner())
            .map_err(|err| OdsvgError::Parse(format!("attribute name: {err}")))?
            .to_string();
        let value = attr.unescape_value()?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

/// Get the local element name as an owned string.
///
/// Returns empty string if not valid UTF-8.
#[inline]
pub fn local_name_string(e: &BytesStart) -> String {
    let bytes = e.local_name();
    std::str::from_utf8(bytes.as_ref())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn make_start(xml: &str) -> BytesStart<'_> {
        // Strip < and > / /> to get just the tag content
        let content = xml
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim_end_matches('/')
            .trim_end();
        BytesStart::from_content(content, content.find(' ').unwrap_or(content.len()))
    }

    #[test]
    fn test_attr_string_local_ignores_prefix() {
        let e = make_start(r#"<table:table-column table:style-name="co1" />"#);
        assert_eq!(attr_string_local(&e, b"style-name"), Some("co1".to_string()));
        assert_eq!(attr_string_local(&e, b"missing"), None);
    }

    #[test]
    fn test_attr_string_local_unescapes() {
        let e = make_start(r#"<table:table-cell table:style-name="a&amp;b" />"#);
        assert_eq!(attr_string_local(&e, b"style-name"), Some("a&b".to_string()));
    }

    #[test]
    fn test_attr_count_local() {
        let e = make_start(r#"<table:table-row table:number-rows-repeated="5" />"#);
        assert_eq!(attr_count_local(&e, b"number-rows-repeated", 1).unwrap(), 5);
        assert_eq!(attr_count_local(&e, b"number-columns-spanned", 1).unwrap(), 1);
    }

    #[test]
    fn test_attr_count_local_zero_clamps_and_garbage_fails() {
        let e = make_start(r#"<table:table-cell table:number-columns-repeated="0" />"#);
        assert_eq!(attr_count_local(&e, b"number-columns-repeated", 1).unwrap(), 1);

        let e = make_start(r#"<table:table-cell table:number-columns-repeated="x" />"#);
        let err = attr_count_local(&e, b"number-columns-repeated", 1).unwrap_err();
        assert!(err.to_string().contains("number-columns-repeated"));
    }

    #[test]
    fn test_attrs_local_keeps_order() {
        let e = make_start(r#"<style:text-properties fo:font-size="10pt" fo:font-weight="bold" />"#);
        let attrs = attrs_local(&e).unwrap();
        assert_eq!(
            attrs,
            vec![
                ("font-size".to_string(), "10pt".to_string()),
                ("font-weight".to_string(), "bold".to_string()),
            ]
        );
    }

    #[test]
    fn test_local_name_string() {
        let e = make_start("<style:style />");
        assert_eq!(local_name_string(&e), "style");
    }
}
