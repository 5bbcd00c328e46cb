use serde::Serialize;
use std::collections::BTreeMap;

/// Flat property set of one named style.
///
/// Keys are ODF attribute local names (`column-width`, `font-weight`,
/// `vertical-align`, ...), values are the raw attribute strings.
#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct StyleProps(pub BTreeMap<String, String>);

impl StyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Overlay `child` onto a copy of `self`; the child wins on key collisions.
    #[must_use]
    pub fn merged_with(&self, child: &StyleProps) -> StyleProps {
        let mut merged = self.clone();
        for (key, value) in &child.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// All named styles of a document, keyed by style name.
pub type StyleTable = BTreeMap<String, StyleProps>;
