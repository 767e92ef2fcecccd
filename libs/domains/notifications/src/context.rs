//! Per-send data context.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat placeholder key → value map supplied for one outgoing message.
///
/// A key that is absent and a key mapped to `""` are the same thing: both
/// are missing. [`DataContext::get`] only ever returns non-empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataContext(HashMap<String, String>);

impl DataContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// The value for `key` if it is present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        present(self.0.get(key).map(String::as_str))
    }

    /// The value for `key` if it contains anything besides whitespace.
    pub fn get_non_blank(&self, key: &str) -> Option<&str> {
        non_blank(self.0.get(key).map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for DataContext {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// `Some` only for non-empty strings.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `Some` only for strings with at least one non-whitespace character.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
