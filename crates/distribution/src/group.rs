//! Named Groups of Distributions

use serde::ser::{Serialize, Serializer};

/// Name → value entries that serialize as a JSON object in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct NamedGroup<T> {
    entries: Vec<(String, T)>,
}

impl<T> NamedGroup<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        self.entries.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for NamedGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for NamedGroup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}
