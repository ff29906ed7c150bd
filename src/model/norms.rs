use std::collections::BTreeMap;

use serde::Serialize;

/// Grouping key -> mean Ct. Built fresh from the current generation at
/// every normalization stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormTable {
    entries: BTreeMap<String, f64>,
}

impl NormTable {
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
