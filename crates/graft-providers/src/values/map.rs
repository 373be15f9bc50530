//! In-memory value provider

use graft_domain::{ValueProvider, Result};
use serde_json::{Map, Value};

use super::tree::insert_path;

/// Values held in memory, typically defaults set by the application
#[derive(Debug, Clone, Default)]
pub struct MapValues {
    name: String,
    values: Map<String, Value>,
}

impl MapValues {
    /// Empty provider called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Map::new(),
        }
    }

    /// Provider over an existing nested tree
    pub fn from_tree(name: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Set the value at a dotted key path
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the value at a dotted key path
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        insert_path(&mut self.values, key, value.into());
    }
}

impl ValueProvider for MapValues {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Result<Map<String, Value>> {
        Ok(self.values.clone())
    }
}
