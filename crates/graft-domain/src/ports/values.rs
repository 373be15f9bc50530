//! Value source ports
//!
//! A [`ValueSource`] answers dotted key-path lookups (`db.pool.size`) with raw
//! JSON values. It is typically assembled from several [`ValueProvider`]s,
//! each contributing a tree of values.

use serde_json::{Map, Value};

use crate::error::Result;

/// Key-path store of configuration values
pub trait ValueSource: Send + Sync {
    /// Value under `key`, `None` when absent
    fn get_value(&self, key: &str) -> Result<Option<Value>>;

    /// Override the value under `key` for every subsequent lookup
    fn set_value(&self, key: &str, value: Value) -> Result<()>;
}

/// Contributes a tree of values to a value source
pub trait ValueProvider: Send + Sync {
    /// Provider name for diagnostics
    fn name(&self) -> &str;

    /// Current values as a nested map
    fn provide(&self) -> Result<Map<String, Value>>;
}
