//! Value bridge
//!
//! Turns value dependencies into lookups against the value source and converts
//! raw values into the types declared by slots.
//!
//! ## Coercion
//!
//! Conversion is lenient about scalars, so that values coming from environment
//! variables or string-only formats still fill typed slots:
//!
//! | Raw value | Target | Result |
//! |-----------|--------|--------|
//! | `"8080"` | `u16` | `8080` |
//! | `"true"` | `bool` | `true` |
//! | `8080` | `String` | `"8080"` |
//! | `{"a": 1}` | struct with `a` | deserialized struct |
//! | `"abc"` | `u16` | [`Error::Coercion`] |

use std::sync::Arc;

use graft_domain::{Argument, Dependency, Error, Result, Target, ValueSource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Connects value dependencies to a [`ValueSource`]
#[derive(Clone)]
pub struct ValueBridge {
    source: Arc<dyn ValueSource>,
}

impl ValueBridge {
    /// Create a bridge over `source`
    pub fn new(source: Arc<dyn ValueSource>) -> Self {
        Self { source }
    }

    /// Underlying value source
    pub fn source(&self) -> &Arc<dyn ValueSource> {
        &self.source
    }

    /// Resolve a value dependency into an argument.
    ///
    /// Absent keys fail with [`Error::MissingValue`] unless the dependency is optional.
    pub fn lookup(&self, dependency: &Dependency) -> Result<Argument> {
        let Target::Value { key, .. } = &dependency.target else {
            return Err(Error::internal(format!(
                "value lookup for non-value target {}",
                dependency.target
            )));
        };

        let raw = self.source.get_value(key)?;
        trace!(key = %key, found = raw.is_some(), "Value lookup");
        match raw {
            Some(value) => Ok(Argument::Value(Some(value))),
            None if dependency.optional => Ok(Argument::Value(None)),
            None => Err(Error::missing_value(key.as_str())),
        }
    }

    /// Typed lookup, `None` when the key is absent
    pub fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        self.source
            .get_value(key)?
            .map(|raw| coerce(key, raw))
            .transpose()
    }

    /// Override the value under `key`
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        self.source.set_value(key, value)
    }
}

impl std::fmt::Debug for ValueBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueBridge").finish_non_exhaustive()
    }
}

/// Convert a raw value into `V`. `what` names the key or slot for diagnostics.
pub fn coerce<V: DeserializeOwned>(what: &str, raw: Value) -> Result<V> {
    let first_error = match serde_json::from_value::<V>(raw.clone()) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let retried = match &raw {
        Value::String(text) => serde_json::from_str::<V>(text.trim()).ok(),
        Value::Number(_) | Value::Bool(_) => {
            serde_json::from_value::<V>(Value::String(raw.to_string())).ok()
        }
        _ => None,
    };

    retried.ok_or_else(|| Error::coercion(what, std::any::type_name::<V>(), first_error.to_string()))
}
