//! Environment value provider
//!
//! `PREFIX_DB__POOL__SIZE=4` becomes `db.pool.size = 4`. Keys are lowercased
//! and scalar text is parsed loosely (`4` is a number, `true` a boolean).

use figment::Figment;
use figment::providers::Env;
use graft_domain::{Error, Result, ValueProvider};
use serde_json::{Map, Value};

/// Nesting separator inside environment variable names
pub const ENV_NESTING_SEPARATOR: &str = "__";

/// Values read from prefixed environment variables
#[derive(Debug, Clone)]
pub struct EnvValues {
    name: String,
    prefix: String,
}

impl EnvValues {
    /// Provider for variables starting with `prefix`
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("env:{prefix}"),
            prefix,
        }
    }
}

impl ValueProvider for EnvValues {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Result<Map<String, Value>> {
        Figment::from(Env::prefixed(&self.prefix).split(ENV_NESTING_SEPARATOR))
            .extract()
            .map_err(|e| {
                Error::configuration_with_source(
                    format!("failed to read environment values with prefix {}", self.prefix),
                    e,
                )
            })
    }
}
