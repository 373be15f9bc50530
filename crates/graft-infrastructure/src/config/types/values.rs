//! Value source configuration types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Providers stacked into the container's value source.
///
/// Precedence, lowest first: `defaults`, then each of `files` in order, then
/// environment variables starting with `env_prefix`.
///
/// ```toml
/// [values]
/// files = ["values.yaml", "values.local.toml"]
/// env_prefix = "APP_"
///
/// [values.defaults]
/// server = { port = 8080 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuesConfig {
    /// Value files, read by extension (json, yaml, yml, toml)
    pub files: Vec<PathBuf>,

    /// Prefix of environment variables read as values, `__` nests keys
    pub env_prefix: Option<String>,

    /// Inline default values
    pub defaults: Map<String, Value>,
}
