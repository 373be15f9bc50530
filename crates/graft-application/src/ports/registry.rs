//! Value Format Registry
//!
//! Auto-registration system for value file formats. Each format registers a
//! parser for one or more file extensions through a `linkme` distributed slice;
//! file-backed value providers look the parser up by extension at load time.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                   Format Registration Flow                    │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  1. Format defines:   #[linkme::distributed_slice(VALUE_FORMATS)]
//! │                       static ENTRY: ValueFormatEntry = ...    │
//! │                             ↓                                 │
//! │  2. Registry declares: pub static VALUE_FORMATS: [..] = [..]  │
//! │                             ↓                                 │
//! │  3. Loader queries:   resolve_value_format("yaml")            │
//! │                                                               │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Registering a Format (in graft-providers)
//!
//! ```ignore
//! use graft_application::ports::registry::{ValueFormatEntry, VALUE_FORMATS};
//!
//! #[linkme::distributed_slice(VALUE_FORMATS)]
//! static JSON_FORMAT: ValueFormatEntry = ValueFormatEntry {
//!     name: "json",
//!     extensions: &["json"],
//!     description: "JSON documents",
//!     parse: parse_json_file,
//! };
//! ```

use std::path::Path;

use serde_json::{Map, Value};

/// Registry entry for value file formats
pub struct ValueFormatEntry {
    /// Unique format name (e.g., "json", "yaml", "toml")
    pub name: &'static str,
    /// File extensions handled by this format, without the dot
    pub extensions: &'static [&'static str],
    /// Human-readable description
    pub description: &'static str,
    /// Parse a file into a nested value tree
    pub parse: fn(&Path) -> Result<Map<String, Value>, String>,
}

impl std::fmt::Debug for ValueFormatEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueFormatEntry")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - formats submit entries at compile time
#[linkme::distributed_slice]
pub static VALUE_FORMATS: [ValueFormatEntry] = [..];

/// Resolve a value format by file extension (case-insensitive)
///
/// # Returns
/// * `Ok(&ValueFormatEntry)` - The registered format
/// * `Err(String)` - Error message listing the supported extensions
pub fn resolve_value_format(extension: &str) -> Result<&'static ValueFormatEntry, String> {
    let wanted = extension.trim_start_matches('.').to_ascii_lowercase();

    for entry in VALUE_FORMATS {
        if entry.extensions.iter().any(|ext| *ext == wanted) {
            return Ok(entry);
        }
    }

    let available: Vec<&str> = VALUE_FORMATS
        .iter()
        .flat_map(|e| e.extensions.iter().copied())
        .collect();

    Err(format!(
        "Unsupported value file extension '{extension}'. Supported extensions: {available:?}"
    ))
}

/// List all registered value formats
///
/// Returns `(name, description)` pairs sorted by name. Useful for CLI help.
pub fn list_value_formats() -> Vec<(&'static str, &'static str)> {
    let mut formats: Vec<(&'static str, &'static str)> = VALUE_FORMATS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    formats.sort_unstable();
    formats
}
