//! File-backed value provider
//!
//! The file format is chosen by extension from the formats registered in
//! [`VALUE_FORMATS`](graft_application::ports::registry::VALUE_FORMATS). The
//! file is read on every [`ValueProvider::provide`] call, so a reloaded layered
//! source picks up edits.

use std::path::{Path, PathBuf};

use graft_application::ports::registry::resolve_value_format;
use graft_domain::{Error, Result, ValueProvider};
use serde_json::{Map, Value};
use tracing::debug;

/// Values read from a JSON, YAML or TOML file
#[derive(Debug, Clone)]
pub struct FileValues {
    name: String,
    path: PathBuf,
}

impl FileValues {
    /// Provider for `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: format!("file:{}", path.display()),
            path,
        }
    }

    /// File this provider reads
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ValueProvider for FileValues {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Result<Map<String, Value>> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = resolve_value_format(extension).map_err(Error::configuration)?;

        if !self.path.is_file() {
            return Err(Error::io(format!(
                "value file not found: {}",
                self.path.display()
            )));
        }

        debug!(path = %self.path.display(), format = format.name, "Loading value file");
        (format.parse)(&self.path).map_err(|e| {
            Error::configuration(format!(
                "failed to parse {} as {}: {e}",
                self.path.display(),
                format.name
            ))
        })
    }
}
