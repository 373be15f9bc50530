//! Layered value source
//!
//! Merges value providers with `figment`, in insertion order: a provider added
//! later overrides keys of earlier ones, nested objects are merged key by key.
//! Runtime overrides set through [`ValueSource::set_value`] sit above every
//! provider.
//!
//! ```text
//!   overrides (set_value)        ◀── highest precedence
//!   provider N
//!   ...
//!   provider 1                   ◀── lowest precedence
//! ```
//!
//! The merged view is an immutable snapshot rebuilt lazily after any change,
//! so a lookup never observes a half-applied update.

use std::sync::{Arc, Mutex, PoisonError};

use figment::Figment;
use figment::providers::Serialized;
use graft_application::locks::lock_mutex;
use graft_domain::{Error, Result, ValueProvider, ValueSource};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::tree::{insert_path, strip_nulls};

#[derive(Default)]
struct State {
    providers: Vec<Arc<dyn ValueProvider>>,
    overrides: Map<String, Value>,
    snapshot: Option<Arc<Figment>>,
}

/// Value source merging several providers plus runtime overrides
#[derive(Default)]
pub struct LayeredValueSource {
    state: Mutex<State>,
}

impl LayeredValueSource {
    /// Source with no providers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider with the highest provider precedence
    #[must_use]
    pub fn with_provider(mut self, provider: impl ValueProvider + 'static) -> Self {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        state.providers.push(Arc::new(provider));
        state.snapshot = None;
        self
    }

    /// Add a provider with the highest provider precedence
    pub fn add_provider(&self, provider: Arc<dyn ValueProvider>) -> Result<()> {
        let mut state = lock_mutex(&self.state, "value source")?;
        debug!(provider = provider.name(), "Adding value provider");
        state.providers.push(provider);
        state.snapshot = None;
        Ok(())
    }

    /// Provider names, lowest precedence first
    pub fn provider_names(&self) -> Result<Vec<String>> {
        let state = lock_mutex(&self.state, "value source")?;
        Ok(state.providers.iter().map(|p| p.name().to_owned()).collect())
    }

    /// Drop the merged snapshot so providers are read again on next lookup
    pub fn reload(&self) -> Result<()> {
        lock_mutex(&self.state, "value source")?.snapshot = None;
        Ok(())
    }

    /// The whole merged tree
    pub fn merged(&self) -> Result<Map<String, Value>> {
        self.snapshot()?
            .extract::<Map<String, Value>>()
            .map_err(|e| Error::configuration_with_source("failed to merge values", e))
    }

    fn snapshot(&self) -> Result<Arc<Figment>> {
        let mut state = lock_mutex(&self.state, "value source")?;
        if let Some(snapshot) = &state.snapshot {
            return Ok(Arc::clone(snapshot));
        }

        let mut figment = Figment::new();
        for provider in &state.providers {
            let values = provider.provide()?;
            figment = figment.merge(Serialized::defaults(strip_nulls(values)));
        }
        figment = figment.merge(Serialized::defaults(state.overrides.clone()));

        let snapshot = Arc::new(figment);
        state.snapshot = Some(Arc::clone(&snapshot));
        trace!(providers = state.providers.len(), "Rebuilt value snapshot");
        Ok(snapshot)
    }
}

impl ValueSource for LayeredValueSource {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        let snapshot = self.snapshot()?;
        match snapshot.find_value(key) {
            Ok(found) => found.deserialize::<Value>().map(Some).map_err(|e| {
                Error::configuration_with_source(format!("failed to read value '{key}'"), e)
            }),
            Err(e) if e.missing() => Ok(None),
            Err(e) => Err(Error::configuration_with_source(
                format!("failed to look up value '{key}'"),
                e,
            )),
        }
    }

    fn set_value(&self, key: &str, value: Value) -> Result<()> {
        let mut state = lock_mutex(&self.state, "value source")?;
        insert_path(&mut state.overrides, key, value);
        state.snapshot = None;
        Ok(())
    }
}

impl std::fmt::Debug for LayeredValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredValueSource").finish_non_exhaustive()
    }
}
