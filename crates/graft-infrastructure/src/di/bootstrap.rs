//! Container Bootstrap - Composition Root
//!
//! Turns an [`AppConfig`] into a ready-to-use [`Container`]: the configured
//! value providers are stacked into one layered value source, a condition
//! evaluator is bound to it, and both are handed to a new container.
//!
//! ```text
//! AppConfig.values → MapValues(defaults) → FileValues(files..) → EnvValues(prefix)
//!                                        ↓
//!                              LayeredValueSource ──▶ ExpressionConditionEvaluator
//!                                        ↓                     ↓
//!                                     Container ◀──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//! context.container().register(Registration::<Mailer>::new())?;
//! let mailer: Arc<Mailer> = context.container().get_object("")?;
//! ```

use crate::config::{AppConfig, ValuesConfig};
use crate::constants::VALUES_DEFAULTS_PROVIDER;
use graft_application::Container;
use graft_domain::error::Result;
use graft_providers::{
    EnvValues, ExpressionConditionEvaluator, FileValues, LayeredValueSource, MapValues,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Application context produced by the composition root
pub struct GraftContext {
    config: Arc<AppConfig>,
    values: Arc<LayeredValueSource>,
    conditions: Arc<ExpressionConditionEvaluator>,
    container: Arc<Container>,
}

impl GraftContext {
    /// Configuration the context was built from
    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    /// Shared layered value source
    pub fn values(&self) -> &Arc<LayeredValueSource> {
        &self.values
    }

    /// Condition evaluator bound to the value source
    pub fn conditions(&self) -> &Arc<ExpressionConditionEvaluator> {
        &self.conditions
    }

    /// The container
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }
}

impl std::fmt::Debug for GraftContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraftContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Stack the configured value providers, lowest precedence first.
///
/// Every provider is read once here so that a missing or malformed value file
/// fails at startup rather than on the first lookup.
pub fn build_value_source(config: &ValuesConfig) -> Result<Arc<LayeredValueSource>> {
    let source = LayeredValueSource::new();

    if !config.defaults.is_empty() {
        source.add_provider(Arc::new(MapValues::from_tree(
            VALUES_DEFAULTS_PROVIDER,
            config.defaults.clone(),
        )))?;
    }
    for file in &config.files {
        source.add_provider(Arc::new(FileValues::new(file)))?;
    }
    if let Some(prefix) = &config.env_prefix {
        source.add_provider(Arc::new(EnvValues::new(prefix.as_str())))?;
    }

    let merged = source.merged()?;
    debug!(
        providers = ?source.provider_names()?,
        keys = merged.len(),
        "Value source ready"
    );
    Ok(Arc::new(source))
}

/// Build the application context from configuration
pub fn init_app(config: AppConfig) -> Result<GraftContext> {
    let values = build_value_source(&config.values)?;
    let conditions = Arc::new(ExpressionConditionEvaluator::new(values.clone()));
    let container = Arc::new(Container::new(values.clone(), conditions.clone()));

    info!(
        value_files = config.values.files.len(),
        env_values = config.values.env_prefix.is_some(),
        "Container bootstrapped"
    );

    Ok(GraftContext {
        config: Arc::new(config),
        values,
        conditions,
        container,
    })
}
