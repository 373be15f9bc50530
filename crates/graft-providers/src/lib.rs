//! # graft - Provider Implementations
//!
//! Implementations of the value and condition ports defined in `graft-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Value source | `ValueSource` | [`LayeredValueSource`] |
//! | Value provider | `ValueProvider` | [`MapValues`], [`FileValues`], [`EnvValues`] |
//! | Value format | `VALUE_FORMATS` registry | JSON, YAML, TOML |
//! | Conditions | `ConditionEvaluator` | [`ExpressionConditionEvaluator`] |
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use graft_providers::{ExpressionConditionEvaluator, FileValues, LayeredValueSource, MapValues};
//!
//! let values = Arc::new(
//!     LayeredValueSource::new()
//!         .with_provider(MapValues::new("defaults").with("server.port", 8080))
//!         .with_provider(FileValues::new("values.yaml")),
//! );
//! let conditions = Arc::new(ExpressionConditionEvaluator::new(values.clone()));
//! ```

// Re-export graft-domain types commonly used with providers
pub use graft_domain::error::{Error, Result};
pub use graft_domain::ports::{ConditionEvaluator, ValueProvider, ValueSource};

/// Condition evaluator implementations
///
/// Implements `ConditionEvaluator` with `evalexpr`.
pub mod condition;

/// Value source and value provider implementations
pub mod values;

pub use condition::ExpressionConditionEvaluator;
pub use values::{EnvValues, FileValues, LayeredValueSource, MapValues};
