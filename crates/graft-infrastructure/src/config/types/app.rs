//! Main application configuration

use super::logging::LoggingConfig;
use super::values::ValuesConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Value source configuration
    pub values: ValuesConfig,
}
