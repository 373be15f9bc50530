//! Configuration management
//!
//! `AppConfig` describes how to bootstrap a container: logging and the value
//! providers to stack. It is loaded by [`loader::ConfigLoader`].

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, ValuesConfig};
