//! # graft - Infrastructure Layer
//!
//! Cross-cutting technical concerns for applications using the container.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `AppConfig` and the figment-based `ConfigLoader` |
//! | [`logging`] | `tracing-subscriber` setup |
//! | [`error_ext`] | `ErrorContext` for converting foreign errors |
//! | [`di`] | Composition root: config → value source → container |
//! | [`constants`] | Infrastructure defaults |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{GraftContext, init_app};
pub use logging::init_logging;
