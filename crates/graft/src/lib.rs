//! # graft
//!
//! An in-process object graph builder. Applications declare objects with
//! typed dependencies; the container resolves, constructs and wires them in
//! dependency order, selecting candidates by kind, capability, name, alias or
//! glob, and skipping registrations whose condition is false.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use graft::prelude::*;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! let context = graft::infrastructure::init_app(AppConfig::default())?;
//! let container = context.container();
//! container.register(
//!     Registration::<English>::new()
//!         .when("#lang == \"en\"")
//!         .implements::<dyn Greeter>(|e| e),
//! )?;
//! container.set_value("lang", "en")?;
//!
//! let greeter = container.get_capability::<dyn Greeter>("")?;
//! assert_eq!(greeter.greet(), "hello");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - descriptors, dependency model, errors and ports
//! - `application` - registry, resolver, construction strategies, container
//! - `providers` - value sources, value file formats, condition evaluator
//! - `infrastructure` - configuration, logging and the composition root

/// Domain layer - descriptors, errors and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use graft_domain::*;
}

/// Application layer - the resolution engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use graft_application::*;
}

/// Providers - value sources and condition evaluation
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use graft_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use graft_infrastructure::*;
}

pub mod cli;

/// Types needed to register and retrieve objects
pub mod prelude {
    pub use graft_application::{Cap, Container, Fields, Group, Grouped, Registration};
    pub use graft_domain::{ConditionEvaluator, Error, OnReady, Result, ValueSource};
    pub use graft_infrastructure::{AppConfig, ConfigLoader};
}

pub use graft_application::{Container, Registration};
pub use graft_domain::{Error, Result};
