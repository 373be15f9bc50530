//! Composition root
//!
//! The only place where concrete providers are chosen. Libraries take a
//! [`Container`](graft_application::Container) by reference; binaries build
//! one here from configuration.

pub mod bootstrap;

pub use bootstrap::{GraftContext, build_value_source, init_app};
