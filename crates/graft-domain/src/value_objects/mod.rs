//! Domain Value Objects
//!
//! Immutable value objects describing what is registered and what is
//! requested.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`KindId`] | Runtime identity of a kind or capability |
//! | [`NameExpr`] | Name selector (unnamed, exact or glob) |
//! | [`Dependency`] | One required input of an object |
//! | [`Target`] | What a dependency looks up |

/// Dependency descriptors
pub mod dependency;
/// Kind identity tokens
pub mod kind;
/// Name selectors
pub mod name;

pub use dependency::{Dependency, DependencyKind, Target};
pub use kind::KindId;
pub use name::NameExpr;
