//! # graft domain layer
//!
//! Types shared by every layer of the container: kind identities, name
//! selectors, dependency and object descriptors, the error taxonomy and the
//! ports implemented by value sources, condition evaluators and construction
//! strategies.
//!
//! ## Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`value_objects`] | [`KindId`], [`NameExpr`], [`Dependency`], [`Target`] |
//! | [`entities`] | [`ObjectDescriptor`], [`ObjectStatus`], [`ObjectId`] |
//! | [`ports`] | [`ValueSource`], [`ConditionEvaluator`], [`ConstructionStrategy`], [`OnReady`] |
//! | [`error`] | [`Error`], [`Result`] |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::{CapabilityCast, ObjectDescriptor, ObjectId, ObjectStatus};
pub use error::{Error, Result};
pub use ports::{
    Argument, Built, Cast, ConditionEvaluator, ConstructionStrategy, Injected, Instance, OnReady,
    ReadyHook, StrategyKind, ValueProvider, ValueSource,
};
pub use value_objects::{Dependency, DependencyKind, KindId, NameExpr, Target};
