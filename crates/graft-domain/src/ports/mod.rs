//! Domain Port Interfaces
//!
//! Boundary contracts between the resolution engine and its collaborators.
//! The application layer depends on these traits only; providers implement
//! them.
//!
//! - **construction** - Strategies that assemble instances from arguments
//! - **values** - Key-path value store and the providers feeding it
//! - **condition** - Boolean predicates gating registrations
//! - **lifecycle** - Post-construction hook

/// Construction strategy port and instance handles
pub mod construction;
/// Registration condition evaluation
pub mod condition;
/// Object lifecycle hooks
pub mod lifecycle;
/// Value source and value providers
pub mod values;

pub use condition::ConditionEvaluator;
pub use construction::{
    Argument, Built, Cast, ConstructionStrategy, Injected, Instance, ReadyHook, StrategyKind,
};
pub use lifecycle::OnReady;
pub use values::{ValueProvider, ValueSource};
