//! Application Layer - graft
//!
//! The resolution engine: registry, capability matching, condition gating,
//! value bridging, construction strategies and the dependency walk, exposed
//! through the [`Container`] facade.
//!
//! ## Architecture
//!
//! ```text
//!   Registration<T> ──into_descriptor──▶ Registry ◀── CapabilityMatcher
//!                                           │
//!   Container ── lock ──▶ Resolver ─────────┤
//!                           │               └── ConditionGate ──▶ ConditionEvaluator
//!                           ├── ValueBridge ──▶ ValueSource
//!                           └── ConstructionStrategy (Fields | Factory)
//! ```
//!
//! ## Dependencies
//!
//! This crate depends only on `graft-domain` for descriptors and ports. Value
//! sources and condition evaluators are supplied by `graft-providers` through
//! the domain port traits; value file formats register into
//! [`ports::registry::VALUE_FORMATS`].

pub mod condition_gate;
pub mod construction;
pub mod container;
pub mod locks;
pub mod ports;
pub mod registration;
pub mod registry;
pub mod resolver;
pub mod value_bridge;

pub use condition_gate::ConditionGate;
pub use construction::{Cap, Factory, Fields, Group, Grouped, Inject, Param};
pub use container::Container;
pub use registration::Registration;
pub use registry::{CapabilityMatcher, Registry};
pub use resolver::Resolver;
pub use value_bridge::{ValueBridge, coerce};
