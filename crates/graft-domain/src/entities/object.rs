//! Object descriptors
//!
//! An [`ObjectDescriptor`] is the immutable description of one registrable
//! unit. It is created by a registration builder and owned by the registry for
//! the lifetime of the container. Runtime state ([`ObjectStatus`] and the built
//! instance) lives next to the descriptor in the registry entry.

use std::fmt;

use crate::ports::construction::{Cast, ConstructionStrategy, Instance, Injected, ReadyHook};
use crate::value_objects::{Dependency, KindId};

/// Position of an object in the registry, stable for the container lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resolution state of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectStatus {
    /// Not built yet
    #[default]
    Uninitialized,
    /// Dependencies are being resolved (grey node)
    Initializing,
    /// Built and shared
    Initialized,
}

/// Declared projection of a kind into a capability handle
#[derive(Clone)]
pub struct CapabilityCast {
    /// Capability identity (`dyn Trait`)
    pub capability: KindId,
    /// Turns an instance of the kind into a boxed `Arc<dyn Trait>`
    pub cast: Cast,
}

impl fmt::Debug for CapabilityCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityCast")
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

/// Immutable description of one registered object
pub struct ObjectDescriptor {
    /// Concrete kind
    pub kind: KindId,
    /// Declared name, empty for the unnamed default
    pub name: String,
    /// Additional names the object answers to
    pub aliases: Vec<String>,
    /// Inputs in argument order
    pub dependencies: Vec<Dependency>,
    /// Activation condition; `None` means always active
    pub condition: Option<String>,
    /// Skipped by eager resolution, built on first request
    pub optional: bool,
    /// Capabilities the kind declares
    pub capabilities: Vec<CapabilityCast>,
    /// Projection of the instance into an `Arc<Kind>` handle
    pub self_cast: Cast,
    /// Assembly strategy
    pub strategy: Box<dyn ConstructionStrategy>,
    /// Post-construction hook
    pub ready: Option<ReadyHook>,
}

impl ObjectDescriptor {
    /// Human-readable identity, `Kind` or `Kind("name")`
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.kind.short_name().to_owned()
        } else {
            format!("{}(\"{}\")", self.kind.short_name(), self.name)
        }
    }

    /// Project an instance of this kind into an `Arc<Kind>` handle
    pub fn project(&self, instance: &Instance) -> Option<Injected> {
        (self.self_cast)(instance)
    }
}

impl fmt::Debug for ObjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDescriptor")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("dependencies", &self.dependencies)
            .field("condition", &self.condition)
            .field("optional", &self.optional)
            .field("capabilities", &self.capabilities)
            .field("strategy", &self.strategy.kind())
            .field("ready", &self.ready.is_some())
            .finish_non_exhaustive()
    }
}
