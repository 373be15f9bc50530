//! Dependency descriptors
//!
//! A [`Dependency`] describes one input an object needs before it can be
//! constructed: what to look up, how many results to collect, whether absence
//! is acceptable, and which slot of the object receives the result.

use std::fmt;

use super::kind::KindId;
use super::name::NameExpr;

/// How many results a dependency collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// Exactly one object
    SingleObject,
    /// Every matching object, in registration order
    ObjectList,
    /// Every matching object keyed by declared name
    ObjectMap,
    /// A configuration value
    Value,
}

/// What a dependency looks up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Objects whose concrete kind is exactly this one
    Kind(KindId),
    /// Objects whose kind declares this capability
    Capability(KindId),
    /// A value under a dotted key path, converted into `ty`
    Value {
        /// Dotted key path
        key: String,
        /// Type the value is coerced into
        ty: KindId,
    },
}

impl Target {
    /// Kind or capability identity for object targets
    pub fn object_kind(&self) -> Option<KindId> {
        match self {
            Self::Kind(kind) | Self::Capability(kind) => Some(*kind),
            Self::Value { .. } => None,
        }
    }

    /// Whether this is a capability target
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability(_))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Capability(cap) => write!(f, "{cap}"),
            Self::Value { key, ty } => write!(f, "value '{key}' as {ty}"),
        }
    }
}

/// One required input of an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Result shape
    pub kind: DependencyKind,
    /// What is looked up
    pub target: Target,
    /// Name selector (unused for values)
    pub name: NameExpr,
    /// Absence yields an empty argument instead of an error
    pub optional: bool,
    /// Field path or positional path the result is written to
    pub slot: String,
}

impl Dependency {
    /// Object dependency with an explicit result shape
    pub fn object(kind: DependencyKind, target: Target, name: NameExpr, slot: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            name,
            optional: false,
            slot: slot.into(),
        }
    }

    /// Value dependency for `key` coerced into `ty`
    pub fn value(key: impl Into<String>, ty: KindId, slot: impl Into<String>) -> Self {
        Self {
            kind: DependencyKind::Value,
            target: Target::Value {
                key: key.into(),
                ty,
            },
            name: NameExpr::Unnamed,
            optional: false,
            slot: slot.into(),
        }
    }

    /// Mark the dependency optional
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Prefix the slot path, used when flattening grouped parameters
    #[must_use]
    pub fn nested_in(mut self, prefix: &str) -> Self {
        self.slot = if self.slot.is_empty() {
            prefix.to_owned()
        } else {
            format!("{prefix}.{}", self.slot)
        };
        self
    }
}
