//! Construction strategy port
//!
//! The resolver hands a strategy the resolved arguments for an object, in the
//! order of the object's dependency list, and receives the built instance.
//! Instances travel as type-erased handles; each object descriptor knows how to
//! project its instance into the handle a dependent slot expects.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::Dependency;

/// A constructed object shared between all dependents
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A projected handle ready for a slot: boxes an `Arc<T>` or an `Arc<dyn Trait>`
pub type Injected = Box<dyn Any + Send + Sync>;

/// Freshly built object, still exclusively owned
pub type Built = Box<dyn Any + Send + Sync>;

/// Projection of an instance into a slot handle
pub type Cast = Arc<dyn Fn(&Instance) -> Option<Injected> + Send + Sync>;

/// Post-construction hook, run once before the instance is shared
pub type ReadyHook = Box<dyn Fn(&mut (dyn Any + Send + Sync)) -> Result<()> + Send + Sync>;

/// Resolved input for one dependency
pub enum Argument {
    /// A single object, absent when optional and not found
    Object(Option<Injected>),
    /// Every match in registration order
    List(Vec<Injected>),
    /// Every match keyed by declared name, in registration order
    Map(Vec<(String, Injected)>),
    /// Raw value, absent when optional and not found
    Value(Option<serde_json::Value>),
}

impl Argument {
    /// Shape label for diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Value(_) => "value",
        }
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(o) => write!(f, "Object(present: {})", o.is_some()),
            Self::List(items) => write!(f, "List(len: {})", items.len()),
            Self::Map(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                write!(f, "Map({keys:?})")
            }
            Self::Value(v) => write!(f, "Value({v:?})"),
        }
    }
}

/// Which assembly technique a strategy uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Default instance filled through slot setters
    Fields,
    /// Constructor function receiving positional arguments
    Factory,
}

/// Builds an instance of one kind from resolved arguments
pub trait ConstructionStrategy: Send + Sync {
    /// Assembly technique
    fn kind(&self) -> StrategyKind;

    /// Dependencies this strategy consumes, in argument order
    fn dependencies(&self) -> Vec<Dependency>;

    /// Build the instance. `args` has one entry per dependency.
    fn build(&self, args: Vec<Argument>) -> Result<Built>;
}
