//! Runtime identity of kinds and capabilities

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity token for a concrete kind or a capability (`dyn Trait`).
///
/// Equality and hashing use the [`TypeId`] only; the type name is carried for
/// diagnostics and is not guaranteed to be unique or stable across compilers.
#[derive(Clone, Copy)]
pub struct KindId {
    type_id: TypeId,
    name: &'static str,
}

impl KindId {
    /// Token for `T`, which may be unsized (`dyn Trait`)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full type name, e.g. `my_app::services::Mailer`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, without generics
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        let base = base.trim_start_matches("dyn ");
        let base = base.split(" +").next().unwrap_or(base);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for KindId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for KindId {}

impl Hash for KindId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({})", self.name)
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
