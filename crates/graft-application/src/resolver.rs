//! Dependency resolver
//!
//! Walks the active object graph depth-first and builds objects in post-order:
//! every dependency is initialized before the object that needs it. Start
//! order is registration order, so resolution is deterministic.
//!
//! ## Object status
//!
//! ```text
//!                 init_object()              built + ready hook
//!  Uninitialized ───────────────▶ Initializing ────────────────▶ Initialized
//!        ▲                             │
//!        └──────── any failure ────────┘
//! ```
//!
//! Re-entering an `Initializing` object means the walk closed a cycle; the
//! error carries the chain from the first visit, e.g. `A -> B -> A`.
//!
//! Status otherwise only moves forward. The one exception is failure: an
//! object that never completed returns from `Initializing` to
//! `Uninitialized`, so a later attempt reports the original failure again
//! instead of a spurious cycle.

use std::collections::HashSet;
use std::sync::Arc;

use graft_domain::{
    Argument, Dependency, DependencyKind, Error, Instance, ObjectId, ObjectStatus, Result, Target,
};
use tracing::{debug, info, trace};

use crate::condition_gate::ConditionGate;
use crate::registry::Registry;
use crate::value_bridge::ValueBridge;

/// One resolution pass over a locked registry
pub struct Resolver<'a> {
    registry: &'a mut Registry,
    gate: &'a ConditionGate,
    values: &'a ValueBridge,
    path: Vec<ObjectId>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `registry`
    pub fn new(registry: &'a mut Registry, gate: &'a ConditionGate, values: &'a ValueBridge) -> Self {
        Self {
            registry,
            gate,
            values,
            path: Vec::new(),
        }
    }

    /// Initialize every active, non-optional object not built yet.
    ///
    /// Idempotent: initialized objects are left untouched.
    pub fn resolve(&mut self) -> Result<()> {
        let active = self.registry.list_active(self.gate)?;
        let mut built = 0usize;
        for id in active {
            if self.registry.descriptor(id)?.optional
                || self.registry.status(id)? == ObjectStatus::Initialized
            {
                continue;
            }
            self.init_object(id)?;
            built += 1;
        }
        if built > 0 {
            info!(built, total = self.registry.len(), "Resolution pass complete");
        }
        Ok(())
    }

    /// Initialize `id` and everything it depends on, returning its instance
    pub fn init_object(&mut self, id: ObjectId) -> Result<Instance> {
        match self.registry.status(id)? {
            ObjectStatus::Initialized => {
                return self.registry.instance(id)?.ok_or_else(|| {
                    Error::internal(format!("initialized object {id} has no instance"))
                });
            }
            ObjectStatus::Initializing => return Err(self.cycle_error(id)),
            ObjectStatus::Uninitialized => {}
        }

        debug!(object = %self.registry.descriptor(id)?.label(), "Initializing object");
        self.registry.set_status(id, ObjectStatus::Initializing)?;
        self.path.push(id);
        let built = self.construct(id);
        self.path.pop();

        match built {
            Ok(instance) => {
                self.registry.store_instance(id, Arc::clone(&instance))?;
                debug!(object = %self.registry.descriptor(id)?.label(), "Initialized object");
                Ok(instance)
            }
            Err(e) => {
                self.registry.set_status(id, ObjectStatus::Uninitialized)?;
                Err(e)
            }
        }
    }

    /// Resolve a single dependency into the argument its slot receives
    pub fn resolve_dependency(&mut self, dependency: &Dependency) -> Result<Argument> {
        trace!(slot = %dependency.slot, target = %dependency.target, name = %dependency.name, "Resolving dependency");
        match dependency.kind {
            DependencyKind::Value => self.values.lookup(dependency),
            DependencyKind::SingleObject => {
                let found = self
                    .registry
                    .find_one(&dependency.target, &dependency.name, self.gate)?;
                match found {
                    Some(id) => {
                        let instance = self.init_object(id)?;
                        let handle = self.registry.project(id, &dependency.target, &instance)?;
                        Ok(Argument::Object(Some(handle)))
                    }
                    None if dependency.optional => Ok(Argument::Object(None)),
                    None => Err(missing_error(dependency)),
                }
            }
            DependencyKind::ObjectList => {
                let ids = self
                    .registry
                    .find_all(&dependency.target, &dependency.name, self.gate)?;
                let mut handles = Vec::with_capacity(ids.len());
                for id in ids {
                    let instance = self.init_object(id)?;
                    handles.push(self.registry.project(id, &dependency.target, &instance)?);
                }
                Ok(Argument::List(handles))
            }
            DependencyKind::ObjectMap => {
                let ids = self
                    .registry
                    .find_all(&dependency.target, &dependency.name, self.gate)?;
                let mut seen = HashSet::with_capacity(ids.len());
                let mut entries = Vec::with_capacity(ids.len());
                for id in ids {
                    let key = self.registry.descriptor(id)?.name.clone();
                    if !seen.insert(key.clone()) {
                        return Err(Error::ambiguous_map_key(dependency.target.to_string(), key));
                    }
                    let instance = self.init_object(id)?;
                    entries.push((key, self.registry.project(id, &dependency.target, &instance)?));
                }
                Ok(Argument::Map(entries))
            }
        }
    }

    fn construct(&mut self, id: ObjectId) -> Result<Instance> {
        let dependencies = self.registry.descriptor(id)?.dependencies.clone();
        let mut arguments = Vec::with_capacity(dependencies.len());
        for dependency in &dependencies {
            arguments.push(self.resolve_dependency(dependency)?);
        }

        let descriptor = self.registry.descriptor(id)?;
        let mut built = descriptor.strategy.build(arguments)?;
        if let Some(ready) = &descriptor.ready {
            ready(&mut *built).map_err(|e| Error::constructor(descriptor.label(), e))?;
        }
        Ok(Arc::from(built))
    }

    fn cycle_error(&self, id: ObjectId) -> Error {
        let start = self.path.iter().position(|p| *p == id).unwrap_or(0);
        let chain = self.path[start..]
            .iter()
            .chain(std::iter::once(&id))
            .map(|p| {
                self.registry
                    .descriptor(*p)
                    .map_or_else(|_| p.to_string(), graft_domain::ObjectDescriptor::label)
            })
            .collect();
        Error::circular_dependency(chain)
    }
}

fn missing_error(dependency: &Dependency) -> Error {
    match &dependency.target {
        Target::Capability(capability) => {
            Error::missing_implementation(capability.name(), dependency.name.as_str())
        }
        Target::Kind(kind) => Error::missing_object(kind.name(), dependency.name.as_str()),
        Target::Value { key, .. } => Error::missing_value(key.as_str()),
    }
}
