//! Object registry
//!
//! Holds every registered [`ObjectDescriptor`] in registration order together
//! with its runtime state, and answers lookups by kind or capability.
//!
//! ## Lookup order
//!
//! ```text
//! entry ──▶ target match ──▶ name match ──▶ condition gate ──▶ candidate
//!           (kind equality     (unnamed,      (inactive objects
//!            or capability)     exact, glob)   are invisible)
//! ```
//!
//! Conditions run last so that only candidates pay for evaluation.

pub mod matcher;

use std::collections::HashMap;

use graft_domain::{
    Error, Injected, Instance, KindId, NameExpr, ObjectDescriptor, ObjectId, ObjectStatus, Result,
    Target,
};
use tracing::{debug, trace};

pub use matcher::CapabilityMatcher;

use crate::condition_gate::ConditionGate;

struct Entry {
    descriptor: ObjectDescriptor,
    status: ObjectStatus,
    instance: Option<Instance>,
}

/// Registered objects and their runtime state
#[derive(Default)]
pub struct Registry {
    entries: Vec<Entry>,
    index: HashMap<KindId, HashMap<String, ObjectId>>,
    matcher: CapabilityMatcher,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Fails when `(kind, name)` is already registered.
    pub fn add(&mut self, descriptor: ObjectDescriptor) -> Result<ObjectId> {
        let names = self.index.entry(descriptor.kind).or_default();
        if names.contains_key(&descriptor.name) {
            return Err(Error::duplicate_registration(
                descriptor.kind.name(),
                descriptor.name.as_str(),
            ));
        }

        let id = ObjectId(self.entries.len());
        names.insert(descriptor.name.clone(), id);
        for capability in &descriptor.capabilities {
            self.matcher.declare(descriptor.kind, capability);
        }

        debug!(object = %descriptor.label(), %id, "Registered object");
        self.entries.push(Entry {
            descriptor,
            status: ObjectStatus::Uninitialized,
            instance: None,
        });
        Ok(id)
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptor of `id`
    pub fn descriptor(&self, id: ObjectId) -> Result<&ObjectDescriptor> {
        self.entry(id).map(|e| &e.descriptor)
    }

    /// Resolution status of `id`
    pub fn status(&self, id: ObjectId) -> Result<ObjectStatus> {
        self.entry(id).map(|e| e.status)
    }

    /// Built instance of `id`, if initialized
    pub fn instance(&self, id: ObjectId) -> Result<Option<Instance>> {
        self.entry(id).map(|e| e.instance.clone())
    }

    /// Move `id` to `status`. Leaving [`ObjectStatus::Initialized`] drops the instance.
    pub(crate) fn set_status(&mut self, id: ObjectId, status: ObjectStatus) -> Result<()> {
        let entry = self.entry_mut(id)?;
        entry.status = status;
        if status != ObjectStatus::Initialized {
            entry.instance = None;
        }
        Ok(())
    }

    /// Store the built instance and mark `id` initialized
    pub(crate) fn store_instance(&mut self, id: ObjectId, instance: Instance) -> Result<()> {
        let entry = self.entry_mut(id)?;
        entry.instance = Some(instance);
        entry.status = ObjectStatus::Initialized;
        Ok(())
    }

    /// Every active object, in registration order
    pub fn list_active(&self, gate: &ConditionGate) -> Result<Vec<ObjectId>> {
        let mut active = Vec::new();
        for (position, entry) in self.entries.iter().enumerate() {
            if gate.is_active(&entry.descriptor)? {
                active.push(ObjectId(position));
            }
        }
        Ok(active)
    }

    /// The single active object matching `target` and `name`.
    ///
    /// Returns `Ok(None)` when nothing matches and [`Error::MultipleMatches`]
    /// when more than one object does.
    pub fn find_one(
        &mut self,
        target: &Target,
        name: &NameExpr,
        gate: &ConditionGate,
    ) -> Result<Option<ObjectId>> {
        let found = self.find_all(target, name, gate)?;
        match found.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => {
                let candidates = many
                    .iter()
                    .filter_map(|id| self.entry(*id).ok())
                    .map(|e| e.descriptor.label())
                    .collect();
                Err(Error::multiple_matches(
                    target.to_string(),
                    name.as_str(),
                    candidates,
                ))
            }
        }
    }

    /// Every active object matching `target` and `name`, in registration order
    pub fn find_all(
        &mut self,
        target: &Target,
        name: &NameExpr,
        gate: &ConditionGate,
    ) -> Result<Vec<ObjectId>> {
        let mut found = Vec::new();
        for position in 0..self.entries.len() {
            let kind = self.entries[position].descriptor.kind;
            let kind_matches = match target {
                Target::Kind(wanted) => kind == *wanted,
                Target::Capability(capability) => self.matcher.satisfies(kind, *capability),
                Target::Value { .. } => {
                    return Err(Error::internal(format!(
                        "object lookup with value target {target}"
                    )));
                }
            };
            if !kind_matches {
                continue;
            }

            let descriptor = &self.entries[position].descriptor;
            if !name.matches(&descriptor.name, &descriptor.aliases) {
                continue;
            }
            if !gate.is_active(descriptor)? {
                trace!(object = %descriptor.label(), "Skipping inactive object");
                continue;
            }
            found.push(ObjectId(position));
        }
        Ok(found)
    }

    /// Project the instance of `id` into the handle `target` expects
    pub fn project(&self, id: ObjectId, target: &Target, instance: &Instance) -> Result<Injected> {
        let descriptor = self.descriptor(id)?;
        let projected = match target {
            Target::Kind(_) => descriptor.project(instance),
            Target::Capability(capability) => {
                self.matcher.cast(descriptor.kind, *capability, instance)
            }
            Target::Value { .. } => None,
        };
        projected.ok_or_else(|| {
            Error::internal(format!(
                "cannot project {} into {target}",
                descriptor.label()
            ))
        })
    }

    /// Capability matcher
    pub fn matcher(&self) -> &CapabilityMatcher {
        &self.matcher
    }

    fn entry(&self, id: ObjectId) -> Result<&Entry> {
        self.entries
            .get(id.0)
            .ok_or_else(|| Error::internal(format!("unknown object {id}")))
    }

    fn entry_mut(&mut self, id: ObjectId) -> Result<&mut Entry> {
        self.entries
            .get_mut(id.0)
            .ok_or_else(|| Error::internal(format!("unknown object {id}")))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("objects", &self.entries.len())
            .field("matcher", &self.matcher)
            .finish()
    }
}
