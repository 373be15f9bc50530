//! Container facade
//!
//! [`Container`] is the entry point for applications: it accepts
//! registrations, runs resolution and serves retrievals. All operations are
//! synchronous and serialized by one mutex around the registry, so an object is
//! never constructed twice even when several threads retrieve it at once.
//!
//! Constructors and ready hooks run while that mutex is held and must not call
//! back into the same container.
//!
//! ```ignore
//! let container = Container::new(values, conditions);
//! container.register(Registration::<Repo>::new().implements::<dyn Store>(|r| r))?;
//! container.register(Registration::factory(|store: Cap<dyn Store>| Service::new(store)))?;
//!
//! let service: Arc<Service> = container.get_object("")?;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use graft_domain::{
    ConditionEvaluator, Dependency, KindId, NameExpr, ObjectId, Result, Target, ValueSource,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::condition_gate::ConditionGate;
use crate::construction::Inject;
use crate::locks::lock_mutex;
use crate::registration::Registration;
use crate::registry::Registry;
use crate::resolver::Resolver;
use crate::value_bridge::ValueBridge;

/// Registry, condition gate and value bridge behind one lock
pub struct Container {
    registry: Mutex<Registry>,
    gate: ConditionGate,
    values: ValueBridge,
}

impl Container {
    /// Create an empty container
    pub fn new(values: Arc<dyn ValueSource>, conditions: Arc<dyn ConditionEvaluator>) -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            gate: ConditionGate::new(conditions),
            values: ValueBridge::new(values),
        }
    }

    /// Register an object
    pub fn register<T: Send + Sync + 'static>(&self, registration: Registration<T>) -> Result<ObjectId> {
        let descriptor = registration.into_descriptor()?;
        let mut registry = lock_mutex(&self.registry, "object registry")?;
        registry.add(descriptor)
    }

    /// Build every active, non-optional object not built yet
    pub fn resolve(&self) -> Result<()> {
        let mut registry = lock_mutex(&self.registry, "object registry")?;
        Resolver::new(&mut registry, &self.gate, &self.values).resolve()
    }

    /// Number of registered objects
    pub fn len(&self) -> Result<usize> {
        Ok(lock_mutex(&self.registry, "object registry")?.len())
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // ------------------------------------------------------------------
    // Retrieval by concrete kind
    // ------------------------------------------------------------------

    /// The single active object of kind `T` selected by `name`
    pub fn get_object<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        self.fetch(Target::Kind(KindId::of::<T>()), name)
    }

    /// Like [`Container::get_object`], `None` instead of a missing-object error
    pub fn find_object<T: Send + Sync + 'static>(&self, name: &str) -> Result<Option<Arc<T>>> {
        self.fetch(Target::Kind(KindId::of::<T>()), name)
    }

    /// Every active object of kind `T` selected by `name`, in registration order
    pub fn get_object_list<T: Send + Sync + 'static>(&self, name: &str) -> Result<Vec<Arc<T>>> {
        self.fetch(Target::Kind(KindId::of::<T>()), name)
    }

    /// Every active object of kind `T` selected by `name`, keyed by declared name
    pub fn get_object_map<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<HashMap<String, Arc<T>>> {
        self.fetch(Target::Kind(KindId::of::<T>()), name)
    }

    // ------------------------------------------------------------------
    // Retrieval by capability
    // ------------------------------------------------------------------

    /// The single active object providing capability `I` selected by `name`
    pub fn get_capability<I: ?Sized + Send + Sync + 'static>(&self, name: &str) -> Result<Arc<I>> {
        self.fetch(Target::Capability(KindId::of::<I>()), name)
    }

    /// Like [`Container::get_capability`], `None` instead of a missing-implementation error
    pub fn find_capability<I: ?Sized + Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Option<Arc<I>>> {
        self.fetch(Target::Capability(KindId::of::<I>()), name)
    }

    /// Every active object providing `I` selected by `name`, in registration order
    pub fn get_capability_list<I: ?Sized + Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Vec<Arc<I>>> {
        self.fetch(Target::Capability(KindId::of::<I>()), name)
    }

    /// Every active object providing `I` selected by `name`, keyed by declared name
    pub fn get_capability_map<I: ?Sized + Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<HashMap<String, Arc<I>>> {
        self.fetch(Target::Capability(KindId::of::<I>()), name)
    }

    // ------------------------------------------------------------------
    // Values and conditions
    // ------------------------------------------------------------------

    /// Typed value under `key`, `None` when absent
    pub fn get_value<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        self.values.get(key)
    }

    /// Override the value under `key`. Objects already built keep what they captured.
    pub fn set_value<V: Serialize>(&self, key: &str, value: V) -> Result<()> {
        let raw = serde_json::to_value(value).map_err(|e| {
            graft_domain::Error::coercion(key, "JSON value", e.to_string())
        })?;
        debug!(key, "Overriding value");
        self.values.set(key, raw)
    }

    /// Evaluate a condition expression against the current values
    pub fn evaluate(&self, expression: &str) -> Result<bool> {
        self.gate.evaluate(expression)
    }

    fn fetch<H: Inject>(&self, target: Target, name: &str) -> Result<H> {
        let name = NameExpr::parse(name)?;
        let dependency = Dependency::object(H::KIND, target, name, "").optional(H::OPTIONAL);

        let mut registry = lock_mutex(&self.registry, "object registry")?;
        let mut resolver = Resolver::new(&mut registry, &self.gate, &self.values);
        resolver.resolve()?;
        let argument = resolver.resolve_dependency(&dependency)?;
        H::from_argument(argument, &dependency.target.to_string())
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
