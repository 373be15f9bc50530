//! Registration builder
//!
//! [`Registration`] collects everything the container needs to know about one
//! object: its strategy, identity, activation condition, declared capabilities
//! and ready hook. Mistakes that can only be detected at runtime (malformed
//! name patterns, naming a parameter that does not exist) are reported by
//! [`Registration::into_descriptor`] as
//! [`Error::UnsupportedRegistrationShape`].

use std::any::{Any, type_name};
use std::sync::Arc;

use graft_domain::{
    CapabilityCast, Cast, ConstructionStrategy, Error, Injected, Instance, KindId, ObjectDescriptor,
    OnReady, ReadyHook, Result,
};

use crate::construction::{Constructor, Factory, Fields};

enum Strategy<T> {
    Fields(Result<Box<dyn ConstructionStrategy>>),
    Factory(Factory<T>),
}

/// Builder for one registered object of kind `T`
pub struct Registration<T> {
    strategy: Strategy<T>,
    name: String,
    aliases: Vec<String>,
    condition: Option<String>,
    optional: bool,
    capabilities: Vec<CapabilityCast>,
    ready: Option<ReadyHook>,
    param_names: Vec<(usize, String)>,
}

impl<T: Default + Send + Sync + 'static> Registration<T> {
    /// Object built from its default value with no injected slots
    pub fn new() -> Self {
        Self::with_fields(Fields::new())
    }

    /// Object built from its default value through `fields`
    pub fn with_fields(fields: Fields<T>) -> Self {
        let strategy = fields
            .validate()
            .map(|()| Box::new(fields) as Box<dyn ConstructionStrategy>);
        Self::from_strategy(Strategy::Fields(strategy))
    }
}

impl<T: Default + Send + Sync + 'static> Default for Registration<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> Registration<T> {
    /// Object built by calling `constructor`
    pub fn factory<M, C: Constructor<T, M>>(constructor: C) -> Self {
        Self::from_strategy(Strategy::Factory(Factory::new(constructor)))
    }

    fn from_strategy(strategy: Strategy<T>) -> Self {
        Self {
            strategy,
            name: String::new(),
            aliases: Vec::new(),
            condition: None,
            optional: false,
            capabilities: Vec::new(),
            ready: None,
            param_names: Vec::new(),
        }
    }

    /// Declared name; empty registers the unnamed default
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Additional name the object answers to
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Skip eager resolution; build on first request
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Activation condition, e.g. `#cache.enabled == true`
    #[must_use]
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Declare that `T` provides capability `I` through `cast`.
    ///
    /// ```ignore
    /// Registration::<English>::new().implements::<dyn Greeter>(|e| e)
    /// ```
    #[must_use]
    pub fn implements<I>(mut self, cast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let cast: Cast = Arc::new(move |instance: &Instance| {
            Arc::clone(instance)
                .downcast::<T>()
                .ok()
                .map(|object| Box::new(cast(object)) as Injected)
        });
        self.capabilities.push(CapabilityCast {
            capability: KindId::of::<I>(),
            cast,
        });
        self
    }

    /// Run [`OnReady::on_ready`] once the object is built
    #[must_use]
    pub fn on_ready(mut self) -> Self
    where
        T: OnReady,
    {
        self.ready = Some(Box::new(|built: &mut (dyn Any + Send + Sync)| {
            match built.downcast_mut::<T>() {
                Some(object) => object.on_ready(),
                None => Err(Error::internal(format!(
                    "ready hook received a value that is not {}",
                    type_name::<T>()
                ))),
            }
        }));
        self
    }

    /// Name selector for the factory parameter at `position`
    #[must_use]
    pub fn param_name(mut self, position: usize, name: impl Into<String>) -> Self {
        self.param_names.push((position, name.into()));
        self
    }

    /// Validate and turn the registration into a descriptor
    pub fn into_descriptor(self) -> Result<ObjectDescriptor> {
        let kind = KindId::of::<T>();
        let strategy: Box<dyn ConstructionStrategy> = match self.strategy {
            Strategy::Fields(fields) => {
                if !self.param_names.is_empty() {
                    return Err(Error::unsupported_shape(
                        kind.name(),
                        "parameter names require a factory registration",
                    ));
                }
                fields?
            }
            Strategy::Factory(mut factory) => {
                factory.validate()?;
                for (position, name) in &self.param_names {
                    factory.name_param(*position, name)?;
                }
                Box::new(factory)
            }
        };

        if self.aliases.iter().any(String::is_empty) {
            return Err(Error::unsupported_shape(kind.name(), "empty alias"));
        }

        let self_cast: Cast = Arc::new(|instance: &Instance| {
            Arc::clone(instance)
                .downcast::<T>()
                .ok()
                .map(|object| Box::new(object) as Injected)
        });

        Ok(ObjectDescriptor {
            kind,
            name: self.name,
            aliases: self.aliases,
            dependencies: strategy.dependencies(),
            condition: self.condition,
            optional: self.optional,
            capabilities: self.capabilities,
            self_cast,
            strategy,
            ready: self.ready,
        })
    }
}
