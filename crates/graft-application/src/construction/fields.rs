//! Field strategy
//!
//! Builds an object by starting from `T::default()` and assigning each
//! resolved argument through a setter bound at registration time. Every setter
//! is paired with a slot path (`mailer`, `settings.retries`) that names the
//! destination in diagnostics.
//!
//! ```ignore
//! let fields = Fields::<App>::new()
//!     .object("db", "", |app, db: Arc<Database>| app.db = Some(db))
//!     .capability("greeter", "c", |app, g: Arc<dyn Greeter>| app.greeter = Some(g))
//!     .value("settings.port", "server.port", |app, port: u16| app.settings.port = port)
//!     .optional_value("settings.motd", "server.motd", |app, motd: Option<String>| {
//!         app.settings.motd = motd;
//!     });
//! ```

use std::any::type_name;

use graft_domain::{
    Argument, Built, ConstructionStrategy, Dependency, Error, KindId, NameExpr, Result,
    StrategyKind, Target,
};
use serde::de::DeserializeOwned;

use super::inject::Inject;
use crate::value_bridge::coerce;

type Setter<T> = Box<dyn Fn(&mut T, Argument) -> Result<()> + Send + Sync>;

/// Slot declarations for a kind built from its default value
pub struct Fields<T> {
    dependencies: Vec<Dependency>,
    setters: Vec<Setter<T>>,
    invalid: Vec<String>,
}

impl<T> Default for Fields<T> {
    fn default() -> Self {
        Self {
            dependencies: Vec::new(),
            setters: Vec::new(),
            invalid: Vec::new(),
        }
    }
}

impl<T: Default + Send + Sync + 'static> Fields<T> {
    /// No slots yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot filled with objects of the concrete kind `H::Item`
    #[must_use]
    pub fn object<H>(self, slot: &str, name: &str, set: impl Fn(&mut T, H) + Send + Sync + 'static) -> Self
    where
        H: Inject,
        H::Item: Sized,
    {
        let target = Target::Kind(KindId::of::<H::Item>());
        self.inject(slot, name, target, set)
    }

    /// Slot filled with objects declaring the capability `H::Item`
    #[must_use]
    pub fn capability<H: Inject>(
        self,
        slot: &str,
        name: &str,
        set: impl Fn(&mut T, H) + Send + Sync + 'static,
    ) -> Self {
        let target = Target::Capability(KindId::of::<H::Item>());
        self.inject(slot, name, target, set)
    }

    /// Required value slot read from `key`
    #[must_use]
    pub fn value<V>(mut self, slot: &str, key: &str, set: impl Fn(&mut T, V) + Send + Sync + 'static) -> Self
    where
        V: DeserializeOwned + 'static,
    {
        let slot_name = slot.to_owned();
        let key_name = key.to_owned();
        self.dependencies
            .push(Dependency::value(key, KindId::of::<V>(), slot));
        self.setters.push(Box::new(move |object: &mut T, argument: Argument| match argument {
            Argument::Value(Some(raw)) => {
                set(object, coerce::<V>(&key_name, raw)?);
                Ok(())
            }
            Argument::Value(None) => Err(Error::missing_value(key_name.as_str())),
            other => Err(value_shape_mismatch::<V>(&slot_name, &other)),
        }));
        self
    }

    /// Optional value slot read from `key`; `None` when the key is absent
    #[must_use]
    pub fn optional_value<V>(
        mut self,
        slot: &str,
        key: &str,
        set: impl Fn(&mut T, Option<V>) + Send + Sync + 'static,
    ) -> Self
    where
        V: DeserializeOwned + 'static,
    {
        let slot_name = slot.to_owned();
        let key_name = key.to_owned();
        self.dependencies
            .push(Dependency::value(key, KindId::of::<V>(), slot).optional(true));
        self.setters.push(Box::new(move |object: &mut T, argument: Argument| match argument {
            Argument::Value(raw) => {
                let value = raw.map(|r| coerce::<V>(&key_name, r)).transpose()?;
                set(object, value);
                Ok(())
            }
            other => Err(value_shape_mismatch::<V>(&slot_name, &other)),
        }));
        self
    }

    /// Number of declared slots
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    /// Whether no slot is declared
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }

    /// Fail when a slot declaration was malformed
    pub fn validate(&self) -> Result<()> {
        if self.invalid.is_empty() {
            Ok(())
        } else {
            Err(Error::unsupported_shape(type_name::<T>(), self.invalid.join("; ")))
        }
    }

    /// Build `T` from one argument per declared slot
    pub fn assemble(&self, arguments: Vec<Argument>) -> Result<T> {
        if arguments.len() != self.setters.len() {
            return Err(Error::internal(format!(
                "{} expects {} arguments, got {}",
                type_name::<T>(),
                self.setters.len(),
                arguments.len()
            )));
        }

        let mut target = T::default();
        for (setter, argument) in self.setters.iter().zip(arguments) {
            setter(&mut target, argument)?;
        }
        Ok(target)
    }

    fn inject<H: Inject>(
        mut self,
        slot: &str,
        name: &str,
        target: Target,
        set: impl Fn(&mut T, H) + Send + Sync + 'static,
    ) -> Self {
        let name = match NameExpr::parse(name) {
            Ok(name) => name,
            Err(e) => {
                self.invalid.push(format!("slot '{slot}': {e}"));
                NameExpr::Unnamed
            }
        };
        self.dependencies
            .push(Dependency::object(H::KIND, target, name, slot).optional(H::OPTIONAL));

        let slot_name = slot.to_owned();
        self.setters.push(Box::new(move |object: &mut T, argument: Argument| {
            set(object, H::from_argument(argument, &slot_name)?);
            Ok(())
        }));
        self
    }
}

fn value_shape_mismatch<V>(slot: &str, argument: &Argument) -> Error {
    Error::coercion(
        slot,
        type_name::<V>(),
        format!("cannot fill from a {} argument", argument.shape()),
    )
}

impl<T: Default + Send + Sync + 'static> ConstructionStrategy for Fields<T> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fields
    }

    fn dependencies(&self) -> Vec<Dependency> {
        self.dependencies.clone()
    }

    fn build(&self, arguments: Vec<Argument>) -> Result<Built> {
        Ok(Box::new(self.assemble(arguments)?))
    }
}
