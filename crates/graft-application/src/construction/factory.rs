//! Factory strategy
//!
//! Builds an object by calling a constructor function. The dependency list is
//! derived from the constructor's parameter types, one positional slot per
//! parameter (`arg0`, `arg1`, ...). A [`Grouped`] parameter contributes one
//! dependency per field of its group, with slots nested under its position
//! (`arg1.settings.port`), and is re-assembled before the call.
//!
//! ## Parameter shapes
//!
//! | Parameter | Looks up |
//! |-----------|----------|
//! | `Arc<T>`, `Option<Arc<T>>`, `Vec<Arc<T>>`, `HashMap<String, Arc<T>>` | concrete kind `T` |
//! | `Cap<dyn I>`, `Option<Cap<dyn I>>`, `Vec<Cap<dyn I>>`, `HashMap<String, Cap<dyn I>>` | capability `I` |
//! | `Grouped<G>` | every slot declared by `G::fields()` |
//!
//! Constructors return `T` or `Result<T, E>`; an `Err` becomes
//! [`Error::Constructor`]. Up to eight parameters are supported, use a
//! [`Group`] to pass more.
//!
//! ```ignore
//! fn connect(config: Grouped<DbSettings>, log: Option<Cap<dyn Logger>>) -> Result<Pool, DbError> {
//!     Pool::open(&config.url, log.map(Cap::into_inner))
//! }
//!
//! container.register(Registration::factory(connect))?;
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::vec::IntoIter;

use graft_domain::constants::FACTORY_ARG_PREFIX;
use graft_domain::error::BoxError;
use graft_domain::{
    Argument, Built, ConstructionStrategy, Dependency, Error, KindId, NameExpr, Result,
    StrategyKind, Target,
};

use super::fields::Fields;
use super::inject::Inject;

/// Slot path of the positional argument at `position`
pub fn arg_slot(position: usize) -> String {
    format!("{FACTORY_ARG_PREFIX}{position}")
}

/// A constructor parameter the container can supply
pub trait Param: Sized + Send + 'static {
    /// Dependencies consumed by this parameter at `position`
    fn dependencies(position: usize) -> Result<Vec<Dependency>>;

    /// Take this parameter's arguments from `arguments`
    fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self>;
}

fn next_argument(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Argument> {
    arguments.next().ok_or_else(|| {
        Error::internal(format!("missing argument for {}", arg_slot(position)))
    })
}

fn slot_dependency<H: Inject>(target: Target, position: usize) -> Dependency {
    Dependency::object(H::KIND, target, NameExpr::Unnamed, arg_slot(position)).optional(H::OPTIONAL)
}

macro_rules! object_param {
    ($($shape:ty),* $(,)?) => {$(
        impl<T: Send + Sync + 'static> Param for $shape {
            fn dependencies(position: usize) -> Result<Vec<Dependency>> {
                Ok(vec![slot_dependency::<Self>(Target::Kind(KindId::of::<T>()), position)])
            }

            fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self> {
                let argument = next_argument(arguments, position)?;
                <Self as Inject>::from_argument(argument, &arg_slot(position))
            }
        }
    )*};
}

object_param!(Arc<T>, Option<Arc<T>>, Vec<Arc<T>>, HashMap<String, Arc<T>>);

/// Capability handle parameter, `Cap<dyn Greeter>`
pub struct Cap<I: ?Sized>(pub Arc<I>);

impl<I: ?Sized> Cap<I> {
    /// Unwrap the shared handle
    pub fn into_inner(self) -> Arc<I> {
        self.0
    }
}

impl<I: ?Sized> Deref for Cap<I> {
    type Target = I;

    fn deref(&self) -> &I {
        &self.0
    }
}

impl<I: ?Sized> Clone for Cap<I> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<I: ?Sized> fmt::Debug for Cap<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cap<{}>", type_name::<I>())
    }
}

fn capability_dependency<H: Inject>(position: usize) -> Dependency {
    slot_dependency::<H>(Target::Capability(KindId::of::<H::Item>()), position)
}

impl<I: ?Sized + Send + Sync + 'static> Param for Cap<I> {
    fn dependencies(position: usize) -> Result<Vec<Dependency>> {
        Ok(vec![capability_dependency::<Arc<I>>(position)])
    }

    fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self> {
        let argument = next_argument(arguments, position)?;
        <Arc<I> as Inject>::from_argument(argument, &arg_slot(position)).map(Cap)
    }
}

impl<I: ?Sized + Send + Sync + 'static> Param for Option<Cap<I>> {
    fn dependencies(position: usize) -> Result<Vec<Dependency>> {
        Ok(vec![capability_dependency::<Option<Arc<I>>>(position)])
    }

    fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self> {
        let argument = next_argument(arguments, position)?;
        <Option<Arc<I>> as Inject>::from_argument(argument, &arg_slot(position))
            .map(|handle| handle.map(Cap))
    }
}

impl<I: ?Sized + Send + Sync + 'static> Param for Vec<Cap<I>> {
    fn dependencies(position: usize) -> Result<Vec<Dependency>> {
        Ok(vec![capability_dependency::<Vec<Arc<I>>>(position)])
    }

    fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self> {
        let argument = next_argument(arguments, position)?;
        <Vec<Arc<I>> as Inject>::from_argument(argument, &arg_slot(position))
            .map(|handles| handles.into_iter().map(Cap).collect())
    }
}

impl<I: ?Sized + Send + Sync + 'static> Param for HashMap<String, Cap<I>> {
    fn dependencies(position: usize) -> Result<Vec<Dependency>> {
        Ok(vec![capability_dependency::<HashMap<String, Arc<I>>>(position)])
    }

    fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self> {
        let argument = next_argument(arguments, position)?;
        <HashMap<String, Arc<I>> as Inject>::from_argument(argument, &arg_slot(position))
            .map(|handles| handles.into_iter().map(|(k, v)| (k, Cap(v))).collect())
    }
}

/// A parameter struct whose slots are declared like a field-built object
pub trait Group: Default + Send + Sync + 'static {
    /// Slot declarations of the group
    fn fields() -> Fields<Self>;
}

/// Grouped parameter, flattened into individual dependencies
#[derive(Debug, Clone, Default)]
pub struct Grouped<G>(pub G);

impl<G> Grouped<G> {
    /// Unwrap the group
    pub fn into_inner(self) -> G {
        self.0
    }
}

impl<G> Deref for Grouped<G> {
    type Target = G;

    fn deref(&self) -> &G {
        &self.0
    }
}

impl<G: Group> Param for Grouped<G> {
    fn dependencies(position: usize) -> Result<Vec<Dependency>> {
        let fields = G::fields();
        fields.validate()?;
        let prefix = arg_slot(position);
        Ok(fields
            .dependencies()
            .into_iter()
            .map(|d| d.nested_in(&prefix))
            .collect())
    }

    fn take(arguments: &mut IntoIter<Argument>, position: usize) -> Result<Self> {
        let fields = G::fields();
        let count = fields.len();
        let own: Vec<Argument> = arguments.by_ref().take(count).collect();
        if own.len() != count {
            return Err(Error::internal(format!(
                "group at {} expects {count} arguments, got {}",
                arg_slot(position),
                own.len()
            )));
        }
        fields.assemble(own).map(Grouped)
    }
}

/// Marker for constructors returning the object directly
pub struct Returns;

/// Marker for constructors returning `Result<T, E>`
pub struct TryReturns<E>(std::marker::PhantomData<E>);

/// A function usable as a factory for `T`. `M` is an inference marker.
pub trait Constructor<T, M>: Send + Sync + 'static {
    /// Dependencies in argument order
    fn dependencies() -> Result<Vec<Dependency>>;

    /// Call the constructor with resolved arguments
    fn construct(&self, arguments: Vec<Argument>) -> Result<T>;
}

macro_rules! impl_constructor {
    ($($param:ident),*) => {
        impl<T, F, $($param,)*> Constructor<T, (Returns, $($param,)*)> for F
        where
            F: Fn($($param),*) -> T + Send + Sync + 'static,
            $($param: Param,)*
        {
            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn dependencies() -> Result<Vec<Dependency>> {
                let mut dependencies = Vec::new();
                let mut position = 0usize;
                $(
                    dependencies.extend($param::dependencies(position)?);
                    position += 1;
                )*
                Ok(dependencies)
            }

            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn construct(&self, arguments: Vec<Argument>) -> Result<T> {
                let mut arguments = arguments.into_iter();
                let mut position = 0usize;
                $(
                    let $param = $param::take(&mut arguments, position)?;
                    position += 1;
                )*
                Ok((self)($($param),*))
            }
        }

        impl<T, E, F, $($param,)*> Constructor<T, (TryReturns<E>, $($param,)*)> for F
        where
            F: Fn($($param),*) -> std::result::Result<T, E> + Send + Sync + 'static,
            E: Into<BoxError>,
            $($param: Param,)*
        {
            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn dependencies() -> Result<Vec<Dependency>> {
                let mut dependencies = Vec::new();
                let mut position = 0usize;
                $(
                    dependencies.extend($param::dependencies(position)?);
                    position += 1;
                )*
                Ok(dependencies)
            }

            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn construct(&self, arguments: Vec<Argument>) -> Result<T> {
                let mut arguments = arguments.into_iter();
                let mut position = 0usize;
                $(
                    let $param = $param::take(&mut arguments, position)?;
                    position += 1;
                )*
                (self)($($param),*).map_err(|e| Error::constructor(type_name::<T>(), e))
            }
        }
    };
}

impl_constructor!();
impl_constructor!(P1);
impl_constructor!(P1, P2);
impl_constructor!(P1, P2, P3);
impl_constructor!(P1, P2, P3, P4);
impl_constructor!(P1, P2, P3, P4, P5);
impl_constructor!(P1, P2, P3, P4, P5, P6);
impl_constructor!(P1, P2, P3, P4, P5, P6, P7);
impl_constructor!(P1, P2, P3, P4, P5, P6, P7, P8);

type Call<T> = Box<dyn Fn(Vec<Argument>) -> Result<T> + Send + Sync>;

/// Strategy calling a constructor function
pub struct Factory<T> {
    dependencies: Vec<Dependency>,
    invalid: Option<String>,
    call: Call<T>,
}

impl<T: Send + Sync + 'static> Factory<T> {
    /// Wrap `constructor`
    pub fn new<M, C: Constructor<T, M>>(constructor: C) -> Self {
        let (dependencies, invalid) = match C::dependencies() {
            Ok(dependencies) => (dependencies, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        Self {
            dependencies,
            invalid,
            call: Box::new(move |arguments| constructor.construct(arguments)),
        }
    }

    /// Fail when a grouped parameter declared a malformed slot
    pub fn validate(&self) -> Result<()> {
        match &self.invalid {
            None => Ok(()),
            Some(message) => Err(Error::unsupported_shape(type_name::<T>(), message.as_str())),
        }
    }

    /// Give the positional parameter at `position` a name selector
    pub fn name_param(&mut self, position: usize, name: &str) -> Result<()> {
        let slot = arg_slot(position);
        let name = NameExpr::parse(name)?;
        let dependency = self
            .dependencies
            .iter_mut()
            .find(|d| d.slot == slot)
            .ok_or_else(|| {
                Error::unsupported_shape(
                    type_name::<T>(),
                    format!("no object parameter at {slot}"),
                )
            })?;
        dependency.name = name;
        Ok(())
    }
}

impl<T: Send + Sync + 'static> ConstructionStrategy for Factory<T> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Factory
    }

    fn dependencies(&self) -> Vec<Dependency> {
        self.dependencies.clone()
    }

    fn build(&self, arguments: Vec<Argument>) -> Result<Built> {
        Ok(Box::new((self.call)(arguments)?))
    }
}
