//! Injectable slot shapes
//!
//! [`Inject`] ties a Rust handle type to the dependency shape it is filled
//! from. The same shapes serve concrete kinds (`Arc<Mailer>`) and capabilities
//! (`Arc<dyn Greeter>`); whether a slot looks up a kind or a capability is
//! decided by the registration method that declares it.
//!
//! | Handle | Dependency kind | Optional |
//! |--------|-----------------|----------|
//! | `Arc<X>` | `SingleObject` | no |
//! | `Option<Arc<X>>` | `SingleObject` | yes |
//! | `Vec<Arc<X>>` | `ObjectList` | - |
//! | `HashMap<String, Arc<X>>` | `ObjectMap` | - |

use std::collections::HashMap;
use std::sync::Arc;

use graft_domain::{Argument, DependencyKind, Error, Injected, Result};

/// A handle type that can be filled from a resolved [`Argument`]
pub trait Inject: Sized + Send + 'static {
    /// Kind or capability being collected (`Mailer`, `dyn Greeter`)
    type Item: ?Sized + Send + Sync + 'static;

    /// Result shape
    const KIND: DependencyKind;

    /// Whether absence is acceptable
    const OPTIONAL: bool;

    /// Convert a resolved argument. `slot` names the destination for diagnostics.
    fn from_argument(argument: Argument, slot: &str) -> Result<Self>;
}

fn downcast_handle<I: ?Sized + Send + Sync + 'static>(handle: Injected, slot: &str) -> Result<Arc<I>> {
    handle.downcast::<Arc<I>>().map(|boxed| *boxed).map_err(|_| {
        Error::coercion(
            slot,
            std::any::type_name::<Arc<I>>(),
            "resolved handle has a different type",
        )
    })
}

fn shape_mismatch<H>(slot: &str, argument: &Argument) -> Error {
    Error::coercion(
        slot,
        std::any::type_name::<H>(),
        format!("cannot fill from a {} argument", argument.shape()),
    )
}

impl<I: ?Sized + Send + Sync + 'static> Inject for Arc<I> {
    type Item = I;
    const KIND: DependencyKind = DependencyKind::SingleObject;
    const OPTIONAL: bool = false;

    fn from_argument(argument: Argument, slot: &str) -> Result<Self> {
        match argument {
            Argument::Object(Some(handle)) => downcast_handle(handle, slot),
            Argument::Object(None) => Err(Error::coercion(
                slot,
                std::any::type_name::<Self>(),
                "required object is absent",
            )),
            other => Err(shape_mismatch::<Self>(slot, &other)),
        }
    }
}

impl<I: ?Sized + Send + Sync + 'static> Inject for Option<Arc<I>> {
    type Item = I;
    const KIND: DependencyKind = DependencyKind::SingleObject;
    const OPTIONAL: bool = true;

    fn from_argument(argument: Argument, slot: &str) -> Result<Self> {
        match argument {
            Argument::Object(handle) => handle.map(|h| downcast_handle(h, slot)).transpose(),
            other => Err(shape_mismatch::<Self>(slot, &other)),
        }
    }
}

impl<I: ?Sized + Send + Sync + 'static> Inject for Vec<Arc<I>> {
    type Item = I;
    const KIND: DependencyKind = DependencyKind::ObjectList;
    const OPTIONAL: bool = false;

    fn from_argument(argument: Argument, slot: &str) -> Result<Self> {
        match argument {
            Argument::List(handles) => handles
                .into_iter()
                .map(|h| downcast_handle(h, slot))
                .collect(),
            other => Err(shape_mismatch::<Self>(slot, &other)),
        }
    }
}

impl<I: ?Sized + Send + Sync + 'static> Inject for HashMap<String, Arc<I>> {
    type Item = I;
    const KIND: DependencyKind = DependencyKind::ObjectMap;
    const OPTIONAL: bool = false;

    fn from_argument(argument: Argument, slot: &str) -> Result<Self> {
        match argument {
            Argument::Map(entries) => entries
                .into_iter()
                .map(|(key, h)| downcast_handle(h, slot).map(|handle| (key, handle)))
                .collect(),
            other => Err(shape_mismatch::<Self>(slot, &other)),
        }
    }
}
