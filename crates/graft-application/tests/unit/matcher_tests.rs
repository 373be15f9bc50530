//! Capability matcher tests

use std::sync::Arc;

use graft_application::{CapabilityMatcher, Registration};
use graft_domain::{Instance, KindId};

use crate::test_utils::{Echo, English, French, Greeter, Named};

fn greeter() -> KindId {
    KindId::of::<dyn Greeter>()
}

#[test]
fn test_undeclared_kind_does_not_satisfy() {
    let mut matcher = CapabilityMatcher::new();
    assert!(!matcher.satisfies(KindId::of::<English>(), greeter()));
}

#[test]
fn test_declared_cast_satisfies_and_projects() {
    let mut matcher = CapabilityMatcher::new();
    let descriptor = Registration::<English>::new()
        .implements::<dyn Greeter>(|e| e)
        .into_descriptor()
        .unwrap();
    for capability in &descriptor.capabilities {
        matcher.declare(descriptor.kind, capability);
    }

    assert!(matcher.satisfies(descriptor.kind, greeter()));
    assert!(!matcher.satisfies(descriptor.kind, KindId::of::<dyn Echo>()));

    let instance: Instance = Arc::new(English);
    let handle = matcher
        .cast(descriptor.kind, greeter(), &instance)
        .expect("declared cast");
    let greeter = handle
        .downcast::<Arc<dyn Greeter>>()
        .expect("capability handle");
    assert_eq!(greeter.greet(), "hello");
}

#[test]
fn test_results_are_memoized_and_invalidated_on_declare() {
    let mut matcher = CapabilityMatcher::new();
    let french = KindId::of::<French>();

    assert!(!matcher.satisfies(french, greeter()));
    assert!(!matcher.satisfies(KindId::of::<English>(), greeter()));
    assert_eq!(matcher.memo_len(), 2);

    let descriptor = Registration::<French>::new()
        .implements::<dyn Greeter>(|f| f)
        .into_descriptor()
        .unwrap();
    matcher.declare(french, &descriptor.capabilities[0]);
    assert_eq!(matcher.memo_len(), 0);
    assert!(matcher.satisfies(french, greeter()));
}

#[test]
fn test_capabilities_union_across_registrations() {
    let mut matcher = CapabilityMatcher::new();
    let named = KindId::of::<Named>();
    let echo = Registration::<Named>::new()
        .implements::<dyn Echo>(|n| n)
        .into_descriptor()
        .unwrap();
    let labelled = Registration::<Named>::new()
        .name("other")
        .implements::<dyn std::fmt::Debug + Send + Sync>(|n| n)
        .into_descriptor()
        .unwrap();
    matcher.declare(named, &echo.capabilities[0]);
    matcher.declare(named, &labelled.capabilities[0]);

    let capabilities = matcher.capabilities_of(named);
    assert_eq!(capabilities.len(), 2);
    assert!(capabilities.contains(&KindId::of::<dyn Echo>()));
}
