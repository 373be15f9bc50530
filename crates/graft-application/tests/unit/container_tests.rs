//! Container scenarios over the real value source and condition evaluator

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use graft_application::{Cap, Fields, Registration};
use graft_domain::{Error, OnReady, Result, ValueSource};
use graft_providers::MapValues;
use serde::{Deserialize, Serialize};

use crate::test_utils::{
    Echo, English, French, Greeter, Named, empty_container, real_container,
};

#[test]
fn test_resolution_is_idempotent() {
    let container = empty_container();
    container.register(Registration::<English>::new()).unwrap();

    container.resolve().unwrap();
    container.resolve().unwrap();
    let first = container.get_object::<English>("").unwrap();
    let second = container.get_object::<English>("").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(container.len().unwrap(), 1);
}

#[test]
fn test_kind_and_capability_handles_share_the_instance() {
    let container = empty_container();
    container
        .register(Registration::<English>::new().implements::<dyn Greeter>(|e| e))
        .unwrap();

    let concrete = container.get_object::<English>("").unwrap();
    let greeter = container.get_capability::<dyn Greeter>("").unwrap();
    assert_eq!(greeter.greet(), "hello");
    assert!(std::ptr::addr_eq(Arc::as_ptr(&concrete), Arc::as_ptr(&greeter)));
}

#[test]
fn test_two_unnamed_implementations_are_ambiguous() {
    let container = empty_container();
    container
        .register(Registration::<English>::new().implements::<dyn Greeter>(|e| e))
        .unwrap();
    container
        .register(Registration::<French>::new().implements::<dyn Greeter>(|f| f))
        .unwrap();

    assert!(matches!(
        container.get_capability::<dyn Greeter>(""),
        Err(Error::MultipleMatches { .. })
    ));
    assert_eq!(container.get_capability_list::<dyn Greeter>("").unwrap().len(), 2);
}

#[test]
fn test_star_selects_unnamed_and_named_implementations() {
    let container = empty_container();
    container
        .register(Registration::<English>::new().implements::<dyn Greeter>(|e| e))
        .unwrap();
    container
        .register(Registration::<French>::new().name("fr").implements::<dyn Greeter>(|f| f))
        .unwrap();

    let all = container.get_capability_list::<dyn Greeter>("*").unwrap();
    let greetings: Vec<String> = all.iter().map(|g| g.greet()).collect();
    assert_eq!(greetings, vec!["hello", "bonjour"]);

    let by_name = container.get_capability_map::<dyn Greeter>("*").unwrap();
    assert_eq!(by_name[""].greet(), "hello");
    assert_eq!(by_name["fr"].greet(), "bonjour");
}

#[derive(Default)]
struct NeedsEnglish {
    english: Option<Arc<English>>,
}

#[test]
fn test_false_condition_hides_object() {
    let (values, container) = real_container(MapValues::new("test").with("use_e", false));
    container
        .register(
            Registration::<English>::new()
                .when("#use_e == true")
                .implements::<dyn Greeter>(|e| e),
        )
        .unwrap();

    assert!(container.get_capability_list::<dyn Greeter>("").unwrap().is_empty());
    assert!(container.find_object::<English>("").unwrap().is_none());

    container
        .register(Registration::with_fields(Fields::<NeedsEnglish>::new().object(
            "english",
            "",
            |n, e: Arc<English>| n.english = Some(e),
        )))
        .unwrap();
    let err = container.resolve().unwrap_err();
    assert!(matches!(err, Error::MissingObject { .. }));

    values.set_value("use_e", serde_json::json!(true)).unwrap();
    container.resolve().unwrap();
    let needs = container.get_object::<NeedsEnglish>("").unwrap();
    assert!(needs.english.is_some());
}

#[derive(Default)]
struct J {
    greeters: Vec<Arc<dyn Greeter>>,
}

#[test]
fn test_empty_collection_resolves() {
    let container = empty_container();
    container
        .register(Registration::with_fields(Fields::<J>::new().capability(
            "greeters",
            "",
            |j, g: Vec<Arc<dyn Greeter>>| j.greeters = g,
        )))
        .unwrap();

    let j = container.get_object::<J>("").unwrap();
    assert!(j.greeters.is_empty());
}

#[derive(Default)]
struct App {
    i: Option<Arc<dyn Echo>>,
}

#[test]
fn test_named_capability_is_selected() {
    let container = empty_container();
    container
        .register(
            Registration::<Named>::factory(|| Named::new("c"))
                .name("c")
                .implements::<dyn Echo>(|n| n),
        )
        .unwrap();
    container
        .register(
            Registration::<Named>::factory(|| Named::new("d"))
                .name("d")
                .implements::<dyn Echo>(|n| n),
        )
        .unwrap();
    container
        .register(Registration::with_fields(Fields::<App>::new().capability(
            "i",
            "c",
            |app, i: Arc<dyn Echo>| app.i = Some(i),
        )))
        .unwrap();

    let app = container.get_object::<App>("").unwrap();
    assert_eq!(app.i.as_ref().map(|i| i.echo()).as_deref(), Some("c"));

    let by_name = container.get_capability_map::<dyn Echo>("*").unwrap();
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name["d"].echo(), "d");
}

#[derive(Default)]
struct ReadsStr {
    field: String,
}

#[derive(Default)]
struct ReadsStrLater {
    field: String,
}

#[test]
fn test_value_round_trip() {
    let (_, container) = real_container(MapValues::new("empty"));
    container.set_value("str", "x").unwrap();
    container
        .register(Registration::with_fields(Fields::<ReadsStr>::new().value(
            "field",
            "str",
            |a, v: String| a.field = v,
        )))
        .unwrap();
    let a = container.get_object::<ReadsStr>("").unwrap();
    assert_eq!(a.field, "x");

    container.set_value("str", "y").unwrap();
    container
        .register(Registration::with_fields(Fields::<ReadsStrLater>::new().value(
            "field",
            "str",
            |b, v: String| b.field = v,
        )))
        .unwrap();
    let b = container.get_object::<ReadsStrLater>("").unwrap();
    assert_eq!(b.field, "y");
    assert_eq!(container.get_object::<ReadsStr>("").unwrap().field, "x");
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Limits {
    max: u32,
    burst: u32,
}

#[test]
fn test_typed_values_and_conditions() {
    let (_, container) = real_container(MapValues::new("defaults").with("limits.max", 10));
    assert_eq!(container.get_value::<u32>("limits.max").unwrap(), Some(10));
    assert_eq!(container.get_value::<u32>("limits.burst").unwrap(), None);

    container
        .set_value("limits", Limits { max: 5, burst: 2 })
        .unwrap();
    assert_eq!(
        container.get_value::<Limits>("limits").unwrap(),
        Some(Limits { max: 5, burst: 2 })
    );
    assert!(container.evaluate("#limits.burst == 2").unwrap());
    assert!(container.evaluate("#limits.other == nil").unwrap());
}

#[test]
fn test_optional_registration_is_built_on_demand() {
    let built = Arc::new(AtomicUsize::new(0));
    let container = empty_container();
    let counter = Arc::clone(&built);
    container
        .register(
            Registration::<English>::factory(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                English
            })
            .optional(),
        )
        .unwrap();

    container.resolve().unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 0);

    container.get_object::<English>("").unwrap();
    container.get_object::<English>("").unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn test_missing_lookups() {
    let container = empty_container();
    assert!(matches!(
        container.get_object::<English>(""),
        Err(Error::MissingObject { .. })
    ));
    assert!(matches!(
        container.get_capability::<dyn Greeter>("en"),
        Err(Error::MissingImplementation { .. })
    ));
    assert!(container.find_capability::<dyn Greeter>("").unwrap().is_none());
    assert!(container.get_object_list::<English>("").unwrap().is_empty());
    assert!(container.get_object_map::<English>("*").unwrap().is_empty());
    assert!(container.is_empty().unwrap());
}

#[test]
fn test_duplicate_registration_through_container() {
    let container = empty_container();
    container.register(Registration::<English>::new().name("en")).unwrap();
    let err = container
        .register(Registration::<English>::new().name("en"))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateRegistration { .. }));
}

#[derive(Default)]
struct Warmed {
    ready_calls: usize,
}

impl OnReady for Warmed {
    fn on_ready(&mut self) -> Result<()> {
        self.ready_calls += 1;
        Ok(())
    }
}

#[derive(Default)]
struct Refuses;

impl OnReady for Refuses {
    fn on_ready(&mut self) -> Result<()> {
        Err(Error::configuration("not ready"))
    }
}

#[test]
fn test_ready_hook_runs_once() {
    let container = empty_container();
    container.register(Registration::<Warmed>::new().on_ready()).unwrap();
    container.resolve().unwrap();
    container.resolve().unwrap();

    assert_eq!(container.get_object::<Warmed>("").unwrap().ready_calls, 1);
}

#[test]
fn test_ready_hook_failure_is_a_constructor_error() {
    let container = empty_container();
    container.register(Registration::<Refuses>::new().on_ready()).unwrap();

    let err = container.resolve().unwrap_err();
    assert!(matches!(err, Error::Constructor { ref kind, .. } if kind == "Refuses"));
}

struct Greeting(String);

#[test]
fn test_factory_with_capability_parameter() {
    let container = empty_container();
    container
        .register(Registration::<French>::new().implements::<dyn Greeter>(|f| f))
        .unwrap();
    container
        .register(Registration::<Greeting>::factory(|g: Cap<dyn Greeter>| {
            Greeting(format!("{}!", g.greet()))
        }))
        .unwrap();

    assert_eq!(container.get_object::<Greeting>("").unwrap().0, "bonjour!");
}

#[test]
fn test_concurrent_retrieval_builds_once() {
    let built = Arc::new(AtomicUsize::new(0));
    let container = Arc::new(empty_container());
    let counter = Arc::clone(&built);
    container
        .register(Registration::<English>::factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            English
        }))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = Arc::clone(&container);
            thread::spawn(move || container.get_object::<English>("").unwrap())
        })
        .collect();
    let instances: Vec<Arc<English>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}
