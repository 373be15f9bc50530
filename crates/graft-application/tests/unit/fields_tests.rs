//! Field strategy tests

use std::collections::HashMap;
use std::sync::Arc;

use graft_application::Fields;
use graft_domain::{
    Argument, ConstructionStrategy, DependencyKind, Error, Injected, KindId, StrategyKind, Target,
};
use serde_json::json;

use crate::test_utils::{English, Greeter};

#[derive(Default)]
struct Settings {
    name: String,
    retries: u32,
    motd: Option<String>,
}

#[derive(Default)]
struct App {
    settings: Settings,
    english: Option<Arc<English>>,
    greeter: Option<Arc<dyn Greeter>>,
    greeters: Vec<Arc<dyn Greeter>>,
    by_name: HashMap<String, Arc<dyn Greeter>>,
}

fn app_fields() -> Fields<App> {
    Fields::<App>::new()
        .object("english", "", |app, e: Arc<English>| app.english = Some(e))
        .capability("greeter", "main", |app, g: Option<Arc<dyn Greeter>>| app.greeter = g)
        .capability("greeters", "", |app, g: Vec<Arc<dyn Greeter>>| app.greeters = g)
        .capability("by_name", "*", |app, g: HashMap<String, Arc<dyn Greeter>>| {
            app.by_name = g;
        })
        .value("settings.name", "app.name", |app, name: String| app.settings.name = name)
        .value("settings.retries", "app.retries", |app, n: u32| app.settings.retries = n)
        .optional_value("settings.motd", "app.motd", |app, motd: Option<String>| {
            app.settings.motd = motd;
        })
}

fn assembly_error(result: graft_domain::Result<App>) -> Error {
    match result {
        Ok(_) => panic!("assembly should fail"),
        Err(e) => e,
    }
}

fn english_handle() -> Injected {
    Box::new(Arc::new(English))
}

fn greeter_handle() -> Injected {
    let greeter: Arc<dyn Greeter> = Arc::new(English);
    Box::new(greeter)
}

#[test]
fn test_declared_dependencies() {
    let fields = app_fields();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields.kind(), StrategyKind::Fields);

    let dependencies = fields.dependencies();
    let slots: Vec<&str> = dependencies.iter().map(|d| d.slot.as_str()).collect();
    assert_eq!(
        slots,
        vec![
            "english",
            "greeter",
            "greeters",
            "by_name",
            "settings.name",
            "settings.retries",
            "settings.motd"
        ]
    );

    assert_eq!(dependencies[0].target, Target::Kind(KindId::of::<English>()));
    assert_eq!(dependencies[1].target, Target::Capability(KindId::of::<dyn Greeter>()));
    assert!(dependencies[1].optional);
    assert_eq!(dependencies[2].kind, DependencyKind::ObjectList);
    assert_eq!(dependencies[3].kind, DependencyKind::ObjectMap);
    assert_eq!(dependencies[4].kind, DependencyKind::Value);
    assert!(!dependencies[5].optional);
    assert!(dependencies[6].optional);
}

#[test]
fn test_assemble_fills_every_slot() {
    let arguments = vec![
        Argument::Object(Some(english_handle())),
        Argument::Object(None),
        Argument::List(vec![greeter_handle(), greeter_handle()]),
        Argument::Map(vec![("en".to_string(), greeter_handle())]),
        Argument::Value(Some(json!("svc"))),
        Argument::Value(Some(json!("3"))),
        Argument::Value(None),
    ];

    let app = app_fields().assemble(arguments).unwrap();
    assert!(app.english.is_some());
    assert!(app.greeter.is_none());
    assert_eq!(app.greeters.len(), 2);
    assert_eq!(app.by_name["en"].greet(), "hello");
    assert_eq!(app.settings.name, "svc");
    assert_eq!(app.settings.retries, 3);
    assert_eq!(app.settings.motd, None);
}

#[test]
fn test_shape_mismatch_is_a_coercion_error() {
    let fields = Fields::<App>::new().object("english", "", |app, e: Arc<English>| {
        app.english = Some(e);
    });

    let err = assembly_error(fields.assemble(vec![Argument::List(vec![])]));
    assert!(matches!(err, Error::Coercion { ref what, .. } if what == "english"));
}

#[test]
fn test_wrong_handle_type_is_a_coercion_error() {
    let fields = Fields::<App>::new().object("english", "", |app, e: Arc<English>| {
        app.english = Some(e);
    });

    let err = assembly_error(fields.assemble(vec![Argument::Object(Some(greeter_handle()))]));
    assert!(matches!(err, Error::Coercion { .. }));
}

#[test]
fn test_value_coercion_failure() {
    let fields = Fields::<App>::new().value("settings.retries", "app.retries", |app, n: u32| {
        app.settings.retries = n;
    });

    let err = assembly_error(fields.assemble(vec![Argument::Value(Some(json!("many")))]));
    assert!(matches!(err, Error::Coercion { ref what, .. } if what == "app.retries"));
}

#[test]
fn test_argument_count_mismatch() {
    let err = assembly_error(app_fields().assemble(vec![]));
    assert!(matches!(err, Error::Internal { .. }));
}

#[test]
fn test_malformed_name_fails_validation() {
    let fields = Fields::<App>::new().capability("greeter", "[", |app, g: Arc<dyn Greeter>| {
        app.greeter = Some(g);
    });

    let err = fields.validate().unwrap_err();
    assert!(matches!(err, Error::UnsupportedRegistrationShape { .. }));
}

#[test]
fn test_build_produces_boxed_object() {
    let fields = Fields::<Settings>::new().value("name", "n", |s, name: String| s.name = name);
    let built = fields.build(vec![Argument::Value(Some(json!("x")))]).unwrap();

    let settings = built.downcast::<Settings>().expect("built settings");
    assert_eq!(settings.name, "x");
}
