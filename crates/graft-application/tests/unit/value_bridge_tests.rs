//! Value bridge and coercion tests

use graft_application::{ValueBridge, coerce};
use graft_domain::{Argument, Dependency, Error, KindId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::test_utils::StaticValues;

#[derive(Debug, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
}

#[test]
fn test_lookup_present_value() {
    let bridge = ValueBridge::new(StaticValues::new().with("name", "graft").shared());
    let dependency = Dependency::value("name", KindId::of::<String>(), "name");

    match bridge.lookup(&dependency).unwrap() {
        Argument::Value(Some(raw)) => assert_eq!(raw, json!("graft")),
        other => panic!("unexpected argument {other:?}"),
    }
}

#[test]
fn test_lookup_absent_required_and_optional() {
    let bridge = ValueBridge::new(StaticValues::new().shared());
    let required = Dependency::value("missing", KindId::of::<String>(), "slot");
    let optional = required.clone().optional(true);

    let err = bridge.lookup(&required).unwrap_err();
    assert!(matches!(err, Error::MissingValue { ref key } if key == "missing"));
    assert!(err.is_missing());
    assert!(matches!(bridge.lookup(&optional).unwrap(), Argument::Value(None)));
}

#[test]
fn test_typed_get_and_set() {
    let bridge = ValueBridge::new(StaticValues::new().shared());
    assert_eq!(bridge.get::<String>("k").unwrap(), None);

    bridge.set("k", json!("v")).unwrap();
    assert_eq!(bridge.get::<String>("k").unwrap(), Some("v".to_string()));
    assert_eq!(bridge.source().get_value("k").unwrap(), Some(json!("v")));
}

#[test]
fn test_coerce_strict_and_lenient_scalars() {
    assert_eq!(coerce::<u16>("port", json!(8080)).unwrap(), 8080);
    assert_eq!(coerce::<u16>("port", json!("8080")).unwrap(), 8080);
    assert!(coerce::<bool>("flag", json!("true")).unwrap());
    assert_eq!(coerce::<String>("port", json!(8080)).unwrap(), "8080");
    assert_eq!(coerce::<String>("flag", json!(false)).unwrap(), "false");
    assert_eq!(coerce::<String>("s", json!("plain")).unwrap(), "plain");
}

#[test]
fn test_coerce_structures() {
    let server: Server = coerce("server", json!({"host": "localhost", "port": 80})).unwrap();
    assert_eq!(
        server,
        Server {
            host: "localhost".to_string(),
            port: 80
        }
    );

    let list: Vec<u32> = coerce("list", json!([1, 2, 3])).unwrap();
    assert_eq!(list, vec![1, 2, 3]);
}

#[test]
fn test_coerce_failure() {
    let err = coerce::<u16>("port", json!("abc")).unwrap_err();
    assert!(matches!(err, Error::Coercion { ref what, .. } if what == "port"));

    let err = coerce::<u16>("port", Value::Array(vec![])).unwrap_err();
    assert!(matches!(err, Error::Coercion { .. }));
}
