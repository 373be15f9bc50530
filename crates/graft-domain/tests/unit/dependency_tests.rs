//! Unit tests for dependency descriptors

use graft_domain::{Dependency, DependencyKind, KindId, NameExpr, Target};

struct Database;

#[test]
fn test_value_dependency() {
    let dep = Dependency::value("db.url", KindId::of::<String>(), "url");
    assert_eq!(dep.kind, DependencyKind::Value);
    assert!(!dep.optional);
    assert_eq!(dep.slot, "url");
    match &dep.target {
        Target::Value { key, ty } => {
            assert_eq!(key, "db.url");
            assert_eq!(*ty, KindId::of::<String>());
        }
        other => panic!("Expected value target, got {other:?}"),
    }
    assert_eq!(dep.target.object_kind(), None);
}

#[test]
fn test_object_dependency_optional() {
    let dep = Dependency::object(
        DependencyKind::SingleObject,
        Target::Kind(KindId::of::<Database>()),
        NameExpr::Unnamed,
        "db",
    )
    .optional(true);
    assert!(dep.optional);
    assert!(!dep.target.is_capability());
    assert_eq!(dep.target.object_kind(), Some(KindId::of::<Database>()));
}

#[test]
fn test_nested_in_prefixes_slot() {
    let dep = Dependency::value("port", KindId::of::<u16>(), "server.port").nested_in("arg1");
    assert_eq!(dep.slot, "arg1.server.port");

    let bare = Dependency::value("port", KindId::of::<u16>(), "").nested_in("arg0");
    assert_eq!(bare.slot, "arg0");
}
