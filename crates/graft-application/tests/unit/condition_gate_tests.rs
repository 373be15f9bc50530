//! Condition gate tests

use std::sync::Arc;

use graft_application::{ConditionGate, Registration};
use graft_domain::Error;

use crate::test_utils::{English, FixedConditions};

#[test]
fn test_missing_or_blank_condition_is_active_without_evaluating() {
    let conditions = Arc::new(FixedConditions::new());
    let gate = ConditionGate::new(conditions.clone());

    let plain = Registration::<English>::new().into_descriptor().unwrap();
    let blank = Registration::<English>::new().when("  ").into_descriptor().unwrap();

    assert!(gate.is_active(&plain).unwrap());
    assert!(gate.is_active(&blank).unwrap());
    assert_eq!(conditions.calls(), 0);
}

#[test]
fn test_condition_is_evaluated_on_every_query() {
    let conditions = Arc::new(FixedConditions::new().with("flag", true));
    let gate = ConditionGate::new(conditions.clone());
    let descriptor = Registration::<English>::new().when("flag").into_descriptor().unwrap();

    assert!(gate.is_active(&descriptor).unwrap());
    conditions.set("flag", false);
    assert!(!gate.is_active(&descriptor).unwrap());
    assert_eq!(conditions.calls(), 2);
}

#[test]
fn test_evaluation_errors_surface() {
    let gate = ConditionGate::new(Arc::new(FixedConditions::new()));
    let descriptor = Registration::<English>::new().when("7").into_descriptor().unwrap();

    assert!(matches!(
        gate.is_active(&descriptor),
        Err(Error::NonBooleanCondition { .. })
    ));
    assert!(gate.evaluate("").unwrap());
}
