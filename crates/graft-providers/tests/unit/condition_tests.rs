//! Expression condition evaluator tests

use std::sync::Arc;

use graft_providers::{
    ConditionEvaluator, Error, ExpressionConditionEvaluator, LayeredValueSource, MapValues,
    ValueSource,
};
use serde_json::json;

fn evaluator() -> (Arc<LayeredValueSource>, ExpressionConditionEvaluator) {
    let values = Arc::new(
        LayeredValueSource::new().with_provider(
            MapValues::new("test")
                .with("use_e", true)
                .with("mode", "prod")
                .with("replicas", 3)
                .with("ratio", 0.5),
        ),
    );
    let evaluator = ExpressionConditionEvaluator::new(values.clone());
    (values, evaluator)
}

#[test]
fn test_boolean_value_reference() {
    let (_, conditions) = evaluator();
    assert!(conditions.evaluate("#use_e == true").unwrap());
    assert!(!conditions.evaluate("#use_e != true").unwrap());
}

#[test]
fn test_string_and_numeric_comparisons() {
    let (_, conditions) = evaluator();
    assert!(conditions.evaluate(r#"#mode == "prod""#).unwrap());
    assert!(conditions.evaluate("#replicas > 1 && #ratio < 1.0").unwrap());
    assert!(!conditions.evaluate(r#"#mode == "dev" || #replicas == 1"#).unwrap());
}

#[test]
fn test_absent_value_equals_nil() {
    let (_, conditions) = evaluator();
    assert!(conditions.evaluate("#feature.flag == nil").unwrap());
    assert!(!conditions.evaluate("#use_e == nil").unwrap());
    assert!(!conditions.evaluate("#feature.flag == true").unwrap());
}

#[test]
fn test_sees_overridden_values() {
    let (values, conditions) = evaluator();
    assert!(conditions.evaluate("#use_e == true").unwrap());

    values.set_value("use_e", json!(false)).unwrap();
    assert!(!conditions.evaluate("#use_e == true").unwrap());
}

#[test]
fn test_blank_expression_is_true() {
    let (_, conditions) = evaluator();
    assert!(conditions.evaluate("").unwrap());
    assert!(conditions.evaluate("   ").unwrap());
}

#[test]
fn test_non_boolean_result() {
    let (_, conditions) = evaluator();
    let err = conditions.evaluate("#replicas + 1").unwrap_err();
    assert!(matches!(err, Error::NonBooleanCondition { .. }));
}

#[test]
fn test_malformed_expression() {
    let (_, conditions) = evaluator();
    let err = conditions.evaluate("#use_e == (").unwrap_err();
    assert!(matches!(err, Error::ConditionEvaluation { .. }));
}

#[test]
fn test_hash_inside_string_literal_is_not_a_reference() {
    let (values, conditions) = evaluator();
    values.set_value("mode", json!("#x")).unwrap();

    assert!(conditions.evaluate(r##"#mode == "#x""##).unwrap());
    assert!(!conditions.evaluate(r##"#mode == "#use_e""##).unwrap());
}
