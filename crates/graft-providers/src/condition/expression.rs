//! Expression condition evaluator
//!
//! Evaluates registration conditions with `evalexpr`. Conditions reference
//! values with `#key.path`; each reference is replaced by a variable bound to
//! the current value from the value source before evaluation.
//!
//! | Condition | Meaning |
//! |-----------|---------|
//! | `#cache.enabled == true` | value is the boolean `true` |
//! | `#mode != "test"` | value is anything but the string `test` |
//! | `#replicas > 1 && #region == "eu"` | numeric and string checks combined |
//! | `#feature.flag == nil` | value is absent |
//!
//! An absent value is bound to the empty value, which only equals `nil`.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use evalexpr::{ContextWithMutableVariables, HashMapContext, Value as EvalValue};
use graft_domain::constants::{CONDITION_NIL_LITERAL, CONDITION_VALUE_PREFIX};
use graft_domain::{ConditionEvaluator, Error, Result, ValueSource};
use regex::Regex;
use serde_json::Value;
use tracing::trace;

// String literals are matched first so references inside them stay literal text
static VALUE_REFERENCE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| {
        Regex::new(&format!(
            r#""(?:[^"\\]|\\.)*"|{}([A-Za-z0-9_.]+)"#,
            regex::escape(&CONDITION_VALUE_PREFIX.to_string())
        ))
    });

/// Condition evaluator backed by `evalexpr` and a value source
pub struct ExpressionConditionEvaluator {
    values: Arc<dyn ValueSource>,
}

impl ExpressionConditionEvaluator {
    /// Evaluator reading referenced values from `values`
    pub fn new(values: Arc<dyn ValueSource>) -> Self {
        Self { values }
    }

    /// Replace value references with variables. Returns the rewritten
    /// expression and the key bound to each variable.
    fn bind_references(expression: &str) -> Result<(String, Vec<(String, String)>)> {
        let pattern = VALUE_REFERENCE
            .as_ref()
            .map_err(|e| Error::internal(format!("value reference pattern: {e}")))?;

        let mut variables: HashMap<String, String> = HashMap::new();
        let mut bindings = Vec::new();
        let rewritten = pattern.replace_all(expression, |caps: &regex::Captures<'_>| {
            let Some(reference) = caps.get(1) else {
                return caps[0].to_owned();
            };
            let key = reference.as_str().trim_end_matches('.').to_owned();
            variables
                .entry(key.clone())
                .or_insert_with(|| {
                    let variable = format!("__value_{}", bindings.len());
                    bindings.push((variable.clone(), key));
                    variable
                })
                .clone()
        });
        Ok((rewritten.into_owned(), bindings))
    }

    fn build_context(&self, bindings: &[(String, String)]) -> Result<HashMapContext> {
        let mut context: HashMapContext = HashMapContext::new();
        context
            .set_value(CONDITION_NIL_LITERAL.to_owned(), EvalValue::Empty)
            .map_err(|e| Error::internal(format!("failed to bind nil: {e}")))?;

        for (variable, key) in bindings {
            let value = self
                .values
                .get_value(key)?
                .map_or(EvalValue::Empty, |v| json_to_eval_value(&v));
            trace!(key = %key, value = ?value, "Bound condition value");
            context
                .set_value(variable.clone(), value)
                .map_err(|e| Error::internal(format!("failed to bind {key}: {e}")))?;
        }
        Ok(context)
    }
}

impl ConditionEvaluator for ExpressionConditionEvaluator {
    fn evaluate(&self, expression: &str) -> Result<bool> {
        if expression.trim().is_empty() {
            return Ok(true);
        }

        let (rewritten, bindings) = Self::bind_references(expression)?;
        let context = self.build_context(&bindings)?;

        match evalexpr::eval_with_context(&rewritten, &context) {
            Ok(EvalValue::Boolean(result)) => Ok(result),
            Ok(other) => Err(Error::non_boolean_condition(expression, other.to_string())),
            Err(e) => Err(Error::condition_evaluation(expression, e.to_string())),
        }
    }
}

impl std::fmt::Debug for ExpressionConditionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionConditionEvaluator")
            .finish_non_exhaustive()
    }
}

/// Convert a JSON value to an evalexpr value
fn json_to_eval_value(value: &Value) -> EvalValue {
    match value {
        Value::Null => EvalValue::Empty,
        Value::Bool(b) => EvalValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                EvalValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                EvalValue::Float(f)
            } else {
                EvalValue::Empty
            }
        }
        Value::String(s) => EvalValue::String(s.clone()),
        Value::Array(items) => EvalValue::Tuple(items.iter().map(json_to_eval_value).collect()),
        // Objects are not comparable in expressions
        Value::Object(_) => EvalValue::String(value.to_string()),
    }
}
