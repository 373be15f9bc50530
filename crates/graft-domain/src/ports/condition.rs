//! Condition evaluator port

use crate::error::Result;

/// Evaluates registration conditions such as `#feature.enabled == true`
pub trait ConditionEvaluator: Send + Sync {
    /// Evaluate `expression`.
    ///
    /// Returns [`Error::NonBooleanCondition`](crate::error::Error::NonBooleanCondition)
    /// when the expression produces anything other than a boolean.
    fn evaluate(&self, expression: &str) -> Result<bool>;
}
