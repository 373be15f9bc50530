//! Condition gate
//!
//! Decides whether a registered object is active. Inactive objects are
//! invisible to resolution, matching and retrieval. Conditions are evaluated on
//! every query rather than cached because the value source may change between
//! calls.

use std::sync::Arc;

use graft_domain::{ConditionEvaluator, ObjectDescriptor, Result};
use tracing::trace;

/// Filters objects through their activation condition
#[derive(Clone)]
pub struct ConditionGate {
    evaluator: Arc<dyn ConditionEvaluator>,
}

impl ConditionGate {
    /// Create a gate over `evaluator`
    pub fn new(evaluator: Arc<dyn ConditionEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Whether `descriptor` is active. A missing or blank condition is always active.
    pub fn is_active(&self, descriptor: &ObjectDescriptor) -> Result<bool> {
        let Some(expression) = descriptor
            .condition
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        else {
            return Ok(true);
        };

        let active = self.evaluator.evaluate(expression)?;
        trace!(object = %descriptor.label(), condition = expression, active, "Evaluated condition");
        Ok(active)
    }

    /// Evaluate an ad-hoc expression with the gate's evaluator
    pub fn evaluate(&self, expression: &str) -> Result<bool> {
        if expression.trim().is_empty() {
            return Ok(true);
        }
        self.evaluator.evaluate(expression)
    }
}

impl std::fmt::Debug for ConditionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionGate").finish_non_exhaustive()
    }
}
