//! Condition evaluator implementations

pub mod expression;

pub use expression::ExpressionConditionEvaluator;
