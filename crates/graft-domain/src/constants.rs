//! Domain layer constants

// ============================================================================
// Value Keys
// ============================================================================

/// Separator between segments of a value key path
pub const KEY_PATH_SEPARATOR: char = '.';

// ============================================================================
// Conditions
// ============================================================================

/// Prefix marking a value reference inside a condition expression
pub const CONDITION_VALUE_PREFIX: char = '#';

/// Literal that compares equal to an absent value inside a condition
pub const CONDITION_NIL_LITERAL: &str = "nil";

// ============================================================================
// Construction
// ============================================================================

/// Slot prefix for positional factory arguments (`arg0`, `arg1`, ...)
pub const FACTORY_ARG_PREFIX: &str = "arg";

/// Largest number of constructor parameters a factory accepts
pub const FACTORY_MAX_ARITY: usize = 8;
