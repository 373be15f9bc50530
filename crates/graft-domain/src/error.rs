//! Error handling types
//!
//! Every failure the container can report is a variant of [`Error`]. Resolution
//! errors are returned synchronously to the caller of `resolve` or of the
//! retrieval operation that triggered resolution; nothing is retried.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Error::DuplicateRegistration`] | `(kind, name)` registered twice |
//! | [`Error::UnsupportedRegistrationShape`] | registration cannot be turned into a descriptor |
//! | [`Error::MissingObject`] | required concrete-kind dependency has no active candidate |
//! | [`Error::MissingImplementation`] | required capability dependency has no active candidate |
//! | [`Error::MultipleMatches`] | a single-object lookup found more than one candidate |
//! | [`Error::AmbiguousMapKey`] | two map entries share the same declared name |
//! | [`Error::CircularDependency`] | the graph walk re-entered an initializing object |
//! | [`Error::MissingValue`] | required value key absent from the value source |
//! | [`Error::NonBooleanCondition`] | a condition evaluated to something other than a boolean |
//! | [`Error::Constructor`] | a factory or ready hook returned an error |
//! | [`Error::Coercion`] | a value or argument could not be converted to its slot type |

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by wrapping variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for graft
#[derive(Error, Debug)]
pub enum Error {
    /// An object with the same kind and name is already registered
    #[error("Duplicate registration: {kind} named '{name}'")]
    DuplicateRegistration {
        /// Type name of the registered kind
        kind: String,
        /// Declared name (empty for the unnamed default)
        name: String,
    },

    /// The registration could not be turned into a descriptor
    #[error("Unsupported registration shape for {kind}: {message}")]
    UnsupportedRegistrationShape {
        /// Type name of the registered kind
        kind: String,
        /// What was wrong with the registration
        message: String,
    },

    /// No active object of the requested concrete kind
    #[error("Missing object: {kind}{}", display_name(.name))]
    MissingObject {
        /// Requested kind
        kind: String,
        /// Requested name expression
        name: String,
    },

    /// No active object implements the requested capability
    #[error("Missing implementation of {capability}{}", display_name(.name))]
    MissingImplementation {
        /// Requested capability
        capability: String,
        /// Requested name expression
        name: String,
    },

    /// More than one active object matched a single-object lookup
    #[error("Multiple matches for {target}{}: {candidates:?}", display_name(.name))]
    MultipleMatches {
        /// Requested kind or capability
        target: String,
        /// Requested name expression
        name: String,
        /// Descriptions of every matching object
        candidates: Vec<String>,
    },

    /// A map-shaped dependency found two objects with the same name
    #[error("Ambiguous map key '{key}' while collecting {target}")]
    AmbiguousMapKey {
        /// Requested kind or capability
        target: String,
        /// Duplicated declared name
        key: String,
    },

    /// The dependency walk re-entered an object that is still initializing
    #[error("Circular dependency: {}", .chain.join(" -> "))]
    CircularDependency {
        /// Objects on the cycle, first element repeated at the end
        chain: Vec<String>,
    },

    /// A required value key is not present in the value source
    #[error("Missing value for key '{key}'")]
    MissingValue {
        /// Dotted key path
        key: String,
    },

    /// A registration condition did not evaluate to a boolean
    #[error("Condition '{expression}' is not boolean: {found}")]
    NonBooleanCondition {
        /// The condition text
        expression: String,
        /// Rendering of the value it produced
        found: String,
    },

    /// A registration condition could not be parsed or evaluated
    #[error("Condition '{expression}' failed: {message}")]
    ConditionEvaluation {
        /// The condition text
        expression: String,
        /// Evaluator diagnostic
        message: String,
    },

    /// A factory or ready hook reported failure
    #[error("Constructor of {kind} failed: {source}")]
    Constructor {
        /// Kind being constructed
        kind: String,
        /// Error returned by user code
        #[source]
        source: BoxError,
    },

    /// A value or argument could not be converted to its declared type
    #[error("Cannot coerce {what} into {target}: {message}")]
    Coercion {
        /// Key or slot being converted
        what: String,
        /// Target type name
        target: String,
        /// Conversion diagnostic
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn display_name(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!(" named '{name}'")
    }
}

// Registration error creation methods
impl Error {
    /// Create a duplicate registration error
    pub fn duplicate_registration<K: Into<String>, N: Into<String>>(kind: K, name: N) -> Self {
        Self::DuplicateRegistration {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unsupported registration shape error
    pub fn unsupported_shape<K: Into<String>, S: Into<String>>(kind: K, message: S) -> Self {
        Self::UnsupportedRegistrationShape {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

// Lookup error creation methods
impl Error {
    /// Create a missing object error
    pub fn missing_object<K: Into<String>, N: Into<String>>(kind: K, name: N) -> Self {
        Self::MissingObject {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a missing implementation error
    pub fn missing_implementation<C: Into<String>, N: Into<String>>(capability: C, name: N) -> Self {
        Self::MissingImplementation {
            capability: capability.into(),
            name: name.into(),
        }
    }

    /// Create a multiple matches error
    pub fn multiple_matches<T: Into<String>, N: Into<String>>(
        target: T,
        name: N,
        candidates: Vec<String>,
    ) -> Self {
        Self::MultipleMatches {
            target: target.into(),
            name: name.into(),
            candidates,
        }
    }

    /// Create an ambiguous map key error
    pub fn ambiguous_map_key<T: Into<String>, K: Into<String>>(target: T, key: K) -> Self {
        Self::AmbiguousMapKey {
            target: target.into(),
            key: key.into(),
        }
    }

    /// Create a circular dependency error from the walk path
    pub fn circular_dependency(chain: Vec<String>) -> Self {
        Self::CircularDependency { chain }
    }

    /// Create a missing value error
    pub fn missing_value<S: Into<String>>(key: S) -> Self {
        Self::MissingValue { key: key.into() }
    }
}

// Condition, construction and coercion error creation methods
impl Error {
    /// Create a non-boolean condition error
    pub fn non_boolean_condition<E: Into<String>, F: Into<String>>(expression: E, found: F) -> Self {
        Self::NonBooleanCondition {
            expression: expression.into(),
            found: found.into(),
        }
    }

    /// Create a condition evaluation error
    pub fn condition_evaluation<E: Into<String>, M: Into<String>>(expression: E, message: M) -> Self {
        Self::ConditionEvaluation {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Wrap an error returned by user construction code
    pub fn constructor<K: Into<String>, E: Into<BoxError>>(kind: K, source: E) -> Self {
        Self::Constructor {
            kind: kind.into(),
            source: source.into(),
        }
    }

    /// Create a coercion error
    pub fn coercion<W: Into<String>, T: Into<String>, M: Into<String>>(
        what: W,
        target: T,
        message: M,
    ) -> Self {
        Self::Coercion {
            what: what.into(),
            target: target.into(),
            message: message.into(),
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S: Into<String>, E: Into<BoxError>>(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: Into<BoxError>>(message: S, source: E) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether this is an absence error that an `optional` dependency suppresses
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::MissingObject { .. } | Self::MissingImplementation { .. } | Self::MissingValue { .. }
        )
    }

    /// Whether this error reports a dependency cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }

    /// Whether this error reports an ambiguous lookup
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::MultipleMatches { .. } | Self::AmbiguousMapKey { .. })
    }
}
