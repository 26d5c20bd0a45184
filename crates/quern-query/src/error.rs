//! Error types for quern-query

use quern_core::ValueKind;
use thiserror::Error;

/// Result type alias for quern-query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quern-query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A property expression could not be parsed.
    #[error("Invalid property expression '{expression}': {message}")]
    InvalidExpression {
        /// The offending expression source.
        expression: String,
        /// What went wrong.
        message: String,
    },

    /// No computed function matches the name, callee kind, and arity.
    ///
    /// Raised at query time, since the callee's runtime type may vary per
    /// document.
    #[error("Unknown function '{name}' for {kind} values with {arity} argument(s)")]
    UnknownFunction {
        /// Function name.
        name: String,
        /// Runtime kind of the callee value.
        kind: ValueKind,
        /// Number of extra arguments supplied.
        arity: usize,
    },

    /// A computed function was found but failed on its input.
    #[error("Function '{name}' failed: {message}")]
    FunctionFailed {
        /// Function name.
        name: String,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    pub(crate) fn expression(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            message: message.into(),
        }
    }
}
