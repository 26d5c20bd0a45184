//! Error types for quern-core

use thiserror::Error;

/// Result type alias for quern-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quern-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A value could not be represented as a [`crate::PropertyValue`]
    #[error("Invalid property value: {0}")]
    InvalidValue(String),

    /// A content path string could not be parsed
    #[error("Invalid content path: {0}")]
    InvalidPath(String),
}
