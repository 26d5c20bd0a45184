//! Error types for quern-registry

use quern_core::ContentPath;
use thiserror::Error;

/// Result type alias for quern-registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quern-registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A document already occupies this full path; the first insertion wins.
    #[error("Content path '{0}' has already been added")]
    DuplicatePath(ContentPath),
}
