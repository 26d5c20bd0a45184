//! Error types for quern-cli

use thiserror::Error;

/// Result type alias for quern-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quern-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Problem with the project configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error from the CMS layer.
    #[error(transparent)]
    Cms(#[from] quern_cms::Error),

    /// Error from the markdown pipeline.
    #[error(transparent)]
    Markdown(#[from] quern_markdown::Error),

    /// JSON output failure.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
