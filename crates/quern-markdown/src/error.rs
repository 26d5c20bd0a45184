//! Error types for quern-markdown

use thiserror::Error;

/// Result type alias for quern-markdown operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the markdown pipeline.
///
/// Both variants abort the current document; the line number points at the
/// offending source line (1-based).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The scanner could not tokenize the input.
    #[error("Scan error (line {line}): {message}")]
    Scan {
        /// What went wrong.
        message: String,
        /// 1-based source line.
        line: u32,
    },

    /// The parser hit a structural violation.
    #[error("Parse error (line {line}): {message}")]
    Parse {
        /// What went wrong.
        message: String,
        /// 1-based source line.
        line: u32,
    },
}

impl Error {
    /// The 1-based source line the error points at.
    pub fn line(&self) -> u32 {
        match self {
            Self::Scan { line, .. } | Self::Parse { line, .. } => *line,
        }
    }

    pub(crate) fn scan(message: impl Into<String>, line: u32) -> Self {
        Self::Scan {
            message: message.into(),
            line,
        }
    }

    pub(crate) fn parse(message: impl Into<String>, line: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }
}
