//! Error types for quern-cms

use std::fmt;

use quern_core::ContentPath;
use thiserror::Error;

/// Result type alias for quern-cms operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in quern-cms
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No entity exists at the requested path. A distinct signal, not a
    /// parse or validation failure.
    #[error("No entity at path '{0}'")]
    NotFound(ContentPath),

    /// A content type id was registered twice.
    #[error("Content type '{0}' has already been registered")]
    DuplicateContentType(String),

    /// The build phase finished with accumulated per-document errors.
    #[error("{0}")]
    Build(BuildError),

    /// Query-time failure (bad expression, unknown computed function).
    #[error(transparent)]
    Query(#[from] quern_query::Error),

    /// Filesystem failure while loading content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The content folder produced an invalid glob pattern.
    #[error("Invalid content folder pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

// ============================================================================
// Build errors
// ============================================================================

/// All errors accumulated across one build, grouped per document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildError {
    /// Per-document error groups.
    pub errors: Vec<DocumentErrors>,
}

/// The errors of a single offending document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentErrors {
    /// Logical path of the document.
    pub path: ContentPath,
    /// Content type id of the document.
    pub content_type: String,
    /// Messages, reported in source-line order.
    pub messages: Vec<BuildMessage>,
}

/// One line-numbered build message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMessage {
    /// 1-based source line; 0 when no line applies.
    pub line: u32,
    /// What went wrong.
    pub text: String,
}

impl BuildMessage {
    /// Create a message.
    pub fn new(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

impl DocumentErrors {
    /// Create an empty group for a document.
    pub fn new(path: ContentPath, content_type: impl Into<String>) -> Self {
        Self {
            path,
            content_type: content_type.into(),
            messages: Vec::new(),
        }
    }

    /// Append a message.
    pub fn push(&mut self, line: u32, text: impl Into<String>) {
        self.messages.push(BuildMessage::new(line, text));
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CMS build finished with errors")?;
        for group in &self.errors {
            writeln!(f)?;
            writeln!(f, "Entity '{}:{}'", group.content_type, group.path)?;
            let mut messages = group.messages.clone();
            messages.sort_by_key(|m| m.line);
            for message in messages {
                writeln!(f, "Line:{} {}", message.line, message.text)?;
            }
        }
        Ok(())
    }
}
