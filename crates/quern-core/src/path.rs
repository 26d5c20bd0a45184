//! Canonical content path representation.
//!
//! A [`ContentPath`] is an ordered sequence of path segments. Segments
//! compare by exact, case-sensitive equality. The segment sequence is the
//! canonical form everywhere inside Quern; joining to and splitting from a
//! `/`-separated string happens only at I/O boundaries.
//!
//! # Example
//!
//! ```rust
//! use quern_core::ContentPath;
//!
//! let path = ContentPath::from(["docs", "articles"]);
//! assert_eq!(path.to_string(), "docs/articles");
//! assert_eq!(path.segments(), &["docs", "articles"]);
//!
//! let child = path.child("intro");
//! assert_eq!(child.to_string(), "docs/articles/intro");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An ordered sequence of content path segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentPath(Vec<String>);

impl ContentPath {
    /// Create an empty path (the registry root).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a path from an iterator of segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The path segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the empty (root) path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    /// `true` when `self` starts with every segment of `prefix`.
    pub fn starts_with(&self, prefix: &ContentPath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl FromStr for ContentPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(Error::InvalidPath(s.to_string()));
        }
        Ok(Self::from_segments(trimmed.split('/')))
    }
}

impl From<Vec<String>> for ContentPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ContentPath {
    fn from(segments: [S; N]) -> Self {
        Self::from_segments(segments)
    }
}

impl IntoIterator for ContentPath {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_segments() {
        let path = ContentPath::from(["docs", "articles", "intro"]);
        assert_eq!(path.to_string(), "docs/articles/intro");
    }

    #[test]
    fn test_root_is_empty() {
        assert!(ContentPath::root().is_empty());
        assert_eq!(ContentPath::root().to_string(), "");
    }

    #[test]
    fn test_parse_round_trip() {
        let path: ContentPath = "docs/articles".parse().unwrap();
        assert_eq!(path, ContentPath::from(["docs", "articles"]));
    }

    #[test]
    fn test_parse_trims_outer_slashes() {
        let path: ContentPath = "/docs/articles/".parse().unwrap();
        assert_eq!(path.segments(), &["docs", "articles"]);
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        assert!("docs//articles".parse::<ContentPath>().is_err());
    }

    #[test]
    fn test_segments_compare_case_sensitively() {
        assert_ne!(
            ContentPath::from(["Docs"]),
            ContentPath::from(["docs"]),
        );
    }

    #[test]
    fn test_starts_with() {
        let path = ContentPath::from(["docs", "articles", "intro"]);
        assert!(path.starts_with(&ContentPath::from(["docs"])));
        assert!(path.starts_with(&ContentPath::root()));
        assert!(!path.starts_with(&ContentPath::from(["articles"])));
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = ContentPath::from(["docs"]);
        let child = parent.child("intro");
        assert_eq!(parent.len(), 1);
        assert_eq!(child.segments(), &["docs", "intro"]);
    }
}
