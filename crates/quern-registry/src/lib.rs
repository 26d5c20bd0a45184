//! # quern-registry
//!
//! Path-hierarchical content registry for Quern.
//!
//! Processed documents are indexed in a trie of path segments
//! ([`ContentTree`]): nodes are created lazily and shared across documents
//! with a common path prefix, and at most one document occupies a given
//! full path. The build phase is strictly insert-only; a finished tree is
//! treated as read-only.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`tree`]: the content path trie
//! - [`section`]: section tree listing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod section;
pub mod tree;

pub use error::{Error, Result};
pub use section::SectionItem;
pub use tree::ContentTree;
