//! # quern-core
//!
//! Shared types for the Quern markdown CMS backend.
//!
//! This crate provides the vocabulary used across all Quern crates.
//! It has no internal Quern dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`path`]: Canonical content path representation
//! - [`value`]: Loosely-typed property values
//! - [`document`]: Parsed and processed document contracts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod path;
pub mod value;

// Re-export key types at crate root for convenience
pub use document::{
    keys, FrontmatterProperty, InnerLink, ParsedDocument, ProcessedDocument, RawValue,
};
pub use error::{Error, Result};
pub use path::ContentPath;
pub use value::{parse_datetime, PropertyValue, ValueKind};
