//! Parsed and processed document contracts.
//!
//! A markdown source file flows through two document shapes:
//!
//! 1. [`ParsedDocument`]: the immediate output of the markdown pipeline:
//!    rendered HTML, the raw frontmatter property list, inner links, and
//!    the physical/logical path pair.
//! 2. [`ProcessedDocument`]: the schema-validated form, one flat
//!    name → [`PropertyValue`] map carrying the reserved keys (see [`keys`])
//!    plus every validated frontmatter property. This is what the registry
//!    stores and the query engine operates on.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::path::ContentPath;
use crate::value::PropertyValue;

/// Reserved [`ProcessedDocument`] keys.
pub mod keys {
    /// Content type id of the document.
    pub const CONTENT_TYPE: &str = "contentType";
    /// Rendered HTML body.
    pub const CONTENT: &str = "content";
    /// Logical path segments.
    pub const PATH: &str = "path";
    /// File name (absent for `index` documents).
    pub const FILE_NAME: &str = "fileName";
    /// File creation timestamp.
    pub const CREATED_AT: &str = "createdAt";
    /// File modification timestamp.
    pub const UPDATED_AT: &str = "updatedAt";
    /// Heading anchors extracted from the body.
    pub const INNER_LINKS: &str = "innerLinks";
    /// Document title property.
    pub const TITLE: &str = "title";
}

// ============================================================================
// Frontmatter
// ============================================================================

/// A raw frontmatter value before schema coercion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// `key: value`
    Scalar(String),
    /// `key: [v1, v2, …]`
    List(Vec<String>),
}

/// One frontmatter property with its source line for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontmatterProperty {
    /// Property name.
    pub name: String,
    /// Raw scalar or list value.
    pub value: RawValue,
    /// 1-based source line of the property.
    pub line: u32,
}

// ============================================================================
// Inner links
// ============================================================================

/// An in-document anchor, one per heading, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerLink {
    /// Heading level (1–7).
    pub level: u8,
    /// Plain heading text.
    pub title: String,
    /// Anchor: `"#"` + slug of the title.
    pub link: String,
}

// ============================================================================
// ParsedDocument
// ============================================================================

/// Output of the markdown pipeline for one source file, before schema
/// validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedDocument {
    /// Content type id from the `type` frontmatter property.
    pub content_type: String,
    /// Rendered HTML body.
    pub html: String,
    /// Frontmatter properties in source order (minus the `type` property).
    pub properties: Vec<FrontmatterProperty>,
    /// Heading anchors in document order.
    pub inner_links: Vec<InnerLink>,
    /// File name without extension; `None` for `index` files.
    pub file_name: Option<String>,
    /// Directory segments plus file name, as found on disk.
    pub physical_path: ContentPath,
    /// Registry path: `index` attaches to its directory, any other file
    /// name appends a terminal segment.
    pub logical_path: ContentPath,
    /// File creation timestamp.
    pub created_at: DateTime<Utc>,
    /// File modification timestamp.
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// ProcessedDocument
// ============================================================================

/// A schema-validated document as a flat property map.
///
/// Iteration order is deterministic (sorted by key).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessedDocument(BTreeMap<String, PropertyValue>);

impl ProcessedDocument {
    /// Create an empty document map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any previous value under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.0.insert(name.into(), value);
    }

    /// Look up a property.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.get(name)
    }

    /// `true` when the property exists.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no properties are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropertyValue)> {
        self.0.iter()
    }

    /// The reserved `contentType` value.
    pub fn content_type(&self) -> Option<&str> {
        self.get(keys::CONTENT_TYPE).and_then(PropertyValue::as_str)
    }

    /// The `title` property, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.get(keys::TITLE).and_then(PropertyValue::as_str)
    }

    /// The reserved `fileName` value (absent for `index` documents).
    pub fn file_name(&self) -> Option<&str> {
        self.get(keys::FILE_NAME).and_then(PropertyValue::as_str)
    }

    /// The reserved `path` value as segments.
    pub fn path_segments(&self) -> Vec<String> {
        match self.get(keys::PATH) {
            Some(PropertyValue::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The reserved `updatedAt` value.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self.get(keys::UPDATED_AT) {
            Some(PropertyValue::DateTime(dt)) => Some(*dt),
            _ => None,
        }
    }
}

impl FromIterator<(String, PropertyValue)> for ProcessedDocument {
    fn from_iter<T: IntoIterator<Item = (String, PropertyValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ProcessedDocument {
    type Item = (String, PropertyValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
