//! Content-type schemas and value coercion.
//!
//! A content type names the frontmatter properties its documents must or
//! may carry, each with a value type and a scalar/array shape. Documents
//! pick their type through the `type` frontmatter property; documents
//! without one carry the [`UNDEFINED_CONTENT_TYPE`] sentinel and bypass
//! schema validation entirely.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use quern_core::{parse_datetime, PropertyValue};

use crate::error::{Error, Result};

/// Content type id carried by documents with no `type` property.
pub const UNDEFINED_CONTENT_TYPE: &str = "undefined";

// ============================================================================
// Property schemas
// ============================================================================

/// Value type of a schema property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// UTF-8 string, kept verbatim.
    String,
    /// 64-bit signed integer.
    Number,
    /// 64-bit float.
    Float,
    /// `true` / `false`.
    Bool,
    /// Timestamp (RFC 3339, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD`).
    DateTime,
}

/// One property of a content type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Frontmatter property name.
    pub name: String,
    /// Value type each element coerces to.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// `true` when the frontmatter value must be an array.
    #[serde(default)]
    pub is_array: bool,
    /// `true` when the property must be present.
    #[serde(default)]
    pub is_required: bool,
}

impl PropertySchema {
    /// Create a scalar, optional property.
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            property_type,
            is_array: false,
            is_required: false,
        }
    }

    /// Mark the property as array-shaped.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Mark the property as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// A named schema for one kind of document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    /// Content type id matched against the `type` frontmatter property.
    pub id: String,
    /// The declared properties.
    pub properties: Vec<PropertySchema>,
}

impl ContentType {
    /// Create a content type with no properties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Vec::new(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, property: PropertySchema) -> Self {
        self.properties.push(property);
        self
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Registry of content types by id.
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
    types: HashMap<String, ContentType>,
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type; a duplicate id is an error.
    pub fn register(&mut self, content_type: ContentType) -> Result<()> {
        let id = content_type.id.clone();
        if self.types.insert(id.clone(), content_type).is_some() {
            return Err(Error::DuplicateContentType(id));
        }
        Ok(())
    }

    /// Resolve a content type by id.
    pub fn resolve(&self, id: &str) -> Option<&ContentType> {
        self.types.get(id)
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Coerce a raw frontmatter scalar into a typed property value.
///
/// Returns `None` when the text does not parse as the requested type.
///
/// # Examples
///
/// ```rust
/// use quern_cms::{coerce, PropertyType};
/// use quern_core::PropertyValue;
///
/// assert_eq!(coerce("15", PropertyType::Number), Some(PropertyValue::Integer(15)));
/// assert_eq!(coerce("x", PropertyType::Number), None);
/// assert!(coerce("2020-01-02", PropertyType::DateTime).is_some());
/// ```
pub fn coerce(raw: &str, property_type: PropertyType) -> Option<PropertyValue> {
    let raw = raw.trim();
    match property_type {
        PropertyType::String => Some(PropertyValue::String(raw.to_string())),
        PropertyType::Number => raw.parse::<i64>().ok().map(PropertyValue::Integer),
        PropertyType::Float => raw.parse::<f64>().ok().map(PropertyValue::Float),
        PropertyType::Bool => match raw {
            "true" => Some(PropertyValue::Bool(true)),
            "false" => Some(PropertyValue::Bool(false)),
            _ => None,
        },
        PropertyType::DateTime => parse_datetime(raw).map(PropertyValue::DateTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_rejects_duplicate_id() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(ContentType::new("article")).unwrap();
        let err = registry.register(ContentType::new("article")).unwrap_err();
        assert!(matches!(err, Error::DuplicateContentType(id) if id == "article"));
    }

    #[test]
    fn test_registry_resolves_by_id() {
        let mut registry = ContentTypeRegistry::new();
        registry
            .register(
                ContentType::new("article")
                    .with_property(PropertySchema::new("title", PropertyType::String).required()),
            )
            .unwrap();
        let ct = registry.resolve("article").unwrap();
        assert_eq!(ct.properties.len(), 1);
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce("42", PropertyType::Number), Some(PropertyValue::Integer(42)));
        assert_eq!(coerce("4.5", PropertyType::Number), None);
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce("4.5", PropertyType::Float), Some(PropertyValue::Float(4.5)));
        assert_eq!(coerce("4", PropertyType::Float), Some(PropertyValue::Float(4.0)));
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(coerce("true", PropertyType::Bool), Some(PropertyValue::Bool(true)));
        assert_eq!(coerce("yes", PropertyType::Bool), None);
    }

    #[test]
    fn test_coerce_datetime_formats() {
        assert!(coerce("2020-01-02", PropertyType::DateTime).is_some());
        assert!(coerce("2020-01-02 10:00:00", PropertyType::DateTime).is_some());
        assert!(coerce("soon", PropertyType::DateTime).is_none());
    }

    #[test]
    fn test_schema_serde_shape() {
        let json = r#"{"name": "tags", "type": "string", "is_array": true}"#;
        let schema: PropertySchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.property_type, PropertyType::String);
        assert!(schema.is_array);
        assert!(!schema.is_required);
    }
}
