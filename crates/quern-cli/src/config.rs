//! Project configuration.
//!
//! A `quern.toml` file declares the content folder and the content-type
//! schemas the build validates against:
//!
//! ```toml
//! [content]
//! folder = "content"
//!
//! [[content_type]]
//! id = "article"
//!
//! [[content_type.property]]
//! name = "title"
//! type = "string"
//! required = true
//!
//! [[content_type.property]]
//! name = "tags"
//! type = "string"
//! array = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use quern_cms::{ContentType, PropertySchema, PropertyType};

use crate::error::{Error, Result};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "quern.toml";

/// The parsed project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QuernConfig {
    /// Content folder settings.
    pub content: ContentConfig,
    /// Declared content types.
    #[serde(default, rename = "content_type")]
    pub content_types: Vec<ContentTypeConfig>,
}

/// The `[content]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Folder scanned for `*.md` files.
    pub folder: PathBuf,
}

/// One `[[content_type]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentTypeConfig {
    /// Content type id.
    pub id: String,
    /// Declared properties.
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyConfig>,
}

/// One `[[content_type.property]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyConfig {
    /// Frontmatter property name.
    pub name: String,
    /// Value type.
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// `true` when the value must be an array.
    #[serde(default)]
    pub array: bool,
    /// `true` when the property must be present.
    #[serde(default)]
    pub required: bool,
}

impl QuernConfig {
    /// Load the configuration from `path`, or `quern.toml` in the current
    /// directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let text = fs::read_to_string(path).map_err(|error| {
            Error::Config(format!("cannot read '{}': {error}", path.display()))
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The declared content types as schema values.
    pub fn content_types(&self) -> Vec<ContentType> {
        self.content_types
            .iter()
            .map(|config| {
                let mut content_type = ContentType::new(&config.id);
                for property in &config.properties {
                    let mut schema = PropertySchema::new(&property.name, property.property_type);
                    if property.array {
                        schema = schema.array();
                    }
                    if property.required {
                        schema = schema.required();
                    }
                    content_type = content_type.with_property(schema);
                }
                content_type
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[content]
folder = "content"

[[content_type]]
id = "article"

[[content_type.property]]
name = "title"
type = "string"
required = true

[[content_type.property]]
name = "tags"
type = "string"
array = true

[[content_type.property]]
name = "publishedAt"
type = "datetime"
"#;

    #[test]
    fn test_parses_sample_config() {
        let config = QuernConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.content.folder, PathBuf::from("content"));
        assert_eq!(config.content_types.len(), 1);

        let types = config.content_types();
        assert_eq!(types[0].id, "article");
        assert_eq!(types[0].properties.len(), 3);
        assert!(types[0].properties[0].is_required);
        assert!(types[0].properties[1].is_array);
        assert_eq!(types[0].properties[2].property_type, PropertyType::DateTime);
    }

    #[test]
    fn test_missing_content_table_is_error() {
        assert!(QuernConfig::from_toml("[[content_type]]\nid = \"x\"").is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = QuernConfig::load(Some(Path::new("/nonexistent/quern.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
