//! Content sources and the physical/logical path rule.
//!
//! A [`ContentSource`] is one markdown file handed to the build: its text,
//! the directory it lives in, its file name without extension, and the file
//! timestamps. [`parse_source`] runs the markdown pipeline over it and
//! applies document identity:
//!
//! - a file named `index` attaches to its containing directory (no extra
//!   path segment, no `fileName` key)
//! - any other file name appends itself as a terminal segment

use chrono::{DateTime, Utc};

use quern_core::{ContentPath, ParsedDocument, RawValue};

use crate::schema::UNDEFINED_CONTENT_TYPE;

/// File name that attaches a document to its directory.
pub const INDEX_FILE_NAME: &str = "index";

/// Frontmatter property selecting the content type.
const TYPE_PROPERTY: &str = "type";

/// One markdown file handed to the build.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentSource {
    /// Raw markdown text, frontmatter included.
    pub markdown: String,
    /// Directory segments the file lives under.
    pub directory: ContentPath,
    /// File name without extension.
    pub id: String,
    /// File creation timestamp.
    pub created_at: DateTime<Utc>,
    /// File modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Compile a source through the markdown pipeline into a
/// [`ParsedDocument`].
///
/// The `type` frontmatter property is pulled out as the content-type id
/// (documents without one carry [`UNDEFINED_CONTENT_TYPE`]); the remaining
/// properties stay raw for schema validation.
pub fn parse_source(source: &ContentSource) -> quern_markdown::Result<ParsedDocument> {
    let compiled = quern_markdown::compile(&source.markdown)?;

    let mut content_type = UNDEFINED_CONTENT_TYPE.to_string();
    let mut properties = Vec::with_capacity(compiled.frontmatter.len());
    for property in compiled.frontmatter {
        if property.name == TYPE_PROPERTY {
            if let RawValue::Scalar(id) = &property.value {
                content_type = id.clone();
            }
            continue;
        }
        properties.push(property);
    }

    let physical_path = source.directory.child(source.id.clone());
    let (file_name, logical_path) = if source.id == INDEX_FILE_NAME {
        (None, source.directory.clone())
    } else {
        (Some(source.id.clone()), source.directory.child(source.id.clone()))
    };

    Ok(ParsedDocument {
        content_type,
        html: compiled.html,
        properties,
        inner_links: compiled.inner_links,
        file_name,
        physical_path,
        logical_path,
        created_at: source.created_at,
        updated_at: source.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, markdown: &str) -> ContentSource {
        ContentSource {
            markdown: markdown.to_string(),
            directory: ContentPath::from(["docs", "articles"]),
            id: id.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_index_attaches_to_directory() {
        let doc = parse_source(&source("index", "hi")).unwrap();
        assert_eq!(doc.logical_path, ContentPath::from(["docs", "articles"]));
        assert_eq!(doc.file_name, None);
        assert_eq!(
            doc.physical_path,
            ContentPath::from(["docs", "articles", "index"])
        );
    }

    #[test]
    fn test_named_file_appends_terminal_segment() {
        let doc = parse_source(&source("intro", "hi")).unwrap();
        assert_eq!(
            doc.logical_path,
            ContentPath::from(["docs", "articles", "intro"])
        );
        assert_eq!(doc.file_name.as_deref(), Some("intro"));
    }

    #[test]
    fn test_type_property_is_extracted() {
        let doc = parse_source(&source("a", "---\ntype: article\ntitle: T\n---\nhi")).unwrap();
        assert_eq!(doc.content_type, "article");
        assert_eq!(doc.properties.len(), 1);
        assert_eq!(doc.properties[0].name, "title");
    }

    #[test]
    fn test_missing_type_is_undefined() {
        let doc = parse_source(&source("a", "hi")).unwrap();
        assert_eq!(doc.content_type, UNDEFINED_CONTENT_TYPE);
    }

    #[test]
    fn test_html_and_links_are_compiled() {
        let doc = parse_source(&source("a", "# Hello World\n\ntext")).unwrap();
        assert!(doc.html.contains("<h1 id=\"hello-world\">"));
        assert_eq!(doc.inner_links.len(), 1);
        assert_eq!(doc.inner_links[0].link, "#hello-world");
    }

    #[test]
    fn test_parse_error_propagates_with_line() {
        let err = parse_source(&source("a", "```rust\nunterminated")).unwrap_err();
        assert_eq!(err.line(), 1);
    }
}
