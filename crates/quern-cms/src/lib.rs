//! # quern-cms
//!
//! The Quern CMS orchestration layer.
//!
//! Ties the pipeline together: markdown sources are compiled
//! ([`quern_markdown`]), validated against content-type schemas, registered
//! in the content path trie ([`quern_registry`]), and served through the
//! query surface ([`CmsBackend`]).
//!
//! The build phase attempts *every* input and accumulates per-document
//! errors (parse, validation, duplicate path); [`CmsBuilder::build`] fails
//! atomically only after all inputs were attempted. A finished backend is
//! read-only.
//!
//! # Modules
//!
//! - [`schema`]: content-type schemas, registry, value coercion
//! - [`source`]: content sources and the physical/logical path rule
//! - [`processor`]: schema validation over parsed documents
//! - [`builder`]: the build orchestration
//! - [`backend`]: the query surface
//! - [`loader`]: filesystem folder loading
//! - [`sitemap`]: sitemap item generation
//!
//! # Example
//!
//! ```rust
//! use quern_cms::{CmsBuilder, ContentSource, GetEntityRequest};
//! use quern_core::ContentPath;
//! use chrono::Utc;
//!
//! let source = ContentSource {
//!     markdown: "---\ntitle: Hello\n---\nBody".to_string(),
//!     directory: ContentPath::from(["docs"]),
//!     id: "hello".to_string(),
//!     created_at: Utc::now(),
//!     updated_at: Utc::now(),
//! };
//! let backend = CmsBuilder::new().add_content(source).build().unwrap();
//! let entity = backend
//!     .get_entity(&GetEntityRequest {
//!         path: ContentPath::from(["docs", "hello"]),
//!         properties: None,
//!     })
//!     .unwrap();
//! assert_eq!(entity.title(), Some("Hello"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod builder;
pub mod error;
pub mod loader;
pub mod processor;
pub mod schema;
pub mod sitemap;
pub mod source;

pub use backend::{
    CmsBackend, CountPropertyValuesRequest, GetEntitiesRequest, GetEntityRequest,
    GetSectionsRequest,
};
pub use builder::CmsBuilder;
pub use error::{BuildError, BuildMessage, DocumentErrors, Error, Result};
pub use loader::load_folder;
pub use schema::{
    coerce, ContentType, ContentTypeRegistry, PropertySchema, PropertyType,
    UNDEFINED_CONTENT_TYPE,
};
pub use sitemap::{sitemap_items, SitemapItem};
pub use source::{parse_source, ContentSource, INDEX_FILE_NAME};
