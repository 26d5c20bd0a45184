//! Build orchestration.
//!
//! [`CmsBuilder`] collects content types and content sources, then
//! [`CmsBuilder::build`] runs validation, registers every document in the
//! content path trie, and hands back a read-only [`CmsBackend`].
//!
//! Every input is attempted: parse failures, validation failures, and
//! duplicate logical paths all accumulate into one [`BuildError`], so a
//! failing build reports the whole batch at once.

use std::path::Path;

use quern_query::FunctionRegistry;
use quern_registry::ContentTree;

use quern_core::ContentPath;

use crate::backend::CmsBackend;
use crate::error::{BuildError, DocumentErrors, Error, Result};
use crate::loader::load_folder;
use crate::processor::apply_schemas;
use crate::schema::{ContentType, ContentTypeRegistry, UNDEFINED_CONTENT_TYPE};
use crate::source::{parse_source, ContentSource};

/// Builder for a [`CmsBackend`].
#[derive(Default)]
pub struct CmsBuilder {
    content_types: ContentTypeRegistry,
    parsed: Vec<quern_core::ParsedDocument>,
    errors: Vec<DocumentErrors>,
}

impl CmsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type schema. Registering the same id twice is an
    /// immediate error.
    pub fn add_content_type(mut self, content_type: ContentType) -> Result<Self> {
        self.content_types.register(content_type)?;
        Ok(self)
    }

    /// Add one markdown source. A parse failure is recorded against the
    /// document and surfaces from [`Self::build`]; the builder keeps
    /// accepting further content.
    pub fn add_content(mut self, source: ContentSource) -> Self {
        match parse_source(&source) {
            Ok(document) => self.parsed.push(document),
            Err(error) => {
                log::warn!(
                    "failed to parse '{}': {error}",
                    source.directory.child(source.id.clone())
                );
                let mut group = DocumentErrors::new(
                    source.directory.child(source.id.clone()),
                    UNDEFINED_CONTENT_TYPE,
                );
                group.push(error.line(), error.to_string());
                self.errors.push(group);
            }
        }
        self
    }

    /// Add every `*.md` file under `path`, recursively. Filesystem errors
    /// fail immediately; per-file parse errors accumulate as usual.
    pub fn add_content_folder(mut self, path: impl AsRef<Path>) -> Result<Self> {
        for source in load_folder(path.as_ref())? {
            self = self.add_content(source);
        }
        Ok(self)
    }

    /// Validate, register, and finish the backend.
    ///
    /// Fails with [`Error::Build`] listing every offending document once
    /// all inputs were attempted.
    pub fn build(self) -> Result<CmsBackend> {
        let CmsBuilder {
            content_types,
            parsed,
            mut errors,
        } = self;

        let (processed, validation_errors) = apply_schemas(parsed, &content_types);
        errors.extend(validation_errors);

        let mut tree = ContentTree::new();
        for document in processed {
            let path = ContentPath::from(document.path_segments());
            let content_type = document
                .content_type()
                .unwrap_or(UNDEFINED_CONTENT_TYPE)
                .to_string();
            if tree.insert(document, path.clone()).is_err() {
                let mut group = DocumentErrors::new(path, content_type);
                group.push(0, "Content path has already been added");
                errors.push(group);
            }
        }

        if !errors.is_empty() {
            return Err(Error::Build(BuildError { errors }));
        }

        log::info!("CMS build finished: {} documents registered", tree.len());
        Ok(CmsBackend::new(tree, FunctionRegistry::with_builtins()))
    }
}
