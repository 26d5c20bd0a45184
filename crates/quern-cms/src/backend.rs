//! The query surface over a finished registry.
//!
//! A [`CmsBackend`] owns the content path trie and the computed-function
//! registry; every request runs the fixed pipeline
//! filter → sort → project → paginate over the documents below the
//! requested root.

use serde::{Deserialize, Serialize};

use quern_core::{ContentPath, ProcessedDocument};
use quern_query::{
    paginate, FilterRow, FunctionRegistry, Page, PropertyCount, QueryEngine, SortRow,
};
use quern_registry::{ContentTree, SectionItem};

use crate::error::{Error, Result};

// ============================================================================
// Requests
// ============================================================================

/// Request for a single entity by path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GetEntityRequest {
    /// Full logical path of the entity.
    pub path: ContentPath,
    /// Optional projection (property expressions).
    pub properties: Option<Vec<String>>,
}

/// Request for a filtered, sorted, projected, paginated entity collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetEntitiesRequest {
    /// Restrict to documents at or below this path.
    pub from_path: Option<ContentPath>,
    /// Optional projection (property expressions).
    pub properties: Option<Vec<String>>,
    /// AND-combined filter predicates.
    pub filters: Option<Vec<FilterRow>>,
    /// Sort keys, primary first.
    pub sorting: Option<Vec<SortRow>>,
    /// Zero-indexed page.
    pub page: usize,
    /// Page size.
    pub per_page: usize,
}

/// Request for per-value counts of one property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CountPropertyValuesRequest {
    /// Property to count.
    pub property: String,
    /// Restrict to documents at or below this path.
    pub from_path: Option<ContentPath>,
    /// AND-combined filter predicates applied before counting.
    pub filters: Option<Vec<FilterRow>>,
}

/// Request for the section tree below a path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GetSectionsRequest {
    /// Root to list sections under.
    pub from_path: Option<ContentPath>,
    /// Levels of children below the listed sections (`0` ⇒ none).
    pub depth: usize,
}

// ============================================================================
// CmsBackend
// ============================================================================

/// The read-only CMS query surface.
pub struct CmsBackend {
    tree: ContentTree,
    functions: FunctionRegistry,
}

impl CmsBackend {
    pub(crate) fn new(tree: ContentTree, functions: FunctionRegistry) -> Self {
        Self { tree, functions }
    }

    /// Fetch one entity by path, optionally projected.
    ///
    /// An absent path is [`Error::NotFound`], a distinct signal rather
    /// than a build or validation failure.
    pub fn get_entity(&self, request: &GetEntityRequest) -> Result<ProcessedDocument> {
        let document = self
            .tree
            .get(&request.path)
            .ok_or_else(|| Error::NotFound(request.path.clone()))?;
        let engine = QueryEngine::new(&self.functions);
        Ok(engine.project(document, properties(&request.properties))?)
    }

    /// Fetch entities: filter → sort → project → paginate.
    pub fn get_entities(&self, request: &GetEntitiesRequest) -> Result<Page<ProcessedDocument>> {
        let root = request.from_path.clone().unwrap_or_default();
        let engine = QueryEngine::new(&self.functions);

        let documents = self.tree.list(&root);
        let mut documents = engine.filter(documents, rows(&request.filters))?;
        engine.sort(&mut documents, sort_rows(&request.sorting));

        let mut projected = Vec::with_capacity(documents.len());
        for document in documents {
            projected.push(engine.project(document, properties(&request.properties))?);
        }
        Ok(paginate(projected, request.page, request.per_page))
    }

    /// Count property values over the (optionally filtered) collection.
    pub fn count_property_values(
        &self,
        request: &CountPropertyValuesRequest,
    ) -> Result<Vec<PropertyCount>> {
        let root = request.from_path.clone().unwrap_or_default();
        let engine = QueryEngine::new(&self.functions);
        let documents = self.tree.list(&root);
        let documents = engine.filter(documents, rows(&request.filters))?;
        Ok(engine.count_by(&documents, &request.property))
    }

    /// List the section tree below a path.
    pub fn get_sections(&self, request: &GetSectionsRequest) -> Vec<SectionItem> {
        let root = request.from_path.clone().unwrap_or_default();
        self.tree.sections(&root, request.depth)
    }

    /// All documents, depth-first.
    pub fn documents(&self) -> Vec<&ProcessedDocument> {
        self.tree.list(&ContentPath::root())
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// `true` when no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

fn properties(request: &Option<Vec<String>>) -> &[String] {
    request.as_deref().unwrap_or(&[])
}

fn rows(request: &Option<Vec<FilterRow>>) -> &[FilterRow] {
    request.as_deref().unwrap_or(&[])
}

fn sort_rows(request: &Option<Vec<SortRow>>) -> &[SortRow] {
    request.as_deref().unwrap_or(&[])
}
