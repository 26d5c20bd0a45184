//! Sitemap item generation.
//!
//! Produces one location entry per registered document from the reserved
//! `path` and `updatedAt` keys. Serializing the items to XML is left to the
//! web layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::CmsBackend;

/// One sitemap entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SitemapItem {
    /// `/`-joined logical path of the document.
    pub loc: String,
    /// Last modification timestamp, when known.
    pub last_mod: Option<DateTime<Utc>>,
}

/// Build sitemap items for every registered document.
pub fn sitemap_items(backend: &CmsBackend) -> Vec<SitemapItem> {
    backend
        .documents()
        .into_iter()
        .map(|document| SitemapItem {
            loc: document.path_segments().join("/"),
            last_mod: document.updated_at(),
        })
        .collect()
}
