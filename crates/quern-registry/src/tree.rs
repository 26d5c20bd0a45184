//! The content path trie.

use quern_core::{ContentPath, ProcessedDocument};

use crate::error::{Error, Result};
use crate::section::SectionItem;

// ============================================================================
// ContentNode
// ============================================================================

/// One trie node: a path segment, an optionally attached document, and the
/// child nodes in insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContentNode {
    pub(crate) segment: String,
    pub(crate) document: Option<ProcessedDocument>,
    pub(crate) children: Vec<ContentNode>,
}

impl ContentNode {
    fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            document: None,
            children: Vec::new(),
        }
    }

    fn find(&self, segment: &str) -> Option<&ContentNode> {
        self.children.iter().find(|child| child.segment == segment)
    }

    /// Find or lazily create the child for `segment`.
    fn find_or_insert(&mut self, segment: &str) -> &mut ContentNode {
        if let Some(index) = self
            .children
            .iter()
            .position(|child| child.segment == segment)
        {
            &mut self.children[index]
        } else {
            self.children.push(ContentNode::new(segment));
            self.children.last_mut().expect("just pushed")
        }
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a ProcessedDocument>) {
        if let Some(document) = &self.document {
            out.push(document);
        }
        for child in &self.children {
            child.collect(out);
        }
    }
}

// ============================================================================
// ContentTree
// ============================================================================

/// The content path trie.
///
/// Segments compare by exact, case-sensitive equality. Built once by
/// sequential inserts, then treated as read-only.
///
/// # Example
///
/// ```rust
/// use quern_core::{ContentPath, ProcessedDocument};
/// use quern_registry::ContentTree;
///
/// let mut tree = ContentTree::new();
/// tree.insert(ProcessedDocument::new(), ContentPath::from(["docs", "intro"]))
///     .unwrap();
///
/// assert!(tree.get(&ContentPath::from(["docs", "intro"])).is_some());
/// assert!(tree.get(&ContentPath::from(["docs"])).is_none());
/// assert_eq!(tree.list(&ContentPath::root()).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContentTree {
    root: ContentNode,
    len: usize,
}

impl ContentTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document at the given full path.
    ///
    /// Intermediate nodes are created lazily. Fails with
    /// [`Error::DuplicatePath`] when a document already occupies the path;
    /// the first insertion is retained.
    pub fn insert(&mut self, document: ProcessedDocument, path: ContentPath) -> Result<()> {
        let mut node = &mut self.root;
        for segment in path.iter() {
            node = node.find_or_insert(segment);
        }
        if node.document.is_some() {
            return Err(Error::DuplicatePath(path));
        }
        log::debug!("registered content at '{path}'");
        node.document = Some(document);
        self.len += 1;
        Ok(())
    }

    /// Look up the document at exactly `path`.
    pub fn get(&self, path: &ContentPath) -> Option<&ProcessedDocument> {
        self.node_at(path).and_then(|node| node.document.as_ref())
    }

    /// All documents at or below `root`, depth-first. An unknown root yields
    /// an empty collection.
    pub fn list(&self, root: &ContentPath) -> Vec<&ProcessedDocument> {
        let mut out = Vec::new();
        if let Some(node) = self.node_at(root) {
            node.collect(&mut out);
        }
        out
    }

    /// The section tree under `root`, bounded to `depth` extra levels below
    /// the listed children (`depth == 0` ⇒ children lists stay empty).
    pub fn sections(&self, root: &ContentPath, depth: usize) -> Vec<SectionItem> {
        match self.node_at(root) {
            Some(node) => SectionItem::for_children(node, root, depth),
            None => Vec::new(),
        }
    }

    /// Number of documents in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no documents have been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over all documents, depth-first.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessedDocument> {
        self.list(&ContentPath::root()).into_iter()
    }

    pub(crate) fn node_at(&self, path: &ContentPath) -> Option<&ContentNode> {
        let mut node = &self.root;
        for segment in path.iter() {
            node = node.find(segment)?;
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quern_core::keys;
    use quern_core::PropertyValue;

    fn doc(name: &str) -> ProcessedDocument {
        let mut doc = ProcessedDocument::new();
        doc.insert(keys::TITLE, PropertyValue::from(name));
        doc
    }

    #[test]
    fn test_get_exact_path_only() {
        let mut tree = ContentTree::new();
        tree.insert(doc("a"), ContentPath::from(["docs", "articles"]))
            .unwrap();

        assert!(tree.get(&ContentPath::from(["docs", "articles"])).is_some());
        assert!(tree.get(&ContentPath::from(["docs"])).is_none());
        assert!(tree
            .get(&ContentPath::from(["docs", "articles", "x"]))
            .is_none());
    }

    #[test]
    fn test_duplicate_path_keeps_first_insertion() {
        let mut tree = ContentTree::new();
        let path = ContentPath::from(["docs", "intro"]);
        tree.insert(doc("first"), path.clone()).unwrap();

        let err = tree.insert(doc("second"), path.clone()).unwrap_err();
        assert_eq!(err, Error::DuplicatePath(path.clone()));
        assert_eq!(tree.get(&path).unwrap().title(), Some("first"));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_directory_document_and_terminal_document_coexist() {
        let mut tree = ContentTree::new();
        tree.insert(doc("index"), ContentPath::from(["docs", "articles"]))
            .unwrap();
        tree.insert(doc("intro"), ContentPath::from(["docs", "articles", "intro"]))
            .unwrap();

        assert_eq!(
            tree.get(&ContentPath::from(["docs", "articles"]))
                .unwrap()
                .title(),
            Some("index")
        );
        assert_eq!(
            tree.get(&ContentPath::from(["docs", "articles", "intro"]))
                .unwrap()
                .title(),
            Some("intro")
        );
    }

    #[test]
    fn test_list_is_scoped_to_root() {
        let mut tree = ContentTree::new();
        tree.insert(doc("a"), ContentPath::from(["docs", "a"])).unwrap();
        tree.insert(doc("b"), ContentPath::from(["docs", "sub", "b"]))
            .unwrap();
        tree.insert(doc("c"), ContentPath::from(["blog", "c"])).unwrap();

        assert_eq!(tree.list(&ContentPath::root()).len(), 3);
        assert_eq!(tree.list(&ContentPath::from(["docs"])).len(), 2);
        assert_eq!(tree.list(&ContentPath::from(["blog"])).len(), 1);
        assert!(tree.list(&ContentPath::from(["missing"])).is_empty());
    }

    #[test]
    fn test_segments_are_case_sensitive() {
        let mut tree = ContentTree::new();
        tree.insert(doc("a"), ContentPath::from(["Docs"])).unwrap();
        assert!(tree.get(&ContentPath::from(["docs"])).is_none());
    }

    #[test]
    fn test_prefix_nodes_are_shared() {
        let mut tree = ContentTree::new();
        tree.insert(doc("a"), ContentPath::from(["docs", "a"])).unwrap();
        tree.insert(doc("b"), ContentPath::from(["docs", "b"])).unwrap();

        // one "docs" node with two children
        let node = tree.node_at(&ContentPath::from(["docs"])).unwrap();
        assert_eq!(node.children.len(), 2);
    }
}
