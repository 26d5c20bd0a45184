//! Section tree listing.
//!
//! A *section* is a trie node seen as a navigation entry: its segment name,
//! whether a document is attached, the document's title when present, and
//! (depth permitting) its child sections.

use serde::Serialize;

use quern_core::ContentPath;

use crate::tree::ContentNode;

/// One node of the section tree returned by
/// [`ContentTree::sections`](crate::ContentTree::sections).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    /// Segment name of the node.
    pub file_name: String,
    /// Absolute path of the node.
    pub full_path: ContentPath,
    /// Path relative to the queried root.
    pub relative_path: ContentPath,
    /// `true` when a document is attached to the node itself.
    pub has_content: bool,
    /// The attached document's `title` property, when present.
    pub title: Option<String>,
    /// Child sections; empty once the depth bound is reached.
    pub children: Vec<SectionItem>,
}

impl SectionItem {
    /// Build section items for the children of `node`, recursing `depth`
    /// levels below them.
    pub(crate) fn for_children(
        node: &ContentNode,
        root: &ContentPath,
        depth: usize,
    ) -> Vec<SectionItem> {
        Self::children_of(node, root, &ContentPath::root(), depth)
    }

    fn children_of(
        node: &ContentNode,
        root: &ContentPath,
        relative: &ContentPath,
        depth: usize,
    ) -> Vec<SectionItem> {
        node.children
            .iter()
            .map(|child| {
                let relative_path = relative.child(child.segment.clone());
                let mut full_path = root.clone();
                for segment in relative_path.iter() {
                    full_path.push(segment);
                }

                let children = if depth > 0 {
                    Self::children_of(child, root, &relative_path, depth - 1)
                } else {
                    Vec::new()
                };

                SectionItem {
                    file_name: child.segment.clone(),
                    full_path,
                    relative_path,
                    has_content: child.document.is_some(),
                    title: child
                        .document
                        .as_ref()
                        .and_then(|doc| doc.title())
                        .map(str::to_string),
                    children,
                }
            })
            .collect()
    }
}
