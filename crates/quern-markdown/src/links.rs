//! Inner link extraction.
//!
//! Every heading yields one [`InnerLink`] in document order, with the
//! anchor built from the same [`slug`](crate::heading::slug) the renderer
//! uses for heading ids.

use quern_core::InnerLink;

use crate::ast::{plain_text, Block, MarkdownTree};
use crate::heading::slug;

/// Extract one anchor per heading, in document order.
///
/// # Example
///
/// ```rust
/// use quern_markdown::{extract_inner_links, parse, scan};
///
/// let tree = parse(scan("# Title\n\n## Sub Section").unwrap()).unwrap();
/// let links = extract_inner_links(&tree);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[1].link, "#sub-section");
/// ```
pub fn extract_inner_links(tree: &MarkdownTree) -> Vec<InnerLink> {
    tree.blocks
        .iter()
        .filter_map(|block| match block {
            Block::Heading { level, inline } => {
                let title = plain_text(inline);
                let link = format!("#{}", slug(&title));
                Some(InnerLink {
                    level: *level,
                    title,
                    link,
                })
            }
            _ => None,
        })
        .collect()
}
