//! # quern-markdown
//!
//! The Quern markdown compilation pipeline.
//!
//! Markdown text flows through three stages, each usable on its own:
//!
//! ```text
//! source ➜ scan (tokens) ➜ parse (tree + frontmatter) ➜ render (HTML)
//! ```
//!
//! [`compile`] runs the whole pipeline and additionally extracts one
//! [`quern_core::InnerLink`] per heading, with anchors produced by the same
//! [`heading::slug`] function the renderer uses for heading ids.
//!
//! # Modules
//!
//! - [`token`]: token stream vocabulary
//! - [`scanner`]: text → tokens
//! - [`ast`]: block and inline tree
//! - [`parser`]: tokens → tree + frontmatter
//! - [`render`]: tree → HTML
//! - [`heading`]: heading detection and slug generation
//! - [`links`]: inner link extraction
//!
//! # Example
//!
//! ```rust
//! let compiled = quern_markdown::compile("# Title\n\nHi, **Ann**").unwrap();
//! assert!(compiled.html.contains("<h1 id=\"title\">Title</h1>"));
//! assert!(compiled.html.contains("<p>Hi, <b>Ann</b></p>"));
//! assert_eq!(compiled.inner_links[0].link, "#title");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod ast;
pub mod error;
pub mod heading;
pub mod links;
pub mod parser;
pub mod render;
pub mod scanner;
pub mod token;

#[cfg(test)]
mod proptests;

use quern_core::{FrontmatterProperty, InnerLink};

pub use ast::{Block, Inline, ListItem, MarkdownTree, MarkerKind, TableRow, TextKind};
pub use error::{Error, Result};
pub use heading::{detect_heading, slug, MAX_HEADING_LEVEL};
pub use links::extract_inner_links;
pub use parser::parse;
pub use render::render;
pub use scanner::scan;
pub use token::{Token, TokenKind};

/// Output of the full compilation pipeline for one document.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledMarkdown {
    /// Rendered HTML body.
    pub html: String,
    /// Frontmatter properties in source order.
    pub frontmatter: Vec<FrontmatterProperty>,
    /// One anchor per heading, in document order.
    pub inner_links: Vec<InnerLink>,
}

/// Compile markdown source: scan, parse, render, and extract inner links.
///
/// Any scan or parse failure aborts this document with a line-numbered
/// [`Error`]; there is no resynchronization.
pub fn compile(source: &str) -> Result<CompiledMarkdown> {
    let tokens = scan(source)?;
    let tree = parse(tokens)?;
    let html = render(&tree);
    let inner_links = extract_inner_links(&tree);
    log::debug!(
        "compiled document: {} blocks, {} headings",
        tree.blocks.len(),
        inner_links.len()
    );
    Ok(CompiledMarkdown {
        html,
        frontmatter: tree.headers,
        inner_links,
    })
}
