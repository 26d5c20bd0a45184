//! Block and inline syntax tree.
//!
//! The parser produces one [`MarkdownTree`] per document; blocks and inline
//! elements are exhaustive tagged unions, so the renderer is a single
//! exhaustive match. Trees are immutable once produced.

use quern_core::FrontmatterProperty;

/// A parsed markdown document: frontmatter plus ordered content blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkdownTree {
    /// Frontmatter properties in source order.
    pub headers: Vec<FrontmatterProperty>,
    /// Content blocks in document order.
    pub blocks: Vec<Block>,
}

/// A block-level element.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// `#`–`#######` heading.
    Heading {
        /// Level 1–7.
        level: u8,
        /// Inline heading content.
        inline: Vec<Inline>,
    },
    /// A paragraph; adjacent source lines merge into one.
    Paragraph(Vec<Inline>),
    /// A fenced code block with verbatim lines.
    CodeBlock {
        /// Optional language word after the opening fence.
        language: Option<String>,
        /// Verbatim code lines.
        lines: Vec<String>,
    },
    /// `1.`-marked list.
    OrderedList(Vec<ListItem>),
    /// `-`-marked list.
    UnorderedList(Vec<ListItem>),
    /// Header row plus data rows.
    Table {
        /// Header row.
        header: TableRow,
        /// Data rows.
        rows: Vec<TableRow>,
    },
    /// A blank source line.
    Blank,
}

/// One list item with its indent level (units of 4 spaces).
#[derive(Clone, Debug, PartialEq)]
pub struct ListItem {
    /// Nesting level; 0 for top-level items.
    pub indent: usize,
    /// Inline item content.
    pub inline: Vec<Inline>,
}

/// One table row of cells.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    /// Cell contents, left to right.
    pub cells: Vec<Vec<Inline>>,
}

/// Kind of a plain text element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKind {
    /// Word or punctuation text.
    Word,
    /// A single collapsed space.
    Space,
    /// An explicit line break (two trailing spaces).
    HardBreak,
}

/// Kind of a toggle marker. `**` and `__` are the same kind, as are
/// `*` and `_`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `**` / `__`
    Bold,
    /// `*` / `_`
    Italic,
    /// `` ` ``
    Code,
}

/// An inline element.
#[derive(Clone, Debug, PartialEq)]
pub enum Inline {
    /// Plain text.
    Text {
        /// Text kind.
        kind: TextKind,
        /// Text content (empty for breaks).
        text: String,
    },
    /// A bold/italic/code toggle marker.
    Marker(MarkerKind),
    /// `[title](href)`
    Link {
        /// Inline title content.
        title: Vec<Inline>,
        /// Href content.
        href: Vec<Inline>,
    },
    /// `![alt](href "title")`
    Image {
        /// Optional quoted title content.
        title: Vec<Inline>,
        /// Href content.
        href: Vec<Inline>,
        /// Alt text content.
        alt: Vec<Inline>,
    },
}

impl Inline {
    /// A word text element.
    pub fn word(text: impl Into<String>) -> Self {
        Self::Text {
            kind: TextKind::Word,
            text: text.into(),
        }
    }

    /// A single collapsed space.
    pub fn space() -> Self {
        Self::Text {
            kind: TextKind::Space,
            text: " ".to_string(),
        }
    }

    /// An explicit hard line break.
    pub fn hard_break() -> Self {
        Self::Text {
            kind: TextKind::HardBreak,
            text: String::new(),
        }
    }

    /// `true` for a collapsed space element.
    pub fn is_space(&self) -> bool {
        matches!(
            self,
            Self::Text {
                kind: TextKind::Space,
                ..
            }
        )
    }
}

/// Concatenate the plain text of inline elements: words and spaces verbatim,
/// markers skipped, links contribute their title, images their alt text.
pub fn plain_text(elements: &[Inline]) -> String {
    let mut out = String::new();
    collect_plain_text(elements, &mut out);
    out
}

fn collect_plain_text(elements: &[Inline], out: &mut String) {
    for element in elements {
        match element {
            Inline::Text {
                kind: TextKind::HardBreak,
                ..
            } => out.push(' '),
            Inline::Text { text, .. } => out.push_str(text),
            Inline::Marker(_) => {}
            Inline::Link { title, .. } => collect_plain_text(title, out),
            Inline::Image { alt, .. } => collect_plain_text(alt, out),
        }
    }
}

/// Drop leading and trailing space elements.
pub fn trim(elements: Vec<Inline>) -> Vec<Inline> {
    let start = elements
        .iter()
        .position(|e| !e.is_space())
        .unwrap_or(elements.len());
    let end = elements
        .iter()
        .rposition(|e| !e.is_space())
        .map_or(start, |i| i + 1);
    elements
        .into_iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}
