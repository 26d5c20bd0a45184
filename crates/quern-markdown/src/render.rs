//! HTML renderer: tree → HTML string.
//!
//! Walks blocks in order with no wrapping tags. Rendering the same tree
//! twice is byte-identical: all state (the open-marker toggle set) lives in
//! the render call.
//!
//! Bold, italic, and inline code are *toggle* tags: the first marker of a
//! kind opens its tag, the next marker of the same kind closes it.
//! Overlapping distinct kinds are not validated for correct nesting.

use crate::ast::{plain_text, Block, Inline, ListItem, MarkdownTree, MarkerKind, TableRow, TextKind};
use crate::heading::slug;

/// Render a parsed tree to HTML.
///
/// # Example
///
/// ```rust
/// use quern_markdown::{parse, render, scan};
///
/// let tree = parse(scan("Hi, **Ann**").unwrap()).unwrap();
/// assert_eq!(render(&tree), "<p>Hi, <b>Ann</b></p>");
/// ```
pub fn render(tree: &MarkdownTree) -> String {
    let mut writer = Writer::default();
    let mut out = String::new();
    for block in &tree.blocks {
        writer.write_block(&mut out, block);
    }
    out
}

#[derive(Default)]
struct Writer {
    bold_open: bool,
    italic_open: bool,
    code_open: bool,
}

impl Writer {
    fn write_block(&mut self, out: &mut String, block: &Block) {
        match block {
            Block::Heading { level, inline } => self.write_heading(out, *level, inline),
            Block::Paragraph(inline) => {
                out.push_str("<p>");
                self.write_inlines(out, inline);
                out.push_str("</p>");
            }
            Block::CodeBlock { language, lines } => write_code_block(out, language.as_deref(), lines),
            Block::OrderedList(items) => self.write_list(out, "ol", items),
            Block::UnorderedList(items) => self.write_list(out, "ul", items),
            Block::Table { header, rows } => self.write_table(out, header, rows),
            Block::Blank => out.push('\n'),
        }
    }

    fn write_heading(&mut self, out: &mut String, level: u8, inline: &[Inline]) {
        let id = slug(&plain_text(inline));
        out.push_str("<h");
        out.push_str(&level.to_string());
        out.push_str(" id=\"");
        escape_into(out, &id);
        out.push_str("\">");
        self.write_inlines(out, inline);
        out.push_str("</h");
        out.push_str(&level.to_string());
        out.push_str(">\n");
    }

    /// Emit `<li>` items, opening a nesting level when the indent rises and
    /// closing one when it falls; every level still open at list end is
    /// closed.
    fn write_list(&mut self, out: &mut String, tag: &str, items: &[ListItem]) {
        let mut current: isize = -1;
        for item in items {
            let indent = item.indent as isize;
            if indent > current {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                current = indent;
            }
            if indent < current {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                current = indent;
            }
            out.push_str("<li>");
            self.write_inlines(out, &item.inline);
            out.push_str("</li>");
        }
        while current > -1 {
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            current -= 1;
        }
    }

    fn write_table(&mut self, out: &mut String, header: &TableRow, rows: &[TableRow]) {
        out.push_str("<table><thead><tr>");
        for cell in &header.cells {
            out.push_str("<th>");
            self.write_inlines(out, cell);
            out.push_str("</th>");
        }
        out.push_str("</tr></thead><tbody>");
        for row in rows {
            out.push_str("<tr>");
            for cell in &row.cells {
                out.push_str("<td>");
                self.write_inlines(out, cell);
                out.push_str("</td>");
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }

    fn write_inlines(&mut self, out: &mut String, elements: &[Inline]) {
        for element in elements {
            self.write_inline(out, element);
        }
    }

    fn write_inline(&mut self, out: &mut String, element: &Inline) {
        match element {
            Inline::Text { kind, text } => match kind {
                TextKind::Word => escape_into(out, text),
                TextKind::Space => out.push(' '),
                TextKind::HardBreak => out.push_str("<br/>"),
            },
            Inline::Marker(kind) => self.toggle(out, *kind),
            Inline::Link { title, href } => {
                out.push_str("<a href=\"");
                escape_into(out, &plain_text(href));
                out.push_str("\">");
                self.write_inlines(out, title);
                out.push_str("</a>");
            }
            Inline::Image { title, href, alt } => {
                out.push_str("<img src=\"");
                escape_into(out, &plain_text(href));
                out.push_str("\" alt=\"");
                escape_into(out, &plain_text(alt));
                out.push('"');
                let title = plain_text(title);
                if !title.is_empty() {
                    out.push_str(" title=\"");
                    escape_into(out, &title);
                    out.push('"');
                }
                out.push_str("/>");
            }
        }
    }

    fn toggle(&mut self, out: &mut String, kind: MarkerKind) {
        let (open, tag) = match kind {
            MarkerKind::Bold => (&mut self.bold_open, "b"),
            MarkerKind::Italic => (&mut self.italic_open, "em"),
            MarkerKind::Code => (&mut self.code_open, "code"),
        };
        if *open {
            *open = false;
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        } else {
            *open = true;
            out.push('<');
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn write_code_block(out: &mut String, language: Option<&str>, lines: &[String]) {
    out.push_str("<pre><code");
    if let Some(language) = language {
        out.push_str(" class=\"");
        escape_into(out, language);
        out.push('"');
    }
    out.push('>');
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        escape_into(out, line);
    }
    out.push_str("</code></pre>\n");
}

/// HTML-escape `text` into `out`: `& < > " '`.
fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
