//! Recursive-descent markdown parser: tokens → tree + frontmatter.
//!
//! One pass with bounded lookahead, no backtracking beyond re-peeking
//! already-seen tokens. Per block the grammar is evaluated top to bottom,
//! first match wins: blank line, table, heading, fenced code, ordered list,
//! unordered list, paragraph.
//!
//! Any structural violation (unterminated fence or frontmatter array,
//! missing delimiter) aborts the document with a line-numbered error;
//! there is no resynchronization, the first error wins.

use quern_core::{FrontmatterProperty, RawValue};

use crate::ast::{trim, Block, Inline, ListItem, MarkdownTree, MarkerKind, TableRow};
use crate::error::{Error, Result};
use crate::heading::MAX_HEADING_LEVEL;
use crate::token::{Token, TokenKind};

/// Parse a token stream into a [`MarkdownTree`].
///
/// # Example
///
/// ```rust
/// use quern_markdown::{parse, scan};
///
/// let tree = parse(scan("---\ntitle: Hi\n---\nBody").unwrap()).unwrap();
/// assert_eq!(tree.headers[0].name, "title");
/// assert_eq!(tree.blocks.len(), 1);
/// ```
pub fn parse(tokens: Vec<Token>) -> Result<MarkdownTree> {
    Parser { tokens, pos: 0 }.parse()
}

/// What ended an inline element run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    /// A newline was consumed; `hard` marks two trailing spaces before it.
    NewLine { hard: bool },
    /// One of the requested stop tokens was consumed.
    Token(TokenKind),
    /// The token stream ran out.
    Eof,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    // ------------------------------------------------------------------------
    // Document structure
    // ------------------------------------------------------------------------

    fn parse(mut self) -> Result<MarkdownTree> {
        let mut headers = Vec::new();
        self.skip(TokenKind::NewLine);
        if self.check_run(TokenKind::Minus, 3) {
            headers = self.consume_frontmatter()?;
        }

        let mut blocks: Vec<Block> = Vec::new();
        let mut merge_separator = Inline::space();
        while !self.at_end() {
            if self.match_kind(TokenKind::NewLine) {
                blocks.push(Block::Blank);
                continue;
            }
            if self.table_ahead() {
                blocks.push(self.read_table()?);
                continue;
            }
            if self.check(TokenKind::Hash) {
                blocks.push(self.read_heading()?);
                continue;
            }
            if self.check_run(TokenKind::Backtick, 3) {
                blocks.push(self.read_code_block()?);
                continue;
            }
            if self.list_marker_at(0, true) {
                blocks.push(self.read_list(true)?);
                continue;
            }
            if self.list_marker_at(0, false) {
                blocks.push(self.read_list(false)?);
                continue;
            }

            // Paragraph fallback. Fragments on adjacent lines merge into the
            // previous paragraph, joined by a space, or by a hard break when
            // the previous line ended in two trailing spaces.
            let (fragment, stop) = self.read_inline(&[], true)?;
            if matches!(blocks.last(), Some(Block::Paragraph(_))) {
                if let Some(Block::Paragraph(previous)) = blocks.last_mut() {
                    previous.push(merge_separator);
                    previous.extend(fragment);
                }
            } else {
                blocks.push(Block::Paragraph(fragment));
            }
            merge_separator = if matches!(stop, Stop::NewLine { hard: true }) {
                Inline::hard_break()
            } else {
                Inline::space()
            };
        }

        Ok(MarkdownTree { headers, blocks })
    }

    // ------------------------------------------------------------------------
    // Frontmatter
    // ------------------------------------------------------------------------

    fn consume_frontmatter(&mut self) -> Result<Vec<FrontmatterProperty>> {
        let open_line = self.current_line();
        self.pos += 3;
        let mut fields = Vec::new();

        loop {
            // Blank lines and indentation before a property are acceptable.
            self.skip(TokenKind::NewLine);
            self.skip(TokenKind::Whitespace);
            if self.check_run(TokenKind::Minus, 3) {
                self.pos += 3;
                break;
            }
            if self.at_end() {
                return Err(Error::parse("unterminated frontmatter block", open_line));
            }

            let name_token = self.consume(TokenKind::Word, "expected frontmatter property name")?;
            let name = name_token.text().to_string();
            let line = name_token.line;
            self.skip(TokenKind::Whitespace);
            self.consume(TokenKind::Colon, "expected ':' after frontmatter property name")?;
            self.skip(TokenKind::Whitespace);
            let value = self.consume_field_value()?;
            fields.push(FrontmatterProperty { name, value, line });
        }

        self.skip(TokenKind::Whitespace);
        if !self.at_end() {
            self.consume(TokenKind::NewLine, "expected new line after frontmatter block")?;
        }
        Ok(fields)
    }

    fn consume_field_value(&mut self) -> Result<RawValue> {
        if !self.match_kind(TokenKind::OpenBracket) {
            let (text, _) = self.read_raw_line(&[]);
            return Ok(RawValue::Scalar(text));
        }

        let open_line = self.current_line();
        let mut values = Vec::new();
        loop {
            self.skip(TokenKind::Whitespace);
            let (text, stop) = self.read_raw_line(&[TokenKind::Comma, TokenKind::CloseBracket]);
            match stop {
                RawStop::Stopped(TokenKind::Comma) => values.push(text),
                RawStop::Stopped(_) => {
                    values.push(text);
                    self.skip(TokenKind::Whitespace);
                    if !self.at_end() {
                        self.consume(
                            TokenKind::NewLine,
                            "expected new line after frontmatter array",
                        )?;
                    }
                    return Ok(RawValue::List(values));
                }
                RawStop::NewLine | RawStop::Eof => {
                    return Err(Error::parse("unterminated frontmatter array", open_line));
                }
            }
        }
    }

    /// Concatenate raw token text up to a newline, a stop token, or the end
    /// of input. The terminating token is consumed; the text is trimmed.
    fn read_raw_line(&mut self, stops: &[TokenKind]) -> (String, RawStop) {
        let mut text = String::new();
        loop {
            let Some(token) = self.peek() else {
                return (text.trim().to_string(), RawStop::Eof);
            };
            if token.kind == TokenKind::NewLine {
                self.pos += 1;
                return (text.trim().to_string(), RawStop::NewLine);
            }
            if stops.contains(&token.kind) {
                let kind = token.kind;
                self.pos += 1;
                return (text.trim().to_string(), RawStop::Stopped(kind));
            }
            text.push_str(&self.tokens[self.pos].lexeme);
            self.pos += 1;
        }
    }

    // ------------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------------

    /// A line is a table row only when the *next* line also starts with a
    /// pipe; the lookahead avoids misreading a stray pipe in running text.
    fn table_ahead(&self) -> bool {
        if !self.check(TokenKind::Pipe) {
            return false;
        }
        let mut offset = 0;
        while let Some(token) = self.peek_at(offset) {
            if token.kind == TokenKind::NewLine {
                return self.check_at(offset + 1, TokenKind::Pipe);
            }
            offset += 1;
        }
        false
    }

    fn read_table(&mut self) -> Result<Block> {
        let header = self.read_table_row()?;
        // Separator/alignment row: parsed, never reflected in output.
        let _alignment = self.read_table_row()?;
        let mut rows = Vec::new();
        while self.check(TokenKind::Pipe) {
            rows.push(self.read_table_row()?);
        }
        Ok(Block::Table { header, rows })
    }

    fn read_table_row(&mut self) -> Result<TableRow> {
        self.consume(TokenKind::Pipe, "expected '|' at table row start")?;
        let mut cells = Vec::new();
        loop {
            if self.at_end() || self.match_kind(TokenKind::NewLine) {
                break;
            }
            let (elements, stop) = self.read_inline(&[TokenKind::Pipe], false)?;
            match stop {
                Stop::Token(TokenKind::Pipe) => cells.push(trim(elements)),
                _ => break,
            }
        }
        Ok(TableRow { cells })
    }

    fn read_heading(&mut self) -> Result<Block> {
        let mut count = 0u32;
        while self.match_kind(TokenKind::Hash) {
            count += 1;
        }
        let level = count.min(u32::from(MAX_HEADING_LEVEL)) as u8;
        self.skip(TokenKind::Whitespace);
        let (elements, _) = self.read_inline(&[], false)?;
        Ok(Block::Heading {
            level,
            inline: trim(elements),
        })
    }

    fn read_code_block(&mut self) -> Result<Block> {
        let fence_line = self.current_line();
        self.pos += 3;

        let language = if self.check(TokenKind::Word) {
            Some(self.bump().text().to_string())
        } else {
            None
        };
        self.consume(TokenKind::NewLine, "expected new line after code fence")?;

        let mut lines = Vec::new();
        let mut current = String::new();
        let mut at_line_start = true;
        loop {
            if self.at_end() {
                return Err(Error::parse("unterminated code fence", fence_line));
            }
            // The closing fence must sit at the start of a line.
            if at_line_start && self.check_run(TokenKind::Backtick, 3) {
                self.pos += 3;
                break;
            }
            let token = self.bump();
            if token.kind == TokenKind::NewLine {
                lines.push(std::mem::take(&mut current));
                at_line_start = true;
            } else {
                current.push_str(&token.lexeme);
                at_line_start = false;
            }
        }

        if !self.at_end() {
            self.consume(TokenKind::NewLine, "expected new line after closing code fence")?;
        }
        Ok(Block::CodeBlock { language, lines })
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    fn list_marker_at(&self, offset: usize, ordered: bool) -> bool {
        if ordered {
            self.check_at(offset, TokenKind::Number)
                && self.check_at(offset + 1, TokenKind::Dot)
                && self.check_at(offset + 2, TokenKind::Whitespace)
        } else {
            self.check_at(offset, TokenKind::Minus)
                && self.check_at(offset + 1, TokenKind::Whitespace)
        }
    }

    fn consume_list_marker(&mut self, ordered: bool) {
        self.pos += if ordered { 3 } else { 2 };
    }

    fn read_list(&mut self, ordered: bool) -> Result<Block> {
        self.consume_list_marker(ordered);
        let mut items = Vec::new();
        let mut indent = 0usize;

        'items: loop {
            let mut inline: Vec<Inline> = Vec::new();
            loop {
                let (elements, stop) = self.read_inline(&[], false)?;
                let elements = trim(elements);
                // Continuation lines join the item with a single space.
                if !inline.is_empty() && !elements.is_empty() {
                    inline.push(Inline::space());
                }
                inline.extend(elements);

                if stop == Stop::Eof || self.at_end() {
                    items.push(ListItem { indent, inline });
                    break 'items;
                }
                // A blank line ends the list.
                if self.match_kind(TokenKind::NewLine) {
                    items.push(ListItem { indent, inline });
                    break 'items;
                }
                // Indentation before the next marker raises the nest level,
                // one level per 4 spaces.
                if self.check(TokenKind::Whitespace) && self.list_marker_at(1, ordered) {
                    let next_indent = self.bump().width() / 4;
                    self.consume_list_marker(ordered);
                    items.push(ListItem { indent, inline });
                    indent = next_indent;
                    continue 'items;
                }
                if self.list_marker_at(0, ordered) {
                    self.consume_list_marker(ordered);
                    items.push(ListItem { indent, inline });
                    indent = 0;
                    continue 'items;
                }
                // Not a marker: the line continues the current item.
                self.skip(TokenKind::Whitespace);
            }
        }

        Ok(if ordered {
            Block::OrderedList(items)
        } else {
            Block::UnorderedList(items)
        })
    }

    // ------------------------------------------------------------------------
    // Inline elements
    // ------------------------------------------------------------------------

    /// Read inline elements until a newline, a stop token, or end of input.
    /// The terminating token is consumed. With `detect_hard_break`, a
    /// whitespace run of two or more directly before the newline marks the
    /// line as hard-break terminated.
    fn read_inline(
        &mut self,
        stops: &[TokenKind],
        detect_hard_break: bool,
    ) -> Result<(Vec<Inline>, Stop)> {
        let mut elements: Vec<Inline> = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Ok((elements, Stop::Eof));
            };
            if token.kind == TokenKind::NewLine {
                self.pos += 1;
                return Ok((elements, Stop::NewLine { hard: false }));
            }
            if stops.contains(&token.kind) {
                let kind = token.kind;
                self.pos += 1;
                return Ok((elements, Stop::Token(kind)));
            }
            if detect_hard_break
                && token.kind == TokenKind::Whitespace
                && token.width() >= 2
                && self.check_at(1, TokenKind::NewLine)
            {
                self.pos += 2;
                return Ok((elements, Stop::NewLine { hard: true }));
            }

            match token.kind {
                TokenKind::OpenBracket => {
                    let (link, hit_newline) = self.read_link()?;
                    elements.extend(link);
                    if hit_newline {
                        return Ok((elements, Stop::NewLine { hard: false }));
                    }
                }
                TokenKind::Bang if self.check_at(1, TokenKind::OpenBracket) => {
                    let (image, hit_newline) = self.read_image()?;
                    elements.extend(image);
                    if hit_newline {
                        return Ok((elements, Stop::NewLine { hard: false }));
                    }
                }
                TokenKind::Backtick => {
                    self.pos += 1;
                    elements.push(Inline::Marker(MarkerKind::Code));
                }
                TokenKind::DoubleAsterisk | TokenKind::DoubleUnderscore => {
                    self.pos += 1;
                    elements.push(Inline::Marker(MarkerKind::Bold));
                }
                TokenKind::Asterisk | TokenKind::Underscore => {
                    self.pos += 1;
                    elements.push(Inline::Marker(MarkerKind::Italic));
                }
                TokenKind::Whitespace => {
                    self.pos += 1;
                    elements.push(Inline::space());
                }
                _ => {
                    let token = self.bump();
                    elements.push(Inline::word(token.text()));
                }
            }
        }
    }

    /// `[title](href)`. A missing `(href)` demotes the bracketed content to
    /// plain elements. Returns `true` when a newline was consumed while
    /// reading, ending the enclosing line.
    fn read_link(&mut self) -> Result<(Vec<Inline>, bool)> {
        self.pos += 1; // '['
        let (title, stop) = self.read_inline(&[TokenKind::CloseBracket], false)?;
        match stop {
            Stop::NewLine { .. } => return Ok((title, true)),
            Stop::Eof => return Ok((title, false)),
            Stop::Token(_) => {}
        }
        if !self.match_kind(TokenKind::OpenParen) {
            return Ok((title, false));
        }

        let mut href: Vec<Inline> = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                let mut out = title;
                out.extend(href);
                return Ok((out, false));
            };
            match token.kind {
                TokenKind::NewLine => {
                    self.pos += 1;
                    let mut out = title;
                    out.extend(href);
                    return Ok((out, true));
                }
                TokenKind::CloseParen => {
                    self.pos += 1;
                    return Ok((
                        vec![Inline::Link {
                            title: trim(title),
                            href,
                        }],
                        false,
                    ));
                }
                TokenKind::Whitespace => {
                    self.pos += 1;
                    href.push(Inline::space());
                }
                _ => {
                    let token = self.bump();
                    href.push(Inline::word(token.text()));
                }
            }
        }
    }

    /// `![alt](href "title")`.
    fn read_image(&mut self) -> Result<(Vec<Inline>, bool)> {
        self.pos += 2; // '!' '['
        let (alt, stop) = self.read_inline(&[TokenKind::CloseBracket], false)?;
        match stop {
            Stop::NewLine { .. } => return Ok((alt, true)),
            Stop::Eof => return Ok((alt, false)),
            Stop::Token(_) => {}
        }
        if !self.match_kind(TokenKind::OpenParen) {
            return Ok((alt, false));
        }

        let (href, stop) = self.read_inline(&[TokenKind::CloseParen, TokenKind::Quote], false)?;
        let mut title = Vec::new();
        match stop {
            Stop::Token(TokenKind::Quote) => {
                let (quoted, stop) = self.read_inline(&[TokenKind::Quote], false)?;
                title = quoted;
                if matches!(stop, Stop::NewLine { .. } | Stop::Eof) {
                    let mut out = alt;
                    out.extend(href);
                    out.extend(title);
                    return Ok((out, matches!(stop, Stop::NewLine { .. })));
                }
                // Consume through the closing parenthesis.
                self.read_inline(&[TokenKind::CloseParen], false)?;
            }
            Stop::Token(_) => {}
            Stop::NewLine { .. } | Stop::Eof => {
                let mut out = alt;
                out.extend(href);
                return Ok((out, matches!(stop, Stop::NewLine { .. })));
            }
        }

        Ok((
            vec![Inline::Image {
                title: trim(title),
                href: trim(href),
                alt: trim(alt),
            }],
            false,
        ))
    }

    // ------------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_at(&self, offset: usize, kind: TokenKind) -> bool {
        self.peek_at(offset).is_some_and(|t| t.kind == kind)
    }

    fn check_run(&self, kind: TokenKind, count: usize) -> bool {
        (0..count).all(|offset| self.check_at(offset, kind))
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip(&mut self, kind: TokenKind) {
        while self.match_kind(kind) {}
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(Error::parse(message, self.current_line()))
        }
    }

    fn current_line(&self) -> u32 {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }
}

/// What ended a raw text line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RawStop {
    NewLine,
    Stopped(TokenKind),
    Eof,
}
