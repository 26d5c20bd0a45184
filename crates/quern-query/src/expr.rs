//! Property expression parsing.
//!
//! Filter and projection requests name properties through a tiny expression
//! grammar, parsed by a dedicated reader rather than the markdown grammar:
//!
//! ```text
//! expr   := ident [ '(' ident (',' arg)* ')' ] [ 'as' ident ]
//! arg    := '"' chars '"' | integer | float
//! ```
//!
//! `prop` and `prop as alias` name a document property directly;
//! `fn(prop, arg…)` resolves the property and passes it through a computed
//! function (see [`crate::functions`]).

use quern_core::PropertyValue;

use crate::error::{Error, Result};

/// A parsed property expression.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyExpr {
    /// `prop` or `prop as alias`
    Property {
        /// Property name.
        name: String,
        /// Optional output alias.
        alias: Option<String>,
    },
    /// `fn(prop, arg…)` or `fn(prop, arg…) as alias`
    Function {
        /// Function name.
        name: String,
        /// Property the function is applied to.
        callee: String,
        /// Extra literal arguments.
        args: Vec<PropertyValue>,
        /// Optional output alias.
        alias: Option<String>,
    },
}

impl PropertyExpr {
    /// Parse an expression.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quern_query::PropertyExpr;
    ///
    /// let expr = PropertyExpr::parse("format(updatedAt, \"%Y\") as year").unwrap();
    /// assert_eq!(expr.output_key(), "year");
    /// assert_eq!(expr.source_property(), "updatedAt");
    ///
    /// let expr = PropertyExpr::parse("title").unwrap();
    /// assert_eq!(expr.output_key(), "title");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Reader::new(input).parse_expr()
    }

    /// The key this expression projects under: the alias when present,
    /// otherwise the named (callee) property.
    pub fn output_key(&self) -> &str {
        match self {
            Self::Property { name, alias } => alias.as_deref().unwrap_or(name),
            Self::Function { callee, alias, .. } => alias.as_deref().unwrap_or(callee),
        }
    }

    /// The document property this expression reads.
    pub fn source_property(&self) -> &str {
        match self {
            Self::Property { name, .. } => name,
            Self::Function { callee, .. } => callee,
        }
    }
}

// ============================================================================
// Reader
// ============================================================================

struct Reader<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse_expr(mut self) -> Result<PropertyExpr> {
        self.skip_whitespace();
        let ident = self.read_ident()?;

        if !self.try_pop('(') {
            let alias = self.parse_alias()?;
            return Ok(PropertyExpr::Property { name: ident, alias });
        }

        self.skip_whitespace();
        let callee = self.read_ident()?;
        let mut args = Vec::new();
        self.skip_whitespace();
        while self.try_pop(',') {
            self.skip_whitespace();
            args.push(self.read_arg()?);
            self.skip_whitespace();
        }
        if !self.try_pop(')') {
            return Err(self.error("expected ')'"));
        }
        let alias = self.parse_alias()?;
        Ok(PropertyExpr::Function {
            name: ident,
            callee,
            args,
            alias,
        })
    }

    fn parse_alias(&mut self) -> Result<Option<String>> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }
        let word = self.read_ident()?;
        if word != "as" {
            return Err(self.error("expected end of expression or 'as'"));
        }
        self.skip_whitespace();
        let alias = self.read_ident()?;
        self.skip_whitespace();
        if !self.at_end() {
            return Err(self.error("unexpected trailing characters"));
        }
        Ok(Some(alias))
    }

    fn read_arg(&mut self) -> Result<PropertyValue> {
        if self.try_pop('"') {
            let start = self.pos;
            while !self.at_end() && self.chars[self.pos] != '"' {
                self.pos += 1;
            }
            if !self.try_pop('"') {
                return Err(self.error("unterminated string argument"));
            }
            let text: String = self.chars[start..self.pos - 1].iter().collect();
            return Ok(PropertyValue::String(text));
        }

        let start = self.pos;
        while !self.at_end() && !matches!(self.chars[self.pos], ',' | ')') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<i64>() {
            return Ok(PropertyValue::Integer(value));
        }
        if let Ok(value) = raw.parse::<f64>() {
            return Ok(PropertyValue::Float(value));
        }
        Err(self.error("unknown argument type"))
    }

    fn read_ident(&mut self) -> Result<String> {
        let start = self.pos;
        while !self.at_end() {
            let c = self.chars[self.pos];
            if c.is_alphanumeric() || c == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    fn try_pop(&mut self, expected: char) -> bool {
        if !self.at_end() && self.chars[self.pos] == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, message: &str) -> Error {
        Error::expression(self.source, message)
    }
}
