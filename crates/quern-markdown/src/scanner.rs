//! Markdown scanner: text → token stream.
//!
//! A single left-to-right pass over characters. Multi-byte characters are
//! preserved intact inside word lexemes. The only way a well-formed input
//! fails to scan is an integer literal overflowing `i64`.
//!
//! Invariant (property-tested): concatenating every token lexeme reproduces
//! the input exactly.

use crate::error::{Error, Result};
use crate::token::{Literal, Token, TokenKind};

/// Scan markdown text into a token stream.
///
/// # Example
///
/// ```rust
/// use quern_markdown::{scan, TokenKind};
///
/// let tokens = scan("# Hi").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![TokenKind::Hash, TokenKind::Whitespace, TokenKind::Word]
/// );
/// ```
pub fn scan(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).scan_tokens()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn scan_tokens(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let start = self.pos;
            self.pos += 1;
            match c {
                '\n' => {
                    tokens.push(self.token(TokenKind::NewLine, start, None));
                    self.line += 1;
                }
                '\r' => {
                    self.advance_if(|c| c == '\n');
                    tokens.push(self.token(TokenKind::NewLine, start, None));
                    self.line += 1;
                }
                ' ' | '\t' => {
                    while self.advance_if(|c| c == ' ' || c == '\t') {}
                    tokens.push(self.token(TokenKind::Whitespace, start, None));
                }
                '*' => {
                    let kind = if self.advance_if(|c| c == '*') {
                        TokenKind::DoubleAsterisk
                    } else {
                        TokenKind::Asterisk
                    };
                    tokens.push(self.token(kind, start, None));
                }
                '_' => {
                    let kind = if self.advance_if(|c| c == '_') {
                        TokenKind::DoubleUnderscore
                    } else {
                        TokenKind::Underscore
                    };
                    tokens.push(self.token(kind, start, None));
                }
                '`' => tokens.push(self.token(TokenKind::Backtick, start, None)),
                '#' => tokens.push(self.token(TokenKind::Hash, start, None)),
                '[' => tokens.push(self.token(TokenKind::OpenBracket, start, None)),
                ']' => tokens.push(self.token(TokenKind::CloseBracket, start, None)),
                '(' => tokens.push(self.token(TokenKind::OpenParen, start, None)),
                ')' => tokens.push(self.token(TokenKind::CloseParen, start, None)),
                '/' => tokens.push(self.token(TokenKind::Slash, start, None)),
                ':' => tokens.push(self.token(TokenKind::Colon, start, None)),
                ',' => tokens.push(self.token(TokenKind::Comma, start, None)),
                '.' => tokens.push(self.token(TokenKind::Dot, start, None)),
                '-' => tokens.push(self.token(TokenKind::Minus, start, None)),
                '|' => tokens.push(self.token(TokenKind::Pipe, start, None)),
                '!' => tokens.push(self.token(TokenKind::Bang, start, None)),
                '"' => tokens.push(self.token(TokenKind::Quote, start, None)),
                c if c.is_ascii_digit() => tokens.push(self.word_or_number(start)?),
                _ => tokens.push(self.word(start)),
            }
        }
        Ok(tokens)
    }

    /// A digit run is a number unless a letter follows it immediately, in
    /// which case the whole run is a word (`15` vs `15th`).
    fn word_or_number(&mut self, start: usize) -> Result<Token> {
        while self.advance_if(|c| c.is_ascii_digit()) {}
        if self.peek().is_some_and(char::is_alphabetic) {
            return Ok(self.word(start));
        }

        let lexeme: String = self.lexeme(start);
        let value: i64 = lexeme
            .parse()
            .map_err(|_| Error::scan(format!("number literal '{lexeme}' overflows"), self.line))?;
        Ok(Token {
            kind: TokenKind::Number,
            lexeme,
            literal: Some(Literal::Integer(value)),
            line: self.line,
        })
    }

    fn word(&mut self, start: usize) -> Token {
        while self.advance_if(char::is_alphanumeric) {}
        let lexeme = self.lexeme(start);
        Token {
            kind: TokenKind::Word,
            lexeme: lexeme.clone(),
            literal: Some(Literal::Text(lexeme)),
            line: self.line,
        }
    }

    fn token(&self, kind: TokenKind, start: usize, literal: Option<Literal>) -> Token {
        Token {
            kind,
            lexeme: self.lexeme(start),
            literal,
            line: self.line,
        }
    }

    fn lexeme(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if predicate(c) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_fixed_tokens() {
        assert_eq!(
            kinds("*`#[]()/:,.-|!\""),
            vec![
                TokenKind::Asterisk,
                TokenKind::Backtick,
                TokenKind::Hash,
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::Slash,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Pipe,
                TokenKind::Bang,
                TokenKind::Quote,
            ]
        );
    }

    #[test]
    fn test_double_markers() {
        assert_eq!(
            kinds("** * __ _"),
            vec![
                TokenKind::DoubleAsterisk,
                TokenKind::Whitespace,
                TokenKind::Asterisk,
                TokenKind::Whitespace,
                TokenKind::DoubleUnderscore,
                TokenKind::Whitespace,
                TokenKind::Underscore,
            ]
        );
    }

    #[test]
    fn test_whitespace_run_folds_with_lexeme() {
        let tokens = scan("a    b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].lexeme, "    ");
    }

    #[test]
    fn test_newline_variants_fold() {
        let tokens = scan("a\r\nb\nc").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::NewLine,
                TokenKind::Word,
                TokenKind::NewLine,
                TokenKind::Word,
            ]
        );
        assert_eq!(tokens[1].lexeme, "\r\n");
    }

    #[test]
    fn test_line_counter_advances() {
        let tokens = scan("a\nb\nc").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[4].line, 3);
    }

    #[test]
    fn test_pure_digits_scan_as_number() {
        let tokens = scan("15").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].integer(), Some(15));
    }

    #[test]
    fn test_digits_followed_by_letter_scan_as_word() {
        let tokens = scan("15th").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Word);
        assert_eq!(tokens[0].text(), "15th");
    }

    #[test]
    fn test_multibyte_word_preserved() {
        let tokens = scan("héllo wörld").unwrap();
        assert_eq!(tokens[0].text(), "héllo");
        assert_eq!(tokens[2].text(), "wörld");
    }

    #[test]
    fn test_number_overflow_is_scan_error() {
        let err = scan("99999999999999999999999").unwrap_err();
        assert!(matches!(err, Error::Scan { line: 1, .. }));
    }

    #[test]
    fn test_lexemes_concatenate_to_input() {
        let source = "# Title\n\nHi, **Ann**  \n1. item\n";
        let joined: String = scan(source)
            .unwrap()
            .iter()
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(joined, source);
    }
}
