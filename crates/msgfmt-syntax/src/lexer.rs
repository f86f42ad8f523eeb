//! Tokenizer for template source.
//!
//! The lexer is pulled by the parser, which picks the scan mode for each
//! token:
//! - body mode yields text runs, quoted literals, `{`, `}` and `#`
//! - argument mode skips whitespace and yields identifiers, `=N` keys and
//!   punctuation
//!
//! Apostrophe handling follows the double-optional rule: `''` is always a
//! literal apostrophe, `'` opens a quoted literal only when followed by `{`,
//! `}` or `#`, and any other `'` is plain text.

use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use crate::error::{ParseError, Span};
use crate::semantics::{is_identifier_char, is_pattern_white_space};

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexemeKind {
    /// Plain text (body mode).
    Text(String),
    /// A quoted literal; `value` has escapes resolved, `raw` is the source text.
    Quoted { value: String, raw: String },
    /// `#` (body mode).
    Hash,
    /// `{`
    Open,
    /// `}`
    Close,
    /// `,` (argument mode).
    Comma,
    /// `:` (argument mode).
    Colon,
    /// A run of identifier characters (argument mode).
    Ident(String),
    /// An exact-value key such as `=3` (argument mode).
    ExactKey(String),
    /// Any other pattern-syntax character (argument mode).
    Symbol(char),
    /// End of input.
    End,
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub span: Span,
}

/// Scanner over template source.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    rest: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    /// Zero-length span at the current position.
    pub fn position(&self) -> Span {
        Span {
            offset: self.offset(),
            len: 0,
            line: self.line,
            column: self.column,
        }
    }

    /// Scan the next token in body mode.
    pub fn next_body(&mut self) -> Result<Lexeme, ParseError> {
        let start = self.position();
        let Some(c) = self.rest.chars().next() else {
            return Ok(self.lexeme(start, LexemeKind::End));
        };
        let kind = match c {
            '{' => self.single(LexemeKind::Open),
            '}' => self.single(LexemeKind::Close),
            '#' => self.single(LexemeKind::Hash),
            '\'' => return self.apostrophe(start),
            _ => {
                let mut input = self.rest;
                let len = text_run(&mut input).map_or(c.len_utf8(), str::len);
                LexemeKind::Text(self.advance(len).to_string())
            }
        };
        Ok(self.lexeme(start, kind))
    }

    /// Scan the next token in argument mode, skipping leading whitespace.
    pub fn next_arg(&mut self) -> Result<Lexeme, ParseError> {
        self.skip_whitespace();
        let start = self.position();
        let Some(c) = self.rest.chars().next() else {
            return Ok(self.lexeme(start, LexemeKind::End));
        };
        let kind = match c {
            '{' => self.single(LexemeKind::Open),
            '}' => self.single(LexemeKind::Close),
            ',' => self.single(LexemeKind::Comma),
            ':' => self.single(LexemeKind::Colon),
            '=' => {
                let mut input = &self.rest[1..];
                match digits(&mut input) {
                    Ok(value) => {
                        let len = 1 + value.len();
                        LexemeKind::ExactKey(self.advance(len).to_string())
                    }
                    Err(_) => {
                        self.advance(1);
                        LexemeKind::Symbol('=')
                    }
                }
            }
            _ if is_identifier_char(c) => {
                let mut input = self.rest;
                let len = identifier(&mut input).map_or(c.len_utf8(), str::len);
                LexemeKind::Ident(self.advance(len).to_string())
            }
            _ => {
                self.advance(c.len_utf8());
                LexemeKind::Symbol(c)
            }
        };
        Ok(self.lexeme(start, kind))
    }

    /// Look at the next argument-mode token without consuming it.
    pub fn peek_arg(&self) -> Result<Lexeme, ParseError> {
        self.clone().next_arg()
    }

    /// Skip `Pattern_White_Space`.
    pub fn skip_whitespace(&mut self) {
        let mut input = self.rest;
        if let Ok(ws) = whitespace(&mut input) {
            self.advance(ws.len());
        }
    }

    /// Capture the source up to (not including) the `}` closing the current
    /// placeholder, honouring nested braces and quoted literals. Trailing
    /// whitespace is dropped from the result.
    pub fn raw_until_close(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        let mut depth = 0usize;
        let mut quote_start = None;
        let mut chars = self.rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);
            match c {
                '\'' if next == Some('\'') => {
                    chars.next();
                }
                '\'' if quote_start.is_some() => quote_start = None,
                '\'' if matches!(next, Some('{' | '}' | '#')) => quote_start = Some(i),
                _ if quote_start.is_some() => {}
                '{' => depth += 1,
                '}' if depth == 0 => {
                    let raw = self.advance(i);
                    return Ok(raw.trim_end_matches(is_pattern_white_space).to_string());
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        if let Some(quote) = quote_start {
            let mut at_quote = self.clone();
            at_quote.advance(quote);
            return Err(ParseError::UnterminatedQuote {
                span: at_quote.position(),
            });
        }
        self.advance(self.rest.len());
        Err(ParseError::UnexpectedEnd {
            span: self.position(),
        })
    }

    fn apostrophe(&mut self, start: Span) -> Result<Lexeme, ParseError> {
        let mut chars = self.rest.chars();
        chars.next();
        match chars.next() {
            Some('\'') => {
                self.advance(2);
                Ok(self.lexeme(start, LexemeKind::Text("'".to_string())))
            }
            Some('{' | '}' | '#') => self.quoted(start),
            _ => {
                self.advance(1);
                Ok(self.lexeme(start, LexemeKind::Text("'".to_string())))
            }
        }
    }

    fn quoted(&mut self, start: Span) -> Result<Lexeme, ParseError> {
        self.advance(1);
        let mut value = String::new();
        loop {
            let mut input = self.rest;
            let len = quoted_run(&mut input).map_or(0, str::len);
            value.push_str(self.advance(len));
            if self.rest.is_empty() {
                return Err(ParseError::UnterminatedQuote {
                    span: Span {
                        len: self.offset() - start.offset,
                        ..start
                    },
                });
            }
            if self.rest.starts_with("''") {
                self.advance(2);
                value.push('\'');
            } else {
                self.advance(1);
                break;
            }
        }
        let raw = self.source[start.offset..self.offset()].to_string();
        Ok(self.lexeme(start, LexemeKind::Quoted { value, raw }))
    }

    /// Consume one ASCII character and return `kind`.
    fn single(&mut self, kind: LexemeKind) -> LexemeKind {
        self.advance(1);
        kind
    }

    fn advance(&mut self, len: usize) -> &'a str {
        let (taken, rest) = self.rest.split_at(len);
        for c in taken.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = rest;
        taken
    }

    fn lexeme(&self, start: Span, kind: LexemeKind) -> Lexeme {
        Lexeme {
            kind,
            span: Span {
                len: self.offset() - start.offset,
                ..start
            },
        }
    }
}

/// Parse a run of body text up to the next structural character.
fn text_run<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., ['{', '}', '#', '\'']).parse_next(input)
}

/// Parse the inside of a quoted literal up to the next apostrophe.
fn quoted_run<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(0.., '\'').parse_next(input)
}

/// Parse an identifier.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_identifier_char).parse_next(input)
}

/// Parse ASCII digits.
fn digits<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// Parse optional whitespace.
fn whitespace<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., is_pattern_white_space).parse_next(input)
}
