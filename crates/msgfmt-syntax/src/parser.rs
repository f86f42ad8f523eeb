//! Recursive-descent parser producing a token tree.
//!
//! Grammar, informally:
//! - argument: `{name}`
//! - function: `{name, key}` or `{name, key, style}`
//! - selector: `{name, plural|select|selectordinal, [offset:N] (key{body})+}`
//! - octothorpe: `#` inside a plural or selectordinal case
//!
//! Whether `#` is an octothorpe depends on the nearest enclosing plural. In
//! non-strict mode that context survives nested `select` cases; in strict mode
//! a `select` case resets it. Strict mode also keeps function styles as raw
//! text instead of parsing them.

use crate::ast::{Case, FunctionParam, SelectorNode, Token, push_content};
use crate::error::{ParseError, Span};
use crate::lexer::{Lexeme, LexemeKind, Lexer};
use crate::semantics::{OFFSET_KEYWORD, SelectorKind};

/// Options controlling parser behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Capture function styles verbatim and limit `#` to the immediately
    /// enclosing plural case.
    pub strict: bool,
}

impl ParseOptions {
    /// Options with strict mode enabled.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parse a template into a token tree.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the offending span for unterminated
/// quotes, unbalanced braces, invalid identifier characters and misplaced or
/// negative offsets.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Vec<Token>, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(source),
        strict: options.strict,
    };
    parser.body(false, true)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    strict: bool,
}

impl Parser<'_> {
    /// Parse text and placeholders until the closing `}` of the enclosing
    /// case (or end of input at the root).
    fn body(&mut self, in_plural: bool, at_root: bool) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let lexeme = self.lexer.next_body()?;
            match lexeme.kind {
                LexemeKind::Text(text) => push_content(&mut tokens, &text),
                LexemeKind::Quoted { value, raw } => {
                    let text = quoted_text(value, raw, in_plural, lexeme.span)?;
                    push_content(&mut tokens, &text);
                }
                LexemeKind::Hash if in_plural => tokens.push(Token::Octothorpe),
                LexemeKind::Hash => push_content(&mut tokens, "#"),
                LexemeKind::Open => tokens.push(self.placeholder(in_plural)?),
                LexemeKind::Close if !at_root => return Ok(tokens),
                LexemeKind::Close => {
                    return Err(ParseError::syntax(lexeme.span, "unmatched '}'"));
                }
                LexemeKind::End if at_root => return Ok(tokens),
                LexemeKind::End => return Err(ParseError::UnexpectedEnd { span: lexeme.span }),
                LexemeKind::Comma
                | LexemeKind::Colon
                | LexemeKind::Ident(_)
                | LexemeKind::ExactKey(_)
                | LexemeKind::Symbol(_) => {
                    return Err(ParseError::syntax(lexeme.span, "unexpected token in text"));
                }
            }
        }
    }

    /// Parse the inside of `{ ... }` after the opening brace.
    fn placeholder(&mut self, in_plural: bool) -> Result<Token, ParseError> {
        let arg = self.identifier("argument name")?;
        let next = self.lexer.next_arg()?;
        match next.kind {
            LexemeKind::Close => return Ok(Token::Argument { arg }),
            LexemeKind::Comma => {}
            _ => return Err(unexpected(next, "',' or '}' after argument name")),
        }

        let key = self.identifier("argument type")?;
        if let Some(kind) = SelectorKind::from_keyword(&key) {
            let next = self.lexer.next_arg()?;
            if next.kind != LexemeKind::Comma {
                return Err(unexpected(next, &format!("',' after '{key}'")));
            }
            return self.selector(kind, arg, in_plural).map(Token::Selector);
        }

        let next = self.lexer.next_arg()?;
        match next.kind {
            LexemeKind::Close => Ok(Token::Function {
                arg,
                key,
                param: None,
            }),
            LexemeKind::Comma => {
                let param = self.function_param(in_plural)?;
                Ok(Token::Function {
                    arg,
                    key,
                    param: Some(param),
                })
            }
            _ => Err(unexpected(next, "',' or '}' after function name")),
        }
    }

    /// Parse a function style up to and including the closing `}`.
    fn function_param(&mut self, in_plural: bool) -> Result<FunctionParam, ParseError> {
        if self.strict {
            let raw = self.lexer.raw_until_close()?;
            let close = self.lexer.next_arg()?;
            if close.kind != LexemeKind::Close {
                return Err(unexpected(close, "'}'"));
            }
            return Ok(FunctionParam::Raw(raw));
        }

        self.lexer.skip_whitespace();
        let mut tokens = self.body(in_plural, false)?;
        if let Some(Token::Content(text)) = tokens.last_mut() {
            let trimmed = text.trim_end().len();
            text.truncate(trimmed);
            if text.is_empty() {
                tokens.pop();
            }
        }
        Ok(FunctionParam::Tokens(tokens))
    }

    /// Parse the offset and cases of a selector up to and including the
    /// closing `}`.
    fn selector(
        &mut self,
        kind: SelectorKind,
        arg: String,
        in_plural: bool,
    ) -> Result<SelectorNode, ParseError> {
        let in_plural = if kind.is_plural() {
            true
        } else if self.strict {
            false
        } else {
            in_plural
        };

        let mut node = SelectorNode {
            kind,
            arg,
            offset: None,
            cases: Vec::new(),
        };

        loop {
            let lexeme = self.lexer.next_arg()?;
            match lexeme.kind {
                LexemeKind::Close => return Ok(node),
                LexemeKind::Ident(ref word)
                    if word == OFFSET_KEYWORD
                        && self.lexer.peek_arg()?.kind == LexemeKind::Colon =>
                {
                    self.lexer.next_arg()?;
                    let offset = self.offset_value(&node, lexeme.span)?;
                    node.offset = Some(offset);
                }
                LexemeKind::Ident(key) => {
                    let body = self.case_body(&key, in_plural)?;
                    node.cases.push(Case { key, body });
                }
                LexemeKind::ExactKey(key) => {
                    if kind == SelectorKind::Select {
                        return Err(ParseError::ExactKeyOnSelect {
                            span: lexeme.span,
                            key,
                        });
                    }
                    let body = self.case_body(&key, in_plural)?;
                    node.cases.push(Case { key, body });
                }
                _ => return Err(unexpected(lexeme, "case key or '}'")),
            }
        }
    }

    /// Parse the number after `offset:`.
    fn offset_value(&mut self, node: &SelectorNode, span: Span) -> Result<u64, ParseError> {
        if node.kind == SelectorKind::Select {
            return Err(ParseError::OffsetOnSelect { span });
        }
        if !node.cases.is_empty() {
            return Err(ParseError::OffsetAfterCase { span });
        }
        if node.offset.is_some() {
            return Err(ParseError::syntax(span, "duplicate plural offset"));
        }

        let value = self.lexer.next_arg()?;
        match value.kind {
            LexemeKind::Ident(ref digits) if digits.bytes().all(|b| b.is_ascii_digit()) => digits
                .parse()
                .map_err(|_| ParseError::syntax(value.span, "plural offset is too large")),
            LexemeKind::Symbol('-') => Err(ParseError::NegativeOffset { span: value.span }),
            _ => Err(unexpected(value, "offset value")),
        }
    }

    /// Parse `{body}` after a case key.
    fn case_body(&mut self, key: &str, in_plural: bool) -> Result<Vec<Token>, ParseError> {
        let open = self.lexer.next_arg()?;
        if open.kind != LexemeKind::Open {
            return Err(unexpected(open, &format!("'{{' after case '{key}'")));
        }
        self.body(in_plural, false)
    }

    /// Read an identifier in argument mode.
    fn identifier(&mut self, what: &str) -> Result<String, ParseError> {
        let lexeme = self.lexer.next_arg()?;
        match lexeme.kind {
            LexemeKind::Ident(name) => Ok(name),
            _ => Err(unexpected(lexeme, what)),
        }
    }
}

/// Resolve the text of a quoted literal.
///
/// Outside plural context `#` needs no quoting, so a quoted literal that
/// starts with `#` keeps its apostrophes.
fn quoted_text(
    value: String,
    raw: String,
    in_plural: bool,
    span: Span,
) -> Result<String, ParseError> {
    if in_plural || !value.starts_with('#') {
        return Ok(value);
    }
    if value.contains(['{', '}']) {
        return Err(ParseError::syntax(
            span,
            format!("unsupported escape pattern: {raw}"),
        ));
    }
    Ok(raw)
}

/// Build the error for an unexpected token.
fn unexpected(lexeme: Lexeme, expected: &str) -> ParseError {
    match lexeme.kind {
        LexemeKind::End => ParseError::UnexpectedEnd { span: lexeme.span },
        LexemeKind::Symbol(found) => ParseError::InvalidIdentifier {
            span: lexeme.span,
            found,
        },
        LexemeKind::Text(_)
        | LexemeKind::Quoted { .. }
        | LexemeKind::Hash
        | LexemeKind::Open
        | LexemeKind::Close
        | LexemeKind::Comma
        | LexemeKind::Colon
        | LexemeKind::Ident(_)
        | LexemeKind::ExactKey(_) => ParseError::syntax(lexeme.span, format!("expected {expected}")),
    }
}
