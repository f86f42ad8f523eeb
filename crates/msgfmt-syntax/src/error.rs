//! Syntax and data-model error types.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::semantics::SelectorKind;

/// A region of template source.
///
/// `offset` and `len` are byte positions; `line` and `column` are 1-based and
/// count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
    pub line: usize,
    pub column: usize,
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A template that cannot be tokenized or parsed.
///
/// Parsing stops at the first error; no partial token tree is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Generic syntax error with a description of what was expected.
    #[error("syntax error at {span}: {message}")]
    Syntax { span: Span, message: String },

    /// The template ended inside an argument, function or selector.
    #[error("unexpected end of message at {span}")]
    UnexpectedEnd { span: Span },

    /// A quoted literal was opened but never closed.
    #[error("unterminated quoted literal starting at {span}")]
    UnterminatedQuote { span: Span },

    /// A character that cannot appear in an identifier.
    #[error("invalid character {found:?} at {span}")]
    InvalidIdentifier { span: Span, found: char },

    /// `offset:` appeared after the first case.
    #[error("plural offset must be set before cases at {span}")]
    OffsetAfterCase { span: Span },

    /// `offset:` with a negative value.
    #[error("plural offset cannot be negative at {span}")]
    NegativeOffset { span: Span },

    /// `offset:` inside a `select`.
    #[error("unexpected plural offset for select at {span}")]
    OffsetOnSelect { span: Span },

    /// An `=N` case inside a `select`.
    #[error("the case '{key}' is not valid with select at {span}")]
    ExactKeyOnSelect { span: Span, key: String },
}

impl ParseError {
    /// The source region the error refers to.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::UnexpectedEnd { span }
            | ParseError::UnterminatedQuote { span }
            | ParseError::InvalidIdentifier { span, .. }
            | ParseError::OffsetAfterCase { span }
            | ParseError::NegativeOffset { span }
            | ParseError::OffsetOnSelect { span }
            | ParseError::ExactKeyOnSelect { span, .. } => *span,
        }
    }

    pub(crate) fn syntax(span: Span, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            span,
            message: message.into(),
        }
    }
}

/// A syntactically valid template whose selectors violate the data model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A selector without the mandatory `other` case.
    #[error("the {kind} on '{arg}' is missing the required 'other' case")]
    MissingCatchall { kind: SelectorKind, arg: String },

    /// The same case key declared twice in one selector.
    #[error("duplicate case '{key}' in {kind} on '{arg}'")]
    DuplicateCase {
        kind: SelectorKind,
        arg: String,
        key: String,
    },

    /// A plural or selectordinal key outside the configured category set.
    #[error("the {kind} case '{key}' on '{arg}' is not valid in this locale, expected one of: {}", .allowed.join(", "))]
    InvalidPluralKey {
        kind: SelectorKind,
        arg: String,
        key: String,
        allowed: Vec<String>,
    },
}
