//! Shared syntax layer for ICU message templates.
//!
//! The runtime crate and the `messages!` macro both parse and validate through
//! this crate so compile-time and runtime behavior stay in sync.

mod ast;
mod error;
pub mod lexer;
mod parser;
pub mod semantics;
mod stringify;
mod validate;

pub use ast::{Case, FunctionParam, SelectorNode, Token, argument_names};
pub use error::{ParseError, Span, ValidationError};
pub use parser::{ParseOptions, parse};
pub use semantics::{CATCHALL, PLURAL_CATEGORIES, PluralCategory, PluralType, SelectorKind};
pub use stringify::{stringify, stringify_with};
pub use validate::{KeyRules, validate};
