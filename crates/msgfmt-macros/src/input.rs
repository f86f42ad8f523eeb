//! Internal AST types for the messages! macro.

use proc_macro2::Span;
use syn::{Attribute, Ident, LitStr};

/// Top-level macro input containing all message definitions.
pub struct MacroInput {
    pub messages: Vec<MessageDefinition>,
}

/// A single message definition: `#[attrs] name = "template";`
pub struct MessageDefinition {
    pub attrs: Vec<Attribute>,
    pub name: SpannedIdent,
    pub template: LitStr,
}

/// Wrapper for identifiers that preserves span information.
#[derive(Clone)]
pub struct SpannedIdent {
    pub name: String,
    pub span: Span,
}

impl SpannedIdent {
    pub fn new(ident: &Ident) -> Self {
        Self {
            name: ident.to_string(),
            span: ident.span(),
        }
    }
}
