//! Compile-time validation for the messages! macro.
//!
//! Checks, in order, for each message:
//! 1. Attributes are `#[strict]` or doc comments
//! 2. The name is snake_case and not defined twice
//! 3. The template parses and passes the same data-model checks the runtime
//!    compiler applies with default options
//!
//! Also provides typo suggestions for attributes using Levenshtein distance.

use std::collections::HashSet;

use msgfmt_syntax::semantics::is_snake_case;
use msgfmt_syntax::{KeyRules, ParseOptions, argument_names, parse, validate as validate_tokens};
use strsim::levenshtein;
use syn::{Attribute, Meta};

use crate::input::{MacroInput, MessageDefinition};

/// Attributes accepted on a message definition.
const KNOWN_ATTRIBUTES: &[&str] = &["strict", "doc"];

/// A message that passed validation, ready for code generation.
pub struct ValidatedMessage<'a> {
    pub definition: &'a MessageDefinition,
    pub docs: Vec<&'a Attribute>,
    pub strict: bool,
    pub arguments: Vec<String>,
}

/// Main validation entry point.
///
/// On failure, returns an error with span information pointing to the
/// problematic location in the source.
pub fn validate(input: &MacroInput) -> syn::Result<Vec<ValidatedMessage<'_>>> {
    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(input.messages.len());
    for message in &input.messages {
        if !seen.insert(message.name.name.as_str()) {
            return Err(syn::Error::new(
                message.name.span,
                format!("message '{}' is defined more than once", message.name.name),
            ));
        }
        validated.push(validate_message(message)?);
    }
    Ok(validated)
}

fn validate_message(message: &MessageDefinition) -> syn::Result<ValidatedMessage<'_>> {
    let name = &message.name;
    if !is_snake_case(&name.name) {
        return Err(syn::Error::new(
            name.span,
            format!(
                "message name '{}' must be snake_case\nhelp: use '{}'",
                name.name,
                to_snake_case(&name.name)
            ),
        ));
    }

    let mut docs = Vec::new();
    let mut strict = false;
    for attr in &message.attrs {
        match &attr.meta {
            Meta::NameValue(meta) if meta.path.is_ident("doc") => docs.push(attr),
            Meta::Path(path) if path.is_ident("strict") => strict = true,
            Meta::Path(_) | Meta::List(_) | Meta::NameValue(_) => {
                return Err(unknown_attribute(attr));
            }
        }
    }

    let source = message.template.value();
    let tokens = parse(&source, &ParseOptions { strict }).map_err(|e| {
        syn::Error::new(
            message.template.span(),
            format!("invalid template for '{}': {e}", name.name),
        )
    })?;
    validate_tokens(&tokens, &KeyRules::default()).map_err(|e| {
        syn::Error::new(
            message.template.span(),
            format!("invalid template for '{}': {e}", name.name),
        )
    })?;

    Ok(ValidatedMessage {
        definition: message,
        docs,
        strict,
        arguments: argument_names(&tokens),
    })
}

fn unknown_attribute(attr: &Attribute) -> syn::Error {
    let path = attr.path();
    let name = path
        .get_ident()
        .map_or_else(|| "?".to_string(), ToString::to_string);
    let mut msg = format!("unknown message attribute '{name}'");
    if let Some(suggestion) = compute_suggestions(&name, KNOWN_ATTRIBUTES).first() {
        msg.push_str(&format!("\nhelp: did you mean '#[{suggestion}]'?"));
    } else {
        msg.push_str("\nnote: supported attributes: #[strict], doc comments");
    }
    syn::Error::new_spanned(path, msg)
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Compute typo suggestions using Levenshtein distance.
///
/// Match the runtime behavior:
/// - distance <= 1 for names <= 3 chars
/// - distance <= 2 for longer names
/// - Limit to 3 suggestions, sorted by distance
fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, (*candidate).to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
