//! Error types for compiling and resolving messages.

use msgfmt_syntax::{ParseError, ValidationError};
use strsim::levenshtein;
use thiserror::Error;

/// A template that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The template is not syntactically valid.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// The template parses but violates the data model.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// An error raised while resolving a compiled message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An expression names a function that is not registered.
    #[error("unknown function '{name}'{}", did_you_mean(.suggestions))]
    UnknownFunction {
        name: String,
        suggestions: Vec<String>,
    },

    /// A numeric-only function received a non-numeric operand.
    #[error("function '{function}' requires a numeric operand, got '{value}'")]
    NonNumericOperand { function: String, value: String },

    /// A plural selector or `#` received a non-numeric value.
    #[error("plural selector '{name}' requires a numeric value, got '{value}'")]
    NonNumericSelector { name: String, value: String },

    /// The message references an argument that was not supplied.
    #[error("missing argument '{name}'")]
    MissingArgument { name: String },

    /// A formatting function failed.
    #[error("function '{function}' failed: {message}")]
    Function { function: String, message: String },

    /// No variant matches the selected keys and there is no catch-all
    /// variant. Only possible for hand-built messages.
    #[error("no variant matches keys [{}]", .keys.join(", "))]
    NoVariant { keys: Vec<String> },
}

impl ResolveError {
    /// The argument or function name the error is about.
    pub fn subject(&self) -> &str {
        match self {
            ResolveError::UnknownFunction { name, .. }
            | ResolveError::NonNumericSelector { name, .. }
            | ResolveError::MissingArgument { name } => name,
            ResolveError::NonNumericOperand { function, .. }
            | ResolveError::Function { function, .. } => function,
            ResolveError::NoVariant { .. } => "",
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// Candidates within distance 1 (names up to 3 chars) or 2 (longer names)
/// are returned closest first, at most 3.
pub fn compute_suggestions<S: AsRef<str>>(name: &str, available: &[S]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
