use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// One piece of a resolved message, for callers that need structured output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    /// Literal text from the pattern.
    Literal(String),
    /// An argument substituted without a function.
    Value { source: String, value: Value },
    /// The result of a formatting function.
    Formatted {
        function: String,
        source: String,
        value: Value,
    },
    /// Replacement text produced by an error handler.
    Fallback { source: String, value: String },
}

impl Display for Part {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Part::Literal(text) | Part::Fallback { value: text, .. } => f.write_str(text),
            Part::Value { value, .. } | Part::Formatted { value, .. } => write!(f, "{value}"),
        }
    }
}
