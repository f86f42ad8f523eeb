//! Token tree produced by the parser.
//!
//! These types are public so that tooling (linters, the CLI, the `messages!`
//! macro) can inspect parsed templates. Trees carry no source positions and
//! compare structurally.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::semantics::{CATCHALL, SelectorKind, parse_exact_key};

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    /// Literal text with escapes already resolved. Never empty.
    Content(String),
    /// `{name}`
    Argument { arg: String },
    /// `{name, key}` or `{name, key, style}`
    Function {
        arg: String,
        key: String,
        param: Option<FunctionParam>,
    },
    /// `{name, plural|select|selectordinal, ...}`
    Selector(SelectorNode),
    /// `#` inside a plural or selectordinal case.
    Octothorpe,
}

/// The style part of a function placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionParam {
    /// Style parsed as a nested template (non-strict mode).
    Tokens(Vec<Token>),
    /// Style captured verbatim (strict mode).
    Raw(String),
}

/// A selector placeholder with its cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorNode {
    pub kind: SelectorKind,
    pub arg: String,
    pub offset: Option<u64>,
    pub cases: Vec<Case>,
}

impl SelectorNode {
    /// Find a case by its key as written.
    pub fn case(&self, key: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.key == key)
    }

    /// The `other` case, if declared.
    pub fn catchall(&self) -> Option<&Case> {
        self.case(CATCHALL)
    }

    /// The offset, treating an absent `offset:` as zero.
    pub fn offset_or_zero(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// One branch of a selector: `key{body}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Key as written; exact-value keys keep their leading `=`.
    pub key: String,
    pub body: Vec<Token>,
}

impl Case {
    /// The numeric value of an `=N` key.
    pub fn exact_value(&self) -> Option<u64> {
        parse_exact_key(&self.key)
    }
}

/// Every argument name a token tree references, sorted and deduplicated.
pub fn argument_names(tokens: &[Token]) -> Vec<String> {
    let mut names = BTreeSet::new();
    collect_arguments(tokens, &mut names);
    names.into_iter().collect()
}

fn collect_arguments(tokens: &[Token], names: &mut BTreeSet<String>) {
    for token in tokens {
        match token {
            Token::Argument { arg } => {
                names.insert(arg.clone());
            }
            Token::Function { arg, param, .. } => {
                names.insert(arg.clone());
                if let Some(FunctionParam::Tokens(param)) = param {
                    collect_arguments(param, names);
                }
            }
            Token::Selector(node) => {
                names.insert(node.arg.clone());
                for case in &node.cases {
                    collect_arguments(&case.body, names);
                }
            }
            Token::Content(_) | Token::Octothorpe => {}
        }
    }
}

/// Append text to a token list, merging with a trailing content node.
pub(crate) fn push_content(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Content(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Content(text.to_string()));
    }
}
