//! Static lint rules for parsed templates.
//!
//! Lints flag templates that compile but are probably not what the author
//! meant in a given locale.

use msgfmt_syntax::{FunctionParam, PluralCategory, SelectorKind, SelectorNode, Token};
use thiserror::Error;

use crate::interpreter::plural::{plural_categories, plural_category};
use crate::types::Value;

/// A warning produced by [`lint_tokens`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// A category key the locale never selects.
    #[error("the {kind} case '{key}' on '{arg}' is never selected in '{locale}'")]
    UnreachablePluralKey {
        kind: SelectorKind,
        arg: String,
        key: String,
        locale: String,
    },

    /// A selector whose only case is `other`.
    #[error("the {kind} on '{arg}' only has an 'other' case")]
    CatchallOnly { kind: SelectorKind, arg: String },

    /// An `=N` case with the same body as the category case it shadows.
    #[error("the case '{key}' on '{arg}' repeats the '{category}' case")]
    RedundantExactKey {
        arg: String,
        key: String,
        category: String,
    },
}

/// Run every lint over a token tree, including selectors nested in cases
/// and function styles.
pub fn lint_tokens(tokens: &[Token], locale: &str) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    lint_into(tokens, locale, &mut warnings);
    warnings
}

fn lint_into(tokens: &[Token], locale: &str, warnings: &mut Vec<LintWarning>) {
    for token in tokens {
        match token {
            Token::Selector(node) => {
                lint_catchall_only(node, warnings);
                lint_unreachable_keys(node, locale, warnings);
                lint_redundant_exact_keys(node, locale, warnings);
                for case in &node.cases {
                    lint_into(&case.body, locale, warnings);
                }
            }
            Token::Function {
                param: Some(FunctionParam::Tokens(param)),
                ..
            } => lint_into(param, locale, warnings),
            Token::Content(_) | Token::Argument { .. } | Token::Function { .. } | Token::Octothorpe => {}
        }
    }
}

fn lint_catchall_only(node: &SelectorNode, warnings: &mut Vec<LintWarning>) {
    if node.cases.len() == 1 && node.catchall().is_some() {
        warnings.push(LintWarning::CatchallOnly {
            kind: node.kind,
            arg: node.arg.clone(),
        });
    }
}

fn lint_unreachable_keys(node: &SelectorNode, locale: &str, warnings: &mut Vec<LintWarning>) {
    let Some(plural_type) = node.kind.plural_type() else {
        return;
    };
    let used = plural_categories(locale, plural_type);
    for case in &node.cases {
        let Some(category) = PluralCategory::from_name(&case.key) else {
            continue;
        };
        if !used.contains(&category) {
            warnings.push(LintWarning::UnreachablePluralKey {
                kind: node.kind,
                arg: node.arg.clone(),
                key: case.key.clone(),
                locale: locale.to_string(),
            });
        }
    }
}

fn lint_redundant_exact_keys(node: &SelectorNode, locale: &str, warnings: &mut Vec<LintWarning>) {
    let Some(plural_type) = node.kind.plural_type() else {
        return;
    };
    for case in &node.cases {
        let Some(exact) = case.exact_value() else {
            continue;
        };
        let Some(adjusted) = Value::from(exact).minus_offset(node.offset_or_zero()) else {
            continue;
        };
        let Some(category) = plural_category(locale, &adjusted, plural_type) else {
            continue;
        };
        let shadowed = node
            .case(category.as_str())
            .or_else(|| node.catchall())
            .filter(|other| other.body == case.body);
        if let Some(other) = shadowed {
            warnings.push(LintWarning::RedundantExactKey {
                arg: node.arg.clone(),
                key: case.key.clone(),
                category: other.key.clone(),
            });
        }
    }
}
