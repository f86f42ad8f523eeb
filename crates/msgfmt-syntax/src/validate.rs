//! Data-model checks over a parsed token tree.

use std::collections::HashSet;

use crate::ast::{FunctionParam, SelectorNode, Token};
use crate::error::ValidationError;
use crate::semantics::{CATCHALL, PluralCategory, PluralType, parse_exact_key};

/// Which plural and selectordinal case keys are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRules {
    /// Accepted cardinal keys. `None` accepts every CLDR category; an empty
    /// list disables the check.
    pub cardinal: Option<Vec<String>>,
    /// Accepted ordinal keys, with the same conventions as `cardinal`.
    pub ordinal: Option<Vec<String>>,
    /// When false, plural keys are not checked at all.
    pub strict_plural_keys: bool,
}

impl Default for KeyRules {
    fn default() -> Self {
        Self {
            cardinal: None,
            ordinal: None,
            strict_plural_keys: true,
        }
    }
}

impl KeyRules {
    /// Rules that accept any plural key.
    pub fn relaxed() -> Self {
        Self {
            strict_plural_keys: false,
            ..Self::default()
        }
    }

    /// The keys accepted for a plural type, or `None` when unchecked.
    fn allowed(&self, plural_type: PluralType) -> Option<Vec<String>> {
        if !self.strict_plural_keys {
            return None;
        }
        let configured = match plural_type {
            PluralType::Cardinal => &self.cardinal,
            PluralType::Ordinal => &self.ordinal,
        };
        match configured {
            None => Some(
                PluralCategory::ALL
                    .iter()
                    .map(|category| category.as_str().to_string())
                    .collect(),
            ),
            Some(keys) if keys.is_empty() => None,
            Some(keys) => Some(keys.clone()),
        }
    }
}

/// Check every selector of a token tree, including selectors nested in cases
/// and in function styles.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found in document order.
pub fn validate(tokens: &[Token], rules: &KeyRules) -> Result<(), ValidationError> {
    for token in tokens {
        match token {
            Token::Selector(node) => {
                validate_selector(node, rules)?;
                for case in &node.cases {
                    validate(&case.body, rules)?;
                }
            }
            Token::Function {
                param: Some(FunctionParam::Tokens(param)),
                ..
            } => validate(param, rules)?,
            Token::Content(_) | Token::Argument { .. } | Token::Function { .. } | Token::Octothorpe => {}
        }
    }
    Ok(())
}

fn validate_selector(node: &SelectorNode, rules: &KeyRules) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for case in &node.cases {
        if !seen.insert(case.key.as_str()) {
            return Err(ValidationError::DuplicateCase {
                kind: node.kind,
                arg: node.arg.clone(),
                key: case.key.clone(),
            });
        }
    }

    if let Some(allowed) = node.kind.plural_type().and_then(|t| rules.allowed(t)) {
        let invalid = node.cases.iter().find(|case| {
            parse_exact_key(&case.key).is_none()
                && case.key != CATCHALL
                && !allowed.contains(&case.key)
        });
        if let Some(case) = invalid {
            return Err(ValidationError::InvalidPluralKey {
                kind: node.kind,
                arg: node.arg.clone(),
                key: case.key.clone(),
                allowed,
            });
        }
    }

    if node.catchall().is_none() {
        return Err(ValidationError::MissingCatchall {
            kind: node.kind,
            arg: node.arg.clone(),
        });
    }
    Ok(())
}
