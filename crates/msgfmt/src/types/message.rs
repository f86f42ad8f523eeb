//! The flattened data model produced by the compiler.
//!
//! A [`CompiledMessage`] is either a single pattern or a table of variants
//! with one key per selector. It is immutable once built and can be shared
//! freely between threads.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use msgfmt_syntax::semantics::parse_exact_key;
use msgfmt_syntax::{CATCHALL, Case, FunctionParam, SelectorKind, SelectorNode, Token, stringify};
use serde::{Deserialize, Serialize};

/// The option name under which a function's style is passed.
pub const STYLE_OPTION: &str = "style";

/// One key of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// `=N`
    Exact(u64),
    /// A plural category or a `select` value.
    Named(String),
    /// `other`
    Catchall,
}

impl Key {
    /// Classify a case key as written in the template.
    pub fn from_case_key(key: &str) -> Key {
        if let Some(value) = parse_exact_key(key) {
            Key::Exact(value)
        } else if key == CATCHALL {
            Key::Catchall
        } else {
            Key::Named(key.to_string())
        }
    }

    pub fn is_catchall(&self) -> bool {
        matches!(self, Key::Catchall)
    }

    /// Sort rank: exact keys first, named keys next, the catchall last.
    pub(crate) fn rank(&self) -> (u8, u64) {
        match self {
            Key::Exact(value) => (0, *value),
            Key::Named(_) => (1, 0),
            Key::Catchall => (2, 0),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Key::Exact(value) => write!(f, "={value}"),
            Key::Named(name) => f.write_str(name),
            Key::Catchall => f.write_str(CATCHALL),
        }
    }
}

/// Identity of a selector: two occurrences with equal references are the
/// same selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectorRef {
    pub kind: SelectorKind,
    pub name: String,
    /// Plural offset; an absent `offset:` is zero.
    pub offset: u64,
}

impl SelectorRef {
    pub fn of(node: &SelectorNode) -> SelectorRef {
        SelectorRef {
            kind: node.kind,
            name: node.arg.clone(),
            offset: node.offset_or_zero(),
        }
    }
}

/// A selector and its sorted, deduplicated keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub reference: SelectorRef,
    pub keys: Vec<Key>,
}

/// What an expression formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// A literal string.
    Literal(String),
    /// The argument with this name.
    Variable(String),
    /// A `#`: the named argument minus the plural offset.
    Count { name: String, offset: u64 },
}

impl Operand {
    /// The argument name or literal text this operand refers to.
    pub fn source(&self) -> &str {
        match self {
            Operand::Literal(text) => text,
            Operand::Variable(name) | Operand::Count { name, .. } => name,
        }
    }
}

/// A placeholder in a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    /// Formatting function, `None` for plain substitution.
    pub function: Option<String>,
    pub operand: Operand,
    /// Literal options passed to the function.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl Expression {
    /// A plain substitution of `operand`.
    pub fn substitute(operand: Operand) -> Expression {
        Expression {
            function: None,
            operand,
            options: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternElement {
    Text(String),
    Expression(Expression),
}

/// Literal text and expressions, in order. Adjacent text is always merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern(Vec<PatternElement>);

impl Pattern {
    pub fn new() -> Pattern {
        Pattern::default()
    }

    pub fn elements(&self) -> &[PatternElement] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append text, merging with trailing text.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(PatternElement::Text(prev)) = self.0.last_mut() {
            prev.push_str(text);
        } else {
            self.0.push(PatternElement::Text(text.to_string()));
        }
    }

    pub fn push_expression(&mut self, expression: Expression) {
        self.0.push(PatternElement::Expression(expression));
    }

    /// Template source for this pattern alone, with every count written as
    /// `#`. It reads back only inside the plural case that owns the counts.
    pub fn stringify(&self) -> String {
        stringify(&pattern_tokens(self, &|_, _| Token::Octothorpe))
    }
}

impl FromIterator<PatternElement> for Pattern {
    fn from_iter<I: IntoIterator<Item = PatternElement>>(iter: I) -> Self {
        let mut pattern = Pattern::new();
        for element in iter {
            match element {
                PatternElement::Text(text) => pattern.push_text(&text),
                PatternElement::Expression(expression) => pattern.push_expression(expression),
            }
        }
        pattern
    }
}

/// One fully-specified branch: a key per selector and its pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub keys: Vec<Key>,
    pub pattern: Pattern,
}

/// A template compiled into a pattern or a flat variant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompiledMessage {
    /// A message without selectors.
    Pattern(Pattern),
    /// Variants covering the Cartesian product of the selectors' keys.
    Select {
        selectors: Vec<Selector>,
        variants: Vec<Variant>,
    },
}

impl CompiledMessage {
    pub fn selectors(&self) -> &[Selector] {
        match self {
            CompiledMessage::Pattern(_) => &[],
            CompiledMessage::Select { selectors, .. } => selectors,
        }
    }

    pub fn variant_count(&self) -> usize {
        match self {
            CompiledMessage::Pattern(_) => 1,
            CompiledMessage::Select { variants, .. } => variants.len(),
        }
    }

    /// Rebuild an equivalent template with the selectors nested in order.
    ///
    /// A `#` whose plural is not the innermost plural selector is wrapped in
    /// a catchall-only copy of its selector, which compiles back into the
    /// same selector.
    pub fn stringify(&self) -> String {
        let tokens = match self {
            CompiledMessage::Pattern(pattern) => {
                pattern_tokens(pattern, &|name, offset| count_token(name, offset, &[], None))
            }
            CompiledMessage::Select {
                selectors,
                variants,
            } => {
                let innermost = selectors
                    .iter()
                    .rev()
                    .map(|selector| &selector.reference)
                    .find(|reference| reference.kind.is_plural());
                let count = |name: &str, offset| count_token(name, offset, selectors, innermost);
                let mut prefix = Vec::with_capacity(selectors.len());
                nest(selectors, variants, &count, &mut prefix)
            }
        };
        stringify(&tokens)
    }
}

fn nest(
    selectors: &[Selector],
    variants: &[Variant],
    count: &impl Fn(&str, u64) -> Token,
    prefix: &mut Vec<Key>,
) -> Vec<Token> {
    let Some(selector) = selectors.get(prefix.len()) else {
        return variants
            .iter()
            .find(|variant| variant.keys == *prefix)
            .map(|variant| pattern_tokens(&variant.pattern, count))
            .unwrap_or_default();
    };
    let mut cases = Vec::with_capacity(selector.keys.len());
    for key in &selector.keys {
        prefix.push(key.clone());
        let body = nest(selectors, variants, count, prefix);
        prefix.pop();
        cases.push(Case {
            key: key.to_string(),
            body,
        });
    }
    let reference = &selector.reference;
    vec![Token::Selector(SelectorNode {
        kind: reference.kind,
        arg: reference.name.clone(),
        offset: (reference.offset > 0).then_some(reference.offset),
        cases,
    })]
}

fn pattern_tokens(pattern: &Pattern, count: &impl Fn(&str, u64) -> Token) -> Vec<Token> {
    let mut tokens = Vec::new();
    for element in pattern.elements() {
        match element {
            PatternElement::Text(text) => push_text(&mut tokens, text),
            PatternElement::Expression(expression) => match (&expression.function, &expression.operand) {
                (None, Operand::Literal(text)) => push_text(&mut tokens, text),
                (None, Operand::Variable(name)) => tokens.push(Token::Argument { arg: name.clone() }),
                (None, Operand::Count { name, offset }) => {
                    tokens.push(count(name, *offset));
                }
                (Some(function), operand) => tokens.push(Token::Function {
                    arg: operand.source().to_string(),
                    key: function.clone(),
                    param: expression
                        .options
                        .get(STYLE_OPTION)
                        .map(|style| FunctionParam::Raw(style.clone())),
                }),
            },
        }
    }
    tokens
}

/// The token for a `#` bound to the plural `name` with `offset`.
fn count_token(
    name: &str,
    offset: u64,
    selectors: &[Selector],
    innermost: Option<&SelectorRef>,
) -> Token {
    let owns = |reference: &SelectorRef| {
        reference.kind.is_plural() && reference.name == name && reference.offset == offset
    };
    if innermost.is_some_and(&owns) {
        return Token::Octothorpe;
    }
    let kind = selectors
        .iter()
        .map(|selector| &selector.reference)
        .find(|reference| owns(*reference))
        .map_or(SelectorKind::Plural, |reference| reference.kind);
    Token::Selector(SelectorNode {
        kind,
        arg: name.to_string(),
        offset: (offset > 0).then_some(offset),
        cases: vec![Case {
            key: CATCHALL.to_string(),
            body: vec![Token::Octothorpe],
        }],
    })
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Content(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Content(text.to_string()));
    }
}
