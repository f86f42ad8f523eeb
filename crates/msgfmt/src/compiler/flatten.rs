//! Selector lifting: nested selectors become a flat variant table.
//!
//! 1. Collect every selector in first-seen order, merging the key sets of
//!    occurrences that share a [`SelectorRef`].
//! 2. Sort each key set and build the Cartesian product of key vectors.
//! 3. Walk the tree once. Each selector case extends an immutable linked
//!    [`Filter`]; each leaf is appended to every variant the filter admits.

use msgfmt_syntax::{
    CATCHALL, FunctionParam, ParseOptions, SelectorNode, Token, stringify_with,
};

use crate::compiler::CompileOptions;
use crate::types::{
    CompiledMessage, Expression, Key, Operand, Pattern, STYLE_OPTION, Selector, SelectorRef,
    Value, Variant,
};

/// A constraint chain from the root to the current case: every link must
/// route the variant's key to the case it names.
struct Filter<'a> {
    selector: usize,
    occurrence: &'a SelectorNode,
    case: &'a str,
    parent: Option<&'a Filter<'a>>,
}

pub(super) fn flatten(tokens: &[Token], options: &CompileOptions) -> CompiledMessage {
    let mut selectors = Vec::new();
    collect(tokens, &mut selectors);
    for selector in &mut selectors {
        selector.keys.sort_by_key(Key::rank);
    }

    let flattener = Flattener {
        options,
        selectors: &selectors,
        parse_options: options.parse_options(),
    };

    if selectors.is_empty() {
        let mut patterns = [Pattern::new()];
        flattener.walk(tokens, None, None, &[Vec::new()], &mut patterns);
        let [pattern] = patterns;
        return CompiledMessage::Pattern(pattern);
    }

    let combinations = cartesian(&selectors);
    let mut patterns = vec![Pattern::new(); combinations.len()];
    flattener.walk(tokens, None, None, &combinations, &mut patterns);

    let variants = combinations
        .into_iter()
        .zip(patterns)
        .map(|(keys, pattern)| Variant { keys, pattern })
        .collect();
    CompiledMessage::Select {
        selectors,
        variants,
    }
}

/// Collect selectors in first-seen order, unioning keys of repeated
/// references. Selectors inside function styles are not lifted.
fn collect(tokens: &[Token], selectors: &mut Vec<Selector>) {
    for token in tokens {
        let Token::Selector(node) = token else {
            continue;
        };
        let reference = SelectorRef::of(node);
        let index = match selectors.iter().position(|s| s.reference == reference) {
            Some(index) => index,
            None => {
                selectors.push(Selector {
                    reference,
                    keys: Vec::new(),
                });
                selectors.len() - 1
            }
        };
        for case in &node.cases {
            let key = Key::from_case_key(&case.key);
            if !selectors[index].keys.contains(&key) {
                selectors[index].keys.push(key);
            }
        }
        for case in &node.cases {
            collect(&case.body, selectors);
        }
    }
}

/// Every key vector, first selector varying slowest.
fn cartesian(selectors: &[Selector]) -> Vec<Vec<Key>> {
    let mut combinations = vec![Vec::new()];
    for selector in selectors {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix: Vec<Key>| {
                selector.keys.iter().map(move |key| {
                    let mut keys = prefix.clone();
                    keys.push(key.clone());
                    keys
                })
            })
            .collect();
    }
    combinations
}

struct Flattener<'o> {
    options: &'o CompileOptions,
    selectors: &'o [Selector],
    parse_options: ParseOptions,
}

impl Flattener<'_> {
    fn walk(
        &self,
        tokens: &[Token],
        filter: Option<&Filter<'_>>,
        plural: Option<&SelectorRef>,
        combinations: &[Vec<Key>],
        patterns: &mut [Pattern],
    ) {
        for token in tokens {
            let expression = match token {
                Token::Content(text) => {
                    self.emit(filter, combinations, patterns, |pattern| pattern.push_text(text));
                    continue;
                }
                Token::Selector(node) => {
                    let reference = SelectorRef::of(node);
                    let Some(selector) = self.selectors.iter().position(|s| s.reference == reference)
                    else {
                        continue;
                    };
                    let plural = if node.kind.is_plural() {
                        Some(&reference)
                    } else {
                        plural
                    };
                    for case in &node.cases {
                        let child = Filter {
                            selector,
                            occurrence: node,
                            case: &case.key,
                            parent: filter,
                        };
                        self.walk(&case.body, Some(&child), plural, combinations, patterns);
                    }
                    continue;
                }
                Token::Argument { arg } => Expression::substitute(Operand::Variable(arg.clone())),
                Token::Function { arg, key, param } => {
                    let mut expression = Expression::substitute(Operand::Variable(arg.clone()));
                    expression.function = Some(key.clone());
                    if let Some(style) = self.style(param.as_ref()) {
                        expression.options.insert(STYLE_OPTION.to_string(), style);
                    }
                    expression
                }
                Token::Octothorpe => match plural {
                    Some(reference) => Expression::substitute(Operand::Count {
                        name: reference.name.clone(),
                        offset: reference.offset,
                    }),
                    None => {
                        self.emit(filter, combinations, patterns, |pattern| pattern.push_text("#"));
                        continue;
                    }
                },
            };
            self.emit(filter, combinations, patterns, |pattern| {
                pattern.push_expression(expression.clone());
            });
        }
    }

    /// Apply `push` to the pattern of every variant `filter` admits.
    fn emit(
        &self,
        filter: Option<&Filter<'_>>,
        combinations: &[Vec<Key>],
        patterns: &mut [Pattern],
        push: impl Fn(&mut Pattern),
    ) {
        for (keys, pattern) in combinations.iter().zip(patterns.iter_mut()) {
            if self.admits(filter, keys) {
                push(pattern);
            }
        }
    }

    fn admits(&self, filter: Option<&Filter<'_>>, keys: &[Key]) -> bool {
        let mut current = filter;
        while let Some(link) = current {
            let routed = self.route(&keys[link.selector], link.occurrence);
            if routed != link.case {
                return false;
            }
            current = link.parent;
        }
        true
    }

    /// The case of `occurrence` a variant key lands in.
    ///
    /// An occurrence may lack keys that other occurrences of the same selector
    /// declare. A missing `=N` falls to the case for the locale category of
    /// `N - offset`; anything else missing falls to `other`.
    fn route<'n>(&self, key: &Key, occurrence: &'n SelectorNode) -> &'n str {
        let written = key.to_string();
        if let Some(case) = occurrence.case(&written) {
            return &case.key;
        }
        if let (Key::Exact(value), Some(plural_type)) = (key, occurrence.kind.plural_type()) {
            let category = Value::from(*value)
                .minus_offset(occurrence.offset_or_zero())
                .and_then(|adjusted| {
                    (self.options.plural_rules)(&self.options.locale, &adjusted, plural_type)
                });
            if let Some(case) = category.and_then(|category| occurrence.case(category.as_str())) {
                return &case.key;
            }
        }
        occurrence.catchall().map_or(CATCHALL, |case| case.key.as_str())
    }

    /// The style option of a function placeholder.
    fn style(&self, param: Option<&FunctionParam>) -> Option<String> {
        match param? {
            FunctionParam::Raw(raw) => Some(raw.clone()),
            FunctionParam::Tokens(tokens) => Some(stringify_with(tokens, &self.parse_options)),
        }
    }
}
