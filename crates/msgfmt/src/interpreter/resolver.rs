//! Resolution of compiled messages against argument values.
//!
//! Each selector picks a key with this precedence:
//! 1. an `=N` key equal to the raw value (before the offset is applied)
//! 2. the plural category of the offset-adjusted value, if declared
//! 3. for `select`, the value's string form, if declared
//! 4. the catch-all
//!
//! The first variant whose keys each equal the selected key or are the
//! catch-all is rendered.

use bon::Builder;
use tracing::{trace, warn};

use crate::interpreter::error::compute_suggestions;
use crate::interpreter::{FunctionRegistry, PluralRuleFn, ResolveError, plural_category};
use crate::types::{
    Args, CompiledMessage, Expression, Key, Operand, Part, Pattern, PatternElement, Selector,
    Value, Variant,
};

/// Replacement text for a failed expression.
///
/// When installed on a [`Resolver`], expression failures are replaced by the
/// returned text. Selector failures only notify the handler: the catch-all is
/// selected and the returned text is not rendered.
pub type ErrorHandler = fn(&ResolveError) -> String;

/// The deterministic fallback: the failing argument or function name in
/// braces.
///
/// ```
/// use msgfmt::{ResolveError, fallback_text};
///
/// let err = ResolveError::MissingArgument { name: "count".to_string() };
/// assert_eq!(fallback_text(&err), "{count}");
/// ```
pub fn fallback_text(err: &ResolveError) -> String {
    format!("{{{}}}", err.subject())
}

/// Resolves compiled messages in one locale.
///
/// # Example
///
/// ```
/// use msgfmt::{CompileOptions, Resolver, compile, params};
///
/// let message = compile("{n, plural, one{# file} other{# files}}", &CompileOptions::default())
///     .unwrap();
/// let resolver = Resolver::builder().locale("en").build();
/// assert_eq!(resolver.format(&message, &params! { "n" => 3 }).unwrap(), "3 files");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct Resolver {
    /// Locale passed to plural rules and formatting functions.
    #[builder(default = "en".to_string())]
    locale: String,

    /// Formatting functions available to expressions.
    #[builder(default)]
    functions: FunctionRegistry,

    /// Plural rule lookup.
    #[builder(default = plural_category as PluralRuleFn)]
    plural_rules: PluralRuleFn,

    /// Error handler; without one, the first error aborts resolution.
    on_error: Option<ErrorHandler>,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::builder().build()
    }
}

impl Resolver {
    /// Create a resolver for `locale` with the built-in functions.
    pub fn new(locale: impl Into<String>) -> Self {
        Resolver::builder().locale(locale.into()).build()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Get the function registry (mutable) for registering custom functions.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Resolve a message to a string.
    ///
    /// # Errors
    ///
    /// Without an error handler, returns the first [`ResolveError`]
    /// encountered. With one, never fails for messages built by the compiler.
    pub fn format<A: Args + ?Sized>(
        &self,
        message: &CompiledMessage,
        args: &A,
    ) -> Result<String, ResolveError> {
        let parts = self.format_to_parts(message, args)?;
        Ok(parts.iter().map(ToString::to_string).collect())
    }

    /// Resolve a message to typed parts.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::format`].
    pub fn format_to_parts<A: Args + ?Sized>(
        &self,
        message: &CompiledMessage,
        args: &A,
    ) -> Result<Vec<Part>, ResolveError> {
        let pattern = match message {
            CompiledMessage::Pattern(pattern) => pattern,
            CompiledMessage::Select {
                selectors,
                variants,
            } => {
                let keys = selectors
                    .iter()
                    .map(|selector| self.select(selector, args))
                    .collect::<Result<Vec<_>, _>>()?;
                &choose(variants, &keys)?.pattern
            }
        };
        self.render(pattern, args)
    }

    /// Pick the key of one selector.
    fn select<A: Args + ?Sized>(&self, selector: &Selector, args: &A) -> Result<Key, ResolveError> {
        let reference = &selector.reference;
        let Some(value) = args.arg(&reference.name) else {
            return self.recover(ResolveError::MissingArgument {
                name: reference.name.clone(),
            });
        };

        let key = match reference.kind.plural_type() {
            None => {
                let text = value.to_string();
                selector
                    .keys
                    .iter()
                    .find(|key| matches!(key, Key::Named(name) if *name == text))
                    .cloned()
                    .unwrap_or(Key::Catchall)
            }
            Some(plural_type) => {
                let non_numeric = || ResolveError::NonNumericSelector {
                    name: reference.name.clone(),
                    value: value.to_string(),
                };
                if value.numeric().is_none() {
                    return self.recover(non_numeric());
                }
                let exact = value
                    .exact_integer()
                    .map(Key::Exact)
                    .filter(|key| selector.keys.contains(key));
                if let Some(key) = exact {
                    key
                } else {
                    let Some(adjusted) = value.minus_offset(reference.offset) else {
                        return self.recover(non_numeric());
                    };
                    (self.plural_rules)(&self.locale, &adjusted, plural_type)
                        .map(|category| Key::Named(category.as_str().to_string()))
                        .filter(|key| selector.keys.contains(key))
                        .unwrap_or(Key::Catchall)
                }
            }
        };
        trace!(selector = %reference.name, key = %key, "selected key");
        Ok(key)
    }

    /// Report a selector failure; with a handler, select the catch-all.
    fn recover(&self, err: ResolveError) -> Result<Key, ResolveError> {
        let Some(handler) = self.on_error else {
            return Err(err);
        };
        warn!(error = %err, "selector fell back to the catch-all");
        // A selector has no placeholder to put the text in.
        let _notified = handler(&err);
        Ok(Key::Catchall)
    }

    fn render<A: Args + ?Sized>(&self, pattern: &Pattern, args: &A) -> Result<Vec<Part>, ResolveError> {
        let mut parts = Vec::with_capacity(pattern.elements().len());
        for element in pattern.elements() {
            match element {
                PatternElement::Text(text) => parts.push(Part::Literal(text.clone())),
                PatternElement::Expression(expression) => {
                    match self.expression(expression, args) {
                        Ok(part) => parts.push(part),
                        Err(err) => {
                            let Some(handler) = self.on_error else {
                                return Err(err);
                            };
                            warn!(error = %err, "expression replaced by fallback");
                            parts.push(Part::Fallback {
                                source: expression.operand.source().to_string(),
                                value: handler(&err),
                            });
                        }
                    }
                }
            }
        }
        Ok(parts)
    }

    fn expression<A: Args + ?Sized>(
        &self,
        expression: &Expression,
        args: &A,
    ) -> Result<Part, ResolveError> {
        let source = expression.operand.source().to_string();
        let value = operand_value(&expression.operand, args)?;
        let Some(function) = &expression.function else {
            return Ok(Part::Value { source, value });
        };
        let format = self.functions.get(function).ok_or_else(|| {
            ResolveError::UnknownFunction {
                name: function.clone(),
                suggestions: compute_suggestions(function, &self.functions.names()),
            }
        })?;
        let value = format(&self.locale, &expression.options, &value)?;
        Ok(Part::Formatted {
            function: function.clone(),
            source,
            value,
        })
    }
}

fn operand_value<A: Args + ?Sized>(operand: &Operand, args: &A) -> Result<Value, ResolveError> {
    let lookup = |name: &str| {
        args.arg(name).ok_or_else(|| ResolveError::MissingArgument {
            name: name.to_string(),
        })
    };
    match operand {
        Operand::Literal(text) => Ok(Value::String(text.clone())),
        Operand::Variable(name) => lookup(name).cloned(),
        Operand::Count { name, offset } => {
            let value = lookup(name)?;
            value
                .minus_offset(*offset)
                .ok_or_else(|| ResolveError::NonNumericSelector {
                    name: name.clone(),
                    value: value.to_string(),
                })
        }
    }
}

/// The first variant matching `keys`, catch-all keys matching anything.
fn choose<'v>(variants: &'v [Variant], keys: &[Key]) -> Result<&'v Variant, ResolveError> {
    variants
        .iter()
        .find(|variant| {
            variant
                .keys
                .iter()
                .zip(keys)
                .all(|(key, selected)| key == selected || key.is_catchall())
        })
        .ok_or_else(|| ResolveError::NoVariant {
            keys: keys.iter().map(ToString::to_string).collect(),
        })
}

/// Resolve a message to a string with `resolver`.
///
/// # Errors
///
/// See [`Resolver::format`].
pub fn resolve<A: Args + ?Sized>(
    message: &CompiledMessage,
    args: &A,
    resolver: &Resolver,
) -> Result<String, ResolveError> {
    resolver.format(message, args)
}

/// Resolve a message to typed parts with `resolver`.
///
/// # Errors
///
/// See [`Resolver::format`].
pub fn resolve_to_parts<A: Args + ?Sized>(
    message: &CompiledMessage,
    args: &A,
    resolver: &Resolver,
) -> Result<Vec<Part>, ResolveError> {
    resolver.format_to_parts(message, args)
}
