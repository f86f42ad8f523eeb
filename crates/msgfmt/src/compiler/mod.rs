//! Compilation from template source to [`CompiledMessage`].
//!
//! Compilation parses the template, validates selector keys against the
//! configured rules and flattens nested selectors into a variant table.

mod flatten;

use bon::Builder;
use msgfmt_syntax::{KeyRules, ParseOptions, PluralType, Token, parse, validate};

use crate::interpreter::{CompileError, PluralRuleFn, plural_categories, plural_category};
use crate::types::CompiledMessage;

/// Options for [`compile`].
///
/// # Example
///
/// ```
/// use msgfmt::CompileOptions;
///
/// let options = CompileOptions::builder().locale("fr").strict(true).build();
/// assert_eq!(options.locale, "fr");
/// assert!(options.strict_plural_keys);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct CompileOptions {
    /// Locale used to route `=N` keys to plural categories while flattening.
    #[builder(default = "en".to_string())]
    pub locale: String,

    /// Accepted `plural` keys. `None` accepts every CLDR category and an empty
    /// list disables the check.
    pub cardinal_keys: Option<Vec<String>>,

    /// Accepted `selectordinal` keys, with the same conventions.
    pub ordinal_keys: Option<Vec<String>>,

    /// Keep function styles raw and stop `#` at `select` boundaries.
    #[builder(default)]
    pub strict: bool,

    /// Reject plural keys outside the accepted lists.
    #[builder(default = true)]
    pub strict_plural_keys: bool,

    /// Plural rule lookup.
    #[builder(default = plural_category as PluralRuleFn)]
    pub plural_rules: PluralRuleFn,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions::builder().build()
    }
}

impl CompileOptions {
    /// Options whose accepted plural keys are exactly the categories `locale`
    /// uses.
    pub fn for_locale_categories(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let names = |plural_type| {
            plural_categories(&locale, plural_type)
                .into_iter()
                .map(|category| category.as_str().to_string())
                .collect::<Vec<_>>()
        };
        let cardinal_keys = names(PluralType::Cardinal);
        let ordinal_keys = names(PluralType::Ordinal);
        CompileOptions::builder()
            .locale(locale)
            .cardinal_keys(cardinal_keys)
            .ordinal_keys(ordinal_keys)
            .build()
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict,
        }
    }

    pub fn key_rules(&self) -> KeyRules {
        KeyRules {
            cardinal: self.cardinal_keys.clone(),
            ordinal: self.ordinal_keys.clone(),
            strict_plural_keys: self.strict_plural_keys,
        }
    }
}

/// Compile a template.
///
/// # Example
///
/// ```
/// use msgfmt::{CompileOptions, compile};
///
/// let message = compile("{n, plural, one{# file} other{# files}}", &CompileOptions::default())
///     .unwrap();
/// assert_eq!(message.variant_count(), 2);
/// ```
///
/// # Errors
///
/// Returns [`CompileError::Syntax`] for malformed templates and
/// [`CompileError::Invalid`] for selectors without an `other` case, duplicate
/// cases and rejected plural keys.
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompiledMessage, CompileError> {
    let tokens = parse(source, &options.parse_options())?;
    compile_tokens(&tokens, options)
}

/// Compile an already parsed token tree.
///
/// # Errors
///
/// Returns [`CompileError::Invalid`] when validation fails.
pub fn compile_tokens(
    tokens: &[Token],
    options: &CompileOptions,
) -> Result<CompiledMessage, CompileError> {
    validate(tokens, &options.key_rules())?;
    let message = flatten::flatten(tokens, options);
    tracing::debug!(
        selectors = message.selectors().len(),
        variants = message.variant_count(),
        "compiled message"
    );
    Ok(message)
}
