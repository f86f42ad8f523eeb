//! CLDR plural category resolution backed by ICU4X.
//!
//! Plural rules are cached per thread, keyed by the parsed locale and rule
//! type, so each `PluralRules` instance is built once per thread on first use.
//! Spellings of the same locale share an entry.

use std::cell::RefCell;

use fixed_decimal::{Decimal, FloatPrecision};
use icu_locale_core::Locale;
use icu_plurals::{
    PluralCategory as IcuCategory, PluralOperands, PluralRuleType, PluralRules,
};
use msgfmt_syntax::{PluralCategory, PluralType};

use crate::types::Value;

/// Plural rule lookup injected into compilation and resolution.
///
/// Returns the category of `value` in `locale`, or `None` when the value is
/// not numeric or the locale has no rules.
pub type PluralRuleFn = fn(&str, &Value, PluralType) -> Option<PluralCategory>;

type CachedRules = (Locale, PluralType, Option<PluralRules>);

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<CachedRules>> = const { RefCell::new(Vec::new()) };
}

fn build_rules(locale: &Locale, plural_type: PluralType) -> Option<PluralRules> {
    let rule_type = match plural_type {
        PluralType::Cardinal => PluralRuleType::Cardinal,
        PluralType::Ordinal => PluralRuleType::Ordinal,
    };
    PluralRules::try_new(locale.clone().into(), rule_type.into()).ok()
}

/// Run `f` with the cached rules for `locale`. Unparseable locales have no
/// rules and are never cached.
fn with_rules<R>(
    locale: &str,
    plural_type: PluralType,
    f: impl FnOnce(&PluralRules) -> R,
) -> Option<R> {
    let locale = locale.parse::<Locale>().ok()?;
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        let index = match cache
            .iter()
            .position(|(cached, kind, _)| *cached == locale && *kind == plural_type)
        {
            Some(index) => index,
            None => {
                let rules = build_rules(&locale, plural_type);
                cache.push((locale, plural_type, rules));
                cache.len() - 1
            }
        };
        cache[index].2.as_ref().map(f)
    })
}

/// Number of cached rule sets on this thread.
#[cfg(test)]
fn cached_rule_count() -> usize {
    PLURAL_RULES_CACHE.with_borrow(Vec::len)
}

fn from_icu(category: IcuCategory) -> PluralCategory {
    match category {
        IcuCategory::Zero => PluralCategory::Zero,
        IcuCategory::One => PluralCategory::One,
        IcuCategory::Two => PluralCategory::Two,
        IcuCategory::Few => PluralCategory::Few,
        IcuCategory::Many => PluralCategory::Many,
        IcuCategory::Other => PluralCategory::Other,
    }
}

/// Plural operands for a value. Floats keep their visible fraction digits,
/// so `1.0` and `1` can fall into different categories.
fn operands(value: &Value) -> Option<PluralOperands> {
    match value.numeric()? {
        Value::Number(n) => Some(PluralOperands::from(n)),
        Value::Float(f) if f.is_finite() => {
            let decimal = Decimal::try_from_f64(f, FloatPrecision::RoundTrip).ok()?;
            Some(PluralOperands::from(&decimal))
        }
        Value::Float(_) | Value::String(_) => None,
    }
}

/// Get the CLDR plural category of a value.
///
/// This is the default [`PluralRuleFn`].
///
/// # Examples
///
/// ```
/// use msgfmt::{PluralCategory, PluralType, Value, plural_category};
///
/// let one = Value::Number(1);
/// let few = Value::Number(3);
/// assert_eq!(plural_category("en", &one, PluralType::Cardinal), Some(PluralCategory::One));
/// assert_eq!(plural_category("ru", &few, PluralType::Cardinal), Some(PluralCategory::Few));
/// assert_eq!(plural_category("en", &few, PluralType::Ordinal), Some(PluralCategory::Few));
/// ```
pub fn plural_category(
    locale: &str,
    value: &Value,
    plural_type: PluralType,
) -> Option<PluralCategory> {
    let operands = operands(value)?;
    with_rules(locale, plural_type, |rules| from_icu(rules.category_for(operands)))
}

/// The categories a locale uses, in CLDR order. Always contains `other`.
pub fn plural_categories(locale: &str, plural_type: PluralType) -> Vec<PluralCategory> {
    let mut categories = with_rules(locale, plural_type, |rules| {
        rules.categories().map(from_icu).collect::<Vec<_>>()
    })
    .unwrap_or_default();
    if !categories.contains(&PluralCategory::Other) {
        categories.push(PluralCategory::Other);
    }
    categories.sort();
    categories
}
