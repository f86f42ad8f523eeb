//! Built-in formatting functions.
//!
//! `number` formats with locale-aware digits and grouping through
//! `icu_decimal`; formatters are cached per thread, keyed by the parsed
//! locale. `upper` and `lower` use locale-aware case mapping.

use std::cell::RefCell;
use std::collections::BTreeMap;

use fixed_decimal::{Decimal, FloatPrecision};
use icu_casemap::CaseMapper;
use icu_decimal::DecimalFormatter;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale_core::{LanguageIdentifier, Locale, langid};

use crate::interpreter::ResolveError;
use crate::types::{STYLE_OPTION, Value};

thread_local! {
    static DECIMAL_FORMATTER_CACHE: RefCell<Vec<(Locale, Option<DecimalFormatter>)>> =
        const { RefCell::new(Vec::new()) };
}

/// Format `decimal` with the cached formatter for `locale`, falling back to
/// plain ASCII digits when the locale cannot be parsed or loaded.
fn format_decimal(locale: &str, decimal: &Decimal) -> String {
    let Ok(locale) = locale.parse::<Locale>() else {
        return decimal.to_string();
    };
    DECIMAL_FORMATTER_CACHE.with_borrow_mut(|cache| {
        let index = match cache.iter().position(|(cached, _)| *cached == locale) {
            Some(index) => index,
            None => {
                let options = DecimalFormatterOptions::default();
                let formatter = DecimalFormatter::try_new(locale.clone().into(), options).ok();
                cache.push((locale, formatter));
                cache.len() - 1
            }
        };
        match &cache[index].1 {
            Some(formatter) => formatter.format(decimal).to_string(),
            None => decimal.to_string(),
        }
    })
}

/// Number of cached formatters on this thread.
#[cfg(test)]
fn cached_formatter_count() -> usize {
    DECIMAL_FORMATTER_CACHE.with_borrow(Vec::len)
}

fn language(locale: &str) -> LanguageIdentifier {
    locale
        .parse::<Locale>()
        .map(|parsed| parsed.id)
        .unwrap_or_else(|_| langid!("und"))
}

fn to_decimal(value: &Value) -> Result<Decimal, ResolveError> {
    let non_numeric = || ResolveError::NonNumericOperand {
        function: "number".to_string(),
        value: value.to_string(),
    };
    match value.numeric().ok_or_else(non_numeric)? {
        Value::Number(n) => Ok(Decimal::from(n)),
        Value::Float(f) => {
            Decimal::try_from_f64(f, FloatPrecision::RoundTrip).map_err(|_| ResolveError::Function {
                function: "number".to_string(),
                message: format!("cannot format {f}"),
            })
        }
        Value::String(_) => Err(non_numeric()),
    }
}

/// `{n, number}`, `{n, number, integer}`, `{n, number, percent}`.
pub fn number(
    locale: &str,
    options: &BTreeMap<String, String>,
    operand: &Value,
) -> Result<Value, ResolveError> {
    let mut decimal = to_decimal(operand)?;
    let suffix = match options.get(STYLE_OPTION).map(String::as_str) {
        None | Some("" | "decimal") => "",
        Some("integer") => {
            decimal.round(0);
            ""
        }
        Some("percent") => {
            decimal.multiply_pow10(2);
            decimal.absolute.trim_start();
            "%"
        }
        Some(style) => {
            return Err(ResolveError::Function {
                function: "number".to_string(),
                message: format!("unknown style '{style}'"),
            });
        }
    };
    Ok(Value::String(format!(
        "{}{suffix}",
        format_decimal(locale, &decimal)
    )))
}

/// `{name, upper}`
pub fn upper(
    locale: &str,
    _options: &BTreeMap<String, String>,
    operand: &Value,
) -> Result<Value, ResolveError> {
    let text = operand.to_string();
    let mapped = CaseMapper::new().uppercase_to_string(&text, &language(locale));
    Ok(Value::String(mapped.to_string()))
}

/// `{name, lower}`
pub fn lower(
    locale: &str,
    _options: &BTreeMap<String, String>,
    operand: &Value,
) -> Result<Value, ResolveError> {
    let text = operand.to_string();
    let mapped = CaseMapper::new().lowercase_to_string(&text, &language(locale));
    Ok(Value::String(mapped.to_string()))
}

/// `{name, string}`: the operand's string form.
pub fn string(
    _locale: &str,
    _options: &BTreeMap<String, String>,
    operand: &Value,
) -> Result<Value, ResolveError> {
    Ok(Value::String(operand.to_string()))
}
