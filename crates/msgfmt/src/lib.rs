//! ICU message templates compiled into flat variant tables.
//!
//! ```
//! use msgfmt::{CompileOptions, Resolver, compile, params};
//!
//! let message = compile(
//!     "{host} invited {guests, plural, offset:1 =0{nobody} =1{{guest}} one{{guest} and # other} other{{guest} and # others}}",
//!     &CompileOptions::default(),
//! )
//! .unwrap();
//! let resolver = Resolver::new("en");
//! let args = params! { "host" => "Ana", "guest" => "Bo", "guests" => 3 };
//! assert_eq!(resolver.format(&message, &args).unwrap(), "Ana invited Bo and 2 others");
//! ```

pub mod compiler;
pub mod interpreter;
pub mod types;

pub use compiler::{CompileOptions, compile, compile_tokens};
pub use interpreter::{
    CompileError, ErrorHandler, FormatFn, FunctionRegistry, LintWarning, MessageCache,
    PluralRuleFn, ResolveError, Resolver, compute_suggestions, fallback_text, lint_tokens,
    plural_categories, plural_category, resolve, resolve_to_parts,
};
pub use msgfmt_syntax::{
    KeyRules, ParseError, ParseOptions, PluralCategory, PluralType, SelectorKind, Token,
    ValidationError, argument_names, parse, stringify,
};
pub use types::{
    Args, CompiledMessage, Expression, Key, Operand, Part, Pattern, PatternElement, Selector,
    SelectorRef, Value, Variant,
};

// Re-export the messages! macro
pub use msgfmt_macros::messages;

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use msgfmt::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_number(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
