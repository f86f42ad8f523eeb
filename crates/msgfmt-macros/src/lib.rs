use proc_macro::TokenStream;

mod codegen;
mod input;
mod parse;
mod validate;

/// Declare message templates checked at compile time.
///
/// Each template is parsed and validated when the crate is built, so syntax
/// errors, selectors without an `other` case and unknown plural keys are
/// reported as compile errors pointing at the offending literal.
///
/// # Generated Code
///
/// For each message, the macro generates:
/// - A function with the message name returning `&'static ::msgfmt::CompiledMessage`,
///   compiled once on first use
/// - A constant in the `message_names` module with the SCREAMING_CASE name
///
/// Additionally generates `SOURCE_MESSAGES`, the `(name, template)` pairs as
/// written.
///
/// `#[strict]` before a message compiles it in strict mode. Doc comments are
/// forwarded to the generated function.
///
/// # Example
///
/// ```ignore
/// messages! {
///     /// Shown in the file browser footer.
///     file_count = "{n, plural, one{# file} other{# files}}";
///     #[strict]
///     greeting = "Hello {name}!";
/// }
///
/// // Generated: pub fn file_count() -> &'static CompiledMessage
/// // Generated: pub mod message_names { pub const FILE_COUNT: &str = "file_count"; ... }
/// ```
#[proc_macro]
pub fn messages(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as input::MacroInput);

    let validated = match validate::validate(&input) {
        Ok(validated) => validated,
        Err(e) => return e.to_compile_error().into(),
    };

    codegen::codegen(&validated).into()
}
