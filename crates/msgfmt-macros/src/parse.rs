//! Parse implementations for converting TokenStream to macro AST.

use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, LitStr, Token};

use crate::input::{MacroInput, MessageDefinition, SpannedIdent};

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut messages = Vec::new();
        while !input.is_empty() {
            messages.push(input.parse()?);
        }
        Ok(MacroInput { messages })
    }
}

impl Parse for MessageDefinition {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;

        let name_ident: Ident = input.parse()?;
        let name = SpannedIdent::new(&name_ident);

        input.parse::<Token![=]>()?;
        let template: LitStr = input.parse()?;
        input.parse::<Token![;]>()?;

        Ok(MessageDefinition {
            attrs,
            name,
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn parses_definitions_in_order() {
        let input: MacroInput = parse_quote! {
            hello = "Hello";
            /// Docs.
            #[strict]
            files = "{n, plural, other{# files}}";
        };
        let names: Vec<_> = input.messages.iter().map(|m| m.name.name.as_str()).collect();
        assert_eq!(names, vec!["hello", "files"]);
        assert_eq!(input.messages[1].attrs.len(), 2);
        assert_eq!(input.messages[1].template.value(), "{n, plural, other{# files}}");
    }

    #[test]
    fn requires_semicolon() {
        let result = syn::parse2::<MacroInput>(quote::quote! { hello = "Hello" });
        assert!(result.is_err());
    }

    #[test]
    fn requires_string_literal() {
        let result = syn::parse2::<MacroInput>(quote::quote! { hello = 42; });
        assert!(result.is_err());
    }
}
