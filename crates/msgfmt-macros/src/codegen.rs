//! Code generation for the messages! macro.
//!
//! Transforms validated messages into Rust code that provides:
//! - A lazily compiled accessor for each message
//! - SOURCE_MESSAGES const with the templates as written
//! - message_names module with name constants

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::validate::ValidatedMessage;

/// Main code generation entry point.
pub fn codegen(messages: &[ValidatedMessage<'_>]) -> TokenStream {
    let functions = messages.iter().map(generate_function);
    let source_messages = generate_source_messages(messages);
    let names_module = generate_names_module(messages);

    quote! {
        #(#functions)*
        #source_messages
        #names_module
    }
}

/// Generate the accessor for one message.
///
/// The template was checked at expansion time with the options used here, so
/// the runtime compile cannot fail.
fn generate_function(message: &ValidatedMessage<'_>) -> TokenStream {
    let definition = message.definition;
    let fn_name = format_ident!("{}", definition.name.name);
    let name = &definition.name.name;
    let template = &definition.template;
    let strict = message.strict;
    let docs = &message.docs;

    let summary = if docs.is_empty() {
        let text = format!(" Returns the compiled \"{name}\" message.");
        quote! { #[doc = #text] }
    } else {
        quote! { #(#docs)* }
    };
    let arguments = if message.arguments.is_empty() {
        quote! {}
    } else {
        let list = message
            .arguments
            .iter()
            .map(|arg| format!("`{arg}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let text = format!(" Arguments: {list}.");
        quote! {
            #[doc = ""]
            #[doc = #text]
        }
    };

    quote! {
        #summary
        #arguments
        pub fn #fn_name() -> &'static ::msgfmt::CompiledMessage {
            static MESSAGE: ::std::sync::LazyLock<::msgfmt::CompiledMessage> =
                ::std::sync::LazyLock::new(|| {
                    let options = ::msgfmt::CompileOptions::builder().strict(#strict).build();
                    match ::msgfmt::compile(#template, &options) {
                        ::std::result::Result::Ok(message) => message,
                        ::std::result::Result::Err(err) => {
                            ::std::unreachable!("message '{}' was checked by messages!: {}", #name, err)
                        }
                    }
                });
            &MESSAGE
        }
    }
}

/// Generate the SOURCE_MESSAGES const.
fn generate_source_messages(messages: &[ValidatedMessage<'_>]) -> TokenStream {
    let entries = messages.iter().map(|message| {
        let name = &message.definition.name.name;
        let template = &message.definition.template;
        quote! { (#name, #template) }
    });

    quote! {
        /// Message names and templates as declared.
        pub const SOURCE_MESSAGES: &[(&str, &str)] = &[#(#entries),*];
    }
}

/// Generate the message_names module.
fn generate_names_module(messages: &[ValidatedMessage<'_>]) -> TokenStream {
    let constants = messages.iter().map(|message| {
        let name = &message.definition.name.name;
        let const_name = format_ident!("{}", name.to_uppercase());
        quote! {
            pub const #const_name: &str = #name;
        }
    });

    quote! {
        /// Names of the declared messages.
        pub mod message_names {
            #(#constants)*
        }
    }
}
