// Test basic macro usage compiles successfully
use msgfmt::{CompiledMessage, Resolver, messages, params};

messages! {
    hello = "Hello, world!";
    /// Footer of the file list.
    file_count = "{n, plural, =0{No files} one{# file} other{# files}}";
}

fn main() {
    let resolver = Resolver::new("en");

    let h: &'static CompiledMessage = hello();
    let _ = resolver.format(h, &params! {});
    let _ = resolver.format(file_count(), &params! { "n" => 3 });

    let _names = [message_names::HELLO, message_names::FILE_COUNT];
    let _sources: &[(&str, &str)] = SOURCE_MESSAGES;
}
