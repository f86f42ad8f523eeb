// Test messages declared inside a module
mod strings {
    msgfmt::messages! {
        greeting = "Hi {name}";
        invite = "{host} invited {guests, plural, offset:1 =0{nobody} =1{{guest}} other{{guest} and # others}}";
    }
}

fn main() {
    let _ = strings::greeting();
    let _ = strings::invite();
    assert_eq!(strings::SOURCE_MESSAGES.len(), 2);
    assert_eq!(strings::message_names::INVITE, "invite");
}
