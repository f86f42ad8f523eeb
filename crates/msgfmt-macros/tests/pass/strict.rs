// Test #[strict] messages and raw function styles
use msgfmt::{Resolver, messages, params};

messages! {
    #[strict]
    price = "{amount, number, integer} coins";
    #[strict]
    counted = "{n, plural, other{{g, select, other{#}}}}";
}

fn main() {
    let resolver = Resolver::default();
    let _ = resolver.format(price(), &params! { "amount" => 2.5 });
    let _ = resolver.format(counted(), &params! { "n" => 1, "g" => "x" });
}
