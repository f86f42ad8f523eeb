use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use msgfmt::{
    CompileOptions, CompiledMessage, Part, PluralCategory, PluralType, ResolveError, Resolver,
    Value, compile, fallback_text, params, resolve, resolve_to_parts,
};

fn message(source: &str) -> CompiledMessage {
    compile(source, &CompileOptions::default()).unwrap()
}

fn format_en(source: &str, args: &HashMap<String, Value>) -> String {
    Resolver::new("en").format(&message(source), args).unwrap()
}

#[test]
fn exact_beats_category_beats_catchall() {
    let source = "{NUM, plural, offset:1 =0{a} one{b} other{c}}";
    assert_eq!(format_en(source, &params! { "NUM" => 0 }), "a");
    assert_eq!(format_en(source, &params! { "NUM" => 1 }), "c");
    assert_eq!(format_en(source, &params! { "NUM" => 2 }), "b");
    assert_eq!(format_en(source, &params! { "NUM" => 7 }), "c");
}

#[test]
fn octothorpe_shows_offset_value() {
    let source = "{NUM, plural, offset:1 other{The var is #.}}";
    assert_eq!(format_en(source, &params! { "NUM" => 5 }), "The var is 4.");
}

#[test]
fn octothorpe_uses_enclosing_plural() {
    let source = "{X, plural, other{{Y, select, other{The var is #.}}}}";
    let args = params! { "X" => 5, "Y" => "key" };
    assert_eq!(format_en(source, &args), "The var is 5.");
}

#[test]
fn select_matches_string_value() {
    let source = "{g, select, female{She} male{He} other{They}} replied.";
    assert_eq!(format_en(source, &params! { "g" => "female" }), "She replied.");
    assert_eq!(format_en(source, &params! { "g" => "male" }), "He replied.");
    assert_eq!(format_en(source, &params! { "g" => "robot" }), "They replied.");
}

#[test]
fn select_matches_number_as_text() {
    let source = "{v, select, 1{one} other{not one}}";
    assert_eq!(format_en(source, &params! { "v" => 1 }), "one");
    assert_eq!(format_en(source, &params! { "v" => 2 }), "not one");
}

#[test]
fn selectordinal_uses_ordinal_rules() {
    let source = "{n, selectordinal, one{#st} two{#nd} few{#rd} other{#th}}";
    let cases = [(1, "1st"), (2, "2nd"), (3, "3rd"), (4, "4th"), (11, "11th"), (22, "22nd")];
    for (n, expected) in cases {
        assert_eq!(format_en(source, &params! { "n" => n }), expected, "n = {n}");
    }
}

#[test]
fn russian_categories() {
    let compiled = message("{n, plural, one{# файл} few{# файла} many{# файлов} other{# файла}}");
    let resolver = Resolver::new("ru");
    let cases = [(1, "1 файл"), (3, "3 файла"), (5, "5 файлов"), (21, "21 файл")];
    for (n, expected) in cases {
        assert_eq!(resolver.format(&compiled, &params! { "n" => n }).unwrap(), expected);
    }
}

#[test]
fn fractional_values_use_plural_operands() {
    let source = "{n, plural, one{# item} other{# items}}";
    assert_eq!(format_en(source, &params! { "n" => 1.5 }), "1.5 items");
    assert_eq!(format_en(source, &params! { "n" => "1" }), "1 item");
}

#[test]
fn nested_selectors_resolve_together() {
    let source = "{g, select, female{She has {n, plural, =0{no cats} one{# cat} other{# cats}}} other{They have {n, plural, =0{no cats} one{# cat} other{# cats}}}}";
    assert_eq!(
        format_en(source, &params! { "g" => "female", "n" => 0 }),
        "She has no cats"
    );
    assert_eq!(
        format_en(source, &params! { "g" => "x", "n" => 1 }),
        "They have 1 cat"
    );
    assert_eq!(
        format_en(source, &params! { "g" => "female", "n" => 12 }),
        "She has 12 cats"
    );
}

#[test]
fn positional_arguments() {
    let compiled = message("{0} and {1}");
    let args = [Value::from("salt"), Value::from("pepper")];
    assert_eq!(
        Resolver::default().format(&compiled, &args).unwrap(),
        "salt and pepper"
    );
}

#[test]
fn number_function_formats_by_locale() {
    assert_eq!(
        format_en("{n, number} bytes", &params! { "n" => 1234567 }),
        "1,234,567 bytes"
    );
    assert_eq!(
        format_en("{r, number, percent}", &params! { "r" => 0.5 }),
        "50%"
    );
}

#[test]
fn missing_argument_is_an_error() {
    let compiled = message("Hello {name}!");
    let err = Resolver::default().format(&compiled, &params! {}).unwrap_err();
    assert_eq!(
        err,
        ResolveError::MissingArgument {
            name: "name".to_string(),
        }
    );
    assert_eq!(err.to_string(), "missing argument 'name'");
}

#[test]
fn error_handler_substitutes_fallback() {
    let resolver = Resolver::builder().on_error(fallback_text).build();
    let compiled = message("Hello {name}, you have {n, plural, one{# message} other{# messages}}");
    assert_eq!(
        resolver.format(&compiled, &params! {}).unwrap(),
        "Hello {name}, you have {n} messages"
    );
}

#[test]
fn error_handler_output_is_used() {
    fn blank(_: &ResolveError) -> String {
        "?".to_string()
    }
    let resolver = Resolver::builder().on_error(blank).build();
    let compiled = message("[{a}] [{b, upperr}]");
    assert_eq!(
        resolver.format(&compiled, &params! { "b" => "x" }).unwrap(),
        "[?] [?]"
    );
}

#[test]
fn selector_failures_notify_the_handler() {
    thread_local! {
        static REPORTED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }
    fn record(err: &ResolveError) -> String {
        REPORTED.with_borrow_mut(|reported| reported.push(err.to_string()));
        "unused".to_string()
    }
    let resolver = Resolver::builder().on_error(record).build();
    let compiled = message("{n, plural, one{one item} other{some items}}");
    assert_eq!(resolver.format(&compiled, &params! {}).unwrap(), "some items");
    REPORTED.with_borrow(|reported| {
        assert_eq!(reported.as_slice(), ["missing argument 'n'"]);
    });
}

#[test]
fn unknown_function_suggests_names() {
    let compiled = message("{n, numbr}");
    let err = Resolver::default()
        .format(&compiled, &params! { "n" => 1 })
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnknownFunction {
            name: "numbr".to_string(),
            suggestions: vec!["number".to_string()],
        }
    );
    assert_eq!(err.to_string(), "unknown function 'numbr', did you mean: number?");
}

#[test]
fn non_numeric_plural_value() {
    let compiled = message("{n, plural, one{x} other{y}}");
    let err = Resolver::default()
        .format(&compiled, &params! { "n" => "lots" })
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::NonNumericSelector {
            name: "n".to_string(),
            value: "lots".to_string(),
        }
    );
}

#[test]
fn parts_expose_sources() {
    let compiled = message("Hi {name}, {n, number}");
    let parts = resolve_to_parts(
        &compiled,
        &params! { "name" => "Ana", "n" => 5 },
        &Resolver::default(),
    )
    .unwrap();
    assert_eq!(
        parts,
        vec![
            Part::Literal("Hi ".to_string()),
            Part::Value {
                source: "name".to_string(),
                value: Value::from("Ana"),
            },
            Part::Literal(", ".to_string()),
            Part::Formatted {
                function: "number".to_string(),
                source: "n".to_string(),
                value: Value::from("5"),
            },
        ]
    );
}

#[test]
fn fallback_parts_are_marked() {
    let resolver = Resolver::builder().on_error(fallback_text).build();
    let parts = resolver.format_to_parts(&message("{who}"), &params! {}).unwrap();
    assert_eq!(
        parts,
        vec![Part::Fallback {
            source: "who".to_string(),
            value: "{who}".to_string(),
        }]
    );
}

#[test]
fn injected_plural_rules() {
    fn always_few(_: &str, _: &Value, _: PluralType) -> Option<PluralCategory> {
        Some(PluralCategory::Few)
    }
    let resolver = Resolver::builder().plural_rules(always_few).build();
    let compiled = message("{n, plural, few{F} other{O}}");
    assert_eq!(resolve(&compiled, &params! { "n" => 1 }, &resolver).unwrap(), "F");
}

#[test]
fn custom_functions() {
    fn shout(
        _: &str,
        options: &BTreeMap<String, String>,
        operand: &Value,
    ) -> Result<Value, ResolveError> {
        let marks = options.get("style").map_or("!", String::as_str);
        Ok(Value::String(format!("{}{marks}", operand.to_string().to_uppercase())))
    }
    let mut resolver = Resolver::new("en");
    resolver.functions_mut().insert("shout", shout);
    assert!(resolver.functions().contains("shout"));

    let compiled = message("{w, shout} {w, shout, ?!}");
    assert_eq!(
        resolver.format(&compiled, &params! { "w" => "hey" }).unwrap(),
        "HEY! HEY?!"
    );
}

#[test]
fn compiled_messages_are_shareable() {
    let compiled = Arc::new(message("{n, plural, one{# day} other{# days}}"));
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let compiled = Arc::clone(&compiled);
            thread::spawn(move || Resolver::new("en").format(&*compiled, &params! { "n" => n }))
        })
        .collect();
    let results: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap())
        .collect();
    assert_eq!(results, vec!["1 day", "2 days", "3 days", "4 days"]);
}

#[test]
fn reprinted_outer_octothorpe_keeps_offset() {
    let source = "{n, plural, offset:1 other{# {m, plural, one{x} other{y}}}}";
    let compiled = message(source);
    let reprinted = compiled.stringify();
    assert_eq!(
        reprinted,
        "{n, plural, offset:1 other{{m, plural, one{{n, plural, offset:1 other{#}} x} other{{n, plural, offset:1 other{#}} y}}}}"
    );
    let recompiled = message(&reprinted);
    assert_eq!(recompiled.selectors(), compiled.selectors());
    let args = params! { "n" => 5, "m" => 2 };
    assert_eq!(format_en(&reprinted, &args), "4 y");
    assert_eq!(
        Resolver::new("en").format(&recompiled, &args).unwrap(),
        Resolver::new("en").format(&compiled, &args).unwrap()
    );
}

proptest! {
    #[test]
    fn lifting_preserves_resolution(n in 0i64..200, gender in "(female|male|robot)") {
        let source = "{g, select, female{She} other{They}} {n, plural, offset:1 =0{none} =1{just {g}} one{# more} other{# more each}} {g, select, male{him} other{them}}";
        let compiled = message(source);
        let reprinted = message(&compiled.stringify());
        let args = params! { "n" => n, "g" => gender.as_str() };
        let resolver = Resolver::new("en");
        prop_assert_eq!(
            resolver.format(&compiled, &args).unwrap(),
            resolver.format(&reprinted, &args).unwrap()
        );
    }

    #[test]
    fn reprinting_preserves_outer_octothorpes(n in 0i64..50, m in 0i64..50, offset in 0u64..3) {
        let source = format!(
            "{{n, plural, offset:{offset} =0{{none}} one{{# {{m, plural, one{{x #}} other{{y #}}}}}} other{{# {{m, plural, one{{x}} other{{y}}}}}}}}"
        );
        let compiled = message(&source);
        let reprinted = message(&compiled.stringify());
        let args = params! { "n" => n, "m" => m };
        let resolver = Resolver::new("en");
        prop_assert_eq!(
            resolver.format(&compiled, &args).unwrap(),
            resolver.format(&reprinted, &args).unwrap()
        );
    }

    #[test]
    fn octothorpe_is_value_minus_offset(n in 1i64..10_000, offset in 0u64..5) {
        let source = format!("{{n, plural, offset:{offset} other{{#}}}}");
        let expected = (n - offset as i64).to_string();
        prop_assert_eq!(format_en(&source, &params! { "n" => n }), expected);
    }
}
