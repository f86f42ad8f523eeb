//! Integration tests for data-model validation.

use msgfmt_syntax::{KeyRules, ParseOptions, SelectorKind, ValidationError, parse, validate};

fn check(source: &str, rules: &KeyRules) -> Result<(), ValidationError> {
    let tokens = parse(source, &ParseOptions::default()).unwrap();
    validate(&tokens, rules)
}

#[test]
fn test_valid_message() {
    let source = "{n, plural, =0{none} one{one} other{many}} {g, select, male{he} other{they}}";
    assert_eq!(check(source, &KeyRules::default()), Ok(()));
}

#[test]
fn test_missing_catchall() {
    let err = check("{n, plural, one{a}}", &KeyRules::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingCatchall {
            kind: SelectorKind::Plural,
            arg: "n".to_string(),
        }
    );
    assert!(err.to_string().contains("missing the required 'other' case"));
}

#[test]
fn test_missing_catchall_in_nested_selector() {
    let err = check(
        "{n, plural, other{{g, select, male{x}}}}",
        &KeyRules::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::MissingCatchall { ref arg, .. } if arg == "g"));
}

#[test]
fn test_missing_catchall_in_function_style() {
    let err = check("{d, date, {g, select, a{x}}}", &KeyRules::default()).unwrap_err();
    assert!(matches!(err, ValidationError::MissingCatchall { ref arg, .. } if arg == "g"));
}

#[test]
fn test_duplicate_case() {
    let err = check("{g, select, a{x} a{y} other{z}}", &KeyRules::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DuplicateCase {
            kind: SelectorKind::Select,
            arg: "g".to_string(),
            key: "a".to_string(),
        }
    );
}

#[test]
fn test_unknown_category_rejected_by_default() {
    let err = check("{n, plural, lots{x} other{y}}", &KeyRules::default()).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidPluralKey { ref key, .. } if key == "lots"));
}

#[test]
fn test_locale_key_list() {
    let rules = KeyRules {
        cardinal: Some(vec!["one".to_string(), "other".to_string()]),
        ..KeyRules::default()
    };
    let err = check("{n, plural, few{x} other{y}}", &rules).unwrap_err();
    let ValidationError::InvalidPluralKey { allowed, .. } = err else {
        panic!("expected invalid plural key");
    };
    assert_eq!(allowed, vec!["one", "other"]);

    assert_eq!(check("{n, plural, =7{x} one{y} other{z}}", &rules), Ok(()));
}

#[test]
fn test_ordinal_keys_checked_separately() {
    let rules = KeyRules {
        cardinal: Some(vec!["one".to_string(), "other".to_string()]),
        ordinal: Some(vec![
            "one".to_string(),
            "two".to_string(),
            "few".to_string(),
            "other".to_string(),
        ]),
        ..KeyRules::default()
    };
    assert_eq!(
        check("{n, selectordinal, one{st} two{nd} few{rd} other{th}}", &rules),
        Ok(())
    );
}

#[test]
fn test_relaxed_rules_accept_any_key() {
    assert_eq!(
        check("{n, plural, lots{x} other{y}}", &KeyRules::relaxed()),
        Ok(())
    );
}

#[test]
fn test_empty_key_list_disables_check() {
    let rules = KeyRules {
        cardinal: Some(Vec::new()),
        ..KeyRules::default()
    };
    assert_eq!(check("{n, plural, lots{x} other{y}}", &rules), Ok(()));
}

#[test]
fn test_select_keys_are_free_form() {
    assert_eq!(
        check("{g, select, lots{x} other{y}}", &KeyRules::default()),
        Ok(())
    );
}
