//! End-to-end tests for the filtration engine
//!
//! Covers the full path from a decoded document through rules to clean
//! data:
//! - Filter chains with aliases and arguments
//! - Defaults for missing fields
//! - Fail-fast error handling and cached results
//! - Rule sets loaded from YAML files

use serde_json::json;
use sieve_core::{Error, FilterError, Filtration, Map, RuleSet, Value};
use tempfile::TempDir;

fn doc(value: serde_json::Value) -> Map {
    serde_json::from_value(value).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_trim_then_upper_first() {
    let mut f = Filtration::new(doc(json!({"name": " inhere "})));
    f.add_rule("name", "trim|ucFirst").unwrap();
    f.filtering().unwrap();
    assert_eq!(f.clean_data()["name"], Value::from("Inhere"));
}

#[test]
fn test_trim_then_int() {
    let mut f = Filtration::new(doc(json!({"age": " 89 "})));
    f.add_rule("age", "trim|int").unwrap();
    f.filtering().unwrap();
    assert_eq!(f.clean_data()["age"], Value::Int(89));
}

#[test]
fn test_str_to_ints() {
    let mut f = Filtration::new(doc(json!({"ids": " 1,2, 3"})));
    f.add_rule("ids", "strToInts").unwrap();
    f.filtering().unwrap();
    assert_eq!(f.clean_data()["ids"], Value::IntList(vec![1, 2, 3]));
}

#[test]
fn test_default_for_missing_field() {
    let mut f = Filtration::default();
    f.add_rule("missing", "trim")
        .unwrap()
        .set_default(" def val ");
    f.filtering().unwrap();
    assert_eq!(f.clean_data()["missing"], Value::from("def val"));
}

#[test]
fn test_trim_strings_on_int_list_fails() {
    let mut f = Filtration::new(doc(json!({"ints": [1, 2, 3]})));
    f.add_rule("ints", "trimStrings").unwrap();

    let err = f.filtering().unwrap_err();
    assert!(matches!(err, FilterError::InvalidInput { .. }));
    assert!(!f.clean_data().contains_key("ints"));
    assert_eq!(f.err(), Some(&err));
}

// =============================================================================
// Engine behavior
// =============================================================================

#[test]
fn test_filtering_is_idempotent() {
    let mut f = Filtration::new(doc(json!({"a": " x ", "b": "nope"})));
    f.add_rule("a", "trim").unwrap();
    f.add_rule("b", "int").unwrap();

    let first = f.filtering();
    let clean = f.clean_data().clone();
    let second = f.filtering();

    assert!(first.is_err());
    assert_eq!(first, second);
    assert_eq!(&clean, f.clean_data());
    assert_eq!(f.string("a"), "x");
}

#[test]
fn test_filtering_success_is_cached() {
    let mut f = Filtration::new(doc(json!({"n": "1"})));
    f.add_rule("n", "int").unwrap();
    assert_eq!(f.filtering(), Ok(()));
    assert_eq!(f.filtering(), Ok(()));
    assert!(f.is_ok());
}

#[test]
fn test_first_error_stops_later_rules() {
    let mut f = Filtration::new(doc(json!({"a": "x", "b": " y "})));
    f.add_rule("a", "int").unwrap();
    f.add_rule("b", "trim").unwrap();

    let err = f.filtering().unwrap_err();
    assert!(matches!(err, FilterError::Conversion { target: "int", .. }));
    assert!(f.clean_data().is_empty());
}

#[test]
fn test_missing_field_without_default_is_skipped() {
    let mut f = Filtration::new(doc(json!({"a": "1"})));
    f.add_rule("not-exist", "unique").unwrap();
    f.add_rule("a", "int").unwrap();
    f.filtering().unwrap();
    assert!(!f.clean_data().contains_key("not-exist"));
    assert_eq!(f.int("a"), 1);
}

#[test]
fn test_string_filter_on_number_fails() {
    let mut f = Filtration::new(doc(json!({"age": 50})));
    f.add_rule("age", "trim").unwrap();
    assert!(matches!(
        f.sanitize(),
        Err(FilterError::InvalidInput { .. })
    ));
}

#[test]
fn test_reset_allows_rerun() {
    let mut f = Filtration::new(doc(json!({"ints": [1, 2, 3]})));
    f.add_rule("ints", "trimStrings").unwrap();
    assert!(f.filtering().is_err());

    f.reset_rules();
    f.add_rule("ints", "unique").unwrap();
    f.filtering().unwrap();
    assert_eq!(f.safe("ints"), Some(&Value::IntList(vec![1, 2, 3])));
}

// =============================================================================
// Many filters at once
// =============================================================================

#[test]
fn test_full_document() {
    let mut f = Filtration::new(doc(json!({
        "key0": "34",
        "name": " inhere ",
        "email": " my@Email.COM ",
        "ids": " 1,2, 3",
        "jsCode": "<script>var a = 23;</script>",
        "htmlCode": "<p>some text</p>",
        "strings": [" a", " b ", "c "],
        "sub1": ["1", "2"],
        "tags": "go;lib",
        "dup": [1, 2, 2, 1],
        "str1": " word ",
        "sDate": "2018-10-16 12:34",
        "msg": " hello world ",
        "msg1": "helloWorld",
        "msg2": "hello_world",
        "url": "a.com?p=1",
    })));

    f.add_rules([
        ("ids", "strToInts"),
        ("key0", "int64"),
        ("email", "email"),
        ("name", "trim|ucFirst"),
        ("jsCode", "escapeJS"),
        ("htmlCode", "escapeHTML"),
        ("strings", "trimStrings"),
        ("sub1", "strings2ints"),
        ("tags", "str2arr:;"),
        ("dup", "unique"),
        ("str1", "ltrim|rtrim"),
        ("sDate", "str2time"),
        ("msg", "trim|ucWord"),
        ("msg1", "snake"),
        ("msg2", "camel"),
        ("url", "urlEncode"),
    ])
    .unwrap();
    f.filtering().unwrap();

    assert_eq!(f.int64("key0"), 34);
    assert_eq!(f.must_get("ids"), Value::IntList(vec![1, 2, 3]));
    assert_eq!(f.string("email"), "my@email.com");
    assert_eq!(f.string("name"), "Inhere");
    assert_eq!(f.string("htmlCode"), "&lt;p&gt;some text&lt;/p&gt;");
    assert_ne!(f.string("jsCode"), "<script>var a = 23;</script>");
    assert_eq!(f.must_get("strings"), Value::from(vec!["a", "b", "c"]));
    assert_eq!(f.must_get("sub1"), Value::IntList(vec![1, 2]));
    assert_eq!(f.must_get("tags"), Value::from(vec!["go", "lib"]));
    assert_eq!(f.must_get("dup"), Value::IntList(vec![1, 2]));
    assert_eq!(f.string("str1"), "word");
    assert_eq!(f.string("msg"), "Hello World");
    assert_eq!(f.string("msg1"), "hello_world");
    assert_eq!(f.string("msg2"), "helloWorld");
    assert_eq!(f.string("url"), "a.com?p%3D1");

    match f.safe("sDate") {
        Some(Value::Time(t)) => {
            assert_eq!(t.format("%Y-%m-%d %H:%M:%S").to_string(), "2018-10-16 12:34:00")
        }
        other => panic!("Expected time value, got {other:?}"),
    }

    // raw data is untouched
    assert_eq!(f.raw("name"), Some(&Value::from(" inhere ")));
}

// =============================================================================
// Rule set files
// =============================================================================

#[test]
fn test_rule_set_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    std::fs::write(
        &path,
        r#"
rules:
  - fields: name
    filters: trim|ucFirst
  - fields: age
    filters: trim|int
  - fields: role
    filters: trim|lower
    default: " GUEST "
"#,
    )
    .unwrap();

    let set = RuleSet::load(&path).unwrap();
    assert!(set.unknown_filters().is_empty());

    let mut f = set
        .filtration(doc(json!({"name": " inhere ", "age": " 89 "})))
        .unwrap();
    f.filtering().unwrap();

    assert_eq!(f.string("name"), "Inhere");
    assert_eq!(f.int("age"), 89);
    assert_eq!(f.string("role"), "guest");
}

#[test]
fn test_rule_set_bad_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    std::fs::write(&path, "rules: [unclosed").unwrap();

    assert!(matches!(RuleSet::load(&path), Err(Error::ConfigParse(_))));
}
