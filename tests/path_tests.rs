//! Integration tests for dotted path resolution.

use kollect::path::{Path, Segment, resolve};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};

fn library() -> Value {
    json!({
        "name": "Beyazıt",
        "shelves": [
            { "floor": 1, "books": [{ "title": "Kitab-ı Bahriye" }, { "title": "Mukaddime" }] },
            { "floor": 2, "books": [{ "title": "Divan" }] },
            { "floor": 3 },
        ],
    })
}

#[rstest]
#[case("name", Some(json!("Beyazıt")))]
#[case("shelves.1.floor", Some(json!(2)))]
#[case("shelves.0.books.1.title", Some(json!("Mukaddime")))]
#[case("shelves.*.floor", Some(json!([1, 2, 3])))]
#[case("shelves.*.books.*.title", Some(json!([["Kitab-ı Bahriye", "Mukaddime"], ["Divan"]])))]
#[case("shelves.9.floor", None)]
#[case("name.first", None)]
#[case("shelves.x", None)]
fn test_resolve(#[case] path: &str, #[case] expected: Option<Value>) {
    assert_eq!(resolve(path, &library()), expected);
}

#[rstest]
#[case("0", Some(json!(10)))]
#[case("1", Some(json!(20)))]
#[case("01", None)]
#[case("+1", None)]
#[case("1 ", None)]
fn test_sequence_indices_are_canonical(#[case] path: &str, #[case] expected: Option<Value>) {
    assert_eq!(resolve(path, &json!([10, 20])), expected);
}

#[rstest]
fn test_wildcard_on_mapping_is_missing() {
    assert_eq!(resolve("*.floor", &json!({ "a": { "floor": 1 } })), None);
}

#[rstest]
fn test_numeric_keys_address_mappings() {
    let keyed = json!({ "17": "Thomas" });
    assert_eq!(resolve("17", &keyed), Some(json!("Thomas")));
}

#[rstest]
fn test_parse_forms_agree() {
    let parsed: Path = "a.*.b".parse().unwrap();
    assert_eq!(parsed, Path::from("a.*.b"));
    assert_eq!(parsed, Path::from(String::from("a.*.b")));
    assert_eq!(parsed.segments()[1], Segment::Wildcard);
    assert!(Path::parse("").segments().is_empty());
}

proptest! {
    /// Display and parse are inverse for paths without empty segments
    #[test]
    fn prop_display_parse(segments in prop::collection::vec("[a-z0-9*]{1,5}", 1..6)) {
        let text = segments.join(".");
        prop_assert_eq!(Path::parse(&text).to_string(), text);
    }

    /// Lookup agrees with resolve on paths without wildcards
    #[test]
    fn prop_lookup_matches_resolve(index in 0usize..5) {
        let data = json!({ "items": [10, 20, 30] });
        let path = Path::parse(&format!("items.{index}"));
        prop_assert_eq!(path.lookup(&data).cloned(), path.resolve(&data));
    }
}
