//! Tests for query strings.

use urikit::query::{
    build_query, has_query, has_query_all, parse_query, QueryMap, QueryValue, ValueMatcher,
};
use urikit::{Charset, Uri};

/// Pairs of raw queries and the queries rebuilt from the decoded maps.
const TEST_CASES: &[(&str, &str)] = &[
    ("a=1&b=2", "a=1&b=2"),
    ("?a=1", "a=1"),
    ("a=1&a=2&a=1", "a=1&a=2"),
    ("a&b=", "a&b="),
    ("a+b=c+d", "a+b=c+d"),
    ("a%20b=c%2Bd", "a+b=c%2Bd"),
    ("&&a=1&&", "a=1"),
    ("x=%E2%9C%93", "x=%E2%9C%93"),
    ("k=v=w", "k=v%3Dw"),
];

#[test]
fn rebuild() {
    for (raw, expected) in TEST_CASES {
        let map = parse_query(raw, Charset::Unicode, true);
        assert_eq!(
            build_query(&map, false, Charset::Unicode, true),
            *expected,
            "raw={raw:?}"
        );
    }
}

#[test]
fn round_trip_with_unique_names() {
    let map: QueryMap = [
        ("name", QueryValue::from("J\u{00F6}rg & co")),
        ("empty", QueryValue::from("")),
        ("flag", QueryValue::Null),
        ("list", QueryValue::from(["x", "y z"])),
    ]
    .into_iter()
    .collect();
    let built = build_query(&map, false, Charset::Unicode, true);
    assert_eq!(parse_query(&built, Charset::Unicode, true), map);
}

#[test]
fn space_escaping() {
    let map = parse_query("q=a%20b", Charset::Unicode, true);
    assert_eq!(build_query(&map, false, Charset::Unicode, true), "q=a+b");
    assert_eq!(build_query(&map, false, Charset::Unicode, false), "q=a%20b");

    // `+` is literal unless spaces are escaped.
    let map = parse_query("q=a+b", Charset::Unicode, false);
    assert_eq!(map.get("q"), Some(&QueryValue::from("a+b")));
}

#[test]
fn duplicates() {
    let mut uri = Uri::parse("http://example.com/?a=1&a=1&a=2");
    assert_eq!(uri.as_str(), "http://example.com/?a=1&a=1&a=2");
    uri.normalize_query();
    assert_eq!(uri.query(), Some("a=1&a=2"));

    let mut uri = Uri::parse("http://example.com/?a=1");
    uri.set_duplicate_query_parameters(true)
        .add_query("a", "1");
    assert_eq!(uri.query(), Some("a=1&a=1"));
}

#[test]
fn matching() {
    let map = parse_query("a=1&a=2&b=x&c", Charset::Unicode, true);

    assert!(has_query(&map, "a", ValueMatcher::List(&["1", "2"]), false));
    assert!(has_query(&map, "a", ValueMatcher::List(&["2", "1"]), false));
    assert!(!has_query(&map, "a", ValueMatcher::List(&["1"]), false));
    assert!(has_query(&map, "a", ValueMatcher::List(&["1"]), true));
    assert!(has_query(&map, "a", ValueMatcher::Literal("1"), true));
    assert!(!has_query(&map, "a", ValueMatcher::Literal("1"), false));

    assert!(has_query(&map, "b", ValueMatcher::Literal("x"), false));
    assert!(has_query(&map, "c", ValueMatcher::Exists(false), false));
    assert!(has_query(&map, "c", ValueMatcher::Any, false));
    assert!(!has_query(&map, "d", ValueMatcher::Any, false));
    assert!(has_query(&map, "d", ValueMatcher::Exists(false), false));

    let is_short = |value: &QueryValue, _name: &str| value.as_str().map_or(false, |v| v.len() == 1);
    assert!(has_query(&map, "b", ValueMatcher::Predicate(&is_short), false));
    assert!(has_query(&map, &["a", "b"][..], ValueMatcher::Exists(true), false));

    assert!(has_query_all(
        &map,
        &[("a", ValueMatcher::Literal("2")), ("b", ValueMatcher::Literal("x"))],
        true
    ));
}

#[test]
fn uri_parameters() {
    let mut uri = Uri::parse("http://example.com/search?q=rust&page=1");
    uri.set_query_param("page", 2)
        .add_query("tag", ["a", "b"])
        .remove_query("q", None);
    assert_eq!(uri.as_str(), "http://example.com/search?page=2&tag=a&tag=b");

    uri.remove_query("tag", Some(ValueMatcher::Literal("a")));
    assert_eq!(uri.query(), Some("page=2&tag=b"));
    assert!(uri.has_query("tag", ValueMatcher::Literal("b"), true));

    uri.remove_query("tag", Some(ValueMatcher::Literal("b")));
    assert_eq!(uri.query(), Some("page=2"));
}

#[cfg(feature = "regex")]
#[test]
fn patterns() {
    let map = parse_query("utm_source=a&utm_medium=b&id=1", Charset::Unicode, true);
    let re = regex::Regex::new("^utm_").unwrap();
    assert!(has_query(&map, &re, ValueMatcher::Any, false));

    let mut map = map;
    urikit::query::remove_query(&mut map, &re, None);
    assert_eq!(build_query(&map, false, Charset::Unicode, true), "id=1");
}
