//! Matching query parameters by name and value.

use core::fmt;

use alloc::vec::Vec;

use super::{QueryMap, QueryValue};

/// Selects query parameters by name.
#[derive(Debug, Clone, Copy)]
pub enum NameMatcher<'a> {
    /// The parameter with the exact name.
    Literal(&'a str),
    /// Every parameter whose name matches the pattern.
    #[cfg(feature = "regex")]
    #[cfg_attr(docsrs, doc(cfg(feature = "regex")))]
    Pattern(&'a regex::Regex),
    /// Each of the named parameters.
    ///
    /// For [`has_query`], every name must match.
    List(&'a [&'a str]),
}

impl<'a> From<&'a str> for NameMatcher<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Self::Literal(name)
    }
}

impl<'a> From<&'a [&'a str]> for NameMatcher<'a> {
    #[inline]
    fn from(names: &'a [&'a str]) -> Self {
        Self::List(names)
    }
}

#[cfg(feature = "regex")]
impl<'a> From<&'a regex::Regex> for NameMatcher<'a> {
    #[inline]
    fn from(pattern: &'a regex::Regex) -> Self {
        Self::Pattern(pattern)
    }
}

/// Tests query parameter values.
#[derive(Clone, Copy)]
pub enum ValueMatcher<'a> {
    /// Matches whenever the name is known, even if it has been removed.
    Any,
    /// Matches when the existence of a non-empty value equals the flag.
    Exists(bool),
    /// Matches a single value equal to the string.
    Literal(&'a str),
    /// Matches a list value.
    ///
    /// Without `within_array`, the list must have the same items in any
    /// order. With it, the list must contain every given item.
    List(&'a [&'a str]),
    /// Matches a value matching the pattern.
    #[cfg(feature = "regex")]
    #[cfg_attr(docsrs, doc(cfg(feature = "regex")))]
    Pattern(&'a regex::Regex),
    /// Matches when the function returns true for the value and the name.
    Predicate(&'a dyn Fn(&QueryValue, &str) -> bool),
}

impl fmt::Debug for ValueMatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Exists(v) => f.debug_tuple("Exists").field(v).finish(),
            Self::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            #[cfg(feature = "regex")]
            Self::Pattern(v) => f.debug_tuple("Pattern").field(v).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<'a> From<&'a str> for ValueMatcher<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        Self::Literal(v)
    }
}

impl<'a> From<&'a [&'a str]> for ValueMatcher<'a> {
    #[inline]
    fn from(v: &'a [&'a str]) -> Self {
        Self::List(v)
    }
}

impl From<bool> for ValueMatcher<'_> {
    #[inline]
    fn from(v: bool) -> Self {
        Self::Exists(v)
    }
}

#[cfg(feature = "regex")]
impl<'a> From<&'a regex::Regex> for ValueMatcher<'a> {
    #[inline]
    fn from(v: &'a regex::Regex) -> Self {
        Self::Pattern(v)
    }
}

/// Returns true if the value is set and non-empty.
fn is_truthy(value: Option<&QueryValue>) -> bool {
    match value {
        None | Some(QueryValue::Absent) | Some(QueryValue::Null) => false,
        Some(QueryValue::Single(v)) => !v.is_empty(),
        Some(QueryValue::List(items)) => !items.is_empty(),
    }
}

impl ValueMatcher<'_> {
    /// Tests the whole value of the named parameter.
    fn matches(&self, value: Option<&QueryValue>, name: &str, within_array: bool) -> bool {
        match (self, value) {
            (Self::Any, value) => value.is_some(),
            (Self::Exists(expected), value) => is_truthy(value) == *expected,
            (Self::Predicate(f), value) => f(value.unwrap_or(&QueryValue::Absent), name),
            (Self::List(expected), Some(QueryValue::List(items))) => {
                if within_array {
                    expected
                        .iter()
                        .all(|expected| items.iter().any(|item| item.as_deref() == Some(*expected)))
                } else {
                    let mut items: Vec<Option<&str>> = items.iter().map(Option::as_deref).collect();
                    let mut expected: Vec<Option<&str>> = expected.iter().copied().map(Some).collect();
                    items.sort_unstable();
                    expected.sort_unstable();
                    items == expected
                }
            }
            (Self::List(_), _) => false,
            #[cfg(feature = "regex")]
            (Self::Pattern(re), Some(QueryValue::Single(v))) => re.is_match(v),
            #[cfg(feature = "regex")]
            (Self::Pattern(re), Some(QueryValue::List(items))) => {
                within_array && items.iter().flatten().any(|item| re.is_match(item))
            }
            #[cfg(feature = "regex")]
            (Self::Pattern(_), _) => false,
            (Self::Literal(expected), Some(QueryValue::Single(v))) => v == expected,
            (Self::Literal(expected), Some(QueryValue::List(items))) => {
                within_array && items.iter().any(|item| item.as_deref() == Some(*expected))
            }
            (Self::Literal(_), _) => false,
        }
    }

    /// Tests a single item of a value.
    fn matches_item(&self, item: Option<&str>, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exists(expected) => item.map_or(false, |v| !v.is_empty()) == *expected,
            Self::Literal(expected) => item == Some(*expected),
            Self::List(expected) => item.map_or(false, |v| expected.contains(&v)),
            #[cfg(feature = "regex")]
            Self::Pattern(re) => item.map_or(false, |v| re.is_match(v)),
            Self::Predicate(f) => f(&QueryValue::from(item), name),
        }
    }
}

/// Checks if the map has a matching parameter.
///
/// # Examples
///
/// ```
/// use urikit::Charset;
/// use urikit::query::{has_query, parse_query, ValueMatcher};
///
/// let map = parse_query("a=1&a=2&b=x", Charset::Unicode, true);
/// assert!(has_query(&map, "a", ValueMatcher::List(&["2", "1"]), false));
/// assert!(has_query(&map, "a", ValueMatcher::Literal("1"), true));
/// assert!(!has_query(&map, "a", ValueMatcher::Literal("1"), false));
/// assert!(has_query(&map, "b", ValueMatcher::Exists(true), false));
/// assert!(!has_query(&map, "c", ValueMatcher::Any, false));
/// ```
#[must_use]
pub fn has_query<'a, N>(map: &QueryMap, name: N, value: ValueMatcher<'_>, within_array: bool) -> bool
where
    N: Into<NameMatcher<'a>>,
{
    match name.into() {
        NameMatcher::Literal(name) => value.matches(map.get(name), name, within_array),
        #[cfg(feature = "regex")]
        NameMatcher::Pattern(re) => map
            .iter()
            .any(|(k, v)| re.is_match(k) && value.matches(Some(v), k, within_array)),
        NameMatcher::List(names) => names
            .iter()
            .all(|name| value.matches(map.get(name), name, within_array)),
    }
}

/// Checks if every pair of name and value matches.
#[must_use]
pub fn has_query_all(map: &QueryMap, pairs: &[(&str, ValueMatcher<'_>)], within_array: bool) -> bool {
    pairs
        .iter()
        .all(|(name, value)| value.matches(map.get(name), name, within_array))
}

/// Removes matching parameters or values.
///
/// Removed parameters become [`QueryValue::Absent`] rather than being
/// deleted, so that [`ValueMatcher::Any`] still finds them.
///
/// Without a value matcher, the whole parameter is removed. With one, a
/// single value is removed when it matches, and list items are filtered.
/// A list left without items is removed.
///
/// # Examples
///
/// ```
/// use urikit::Charset;
/// use urikit::query::{has_query, parse_query, remove_query, QueryValue, ValueMatcher};
///
/// let mut map = parse_query("a=1&a=2&a=3&b=x", Charset::Unicode, true);
/// remove_query(&mut map, "a", Some(ValueMatcher::List(&["1", "3"])));
/// assert_eq!(map.get("a"), Some(&QueryValue::List(vec![Some("2".into())])));
///
/// remove_query(&mut map, "b", None);
/// assert_eq!(map.get("b"), Some(&QueryValue::Absent));
/// assert!(has_query(&map, "b", ValueMatcher::Any, false));
/// ```
pub fn remove_query<'a, N>(map: &mut QueryMap, name: N, value: Option<ValueMatcher<'_>>)
where
    N: Into<NameMatcher<'a>>,
{
    match name.into() {
        NameMatcher::Literal(name) => {
            if let Some(current) = map.get_mut(name) {
                remove_value(current, name, value);
            }
        }
        #[cfg(feature = "regex")]
        NameMatcher::Pattern(re) => {
            for (name, current) in map.iter_mut() {
                if re.is_match(name) {
                    remove_value(current, name, value);
                }
            }
        }
        NameMatcher::List(names) => {
            for name in names {
                if let Some(current) = map.get_mut(name) {
                    remove_value(current, name, value);
                }
            }
        }
    }
}

/// Removes the value, or its matching items.
fn remove_value(current: &mut QueryValue, name: &str, value: Option<ValueMatcher<'_>>) {
    let Some(matcher) = value else {
        *current = QueryValue::Absent;
        return;
    };
    let remove_all = match current {
        QueryValue::Absent => false,
        QueryValue::Null => matcher.matches_item(None, name),
        QueryValue::Single(v) => matcher.matches_item(Some(v), name),
        QueryValue::List(items) => {
            items.retain(|item| !matcher.matches_item(item.as_deref(), name));
            items.is_empty()
        }
    };
    if remove_all {
        *current = QueryValue::Absent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Charset;
    use crate::query::parse_query;

    fn sample() -> QueryMap {
        parse_query("a=1&a=2&b=x&e=&n", Charset::Unicode, true)
    }

    #[test]
    fn list_equality_ignores_order() {
        let map = sample();
        assert!(has_query(&map, "a", ValueMatcher::List(&["1", "2"]), false));
        assert!(has_query(&map, "a", ValueMatcher::List(&["2", "1"]), false));
        assert!(!has_query(&map, "a", ValueMatcher::List(&["1"]), false));
        assert!(has_query(&map, "a", ValueMatcher::List(&["1"]), true));
        assert!(!has_query(&map, "a", ValueMatcher::List(&["1", "9"]), true));
        assert!(!has_query(&map, "b", ValueMatcher::List(&["x"]), false));
    }

    #[test]
    fn literal_values() {
        let map = sample();
        assert!(has_query(&map, "b", ValueMatcher::Literal("x"), false));
        assert!(!has_query(&map, "b", ValueMatcher::Literal("y"), false));
        assert!(has_query(&map, "a", ValueMatcher::Literal("2"), true));
        assert!(!has_query(&map, "a", ValueMatcher::Literal("2"), false));
        assert!(!has_query(&map, "n", ValueMatcher::Literal(""), false));
    }

    #[test]
    fn existence() {
        let map = sample();
        assert!(has_query(&map, "a", true.into(), false));
        assert!(has_query(&map, "e", false.into(), false));
        assert!(has_query(&map, "n", false.into(), false));
        assert!(has_query(&map, "missing", false.into(), false));
        assert!(has_query(&map, "n", ValueMatcher::Any, false));
        assert!(!has_query(&map, "missing", ValueMatcher::Any, false));
    }

    #[test]
    fn predicates() {
        let map = sample();
        let is_list = |v: &QueryValue, name: &str| name == "a" && v.as_list().is_some();
        assert!(has_query(&map, "a", ValueMatcher::Predicate(&is_list), false));
        assert!(!has_query(&map, "b", ValueMatcher::Predicate(&is_list), false));
    }

    #[test]
    fn name_lists() {
        let map = sample();
        let names: &[&str] = &["a", "b"];
        assert!(has_query(&map, names, ValueMatcher::Exists(true), false));
        let names: &[&str] = &["a", "n"];
        assert!(!has_query(&map, names, ValueMatcher::Exists(true), false));
        assert!(has_query_all(
            &map,
            &[("a", ValueMatcher::List(&["2", "1"])), ("b", "x".into())],
            false
        ));
        assert!(!has_query_all(&map, &[("a", "1".into()), ("b", "x".into())], false));
    }

    #[test]
    fn removal_marks_absent() {
        let mut map = sample();
        remove_query(&mut map, "b", Some("y".into()));
        assert_eq!(map.get("b"), Some(&QueryValue::from("x")));
        remove_query(&mut map, "b", Some("x".into()));
        assert_eq!(map.get("b"), Some(&QueryValue::Absent));
        assert!(has_query(&map, "b", ValueMatcher::Any, false));
        assert!(has_query(&map, "b", ValueMatcher::Exists(false), false));

        remove_query(&mut map, "missing", None);
        assert!(!map.contains_key("missing"));
    }

    #[test]
    fn removal_filters_lists() {
        let mut map = sample();
        remove_query(&mut map, "a", Some("1".into()));
        assert_eq!(map.get("a"), Some(&QueryValue::List(alloc::vec![Some("2".into())])));
        remove_query(&mut map, "a", Some("2".into()));
        assert_eq!(map.get("a"), Some(&QueryValue::Absent));

        let mut map = sample();
        let names: &[&str] = &["a", "n"];
        remove_query(&mut map, names, None);
        assert_eq!(map.get("a"), Some(&QueryValue::Absent));
        assert_eq!(map.get("n"), Some(&QueryValue::Absent));
        assert_eq!(map.get("b"), Some(&QueryValue::from("x")));
    }

    #[cfg(feature = "regex")]
    #[test]
    fn patterns() {
        let mut map = parse_query("utm_source=a&utm_medium=b&id=42", Charset::Unicode, true);
        let digits = regex::Regex::new(r"^\d+$").unwrap();
        assert!(has_query(&map, "id", ValueMatcher::Pattern(&digits), false));
        assert!(!has_query(&map, "utm_source", ValueMatcher::Pattern(&digits), false));

        let utm = regex::Regex::new("^utm_").unwrap();
        assert!(has_query(&map, &utm, ValueMatcher::Literal("b"), false));
        remove_query(&mut map, &utm, None);
        assert_eq!(map.get("utm_source"), Some(&QueryValue::Absent));
        assert_eq!(map.get("utm_medium"), Some(&QueryValue::Absent));
        assert_eq!(map.get("id"), Some(&QueryValue::from("42")));
    }
}
