//! Structured query strings.
//!
//! A query is decoded into a [`QueryMap`]: names are unique and keep the
//! order of their first occurrence, and a name occurring more than once
//! collects its values into a [`QueryValue::List`].
//!
//! # Examples
//!
//! ```
//! use urikit::Charset;
//! use urikit::query::{build_query, parse_query, QueryValue};
//!
//! let map = parse_query("?x=1&x=2&flag&y=a+b", Charset::Unicode, true);
//! assert_eq!(
//!     map.get("x"),
//!     Some(&QueryValue::List(vec![Some("1".into()), Some("2".into())]))
//! );
//! assert_eq!(map.get("flag"), Some(&QueryValue::Null));
//! assert_eq!(map.get("y"), Some(&QueryValue::from("a b")));
//!
//! assert_eq!(build_query(&map, false, Charset::Unicode, true), "x=1&x=2&flag&y=a+b");
//! ```

mod matcher;
#[cfg(feature = "serde")]
mod serde_impl;

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::slice;

use crate::config::Charset;
use crate::percent_encoding::{decode_query, encode_query};

pub use self::matcher::{has_query, has_query_all, remove_query, NameMatcher, ValueMatcher};

/// A decoded query parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// The parameter has been removed.
    ///
    /// The name is still known to the map, but nothing is serialized for it.
    Absent,
    /// The parameter appeared without `=`.
    Null,
    /// A single value.
    Single(String),
    /// Values of a repeated parameter, in order of occurrence.
    ///
    /// `None` items are occurrences without `=`.
    List(Vec<Option<String>>),
}

impl QueryValue {
    /// Returns true if the value is [`QueryValue::Absent`].
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the value if it is a single string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the items if the value is a list.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Option<String>]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as items, treating a scalar as a one-item list.
    pub(crate) fn into_items(self) -> Vec<Option<String>> {
        match self {
            Self::Absent => Vec::new(),
            Self::Null => alloc::vec![None],
            Self::Single(v) => alloc::vec![Some(v)],
            Self::List(v) => v,
        }
    }
}

impl From<&str> for QueryValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Single(s.into())
    }
}

impl From<String> for QueryValue {
    #[inline]
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl<T: Into<String>> From<Option<T>> for QueryValue {
    /// `None` becomes [`QueryValue::Null`].
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, |v| Self::Single(v.into()))
    }
}

impl<T: Into<String>> From<Vec<T>> for QueryValue {
    #[inline]
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(|v| Some(v.into())).collect())
    }
}

impl<T: Into<String>, const N: usize> From<[T; N]> for QueryValue {
    #[inline]
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(|v| Some(v.into())).collect())
    }
}

/// Implements `From<$ty>` for integer types.
macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::Single(v.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// An insertion-ordered map from query parameter names to values.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryMap {
    /// Entries in insertion order.
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries, including [`QueryValue::Absent`] ones.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the position of the entry.
    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == name)
    }

    /// Returns the value for the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    /// Returns the mutable value for the name.
    #[must_use]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut QueryValue> {
        self.position(name).map(move |i| &mut self.entries[i].1)
    }

    /// Returns true if the map has an entry for the name.
    ///
    /// Entries with [`QueryValue::Absent`] count.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Sets the value, returning the previous one.
    ///
    /// A new name is appended; an existing one keeps its position.
    pub fn insert<K, V>(&mut self, name: K, value: V) -> Option<QueryValue>
    where
        K: AsRef<str> + Into<String>,
        V: Into<QueryValue>,
    {
        let value = value.into();
        match self.position(name.as_ref()) {
            Some(i) => Some(core::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((name.into(), value));
                None
            }
        }
    }

    /// Removes the entry entirely, returning its value.
    ///
    /// Use [`remove_query`] to mark an entry as removed instead.
    pub fn remove(&mut self, name: &str) -> Option<QueryValue> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    /// Returns an iterator of the entries.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator of the names.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns a mutable iterator of the entries.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut QueryValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

/// Iterator of [`QueryMap`] entries.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Inner iterator.
    inner: slice::Iter<'a, (String, QueryValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a QueryValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a str, &'a QueryValue);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, QueryValue);
    type IntoIter = alloc::vec::IntoIter<(String, QueryValue)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMap
where
    K: AsRef<str> + Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            add_query(&mut map, k, v);
        }
        map
    }
}

/// Parses a query string into a map.
///
/// A leading `?` and empty pairs are ignored. Each pair is split at the
/// first `=`; a pair without `=` has a [`QueryValue::Null`] value.
#[must_use]
pub fn parse_query(raw: &str, charset: Charset, escape_space: bool) -> QueryMap {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut map = QueryMap::new();
    for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name, Some(decode_query(value, charset, escape_space))),
            None => (pair, None),
        };
        let name = decode_query(name, charset, escape_space);
        add_query(&mut map, name, value);
    }
    map
}

/// Writes one `name[=value]` pair.
fn push_pair(
    buf: &mut String,
    name: &str,
    value: Option<&str>,
    charset: Charset,
    escape_space: bool,
) {
    if !buf.is_empty() {
        buf.push('&');
    }
    buf.push_str(&encode_query(name, charset, escape_space));
    if let Some(value) = value {
        buf.push('=');
        buf.push_str(&encode_query(value, charset, escape_space));
    }
}

/// Serializes the map into a query string (without the leading `?`).
///
/// Entries are written in insertion order and [`QueryValue::Absent`] entries
/// are skipped. Unless `duplicates` is true, repeated list items are written
/// only once, at their first occurrence.
#[must_use]
pub fn build_query(map: &QueryMap, duplicates: bool, charset: Charset, escape_space: bool) -> String {
    let mut buf = String::new();
    for (name, value) in map {
        match value {
            QueryValue::Absent => {}
            QueryValue::Null => push_pair(&mut buf, name, None, charset, escape_space),
            QueryValue::Single(v) => push_pair(&mut buf, name, Some(v), charset, escape_space),
            QueryValue::List(items) => {
                let mut seen = BTreeSet::new();
                for item in items {
                    if !duplicates && !seen.insert(item.as_deref()) {
                        continue;
                    }
                    push_pair(&mut buf, name, item.as_deref(), charset, escape_space);
                }
            }
        }
    }
    buf
}

/// Adds a value to the parameter.
///
/// A new (or removed) parameter takes the value as is. An existing value
/// becomes a list and the new value, or every item of a new list, is
/// appended.
pub fn add_query<K, V>(map: &mut QueryMap, name: K, value: V)
where
    K: AsRef<str> + Into<String>,
    V: Into<QueryValue>,
{
    let value = value.into();
    if map.get(name.as_ref()).map_or(true, QueryValue::is_absent) {
        map.insert(name, value);
        return;
    }
    let Some(current) = map.get_mut(name.as_ref()) else {
        return;
    };
    let mut items = core::mem::replace(current, QueryValue::Absent).into_items();
    items.extend(value.into_items());
    *current = QueryValue::List(items);
}

/// Replaces the value of the parameter.
#[inline]
pub fn set_query<K, V>(map: &mut QueryMap, name: K, value: V)
where
    K: AsRef<str> + Into<String>,
    V: Into<QueryValue>,
{
    map.insert(name, value);
}
