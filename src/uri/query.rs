//! Query and fragment accessors.

use alloc::string::String;

use crate::parser::str::{find_split_hole, non_empty};
use crate::query::{self, NameMatcher, QueryMap, QueryValue, ValueMatcher};

use super::Uri;

impl Uri {
    /// Returns the raw query, without the leading `?`.
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.parts.query.as_deref()
    }

    /// Replaces the raw query. A leading `?` is not trimmed.
    ///
    /// An empty query is removed.
    pub fn set_query(&mut self, query: Option<&str>) -> &mut Self {
        let query = query.and_then(non_empty).map(Into::into);
        self.update(|parts| parts.query = query)
    }

    /// Returns the query with the leading `?`, or an empty string.
    #[must_use]
    pub fn search(&self) -> String {
        match &self.parts.query {
            Some(query) => alloc::format!("?{query}"),
            None => String::new(),
        }
    }

    /// Replaces the query. A leading `?` is trimmed.
    pub fn set_search(&mut self, search: &str) -> &mut Self {
        self.set_query(Some(search.strip_prefix('?').unwrap_or(search)))
    }

    /// Returns the raw fragment, without the leading `#`.
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.parts.fragment.as_deref()
    }

    /// Replaces the raw fragment. An empty fragment is removed.
    pub fn set_fragment(&mut self, fragment: Option<&str>) -> &mut Self {
        let fragment = fragment.and_then(non_empty).map(Into::into);
        self.update(|parts| parts.fragment = fragment)
    }

    /// Returns the fragment with the leading `#`, or an empty string.
    #[must_use]
    pub fn hash(&self) -> String {
        match &self.parts.fragment {
            Some(fragment) => alloc::format!("#{fragment}"),
            None => String::new(),
        }
    }

    /// Replaces the fragment. A leading `#` is trimmed.
    pub fn set_hash(&mut self, hash: &str) -> &mut Self {
        self.set_fragment(Some(hash.strip_prefix('#').unwrap_or(hash)))
    }

    /// Returns the path, the query, and the fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/a?b#c");
    /// assert_eq!(uri.resource(), "/a?b#c");
    ///
    /// uri.set_resource("/x#y");
    /// assert_eq!(uri.as_str(), "http://example.com/x#y");
    /// ```
    #[must_use]
    pub fn resource(&self) -> String {
        let mut buf = String::from(self.pathname());
        buf.push_str(&self.search());
        buf.push_str(&self.hash());
        buf
    }

    /// Replaces the path, the query, and the fragment.
    ///
    /// Components missing from the string are removed.
    pub fn set_resource(&mut self, resource: &str) -> &mut Self {
        let (rest, fragment) = match find_split_hole(resource, b'#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (resource, None),
        };
        let (path, query) = match find_split_hole(rest, b'?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        let query = query.and_then(non_empty).map(Into::into);
        let fragment = fragment.and_then(non_empty).map(Into::into);
        self.parts.query = query;
        self.parts.fragment = fragment;
        self.set_path(path)
    }

    /// Parses the query into a map.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    /// use urikit::query::QueryValue;
    ///
    /// let uri = Uri::parse("?a=1&b=x+y&a=2&c");
    /// let map = uri.query_map();
    /// assert_eq!(map.get("a"), Some(&QueryValue::from(["1", "2"])));
    /// assert_eq!(map.get("b"), Some(&QueryValue::from("x y")));
    /// assert_eq!(map.get("c"), Some(&QueryValue::Null));
    /// ```
    #[must_use]
    pub fn query_map(&self) -> QueryMap {
        query::parse_query(
            self.parts.query.as_deref().unwrap_or_default(),
            self.charset(),
            self.escape_query_space(),
        )
    }

    /// Replaces the query by serializing the map.
    pub fn set_query_map(&mut self, map: &QueryMap) -> &mut Self {
        let built = query::build_query(
            map,
            self.duplicate_query_parameters(),
            self.charset(),
            self.escape_query_space(),
        );
        let query = non_empty(&built).map(Into::into);
        self.update(|parts| parts.query = query)
    }

    /// Modifies the query map with the function, then serializes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/?a=1");
    /// uri.map_query(|map| {
    ///     map.insert("b", "2");
    ///     map.remove("a");
    /// });
    /// assert_eq!(uri.as_str(), "http://example.com/?b=2");
    /// ```
    pub fn map_query<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut QueryMap),
    {
        let mut map = self.query_map();
        f(&mut map);
        self.set_query_map(&map)
    }

    /// Adds a value to the parameter, keeping the existing values.
    pub fn add_query<K, V>(&mut self, name: K, value: V) -> &mut Self
    where
        K: AsRef<str> + Into<String>,
        V: Into<QueryValue>,
    {
        self.map_query(|map| query::add_query(map, name, value))
    }

    /// Replaces the values of the parameter.
    pub fn set_query_param<K, V>(&mut self, name: K, value: V) -> &mut Self
    where
        K: AsRef<str> + Into<String>,
        V: Into<QueryValue>,
    {
        self.map_query(|map| query::set_query(map, name, value))
    }

    /// Removes matching parameters or values.
    ///
    /// See [`query::remove_query`].
    pub fn remove_query<'a, N>(&mut self, name: N, value: Option<ValueMatcher<'_>>) -> &mut Self
    where
        N: Into<NameMatcher<'a>>,
    {
        self.map_query(|map| query::remove_query(map, name, value))
    }

    /// Checks if the query has a matching parameter.
    ///
    /// See [`query::has_query`].
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    /// use urikit::query::ValueMatcher;
    ///
    /// let uri = Uri::parse("?a=1&a=2&b");
    /// assert!(uri.has_query("a", ValueMatcher::Literal("2"), true));
    /// assert!(uri.has_query("b", ValueMatcher::Exists(false), false));
    /// assert!(!uri.has_query("c", ValueMatcher::Any, false));
    /// ```
    #[must_use]
    pub fn has_query<'a, N>(&self, name: N, value: ValueMatcher<'_>, within_array: bool) -> bool
    where
        N: Into<NameMatcher<'a>>,
    {
        query::has_query(&self.query_map(), name, value, within_array)
    }
}
