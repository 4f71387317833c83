//! Per-value configuration.
//!
//! Every [`Uri`][`crate::Uri`] is bound to a [`Config`] when it is created.
//! The configuration decides which character set is used for
//! percent-encoding, how query strings are serialized, and whether
//! internationalized hostnames may be converted with punycode.
//!
//! There is no process-wide default that can be changed at runtime: two
//! values created with different configurations never affect each other.
//!
//! # Examples
//!
//! ```
//! use urikit::{Charset, Config, Uri};
//!
//! let config = Config::new()
//!     .escape_query_space(false)
//!     .charset(Charset::Iso8859);
//! let mut uri = Uri::parse_with("http://example.com/", config);
//! uri.set_query_param("q", "a b");
//!
//! assert_eq!(uri.as_str(), "http://example.com/?q=a%20b");
//! ```

/// Character set used to percent-encode and decode component values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Charset {
    /// UTF-8 based percent-encoding.
    #[default]
    Unicode,
    /// ISO-8859-1 based percent-encoding.
    ///
    /// Code points up to U+00FF are encoded as a single `%XX` triplet.
    /// Code points above that are encoded as `%uXXXX` UTF-16 escapes.
    Iso8859,
}

/// Configuration of a URI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[must_use]
pub struct Config {
    /// Charset for percent-encoding.
    charset: Charset,
    /// Whether the same query parameter value may appear more than once.
    duplicate_query_parameters: bool,
    /// Whether a space in a query is serialized as `+`.
    escape_query_space: bool,
    /// Whether hostnames may be converted with punycode.
    punycode: bool,
    /// Whether setters leave serialization to [`Uri::build`][`crate::Uri::build`].
    deferred_build: bool,
}

impl Config {
    /// Creates a new `Config` with default settings.
    ///
    /// * charset: [`Charset::Unicode`]
    /// * duplicate query parameters: not allowed
    /// * escape query space: enabled (`+`)
    /// * punycode: enabled
    /// * deferred build: disabled
    #[inline]
    pub const fn new() -> Self {
        Self {
            charset: Charset::Unicode,
            duplicate_query_parameters: false,
            escape_query_space: true,
            punycode: true,
            deferred_build: false,
        }
    }

    /// Sets the charset for percent-encoding.
    #[inline]
    pub const fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Sets whether duplicate query parameter values are kept on serialization.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::{Config, Uri};
    ///
    /// let uri = Uri::parse("?a=1&a=1&a=2");
    /// let mut normalized = uri.clone();
    /// normalized.normalize_query();
    /// assert_eq!(normalized.as_str(), "?a=1&a=2");
    ///
    /// let mut kept = Uri::parse_with("?a=1&a=1&a=2", Config::new().duplicate_query_parameters(true));
    /// kept.normalize_query();
    /// assert_eq!(kept.as_str(), "?a=1&a=1&a=2");
    /// ```
    #[inline]
    pub const fn duplicate_query_parameters(mut self, value: bool) -> Self {
        self.duplicate_query_parameters = value;
        self
    }

    /// Sets whether a space in a query is serialized as `+` (instead of `%20`).
    #[inline]
    pub const fn escape_query_space(mut self, value: bool) -> Self {
        self.escape_query_space = value;
        self
    }

    /// Sets whether hostnames may be converted with punycode.
    ///
    /// When disabled, setting a non-ASCII hostname fails and normalization
    /// leaves such hostnames untouched.
    #[inline]
    pub const fn punycode(mut self, value: bool) -> Self {
        self.punycode = value;
        self
    }

    /// Sets whether setters only mark the serialized string stale.
    ///
    /// When enabled, a chain of setters serializes nothing until
    /// [`Uri::build`][`crate::Uri::build`] is called. Until then,
    /// [`Uri::as_str`][`crate::Uri::as_str`] returns the string of the last
    /// build, while formatting and comparisons see the current components.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::{Config, Uri};
    ///
    /// let mut uri = Uri::parse_with("http://example.com/", Config::new().deferred_build(true));
    /// uri.set_path("/a").set_query(Some("x=1")).set_fragment(Some("top"));
    /// assert_eq!(uri.as_str(), "http://example.com/");
    /// assert_eq!(uri.build(), "http://example.com/a?x=1#top");
    /// ```
    #[inline]
    pub const fn deferred_build(mut self, value: bool) -> Self {
        self.deferred_build = value;
        self
    }

    /// Returns the charset for percent-encoding.
    #[inline]
    #[must_use]
    pub const fn get_charset(&self) -> Charset {
        self.charset
    }

    /// Returns whether duplicate query parameter values are kept.
    #[inline]
    #[must_use]
    pub const fn allows_duplicate_query_parameters(&self) -> bool {
        self.duplicate_query_parameters
    }

    /// Returns whether a space in a query is serialized as `+`.
    #[inline]
    #[must_use]
    pub const fn escapes_query_space(&self) -> bool {
        self.escape_query_space
    }

    /// Returns whether hostnames may be converted with punycode.
    #[inline]
    #[must_use]
    pub const fn has_punycode(&self) -> bool {
        self.punycode
    }

    /// Returns whether setters leave serialization to [`Uri::build`][`crate::Uri::build`].
    #[inline]
    #[must_use]
    pub const fn defers_build(&self) -> bool {
        self.deferred_build
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_setters() {
        let config = Config::new()
            .charset(Charset::Iso8859)
            .duplicate_query_parameters(true)
            .escape_query_space(false)
            .punycode(false)
            .deferred_build(true);
        assert!(config.defers_build());
        assert_eq!(config.get_charset(), Charset::Iso8859);
        assert!(config.allows_duplicate_query_parameters());
        assert!(!config.escapes_query_space());
        assert!(!config.has_punycode());
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config, Config::new());
        assert_eq!(config.get_charset(), Charset::Unicode);
        assert!(!config.allows_duplicate_query_parameters());
        assert!(config.escapes_query_space());
        assert!(config.has_punycode());
        assert!(!config.defers_build());
    }
}
