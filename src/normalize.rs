//! Normalization of URI values.
//!
//! Each step can be applied on its own. [`Uri::normalize`] applies all of
//! them in order: scheme, hostname, port, path, query, and fragment.
//! Normalization is idempotent.
//!
//! # Examples
//!
//! ```
//! use urikit::Uri;
//!
//! let mut uri = Uri::parse("HTTP://B\u{00FC}cher.Example:80/a/./b/../c?&x=1&&y#");
//! uri.normalize();
//! assert_eq!(uri.as_str(), "http://xn--bcher-kva.example/a/c?x=1&y");
//! ```

use alloc::string::{String, ToString};
use core::net::Ipv6Addr;

use crate::parser::str::non_empty;
use crate::path::remove_dot_segments;
use crate::percent_encoding::{recode_path, recode_urn_path};
use crate::punycode;
use crate::query::{build_query, parse_query};
use crate::uri::Uri;
use crate::validate;

/// Registered default ports.
const DEFAULT_PORTS: &[(&str, &str)] = &[
    ("http", "80"),
    ("https", "443"),
    ("ftp", "21"),
    ("gopher", "70"),
    ("ws", "80"),
    ("wss", "443"),
];

/// Returns the default port of the scheme.
///
/// # Examples
///
/// ```
/// use urikit::normalize::default_port;
///
/// assert_eq!(default_port("https"), Some("443"));
/// assert_eq!(default_port("WS"), Some("80"));
/// assert_eq!(default_port("mailto"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<&'static str> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(scheme))
        .map(|&(_, port)| port)
}

/// Returns the canonical form of an IPv6 literal, keeping the zone.
fn canonical_ipv6(host: &str) -> Option<String> {
    let (addr, zone) = match host.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (host, None),
    };
    let mut canonical = addr.parse::<Ipv6Addr>().ok()?.to_string();
    if let Some(zone) = zone {
        canonical.push('%');
        canonical.push_str(zone);
    }
    Some(canonical)
}

impl Uri {
    /// Applies every normalization step.
    pub fn normalize(&mut self) -> &mut Self {
        self.normalize_scheme()
            .normalize_hostname()
            .normalize_port()
            .normalize_path()
            .normalize_query()
            .normalize_fragment()
    }

    /// Returns a normalized copy.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut uri = self.clone();
        uri.normalize();
        uri
    }

    /// Lowercases the scheme.
    pub fn normalize_scheme(&mut self) -> &mut Self {
        self.update(|parts| {
            if let Some(scheme) = &mut parts.scheme {
                scheme.make_ascii_lowercase();
            }
        })
    }

    /// Lowercases the scheme. This is the same as
    /// [`normalize_scheme`][`Self::normalize_scheme`].
    #[inline]
    pub fn normalize_protocol(&mut self) -> &mut Self {
        self.normalize_scheme()
    }

    /// Encodes an internationalized hostname with punycode, canonicalizes an
    /// IPv6 literal, and lowercases the result.
    ///
    /// An internationalized hostname is kept in its Unicode form when
    /// punycode is disabled or the hostname cannot be encoded.
    pub fn normalize_hostname(&mut self) -> &mut Self {
        if self.parts.urn {
            return self;
        }
        let Some(host) = self.parts.hostname.as_deref() else {
            return self;
        };
        let normalized = if validate::is_ipv6(host) {
            canonical_ipv6(host).unwrap_or_else(|| host.into())
        } else if validate::is_idn(host) && self.config.has_punycode() {
            match punycode::to_ascii(host) {
                Ok(ascii) => ascii,
                Err(e) => {
                    tracing::trace!(host, error = %e, "keeping hostname that cannot be punycode-encoded");
                    host.into()
                }
            }
        } else {
            host.into()
        };
        let normalized = normalized.to_lowercase();
        self.update(|parts| parts.hostname = Some(normalized))
    }

    /// Removes the port if it is the default of the scheme.
    pub fn normalize_port(&mut self) -> &mut Self {
        if self.parts.urn {
            return self;
        }
        let is_default = match (&self.parts.scheme, &self.parts.port) {
            (Some(scheme), Some(port)) => default_port(scheme) == Some(port.as_str()),
            _ => false,
        };
        if !is_default {
            return self;
        }
        self.update(|parts| parts.port = None)
    }

    /// Normalizes the percent-encoding of the path and resolves its dot
    /// segments.
    ///
    /// A relative path stays relative. A URN path is only re-encoded.
    pub fn normalize_path(&mut self) -> &mut Self {
        let charset = self.charset();
        if self.parts.urn {
            let path = recode_urn_path(&self.parts.path, charset);
            return self.update(|parts| parts.path = path);
        }
        if self.parts.path.is_empty() {
            return self;
        }
        let recoded = recode_path(&self.parts.path, charset);
        let path = remove_dot_segments(&recoded, self.is_relative());
        self.update(|parts| parts.path = path)
    }

    /// Normalizes the path. This is the same as
    /// [`normalize_path`][`Self::normalize_path`].
    #[inline]
    pub fn normalize_pathname(&mut self) -> &mut Self {
        self.normalize_path()
    }

    /// Re-encodes the query through the query codec.
    ///
    /// Empty pairs are dropped and repeated values are collapsed unless
    /// duplicates are allowed. An empty query is removed.
    pub fn normalize_query(&mut self) -> &mut Self {
        let query = self.parts.query.as_deref().and_then(non_empty).map(|query| {
            let map = parse_query(query, self.charset(), self.escape_query_space());
            build_query(
                &map,
                self.duplicate_query_parameters(),
                self.charset(),
                self.escape_query_space(),
            )
        });
        let query = query.as_deref().and_then(non_empty).map(Into::into);
        self.update(|parts| parts.query = query)
    }

    /// Normalizes the query. This is the same as
    /// [`normalize_query`][`Self::normalize_query`].
    #[inline]
    pub fn normalize_search(&mut self) -> &mut Self {
        self.normalize_query()
    }

    /// Removes an empty fragment.
    pub fn normalize_fragment(&mut self) -> &mut Self {
        self.update(|parts| {
            if parts.fragment.as_deref() == Some("") {
                parts.fragment = None;
            }
        })
    }

    /// Removes an empty fragment. This is the same as
    /// [`normalize_fragment`][`Self::normalize_fragment`].
    #[inline]
    pub fn normalize_hash(&mut self) -> &mut Self {
        self.normalize_fragment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Config;

    /// Pairs of input and normalized values.
    const TEST_CASES: &[(&str, &str)] = &[
        ("HTTP://Example.COM/", "http://example.com/"),
        ("http://example.com:80/", "http://example.com/"),
        ("https://example.com:80/", "https://example.com:80/"),
        ("wss://example.com:443", "wss://example.com/"),
        ("http://example.com/a/../b/./c/", "http://example.com/b/c/"),
        ("http://example.com/%7euser/a%2fb", "http://example.com/~user/a%2Fb"),
        ("http://[2001:DB8:0:0:0:0:0:1]/", "http://[2001:db8::1]/"),
        ("http://[fe80::1%25eth0]/", "http://[fe80::1%25eth0]/"),
        ("http://m\u{00FC}nchen.de/", "http://xn--mnchen-3ya.de/"),
        ("http://example.com/?&&a=1&&b=&", "http://example.com/?a=1&b="),
        ("http://example.com/?", "http://example.com/"),
        ("http://example.com/#", "http://example.com/"),
        ("../a/./b/../c", "../a/c"),
        ("/", "/"),
        ("", ""),
        ("urn:Example:a%7eb:c/../d", "urn:Example:a~b:c%2F..%2Fd"),
    ];

    #[test]
    fn normalize() {
        for (input, expected) in TEST_CASES {
            let normalized = Uri::parse(input).normalized();
            assert_eq!(normalized.as_str(), *expected, "input={input:?}");
        }
    }

    #[test]
    fn idempotent() {
        for (input, _) in TEST_CASES {
            let once = Uri::parse(input).normalized();
            let twice = once.normalized();
            assert_eq!(once, twice, "input={input:?}");
        }
    }

    #[test]
    fn punycode_disabled() {
        let config = Config::new().punycode(false);
        let mut uri = Uri::parse_with("http://M\u{00DC}nchen.de/", config);
        uri.normalize();
        assert_eq!(uri.hostname(), Some("m\u{00FC}nchen.de"));
    }

    #[test]
    fn duplicate_values() {
        let mut uri = Uri::parse("?a=1&a=1&a=2");
        uri.normalize_query();
        assert_eq!(uri.as_str(), "?a=1&a=2");

        let mut uri = Uri::parse_with("?a=1&a=1", Config::new().duplicate_query_parameters(true));
        uri.normalize_query();
        assert_eq!(uri.as_str(), "?a=1&a=1");
    }

    #[test]
    fn default_ports() {
        assert_eq!(default_port("http"), Some("80"));
        assert_eq!(default_port("gopher"), Some("70"));
        assert_eq!(default_port("ssh"), None);
    }
}
