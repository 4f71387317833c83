//! Decomposed URI components.

use alloc::string::String;

use crate::config::Charset;
use crate::percent_encoding::encode;

/// Components of a URI reference.
///
/// Empty components are stored as `None`. The user name and password hold
/// decoded values, and the other components hold their raw (encoded) forms.
/// An IPv6 hostname is stored without brackets.
///
/// # Examples
///
/// ```
/// use urikit::{Charset, Parts};
///
/// let parts = Parts {
///     scheme: Some("http".into()),
///     username: Some("user name".into()),
///     hostname: Some("2001:db8::1".into()),
///     port: Some("8080".into()),
///     path: "a/b".into(),
///     ..Parts::default()
/// };
/// assert_eq!(parts.build(Charset::Unicode), "http://user%20name@[2001:db8::1]:8080/a/b");
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parts {
    /// Scheme, without the trailing colon.
    pub scheme: Option<String>,
    /// Decoded user name.
    pub username: Option<String>,
    /// Decoded password.
    pub password: Option<String>,
    /// Hostname.
    pub hostname: Option<String>,
    /// Port digits.
    pub port: Option<String>,
    /// Path. An empty path is distinct from `/`.
    pub path: String,
    /// Query, without the leading `?`.
    pub query: Option<String>,
    /// Fragment, without the leading `#`.
    pub fragment: Option<String>,
    /// Whether the value is a URN (`scheme:path` without an authority).
    pub urn: bool,
}

impl Parts {
    /// Serializes the components.
    ///
    /// `//` is written when there is a scheme or a hostname (and the value is
    /// not a URN), and then the path always starts with `/`.
    #[must_use]
    pub fn build(&self, charset: Charset) -> String {
        let mut buf = String::new();
        if let Some(scheme) = &self.scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        let has_authority = !self.urn && (!buf.is_empty() || self.hostname.is_some());
        if has_authority {
            buf.push_str("//");
            buf.push_str(&self.build_authority(charset));
            if !self.path.starts_with('/') {
                buf.push('/');
            }
        }
        buf.push_str(&self.path);
        if let Some(query) = self.query.as_deref().filter(|v| !v.is_empty()) {
            buf.push('?');
            buf.push_str(query);
        }
        if let Some(fragment) = self.fragment.as_deref().filter(|v| !v.is_empty()) {
            buf.push('#');
            buf.push_str(fragment);
        }
        buf
    }

    /// Serializes the authority: userinfo (with `@`), hostname, and port.
    #[must_use]
    pub fn build_authority(&self, charset: Charset) -> String {
        let mut buf = self.build_userinfo(charset);
        if !buf.is_empty() {
            buf.push('@');
        }
        buf.push_str(&self.build_host());
        buf
    }

    /// Serializes the userinfo, without the trailing `@`.
    #[must_use]
    pub fn build_userinfo(&self, charset: Charset) -> String {
        let mut buf = String::new();
        if let Some(username) = &self.username {
            buf.push_str(&encode(username, charset));
        }
        if let Some(password) = &self.password {
            buf.push(':');
            buf.push_str(&encode(password, charset));
        }
        buf
    }

    /// Serializes the hostname and the port.
    ///
    /// A hostname containing `:` is enclosed in brackets. The port is written
    /// only with a hostname.
    #[must_use]
    pub fn build_host(&self) -> String {
        let Some(hostname) = &self.hostname else {
            return String::new();
        };
        let mut buf = String::with_capacity(hostname.len() + 8);
        if hostname.contains(':') {
            buf.push('[');
            buf.push_str(hostname);
            buf.push(']');
        } else {
            buf.push_str(hostname);
        }
        if let Some(port) = &self.port {
            buf.push(':');
            buf.push_str(port);
        }
        buf
    }
}
