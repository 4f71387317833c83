//! Resolution of references against base URIs.
//!
//! [`Uri::absolute_to`] resolves a reference against a base, and
//! [`Uri::relative_to`] computes the reverse. Resolution is not defined for
//! URNs.
//!
//! # Examples
//!
//! ```
//! use urikit::Uri;
//!
//! let base = Uri::parse("http://a.com/b/x/y");
//! let uri = Uri::parse("http://a.com/b/c/d");
//!
//! let relative = uri.relative_to(&base)?;
//! assert_eq!(relative.as_str(), "../c/d");
//! assert_eq!(relative.absolute_to(&base)?, uri);
//! # Ok::<_, urikit::Error>(())
//! ```


use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, ErrorKind};
use crate::path::{common_path, remove_dot_segments};
use crate::query::{QueryMap, QueryValue};
use crate::uri::Uri;

/// Error for resolution involving a URN.
const URN_UNSUPPORTED: Error = Error::new(
    ErrorKind::Unsupported,
    "URNs do not have hierarchical components",
);

/// Compares two values, ignoring the order of list items.
fn value_eq(one: &QueryValue, two: &QueryValue) -> bool {
    match (one, two) {
        (QueryValue::List(a), QueryValue::List(b)) => {
            let mut a: Vec<Option<&str>> = a.iter().map(Option::as_deref).collect();
            let mut b: Vec<Option<&str>> = b.iter().map(Option::as_deref).collect();
            a.sort_unstable();
            b.sort_unstable();
            a == b
        }
        _ => one == two,
    }
}

/// Compares two query maps, ignoring the order of parameters and list items.
fn query_map_eq(one: &QueryMap, two: &QueryMap) -> bool {
    let present = |map: &QueryMap| map.iter().filter(|(_, v)| !v.is_absent()).count();
    present(one) == present(two)
        && one
            .iter()
            .filter(|(_, v)| !v.is_absent())
            .all(|(name, v)| two.get(name).map_or(false, |w| value_eq(v, w)))
}

impl Uri {
    /// Resolves the reference against the base.
    ///
    /// * A reference with a scheme is returned as is.
    /// * A reference with a hostname inherits only the scheme.
    /// * Otherwise the authority is inherited. An empty path inherits the
    ///   path of the base (and its query, if the query is empty too), and a
    ///   relative path is appended to the directory of the base and
    ///   normalized.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Unsupported`] if either value is a URN.
    pub fn absolute_to(&self, base: &Uri) -> Result<Uri, Error> {
        if self.parts.urn || base.parts.urn {
            return Err(URN_UNSUPPORTED);
        }
        let mut resolved = self.clone();
        if resolved.parts.scheme.is_some() {
            return Ok(resolved);
        }
        resolved.parts.scheme = base.parts.scheme.clone();
        if resolved.parts.hostname.is_some() {
            resolved.rebuild();
            return Ok(resolved);
        }
        resolved.parts.username = base.parts.username.clone();
        resolved.parts.password = base.parts.password.clone();
        resolved.parts.hostname = base.parts.hostname.clone();
        resolved.parts.port = base.parts.port.clone();

        if resolved.parts.path.is_empty() {
            resolved.parts.path = base.parts.path.clone();
            if resolved.parts.query.is_none() {
                resolved.parts.query = base.parts.query.clone();
            }
        } else {
            if resolved.parts.path == ".." {
                resolved.parts.path.push('/');
            }
            if !resolved.parts.path.starts_with('/') {
                let mut path = String::from(base.directory());
                if path.is_empty() && base.parts.path.starts_with('/') {
                    path.push('/');
                }
                if !path.is_empty() {
                    path.push('/');
                }
                path.push_str(&resolved.parts.path);
                resolved.parts.path = remove_dot_segments(&path, resolved.is_relative());
            }
        }
        resolved.rebuild();
        Ok(resolved)
    }

    /// Computes a reference which resolves to this value against the base.
    ///
    /// Both values are normalized first. If the schemes are equal, the
    /// scheme is dropped. If the userinfo, the hostname, or the port
    /// differs, no relative path is computed and the value is returned with
    /// its authority.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Unsupported`] if either value is a URN or has a relative
    /// path.
    pub fn relative_to(&self, base: &Uri) -> Result<Uri, Error> {
        let mut relative = self.normalized();
        if relative.parts.urn {
            return Err(URN_UNSUPPORTED);
        }
        let base = base.normalized();
        if base.parts.urn {
            return Err(URN_UNSUPPORTED);
        }
        let relative_path = String::from(relative.pathname());
        let base_path = base.pathname();
        if !relative_path.starts_with('/') {
            return Err(Error::new(ErrorKind::Unsupported, "URI is already relative"));
        }
        if !base_path.starts_with('/') {
            return Err(Error::new(
                ErrorKind::Unsupported,
                "cannot compute a URI relative to a relative base",
            ));
        }

        let parts = &mut relative.parts;
        let base_parts = &base.parts;
        if parts.scheme == base_parts.scheme {
            parts.scheme = None;
        }
        if parts.username != base_parts.username || parts.password != base_parts.password {
            tracing::debug!(uri = %self, base = %base, "userinfo differs from the base; keeping the authority");
            relative.rebuild();
            return Ok(relative);
        }
        if parts.scheme.is_some() || parts.username.is_some() || parts.password.is_some() {
            relative.rebuild();
            return Ok(relative);
        }
        if parts.hostname == base_parts.hostname && parts.port == base_parts.port {
            parts.hostname = None;
            parts.port = None;
        } else {
            relative.rebuild();
            return Ok(relative);
        }

        if relative_path == base_path {
            parts.path = String::new();
            relative.rebuild();
            return Ok(relative);
        }
        let common = common_path(&relative_path, base_path);
        if common.is_empty() {
            relative.rebuild();
            return Ok(relative);
        }
        let base_rest = &base_path[common.len()..];
        let base_dirs = base_rest.rfind('/').map_or("", |pos| &base_rest[..=pos]);
        let mut path: String = base_dirs.split_inclusive('/').map(|_| "../").collect();
        path.push_str(&relative_path[common.len()..]);
        if path.is_empty() {
            path.push_str("./");
        }
        parts.path = path;
        relative.rebuild();
        Ok(relative)
    }

    /// Compares normalized values.
    ///
    /// The order of query parameters and of repeated values is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let one = Uri::parse("HTTP://example.com:80/a/./b?x=1&y=2&x=3");
    /// let two = Uri::parse("http://example.com/a/b?y=2&x=3&x=1");
    /// assert!(one.equals(&two));
    /// assert_ne!(one, two);
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Uri) -> bool {
        let one = self.normalized();
        let two = other.normalized();
        if one == two {
            return true;
        }
        let without_query = |uri: &Uri| {
            let mut parts = uri.parts.clone();
            parts.query = None;
            parts.build(uri.charset())
        };
        without_query(&one) == without_query(&two)
            && query_map_eq(&one.query_map(), &two.query_map())
    }
}
