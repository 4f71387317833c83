//! Errors for URI component manipulation and resolution.
//!
//! Parsing never fails. Errors are only reported by setters that validate
//! their input, and by operations that are not defined for the value, such as
//! resolving a URN against a base.

use core::fmt;

/// An error returned by component setters and resolution.
///
/// # Examples
///
/// ```
/// use urikit::{ErrorKind, Uri};
///
/// let mut uri = Uri::parse("http://example.com/");
/// let err = uri.set_port(Some("80a")).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidPort);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
    /// Short description of the rejected input.
    detail: &'static str,
}

impl Error {
    /// Creates a new error.
    #[inline]
    #[must_use]
    pub(crate) const fn new(kind: ErrorKind, detail: &'static str) -> Self {
        Self { kind, detail }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.description(), self.detail)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

/// Error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The scheme does not match `[A-Za-z][A-Za-z0-9.+-]*`.
    InvalidScheme,
    /// The port contains non-digit characters.
    InvalidPort,
    /// The hostname contains characters that cannot be represented in a hostname.
    InvalidHostname,
    /// The hostname is empty while the scheme requires one.
    EmptyHostname,
    /// The domain, subdomain, or top-level domain value is invalid.
    InvalidDomain,
    /// The host or authority value contains trailing data (such as a path).
    InvalidHost,
    /// The operation is not defined for the value.
    Unsupported,
}

impl ErrorKind {
    /// Returns a static description of the kind.
    #[must_use]
    fn description(self) -> &'static str {
        match self {
            Self::InvalidScheme => "invalid scheme",
            Self::InvalidPort => "invalid port",
            Self::InvalidHostname => "invalid hostname",
            Self::EmptyHostname => "empty hostname",
            Self::InvalidDomain => "invalid domain",
            Self::InvalidHost => "invalid host",
            Self::Unsupported => "unsupported operation",
        }
    }
}
