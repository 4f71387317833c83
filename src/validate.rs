//! Validators for URI components.
//!
//! These are used by the component setters of [`Uri`][`crate::Uri`].
//! The parser itself never validates: it always returns a best-effort
//! decomposition.

use core::net::{Ipv4Addr, Ipv6Addr};

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::punycode;

/// Schemes which require a hostname.
const HOST_SCHEMES: &[&str] = &["http", "https"];

/// Checks if the string matches `scheme` rule, i.e. `[A-Za-z][A-Za-z0-9.+-]*`.
///
/// # Examples
///
/// ```
/// use urikit::validate::is_scheme;
///
/// assert!(is_scheme("git+ssh"));
/// assert!(!is_scheme("1http"));
/// assert!(!is_scheme(""));
/// ```
#[must_use]
pub fn is_scheme(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

/// Validates a scheme, trimming a trailing `:` or `://`.
///
/// # Examples
///
/// ```
/// use urikit::validate::validate_scheme;
///
/// assert_eq!(validate_scheme("https://"), Ok("https"));
/// assert_eq!(validate_scheme("mailto:"), Ok("mailto"));
/// assert!(validate_scheme("ht tp").is_err());
/// ```
pub fn validate_scheme(s: &str) -> Result<&str, Error> {
    let trimmed = s
        .strip_suffix("://")
        .or_else(|| s.strip_suffix(':'))
        .unwrap_or(s);
    if is_scheme(trimmed) {
        Ok(trimmed)
    } else {
        Err(Error::new(
            ErrorKind::InvalidScheme,
            "scheme must match [A-Za-z][A-Za-z0-9.+-]*",
        ))
    }
}

/// Validates a port, stripping a leading `:`.
///
/// Returns `Ok(None)` when the port is empty or zero.
///
/// # Examples
///
/// ```
/// use urikit::validate::validate_port;
///
/// assert_eq!(validate_port(":8080"), Ok(Some("8080")));
/// assert_eq!(validate_port("0"), Ok(None));
/// assert!(validate_port("80a").is_err());
/// ```
pub fn validate_port(s: &str) -> Result<Option<&str>, Error> {
    let digits = s.strip_prefix(':').unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::new(
            ErrorKind::InvalidPort,
            "port must consist of digits only",
        ));
    }
    if digits.is_empty() || digits.bytes().all(|b| b == b'0') {
        return Ok(None);
    }
    Ok(Some(digits))
}

/// Checks if the hostname consists only of `[A-Za-z0-9.-]`.
#[inline]
#[must_use]
pub(crate) fn is_ascii_hostname(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-'))
}

/// Validates a hostname for the given scheme.
///
/// * An empty hostname is rejected for `http` and `https`.
/// * IP address literals are accepted.
/// * Hostnames consisting of `[A-Za-z0-9.-]` are accepted.
/// * Other hostnames are converted with punycode (if the configuration
///   allows it) and the result is checked again.
pub fn validate_hostname(host: &str, scheme: Option<&str>, config: &Config) -> Result<(), Error> {
    if host.is_empty() {
        let requires_host = scheme.map_or(false, |scheme| {
            HOST_SCHEMES
                .iter()
                .any(|known| known.eq_ignore_ascii_case(scheme))
        });
        if requires_host {
            return Err(Error::new(
                ErrorKind::EmptyHostname,
                "hostname cannot be empty for http and https",
            ));
        }
        return Ok(());
    }
    if is_ascii_hostname(host) || is_ipv6(host) {
        return Ok(());
    }
    if !config.has_punycode() {
        tracing::debug!(host, "punycode is disabled; rejecting hostname");
        return Err(Error::new(
            ErrorKind::InvalidHostname,
            "hostname contains characters other than [A-Za-z0-9.-] and punycode is disabled",
        ));
    }
    tracing::trace!(host, "validating hostname through punycode");
    match punycode::to_ascii(host) {
        Ok(encoded) if is_ascii_hostname(&encoded) => Ok(()),
        _ => Err(Error::new(
            ErrorKind::InvalidHostname,
            "hostname contains characters other than [A-Za-z0-9.-]",
        )),
    }
}

/// Checks if the hostname is an IPv4 address literal.
#[inline]
#[must_use]
pub fn is_ipv4(host: &str) -> bool {
    host.parse::<Ipv4Addr>().is_ok()
}

/// Checks if the hostname is an IPv6 address literal (optionally with a zone).
#[inline]
#[must_use]
pub fn is_ipv6(host: &str) -> bool {
    let addr = host.split_once('%').map_or(host, |(addr, _zone)| addr);
    addr.parse::<Ipv6Addr>().is_ok()
}

/// Checks if the hostname contains characters outside `[A-Za-z0-9._-]`.
#[inline]
#[must_use]
pub fn is_idn(host: &str) -> bool {
    !host
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

/// Checks if the hostname contains a punycode-encoded label.
#[inline]
#[must_use]
pub fn is_punycode(host: &str) -> bool {
    host.split('.').any(|label| {
        label
            .get(..4)
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case("xn--"))
    })
}
