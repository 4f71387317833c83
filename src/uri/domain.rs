//! Domain name accessors.
//!
//! Without a registry of second-level domains, the top-level domain is the
//! last label of the hostname, and the domain consists of the last two
//! labels.

use alloc::string::String;

use crate::error::{Error, ErrorKind};
use crate::validate::validate_hostname;

use super::Uri;

impl Uri {
    /// Returns the hostname if it is a name (not an IP address).
    fn name_host(&self) -> Option<&str> {
        if self.parts.urn || self.is_ip() {
            return None;
        }
        self.parts.hostname.as_deref()
    }

    /// Returns the top-level domain: the last label of the hostname.
    ///
    /// Empty for URNs, IP addresses, and values without a hostname.
    #[must_use]
    pub fn tld(&self) -> &str {
        let Some(host) = self.name_host() else {
            return "";
        };
        host.rfind('.').map_or(host, |pos| &host[(pos + 1)..])
    }

    /// Returns the domain: the last two labels of the hostname.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let uri = Uri::parse("http://www.sub.example.com/");
    /// assert_eq!(uri.domain(), "example.com");
    /// assert_eq!(uri.subdomain(), "www.sub");
    /// assert_eq!(uri.tld(), "com");
    /// ```
    #[must_use]
    pub fn domain(&self) -> &str {
        let Some(host) = self.name_host() else {
            return "";
        };
        let tld_len = self.tld().len();
        let Some(before_tld) = host.len().checked_sub(tld_len + 1).map(|end| &host[..end]) else {
            return host;
        };
        before_tld.rfind('.').map_or(host, |pos| &host[(pos + 1)..])
    }

    /// Returns the labels of the hostname before the domain.
    #[must_use]
    pub fn subdomain(&self) -> &str {
        let Some(host) = self.name_host() else {
            return "";
        };
        host.len()
            .checked_sub(self.domain().len() + 1)
            .map_or("", |end| &host[..end])
    }

    /// Replaces the labels before the domain. Nothing happens for a URN.
    ///
    /// An empty value removes the subdomain.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::Unsupported`] if there is no hostname or it is an IP address.
    /// * [`ErrorKind::InvalidDomain`] if the value contains a colon.
    /// * [`ErrorKind::InvalidHostname`] if the value is not a valid hostname.
    pub fn set_subdomain(&mut self, subdomain: &str) -> Result<&mut Self, Error> {
        if self.parts.urn {
            return Ok(self);
        }
        if self.name_host().is_none() {
            return Err(Error::new(
                ErrorKind::Unsupported,
                "cannot set a subdomain without a domain name",
            ));
        }
        if subdomain.contains(':') {
            return Err(Error::new(ErrorKind::InvalidDomain, "domains cannot contain colons"));
        }
        let mut hostname = String::from(subdomain);
        if !hostname.is_empty() {
            if !hostname.ends_with('.') {
                hostname.push('.');
            }
            validate_hostname(&hostname, self.scheme(), &self.config)?;
        }
        hostname.push_str(self.domain());
        Ok(self.update(|parts| parts.hostname = Some(hostname)))
    }

    /// Replaces the domain. Nothing happens for a URN.
    ///
    /// If there is no hostname or it is an IP address, the hostname is
    /// replaced by the domain.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::InvalidDomain`] if the value is empty or contains a colon.
    /// * [`ErrorKind::InvalidHostname`] if the value is not a valid hostname.
    pub fn set_domain(&mut self, domain: &str) -> Result<&mut Self, Error> {
        if self.parts.urn {
            return Ok(self);
        }
        if domain.is_empty() {
            return Err(Error::new(ErrorKind::InvalidDomain, "domain cannot be empty"));
        }
        if domain.contains(':') {
            return Err(Error::new(ErrorKind::InvalidDomain, "domains cannot contain colons"));
        }
        validate_hostname(domain, self.scheme(), &self.config)?;
        let hostname = match self.name_host() {
            Some(host) => {
                let mut hostname = String::from(&host[..(host.len() - self.domain().len())]);
                hostname.push_str(domain);
                hostname
            }
            None => domain.into(),
        };
        Ok(self.update(|parts| parts.hostname = Some(hostname)))
    }

    /// Replaces the top-level domain. Nothing happens for a URN.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::InvalidDomain`] if the value is empty or contains
    ///   characters other than `[A-Za-z0-9-]`.
    /// * [`ErrorKind::Unsupported`] if there is no hostname or it is an IP address.
    pub fn set_tld(&mut self, tld: &str) -> Result<&mut Self, Error> {
        if self.parts.urn {
            return Ok(self);
        }
        if tld.is_empty() {
            return Err(Error::new(ErrorKind::InvalidDomain, "top-level domain cannot be empty"));
        }
        if !tld.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(Error::new(
                ErrorKind::InvalidDomain,
                "top-level domain contains characters other than [A-Za-z0-9-]",
            ));
        }
        let Some(host) = self.name_host() else {
            return Err(Error::new(
                ErrorKind::Unsupported,
                "cannot set a top-level domain on a non-domain host",
            ));
        };
        let mut hostname = String::from(&host[..(host.len() - self.tld().len())]);
        hostname.push_str(tld);
        Ok(self.update(|parts| parts.hostname = Some(hostname)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hostnames with their subdomain, domain, and top-level domain.
    const TEST_CASES: &[(&str, &str, &str, &str)] = &[
        ("http://example.com/", "", "example.com", "com"),
        ("http://www.example.com/", "www", "example.com", "com"),
        ("http://a.b.example.co.uk/", "a.b.example", "co.uk", "uk"),
        ("http://localhost/", "", "localhost", "localhost"),
        ("http://127.0.0.1/", "", "", ""),
        ("http://[::1]/", "", "", ""),
        ("/path", "", "", ""),
        ("urn:a.b.c", "", "", ""),
    ];

    #[test]
    fn getters() {
        for (input, subdomain, domain, tld) in TEST_CASES {
            let uri = Uri::parse(input);
            assert_eq!(uri.subdomain(), *subdomain, "input={input:?}");
            assert_eq!(uri.domain(), *domain, "input={input:?}");
            assert_eq!(uri.tld(), *tld, "input={input:?}");
        }
    }

    #[test]
    fn set_subdomain() {
        let mut uri = Uri::parse("http://www.example.com/");
        uri.set_subdomain("mail.eu").unwrap();
        assert_eq!(uri.hostname(), Some("mail.eu.example.com"));
        uri.set_subdomain("").unwrap();
        assert_eq!(uri.hostname(), Some("example.com"));
        uri.set_subdomain("www.").unwrap();
        assert_eq!(uri.hostname(), Some("www.example.com"));

        let err = uri.set_subdomain("a:b").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDomain);
        let err = Uri::parse("/p").set_subdomain("www").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn set_domain() {
        let mut uri = Uri::parse("http://www.example.com/");
        uri.set_domain("example.org").unwrap();
        assert_eq!(uri.as_str(), "http://www.example.org/");

        let mut uri = Uri::parse("http://127.0.0.1/");
        uri.set_domain("example.org").unwrap();
        assert_eq!(uri.hostname(), Some("example.org"));

        let err = uri.set_domain("").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDomain);
        let err = uri.set_domain("a:b").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDomain);
        let err = uri.set_domain("a b").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHostname);
    }

    #[test]
    fn set_tld() {
        let mut uri = Uri::parse("http://www.example.com/");
        uri.set_tld("org").unwrap();
        assert_eq!(uri.hostname(), Some("www.example.org"));

        let err = uri.set_tld("").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDomain);
        let err = uri.set_tld("co.uk").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDomain);
        let err = Uri::parse("http://10.0.0.1/").set_tld("com").map(|_| ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
