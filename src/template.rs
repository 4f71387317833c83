//! Processor for [RFC 6570] URI Template.
//!
//! [RFC 6570]: https://www.rfc-editor.org/rfc/rfc6570.html
//!
//! # Usage
//!
//! 1. Parse a template with [`UriTemplate::new`].
//!     * For templates used repeatedly, a [`TemplateCache`] keeps the parsed
//!       forms.
//! 2. Prepare a context.
//!     * Insert name-value pairs into a [`Context`].
//! 3. Expand.
//!     * [`UriTemplate::expand`] omits undefined variables, and
//!       [`UriTemplate::expand_strict`] rejects them.
//!
//! # Examples
//!
//! ```
//! use urikit::template::{Context, UriTemplate};
//!
//! let mut context = Context::new();
//! context.insert("username", "foo");
//! // U+2713 CHECK MARK
//! context.insert("utf8", "\u{2713}");
//! context.insert("list", ["red", "green", "blue"]);
//!
//! let template = UriTemplate::new("/users/{username}{/list*}{?utf8,missing}")?;
//! assert_eq!(
//!     template.expand(&context)?,
//!     "/users/foo/red/green/blue?utf8=%E2%9C%93"
//! );
//! # Ok::<_, urikit::template::Error>(())
//! ```
mod cache;
mod components;
mod context;
mod error;
mod expand;
mod parser;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::uri::Uri;

pub use self::cache::TemplateCache;
pub use self::components::{Expression, Modifier, Operator, Part, VarSpec};
pub use self::context::{Context, Value};
pub use self::error::{Error, ErrorKind};

/// A parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriTemplate {
    /// Source string.
    source: String,
    /// Parsed parts.
    parts: Vec<Part>,
}

impl UriTemplate {
    /// Parses a template.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::template::{ErrorKind, UriTemplate};
    ///
    /// assert!(UriTemplate::new("/users/{id}{?page,per_page}").is_ok());
    /// assert_eq!(
    ///     UriTemplate::new("{!id}").map_err(|e| e.kind()),
    ///     Err(ErrorKind::UnknownOperator)
    /// );
    /// ```
    pub fn new(source: &str) -> Result<Self, Error> {
        let parts = parser::parse(source)?;
        Ok(Self {
            source: source.into(),
            parts,
        })
    }

    /// Returns the source string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the parsed parts.
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns the variable names in order of first appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::template::UriTemplate;
    ///
    /// let template = UriTemplate::new("{a}/{b,a}{?c*}")?;
    /// assert_eq!(template.variables(), ["a", "b", "c"]);
    /// # Ok::<_, urikit::template::Error>(())
    /// ```
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let varspecs = self.parts.iter().flat_map(|part| match part {
            Part::Literal(_) => &[][..],
            Part::Expression(expr) => expr.varlist(),
        });
        for varspec in varspecs {
            if !names.contains(&varspec.name()) {
                names.push(varspec.name());
            }
        }
        names
    }

    /// Expands the template, omitting undefined variables.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::PrefixOnComposite`] if a prefix modifier is applied to a
    /// list or an associative array.
    pub fn expand(&self, context: &Context) -> Result<String, Error> {
        expand::expand(&self.parts, context, false)
    }

    /// Expands the template, rejecting variables missing from the context.
    ///
    /// Variables present with empty composite values are omitted as usual.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UndefinedVariable`] if a variable is missing, and
    /// [`ErrorKind::PrefixOnComposite`] as for [`expand`][`Self::expand`].
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::template::{Context, ErrorKind, UriTemplate};
    ///
    /// let template = UriTemplate::new("/a{?x,y}")?;
    /// let mut context = Context::new();
    /// context.insert("x", "1");
    ///
    /// assert_eq!(template.expand(&context)?, "/a?x=1");
    /// let err = template.expand_strict(&context).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::UndefinedVariable);
    /// assert_eq!(err.location(), 2);
    /// # Ok::<_, urikit::template::Error>(())
    /// ```
    pub fn expand_strict(&self, context: &Context) -> Result<String, Error> {
        expand::expand(&self.parts, context, true)
    }

    /// Expands the template and parses the result as a URI.
    ///
    /// # Errors
    ///
    /// Same as [`expand`][`Self::expand`].
    pub fn expand_to_uri(&self, context: &Context) -> Result<Uri, Error> {
        self.expand(context).map(|expanded| Uri::parse(&expanded))
    }
}

impl FromStr for UriTemplate {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for UriTemplate {
    type Error = Error;

    #[inline]
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl fmt::Display for UriTemplate {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
