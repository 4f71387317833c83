//! Template errors.

use core::fmt;

/// Template parse or expansion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
    /// Byte position in the template where the error was detected.
    location: usize,
}

impl Error {
    /// Creates a new `Error`.
    #[inline]
    #[must_use]
    pub(super) fn new(kind: ErrorKind, location: usize) -> Self {
        Self { kind, location }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the byte position in the template where the error was detected.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::template::{ErrorKind, UriTemplate};
    ///
    /// let err = UriTemplate::new("/users/{id").unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::UnclosedExpression);
    /// assert_eq!(err.location(), 7);
    /// ```
    #[inline]
    #[must_use]
    pub fn location(&self) -> usize {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::UnknownOperator => "unknown or reserved operator",
            ErrorKind::UnclosedExpression => "expression is not closed",
            ErrorKind::InvalidVarName => "invalid variable name",
            ErrorKind::InvalidModifier => "invalid variable modifier",
            ErrorKind::EmptyVarList => "expression has no variables",
            ErrorKind::InvalidLiteral => "invalid character in literal",
            ErrorKind::UndefinedVariable => "variable is not defined",
            ErrorKind::PrefixOnComposite => "prefix modifier applied to a composite value",
        };
        write!(f, "{msg} (at {}-th byte)", self.location)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

/// Template error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The operator of an expression is unknown or reserved for future extensions.
    UnknownOperator,
    /// An expression has no closing brace.
    UnclosedExpression,
    /// A variable name is empty or has invalid characters.
    InvalidVarName,
    /// A modifier is malformed, or the prefix length is not in `1..=9999`.
    InvalidModifier,
    /// An expression has no variables.
    EmptyVarList,
    /// A literal has characters not allowed in templates.
    InvalidLiteral,
    /// A variable is not defined in strict expansion.
    UndefinedVariable,
    /// A prefix modifier is applied to a list or an associative array.
    PrefixOnComposite,
}
