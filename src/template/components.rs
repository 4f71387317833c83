//! Components of a parsed template.

use alloc::string::String;
use alloc::vec::Vec;

/// A part of a template: a literal or an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Part {
    /// Literal text.
    Literal(String),
    /// Expression inside braces.
    Expression(Expression),
}

/// Expression, i.e. `{operator varlist}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    /// Operator.
    pub(super) operator: Operator,
    /// Variable list.
    pub(super) varlist: Vec<VarSpec>,
    /// Byte position of the opening brace in the template.
    pub(super) location: usize,
}

impl Expression {
    /// Returns the operator.
    #[inline]
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the variable specifiers.
    #[inline]
    #[must_use]
    pub fn varlist(&self) -> &[VarSpec] {
        &self.varlist
    }

    /// Returns the byte position of the opening brace in the template.
    #[inline]
    #[must_use]
    pub fn location(&self) -> usize {
        self.location
    }
}

/// Variable specifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarSpec {
    /// Variable name.
    pub(super) name: String,
    /// Variable modifier.
    pub(super) modifier: Modifier,
}

impl VarSpec {
    /// Returns the variable name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the modifier.
    #[inline]
    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }
}

/// Variable modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// No modifiers.
    None,
    /// Max length, greater than 0 and less than 10000.
    MaxLen(u16),
    /// Explode the variable, e.g. the var spec has `*`.
    Explode,
}

/// Operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// No operator. String expansion.
    String,
    /// Reserved expansion by `+`.
    Reserved,
    /// Fragment expansion by `#`.
    Fragment,
    /// Label expansion by `.`.
    Label,
    /// Path segments by `/`.
    PathSegments,
    /// Path-style parameters by `;`.
    PathParams,
    /// Form-style query by `?`.
    FormQuery,
    /// Form-style query continuation by `&`.
    FormQueryCont,
}

impl Operator {
    /// Returns the operator for the given character.
    #[must_use]
    pub(super) fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Self::Reserved),
            b'#' => Some(Self::Fragment),
            b'.' => Some(Self::Label),
            b'/' => Some(Self::PathSegments),
            b';' => Some(Self::PathParams),
            b'?' => Some(Self::FormQuery),
            b'&' => Some(Self::FormQueryCont),
            _ => None,
        }
    }

    /// Returns true if the character is reserved for future operators.
    #[inline]
    #[must_use]
    pub(super) fn is_reserved_for_future(b: u8) -> bool {
        matches!(b, b'=' | b',' | b'!' | b'@' | b'|')
    }

    /// Returns the operator character, or `None` for [`Operator::String`].
    #[must_use]
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::String => None,
            Self::Reserved => Some('+'),
            Self::Fragment => Some('#'),
            Self::Label => Some('.'),
            Self::PathSegments => Some('/'),
            Self::PathParams => Some(';'),
            Self::FormQuery => Some('?'),
            Self::FormQueryCont => Some('&'),
        }
    }

    /// Returns the expansion properties of the operator.
    ///
    /// See [RFC 6570 Appendix A](https://www.rfc-editor.org/rfc/rfc6570#appendix-A).
    #[must_use]
    pub(super) const fn props(self) -> OpProps {
        let (first, sep, named, ifemp, allow_reserved) = match self {
            Self::String => ("", ",", false, "", false),
            Self::Reserved => ("", ",", false, "", true),
            Self::Fragment => ("#", ",", false, "", true),
            Self::Label => (".", ".", false, "", false),
            Self::PathSegments => ("/", "/", false, "", false),
            Self::PathParams => (";", ";", true, "", false),
            Self::FormQuery => ("?", "&", true, "=", false),
            Self::FormQueryCont => ("&", "&", true, "=", false),
        };
        OpProps {
            first,
            sep,
            named,
            ifemp,
            allow_reserved,
        }
    }
}

/// Expansion properties of an operator.
#[derive(Debug, Clone, Copy)]
pub(super) struct OpProps {
    /// Prefix for the first element.
    pub(super) first: &'static str,
    /// Separator.
    pub(super) sep: &'static str,
    /// Whether or not the expansion includes the variable or key name.
    pub(super) named: bool,
    /// Result string if the variable is empty.
    pub(super) ifemp: &'static str,
    /// Whether or not the reserved values can be written without being encoded.
    pub(super) allow_reserved: bool,
}
