//! Template parser.

use alloc::string::String;
use alloc::vec::Vec;

use crate::parser::str::{find, starts_with_pct_triplet};
use crate::template::components::{Expression, Modifier, Operator, Part, VarSpec};
use crate::template::error::{Error, ErrorKind};

/// Returns true if the character cannot appear in a literal.
#[inline]
#[must_use]
fn is_forbidden_in_literal(c: char) -> bool {
    c.is_ascii_control()
        || matches!(c, ' ' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}')
}

/// Parses a template into parts.
pub(super) fn parse(template: &str) -> Result<Vec<Part>, Error> {
    let mut parts = Vec::new();
    let mut rest = template;
    let mut pos = 0;
    while !rest.is_empty() {
        let lit_len = find(rest.as_bytes(), b'{').unwrap_or(rest.len());
        if lit_len > 0 {
            let lit = &rest[..lit_len];
            validate_literal(lit, pos)?;
            parts.push(Part::Literal(lit.into()));
            rest = &rest[lit_len..];
            pos += lit_len;
            continue;
        }
        // `rest` starts with `{`.
        let body_len = find(rest.as_bytes(), b'}')
            .ok_or_else(|| Error::new(ErrorKind::UnclosedExpression, pos))?;
        let body = &rest[1..body_len];
        if let Some(nested) = find(body.as_bytes(), b'{') {
            return Err(Error::new(ErrorKind::UnclosedExpression, pos + 1 + nested));
        }
        parts.push(Part::Expression(parse_expression(body, pos)?));
        rest = &rest[(body_len + 1)..];
        pos += body_len + 1;
    }
    Ok(parts)
}

/// Validates a literal starting at the byte position `pos`.
///
/// A `%` must start a percent-encoded triplet.
fn validate_literal(lit: &str, pos: usize) -> Result<(), Error> {
    let bytes = lit.as_bytes();
    let invalid = lit.char_indices().find(|&(i, c)| {
        is_forbidden_in_literal(c) || (c == '%' && !starts_with_pct_triplet(&bytes[i..]))
    });
    match invalid {
        Some((i, _)) => Err(Error::new(ErrorKind::InvalidLiteral, pos + i)),
        None => Ok(()),
    }
}

/// Parses the body of an expression whose `{` is at `location`.
fn parse_expression(body: &str, location: usize) -> Result<Expression, Error> {
    let body_pos = location + 1;
    let (operator, varlist) = match body.bytes().next() {
        None => return Err(Error::new(ErrorKind::EmptyVarList, location)),
        Some(b) if Operator::is_reserved_for_future(b) => {
            return Err(Error::new(ErrorKind::UnknownOperator, body_pos));
        }
        Some(b) => match Operator::from_byte(b) {
            Some(op) => (op, &body[1..]),
            None => (Operator::String, body),
        },
    };
    let varlist_pos = body_pos + (body.len() - varlist.len());
    if varlist.is_empty() {
        return Err(Error::new(ErrorKind::EmptyVarList, varlist_pos));
    }

    let mut specs = Vec::new();
    let mut spec_pos = varlist_pos;
    for spec in varlist.split(',') {
        specs.push(parse_varspec(spec, spec_pos)?);
        spec_pos += spec.len() + 1;
    }
    Ok(Expression {
        operator,
        varlist: specs,
        location,
    })
}

/// Parses a variable specifier starting at the byte position `pos`.
fn parse_varspec(spec: &str, pos: usize) -> Result<VarSpec, Error> {
    let name_len = varname_len(spec);
    let (name, modifier) = spec.split_at(name_len);
    if name.is_empty() {
        return Err(Error::new(ErrorKind::InvalidVarName, pos));
    }
    let modifier_pos = pos + name_len;
    let modifier = match modifier.as_bytes() {
        [] => Modifier::None,
        [b'*'] => Modifier::Explode,
        [b':', digits @ ..] => parse_max_len(digits)
            .map(Modifier::MaxLen)
            .ok_or_else(|| Error::new(ErrorKind::InvalidModifier, modifier_pos))?,
        [b'*' | b':', ..] => return Err(Error::new(ErrorKind::InvalidModifier, modifier_pos)),
        _ => return Err(Error::new(ErrorKind::InvalidVarName, modifier_pos)),
    };
    Ok(VarSpec {
        name: String::from(name),
        modifier,
    })
}

/// Returns the length of the variable name at the head of the string.
///
/// A name consists of `[A-Za-z0-9_]` and percent-encoded triplets, with
/// single dots between them.
fn varname_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut len = 0;
    let mut after_dot = true;
    loop {
        match bytes.get(len) {
            Some(b) if b.is_ascii_alphanumeric() || *b == b'_' => {
                len += 1;
                after_dot = false;
            }
            Some(b'%') if starts_with_pct_triplet(&bytes[len..]) => {
                len += 3;
                after_dot = false;
            }
            Some(b'.') if !after_dot => {
                len += 1;
                after_dot = true;
            }
            _ => break,
        }
    }
    // A name cannot end with a dot.
    if after_dot && len > 0 {
        len - 1
    } else {
        len
    }
}

/// Parses `max-length`: 1 to 4 digits without leading zeros, less than 10000.
fn parse_max_len(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() || digits.len() > 4 || digits[0] == b'0' {
        return None;
    }
    digits.iter().try_fold(0_u16, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0'))
    })
}
