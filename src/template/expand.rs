//! Expansion.

use alloc::sync::Arc;
use alloc::string::String;

use crate::config::Charset;
use crate::parser::str::starts_with_pct_triplet;
use crate::percent_encoding::{encode, encode_reserved};
use crate::template::components::{Expression, Modifier, Part};
use crate::template::context::{Context, Encoded};
use crate::template::error::{Error, ErrorKind};
use crate::template::Value;

/// Escapes a value for the expansion.
///
/// With `allow_reserved`, reserved characters and valid percent-encoded
/// triplets are kept. Otherwise everything except unreserved characters
/// is encoded.
pub(super) fn escape(s: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return encode(s, Charset::Unicode);
    }
    let bytes = s.as_bytes();
    let mut buf = String::with_capacity(s.len());
    let mut run_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if starts_with_pct_triplet(&bytes[i..]) {
            buf.push_str(&encode_reserved(&s[run_start..i], Charset::Unicode));
            buf.push_str(&s[i..(i + 3)]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }
    buf.push_str(&encode_reserved(&s[run_start..], Charset::Unicode));
    buf
}

/// Returns the prefix of the string with at most `max_len` characters.
///
/// With `allow_reserved`, a percent-encoded triplet counts as one character.
fn truncate(s: &str, max_len: u16, allow_reserved: bool) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    for _ in 0..max_len {
        if end >= s.len() {
            break;
        }
        if allow_reserved && starts_with_pct_triplet(&bytes[end..]) {
            end += 3;
        } else {
            end += s[end..].chars().next().map_or(1, char::len_utf8);
        }
    }
    &s[..end]
}

/// Writes a literal, percent-encoding non-ASCII characters.
fn push_literal(buf: &mut String, lit: &str) {
    if lit.is_ascii() {
        buf.push_str(lit);
    } else {
        for c in lit.chars() {
            if c.is_ascii() {
                buf.push(c);
            } else {
                let mut utf8 = [0_u8; 4];
                buf.push_str(&encode(c.encode_utf8(&mut utf8), Charset::Unicode));
            }
        }
    }
}

/// Expands the template parts.
pub(super) fn expand(parts: &[Part], context: &Context, strict: bool) -> Result<String, Error> {
    let mut buf = String::new();
    for part in parts {
        match part {
            Part::Literal(lit) => push_literal(&mut buf, lit),
            Part::Expression(expr) => expand_expr(&mut buf, expr, context, strict)?,
        }
    }
    Ok(buf)
}

/// Expands an expression.
fn expand_expr(
    buf: &mut String,
    expr: &Expression,
    context: &Context,
    strict: bool,
) -> Result<(), Error> {
    let props = expr.operator.props();

    let mut is_first_varspec = true;
    for varspec in &expr.varlist {
        let name = varspec.name.as_str();
        let value = match context.get(name) {
            Some(v) => v,
            None if strict => {
                tracing::debug!(name, location = expr.location, "undefined variable in strict expansion");
                return Err(Error::new(ErrorKind::UndefinedVariable, expr.location));
            }
            None => continue,
        };
        if value.is_undefined() {
            continue;
        }
        let encoded = match (varspec.modifier, value) {
            (Modifier::MaxLen(_), v) if v.is_composite() => {
                // Prefix modifiers are not applicable to composite values.
                return Err(Error::new(ErrorKind::PrefixOnComposite, expr.location));
            }
            (Modifier::MaxLen(max_len), Value::String(s)) => Arc::new(Encoded::String(escape(
                truncate(s, max_len, props.allow_reserved),
                props.allow_reserved,
            ))),
            _ => match context.encoded(name, props.allow_reserved) {
                Some(v) => v,
                None => continue,
            },
        };

        if is_first_varspec {
            buf.push_str(props.first);
            is_first_varspec = false;
        } else {
            buf.push_str(props.sep);
        }

        let explode = varspec.modifier == Modifier::Explode;
        match &*encoded {
            Encoded::String(s) => {
                if props.named {
                    buf.push_str(name);
                    if s.is_empty() {
                        buf.push_str(props.ifemp);
                        continue;
                    }
                    buf.push('=');
                }
                buf.push_str(s);
            }
            Encoded::List(list) if !explode => {
                if props.named {
                    buf.push_str(name);
                    buf.push('=');
                }
                push_joined(buf, list.iter().map(String::as_str), ",");
            }
            Encoded::Assoc(assoc) if !explode => {
                if props.named {
                    buf.push_str(name);
                    buf.push('=');
                }
                let flattened = assoc.iter().flat_map(|(k, v)| [k.as_str(), v.as_str()]);
                push_joined(buf, flattened, ",");
            }
            Encoded::List(list) => {
                for (i, item) in list.iter().enumerate() {
                    if i != 0 {
                        buf.push_str(props.sep);
                    }
                    if props.named {
                        push_named(buf, name, item, props.ifemp);
                    } else {
                        buf.push_str(item);
                    }
                }
            }
            Encoded::Assoc(assoc) => {
                for (i, (key, value)) in assoc.iter().enumerate() {
                    if i != 0 {
                        buf.push_str(props.sep);
                    }
                    if props.named {
                        push_named(buf, key, value, props.ifemp);
                    } else {
                        buf.push_str(key);
                        buf.push('=');
                        buf.push_str(value);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Writes the items joined with the separator.
fn push_joined<'a>(buf: &mut String, items: impl Iterator<Item = &'a str>, sep: &str) {
    for (i, item) in items.enumerate() {
        if i != 0 {
            buf.push_str(sep);
        }
        buf.push_str(item);
    }
}

/// Writes `name=value`, or `name` followed by `ifemp` for an empty value.
fn push_named(buf: &mut String, name: &str, value: &str, ifemp: &str) {
    buf.push_str(name);
    if value.is_empty() {
        buf.push_str(ifemp);
    } else {
        buf.push('=');
        buf.push_str(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_escape() {
        assert_eq!(escape("a b/c?%20%zz", true), "a%20b/c?%20%25zz");
        assert_eq!(escape("a b/c?%20", false), "a%20b%2Fc%3F%2520");
        assert_eq!(escape("\u{00E9}", true), "%C3%A9");
    }

    #[test]
    fn prefix() {
        assert_eq!(truncate("value", 3, false), "val");
        assert_eq!(truncate("v", 3, false), "v");
        assert_eq!(truncate("\u{00E9}t\u{00E9}", 2, false), "\u{00E9}t");
        assert_eq!(truncate("%20abc", 2, true), "%20a");
        assert_eq!(truncate("%20abc", 2, false), "%2");
    }

    #[test]
    fn literals() {
        let mut buf = String::new();
        push_literal(&mut buf, "/caf\u{00E9}/");
        assert_eq!(buf, "/caf%C3%A9/");
    }
}
