//! Percent encoding and decoding.
//!
//! [`encode`] escapes everything except the unreserved characters
//! (`A-Z a-z 0-9 - . _ ~`), so `!'()*` are also escaped.
//! Context [`Table`]s then restore the characters that are commonly kept
//! readable in a component: [`PATH_SEGMENT`] keeps the sub-delimiters usual
//! in paths, [`URN_PATH_SEGMENT`] keeps some more but escapes `:` (the URN
//! segment separator), and [`RESERVED`] keeps every reserved character.
//!
//! # Examples
//!
//! ```
//! use urikit::Charset;
//! use urikit::percent_encoding::{encode, encode_path_segment, recode_path};
//!
//! assert_eq!(encode("a b/c", Charset::Unicode), "a%20b%2Fc");
//! assert_eq!(encode_path_segment("a:b@c=d", Charset::Unicode), "a:b@c=d");
//! assert_eq!(recode_path("/%7efoo/bär", Charset::Unicode), "/~foo/b%C3%A4r");
//! ```

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::config::Charset;
use crate::parser::str::{hexdigits_to_byte, starts_with_pct_triplet};

/// Uppercase hexdigits.
const HEXDIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Characters kept literal in a path segment.
pub const PATH_SEGMENT: Table = Table {
    restore: b"$&+,;=:@",
    escape: b"/?#",
};

/// Characters kept literal in a URN path segment.
pub const URN_PATH_SEGMENT: Table = Table {
    restore: b"!$'()*+,;=@",
    escape: b"/?#:",
};

/// Reserved characters: gen-delims and sub-delims.
pub const RESERVED: Table = Table {
    restore: b":/?#[]@!$&'()*+,;=",
    escape: b"",
};

/// A percent-encoding context table.
///
/// A table lists the escapes that are reverted to literal characters after
/// encoding, and the characters that are escaped again after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    /// Characters restored to literal form after encoding.
    restore: &'static [u8],
    /// Characters escaped again after decoding.
    escape: &'static [u8],
}

impl Table {
    /// Encodes the string and restores the characters allowed by the table.
    #[must_use]
    pub fn encode(&self, s: &str, charset: Charset) -> String {
        let encoded = encode(s, charset);
        if self.restore.is_empty() || !encoded.contains('%') {
            return encoded;
        }

        // `encode` emits ASCII only.
        let bytes = encoded.as_bytes();
        let mut buf = String::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if starts_with_pct_triplet(&bytes[i..]) {
                let decoded = hexdigits_to_byte(bytes[i + 1], bytes[i + 2]);
                if self.restore.contains(&decoded) {
                    buf.push(char::from(decoded));
                } else {
                    buf.push_str(&encoded[i..(i + 3)]);
                }
                i += 3;
            } else {
                buf.push(char::from(bytes[i]));
                i += 1;
            }
        }
        buf
    }

    /// Decodes the string and escapes the characters the table forbids.
    ///
    /// If the string cannot be decoded, it is returned unchanged.
    #[must_use]
    pub fn decode(&self, s: &str, charset: Charset) -> String {
        let decoded = match decode(s, charset) {
            Ok(v) => v,
            Err(_) => return s.into(),
        };
        if self.escape.is_empty() || !decoded.bytes().any(|b| self.escape.contains(&b)) {
            return decoded;
        }
        let mut buf = String::with_capacity(decoded.len() + 4);
        for c in decoded.chars() {
            match u8::try_from(c) {
                Ok(b) if self.escape.contains(&b) => push_pct_encoded(&mut buf, b),
                _ => buf.push(c),
            }
        }
        buf
    }
}

/// An error indicating that the string is not a valid percent-encoded string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError(());

impl fmt::Display for DecodeError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid percent-encoded sequence")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// Checks if the byte matches `unreserved` rule.
#[inline]
#[must_use]
pub(crate) fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Writes a `%XX` triplet.
#[inline]
fn push_pct_encoded(buf: &mut String, b: u8) {
    buf.push('%');
    buf.push(char::from(HEXDIGITS[usize::from(b >> 4)]));
    buf.push(char::from(HEXDIGITS[usize::from(b & 0x0F)]));
}

/// Writes a `%uXXXX` escape.
fn push_u_escaped(buf: &mut String, unit: u16) {
    buf.push_str("%u");
    for shift in [12, 8, 4, 0] {
        buf.push(char::from(HEXDIGITS[usize::from((unit >> shift) & 0x0F)]));
    }
}

/// Percent-encodes everything but the unreserved characters.
#[must_use]
pub fn encode(s: &str, charset: Charset) -> String {
    let mut buf = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() && is_unreserved(c as u8) {
            buf.push(c);
            continue;
        }
        match (charset, u8::try_from(c)) {
            (Charset::Iso8859, Ok(b)) => push_pct_encoded(&mut buf, b),
            (Charset::Iso8859, Err(_)) => {
                let mut units = [0_u16; 2];
                for unit in c.encode_utf16(&mut units).iter() {
                    push_u_escaped(&mut buf, *unit);
                }
            }
            (Charset::Unicode, _) => {
                let mut utf8 = [0_u8; 4];
                for b in c.encode_utf8(&mut utf8).bytes() {
                    push_pct_encoded(&mut buf, b);
                }
            }
        }
    }
    buf
}

/// Decodes a percent-encoded string.
///
/// Fails on a stray `%`, and (for [`Charset::Unicode`]) when the decoded
/// bytes are not valid UTF-8.
pub fn decode(s: &str, charset: Charset) -> Result<String, DecodeError> {
    if !s.contains('%') {
        return Ok(s.into());
    }
    match charset {
        Charset::Unicode => decode_utf8(s),
        Charset::Iso8859 => decode_latin1(s),
    }
}

/// Decodes the percent-encoded triplets as UTF-8 bytes.
fn decode_utf8(s: &str) -> Result<String, DecodeError> {
    let mut bytes = Vec::with_capacity(s.len());
    let mut rest = s.as_bytes();
    while let Some((&b, tail)) = rest.split_first() {
        if b != b'%' {
            bytes.push(b);
            rest = tail;
            continue;
        }
        if !starts_with_pct_triplet(rest) {
            return Err(DecodeError(()));
        }
        bytes.push(hexdigits_to_byte(rest[1], rest[2]));
        rest = &rest[3..];
    }
    String::from_utf8(bytes).map_err(|_| DecodeError(()))
}

/// Takes a `%uXXXX` escape from the head of the string.
fn take_u_escape(s: &str) -> Option<(u16, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 6 || !bytes.starts_with(b"%u") {
        return None;
    }
    if !bytes[2..6].iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let unit = (u16::from(hexdigits_to_byte(bytes[2], bytes[3])) << 8)
        | u16::from(hexdigits_to_byte(bytes[4], bytes[5]));
    Some((unit, &s[6..]))
}

/// Decodes the percent-encoded triplets as ISO-8859-1 bytes and `%uXXXX` escapes as UTF-16.
fn decode_latin1(s: &str) -> Result<String, DecodeError> {
    let mut buf = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('%') {
        buf.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some((unit, after)) = take_u_escape(tail) {
            if (0xD800..=0xDBFF).contains(&unit) {
                let (low, after_low) = take_u_escape(after).ok_or(DecodeError(()))?;
                let c = char::decode_utf16([unit, low])
                    .next()
                    .and_then(Result::ok)
                    .ok_or(DecodeError(()))?;
                buf.push(c);
                rest = after_low;
            } else {
                buf.push(char::from_u32(u32::from(unit)).ok_or(DecodeError(()))?);
                rest = after;
            }
        } else if starts_with_pct_triplet(tail.as_bytes()) {
            let bytes = tail.as_bytes();
            buf.push(char::from(hexdigits_to_byte(bytes[1], bytes[2])));
            rest = &tail[3..];
        } else {
            return Err(DecodeError(()));
        }
    }
    buf.push_str(rest);
    Ok(buf)
}

/// Encodes the string and restores all reserved characters.
#[inline]
#[must_use]
pub fn encode_reserved(s: &str, charset: Charset) -> String {
    RESERVED.encode(s, charset)
}

/// Encodes a single path segment.
#[inline]
#[must_use]
pub fn encode_path_segment(s: &str, charset: Charset) -> String {
    PATH_SEGMENT.encode(s, charset)
}

/// Decodes a single path segment, keeping `/`, `?` and `#` escaped.
#[inline]
#[must_use]
pub fn decode_path_segment(s: &str, charset: Charset) -> String {
    PATH_SEGMENT.decode(s, charset)
}

/// Encodes a single URN path segment.
#[inline]
#[must_use]
pub fn encode_urn_path_segment(s: &str, charset: Charset) -> String {
    URN_PATH_SEGMENT.encode(s, charset)
}

/// Decodes a single URN path segment, keeping `/`, `?`, `#` and `:` escaped.
#[inline]
#[must_use]
pub fn decode_urn_path_segment(s: &str, charset: Charset) -> String {
    URN_PATH_SEGMENT.decode(s, charset)
}

/// Decodes every segment with `from` and encodes it again with `to`.
///
/// Segments that cannot be decoded are kept as is.
fn recode_segments(s: &str, sep: char, table: &Table, from: Charset, to: Charset) -> String {
    let mut buf = String::with_capacity(s.len());
    for (i, segment) in s.split(sep).enumerate() {
        if i != 0 {
            buf.push(sep);
        }
        match decode(segment, from) {
            Ok(decoded) => buf.push_str(&table.encode(&decoded, to)),
            Err(_) => buf.push_str(segment),
        }
    }
    buf
}

/// Applies the table decoding to every segment.
fn decode_segments(s: &str, sep: char, table: &Table, charset: Charset) -> String {
    let mut buf = String::with_capacity(s.len());
    for (i, segment) in s.split(sep).enumerate() {
        if i != 0 {
            buf.push(sep);
        }
        buf.push_str(&table.decode(segment, charset));
    }
    buf
}

/// Normalizes the percent-encoding of a `/`-separated path.
#[inline]
#[must_use]
pub fn recode_path(s: &str, charset: Charset) -> String {
    recode_segments(s, '/', &PATH_SEGMENT, charset, charset)
}

/// Decodes a `/`-separated path segment by segment.
#[inline]
#[must_use]
pub fn decode_path(s: &str, charset: Charset) -> String {
    decode_segments(s, '/', &PATH_SEGMENT, charset)
}

/// Normalizes the percent-encoding of a `:`-separated URN path.
#[inline]
#[must_use]
pub fn recode_urn_path(s: &str, charset: Charset) -> String {
    recode_segments(s, ':', &URN_PATH_SEGMENT, charset, charset)
}

/// Decodes a `:`-separated URN path segment by segment.
#[inline]
#[must_use]
pub fn decode_urn_path(s: &str, charset: Charset) -> String {
    decode_segments(s, ':', &URN_PATH_SEGMENT, charset)
}

/// Re-encodes a path written with one charset into another.
#[must_use]
pub(crate) fn transcode_path(s: &str, urn: bool, from: Charset, to: Charset) -> String {
    if urn {
        recode_segments(s, ':', &URN_PATH_SEGMENT, from, to)
    } else {
        recode_segments(s, '/', &PATH_SEGMENT, from, to)
    }
}

/// Encodes a query name or value.
///
/// A space becomes `+` when `escape_space` is true, and `%20` otherwise.
#[must_use]
pub fn encode_query(s: &str, charset: Charset, escape_space: bool) -> String {
    let encoded = encode(s, charset);
    if escape_space && encoded.contains("%20") {
        encoded.replace("%20", "+")
    } else {
        encoded
    }
}

/// Decodes a query name or value.
///
/// A `+` is read as a space when `escape_space` is true.
/// If the string cannot be decoded, it is returned unchanged.
#[must_use]
pub fn decode_query(s: &str, charset: Charset, escape_space: bool) -> String {
    let spaced: Cow<'_, str> = if escape_space && s.contains('+') {
        Cow::Owned(s.replace('+', "%20"))
    } else {
        Cow::Borrowed(s)
    };
    decode(&spaced, charset).unwrap_or_else(|_| s.into())
}
