//! [RFC 3492] punycode, and its use for internationalized domain names.
//!
//! [RFC 3492]: https://www.rfc-editor.org/rfc/rfc3492
//!
//! # Examples
//!
//! ```
//! use urikit::punycode;
//!
//! assert_eq!(punycode::to_ascii("m\u{00FC}nchen.example")?, "xn--mnchen-3ya.example");
//! assert_eq!(punycode::to_unicode("xn--mnchen-3ya.example"), "m\u{00FC}nchen.example");
//! # Ok::<_, punycode::Error>(())
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Prefix of punycode-encoded labels.
const ACE_PREFIX: &str = "xn--";

/// Bootstring parameter `base`.
const BASE: u32 = 36;
/// Bootstring parameter `tmin`.
const T_MIN: u32 = 1;
/// Bootstring parameter `tmax`.
const T_MAX: u32 = 26;
/// Bootstring parameter `skew`.
const SKEW: u32 = 38;
/// Bootstring parameter `damp`.
const DAMP: u32 = 700;
/// Bootstring parameter `initial_bias`.
const INITIAL_BIAS: u32 = 72;
/// Bootstring parameter `initial_n`.
const INITIAL_N: u32 = 0x80;

/// Punycode conversion error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
}

impl Error {
    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::Overflow => "punycode conversion overflowed",
            ErrorKind::InvalidInput => "invalid punycode input",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

/// Punycode error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An intermediate value overflowed.
    Overflow,
    /// The input contains an unexpected character or ends prematurely.
    InvalidInput,
}

/// Bias adaptation function of RFC 3492 section 6.1.
fn adapt(delta: u32, num_points: u32, first_time: bool) -> u32 {
    let mut delta = if first_time { delta / DAMP } else { delta / 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) / 2 {
        delta /= BASE - T_MIN;
        k += BASE;
    }
    k + (((BASE - T_MIN + 1) * delta) / (delta + SKEW))
}

/// Returns the threshold for the digit position `k`.
#[inline]
fn threshold(k: u32, bias: u32) -> u32 {
    if k <= bias {
        T_MIN
    } else if k >= bias + T_MAX {
        T_MAX
    } else {
        k - bias
    }
}

/// Converts a digit value into its basic code point.
#[inline]
fn encode_digit(d: u32) -> char {
    debug_assert!(d < BASE, "[precondition] digit must be less than the base");
    let b = if d < 26 { b'a' + d as u8 } else { b'0' + (d - 26) as u8 };
    char::from(b)
}

/// Converts a basic code point into its digit value.
#[inline]
fn decode_digit(c: char) -> Option<u32> {
    match c {
        'a'..='z' => Some(u32::from(c) - u32::from('a')),
        'A'..='Z' => Some(u32::from(c) - u32::from('A')),
        '0'..='9' => Some(u32::from(c) - u32::from('0') + 26),
        _ => None,
    }
}

/// Encodes a Unicode string into punycode (without the `xn--` prefix).
pub fn encode(input: &str) -> Result<String, Error> {
    let code_points: Vec<u32> = input.chars().map(u32::from).collect();
    let mut output: String = input.chars().filter(char::is_ascii).collect();
    let basic_len = output.len() as u32;
    if basic_len > 0 {
        output.push('-');
    }
    let total = code_points.len() as u32;

    let mut n = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut handled = basic_len;
    while handled < total {
        let m = code_points
            .iter()
            .copied()
            .filter(|&c| c >= n)
            .min()
            .ok_or(ErrorKind::InvalidInput)?;
        delta = (m - n)
            .checked_mul(handled + 1)
            .and_then(|v| v.checked_add(delta))
            .ok_or(ErrorKind::Overflow)?;
        n = m;
        for &c in &code_points {
            if c < n {
                delta = delta.checked_add(1).ok_or(ErrorKind::Overflow)?;
            }
            if c == n {
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = threshold(k, bias);
                    if q < t {
                        break;
                    }
                    output.push(encode_digit(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.push(encode_digit(q));
                bias = adapt(delta, handled + 1, handled == basic_len);
                delta = 0;
                handled += 1;
            }
        }
        delta = delta.checked_add(1).ok_or(ErrorKind::Overflow)?;
        n = n.checked_add(1).ok_or(ErrorKind::Overflow)?;
    }
    Ok(output)
}

/// Decodes punycode (without the `xn--` prefix) into a Unicode string.
pub fn decode(input: &str) -> Result<String, Error> {
    let (basic, extended) = match input.rfind('-') {
        Some(pos) => (&input[..pos], &input[(pos + 1)..]),
        None => ("", input),
    };
    if !basic.is_ascii() {
        return Err(ErrorKind::InvalidInput.into());
    }
    let mut output: Vec<char> = basic.chars().collect();

    let mut n = INITIAL_N;
    let mut i: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut digits = extended.chars();
    while !digits.as_str().is_empty() {
        let old_i = i;
        let mut w: u32 = 1;
        let mut k = BASE;
        loop {
            let digit = digits
                .next()
                .and_then(decode_digit)
                .ok_or(ErrorKind::InvalidInput)?;
            i = digit
                .checked_mul(w)
                .and_then(|v| v.checked_add(i))
                .ok_or(ErrorKind::Overflow)?;
            let t = threshold(k, bias);
            if digit < t {
                break;
            }
            w = w.checked_mul(BASE - t).ok_or(ErrorKind::Overflow)?;
            k += BASE;
        }
        let len = output.len() as u32 + 1;
        bias = adapt(i - old_i, len, old_i == 0);
        n = n.checked_add(i / len).ok_or(ErrorKind::Overflow)?;
        i %= len;
        let c = char::from_u32(n).ok_or(ErrorKind::InvalidInput)?;
        output.insert(i as usize, c);
        i += 1;
    }
    Ok(output.into_iter().collect())
}

/// Converts a domain name into its ASCII form.
///
/// Labels with non-ASCII characters are lowercased and punycode-encoded
/// with the `xn--` prefix. ASCII labels are lowercased.
pub fn to_ascii(domain: &str) -> Result<String, Error> {
    let mut buf = String::with_capacity(domain.len());
    for (i, label) in domain.split('.').enumerate() {
        if i != 0 {
            buf.push('.');
        }
        if label.is_ascii() {
            buf.push_str(&label.to_ascii_lowercase());
        } else {
            buf.push_str(ACE_PREFIX);
            buf.push_str(&encode(&label.to_lowercase())?);
        }
    }
    Ok(buf)
}

/// Converts a domain name into its Unicode form.
///
/// Labels that cannot be decoded are kept as is.
#[must_use]
pub fn to_unicode(domain: &str) -> String {
    let mut buf = String::with_capacity(domain.len());
    for (i, label) in domain.split('.').enumerate() {
        if i != 0 {
            buf.push('.');
        }
        let encoded = label
            .get(..ACE_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(ACE_PREFIX))
            .map(|_| &label[ACE_PREFIX.len()..]);
        match encoded.map(decode) {
            Some(Ok(decoded)) => buf.push_str(&decoded),
            _ => buf.push_str(label),
        }
    }
    buf
}
