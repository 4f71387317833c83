//! Functions for common string operations.

/// Returns the position of the first occurrence of the given byte.
#[cfg(feature = "memchr")]
#[inline]
#[must_use]
pub(crate) fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    memchr::memchr(needle, haystack)
}

/// Returns the position of the first occurrence of the given byte.
#[cfg(not(feature = "memchr"))]
#[inline]
#[must_use]
pub(crate) fn find(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == needle)
}

/// Returns the position of the last occurrence of the given byte.
#[cfg(feature = "memchr")]
#[inline]
#[must_use]
pub(crate) fn rfind(haystack: &[u8], needle: u8) -> Option<usize> {
    memchr::memrchr(needle, haystack)
}

/// Returns the position of the last occurrence of the given byte.
#[cfg(not(feature = "memchr"))]
#[inline]
#[must_use]
pub(crate) fn rfind(haystack: &[u8], needle: u8) -> Option<usize> {
    haystack.iter().rposition(|&b| b == needle)
}

/// Splits the string at the first occurrence of the given ASCII byte.
///
/// The needle is included in neither of the returned halves.
#[inline]
#[must_use]
pub(crate) fn find_split_hole(s: &str, needle: u8) -> Option<(&str, &str)> {
    debug_assert!(needle.is_ascii(), "[precondition] needle must be ASCII");
    find(s.as_bytes(), needle).map(|pos| (&s[..pos], &s[(pos + 1)..]))
}

/// Returns `true` if the string starts with `%XX` where `X` is a hexdigit.
#[inline]
#[must_use]
pub(crate) fn starts_with_pct_triplet(s: &[u8]) -> bool {
    matches!(s, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

/// Decodes two hexdigits into a byte.
///
/// # Precondition
///
/// Both bytes should be ASCII hexdigits.
#[must_use]
pub(crate) fn hexdigits_to_byte(hi: u8, lo: u8) -> u8 {
    /// Converts a single hexdigit.
    fn hex(b: u8) -> u8 {
        match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => unreachable!("[precondition] the byte should be a hexdigit"),
        }
    }
    (hex(hi) << 4) | hex(lo)
}

/// Converts an empty string into `None`.
#[inline]
#[must_use]
pub(crate) fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_holes() {
        assert_eq!(find_split_hole("a#b#c", b'#'), Some(("a", "b#c")));
        assert_eq!(rfind(b"a@b@c", b'@'), Some(3));
        assert_eq!(find_split_hole("abc", b'#'), None);
    }

    #[test]
    fn triplets() {
        assert!(starts_with_pct_triplet(b"%2Fx"));
        assert!(!starts_with_pct_triplet(b"%2"));
        assert!(!starts_with_pct_triplet(b"%zz"));
        assert_eq!(hexdigits_to_byte(b'2', b'f'), 0x2F);
        assert_eq!(hexdigits_to_byte(b'E', b'4'), 0xE4);
    }
}
