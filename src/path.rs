//! Path operations.
//!
//! # Examples
//!
//! ```
//! use urikit::path::{common_path, normalize_path};
//!
//! assert_eq!(normalize_path("/a/b/../../c"), "/c");
//! assert_eq!(normalize_path("a/./b/"), "a/b/");
//! assert_eq!(normalize_path("../a/../../b"), "../b");
//! assert_eq!(common_path("/a/b/c", "/a/b/x"), "/a/b/");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::uri::Uri;

/// Resolves dot segments and collapses doubled slashes.
///
/// A path not starting with `/` is resolved as if it did. If
/// `restore_relative` is true, the leading `/` is removed again afterwards
/// and the leading `..` segments that had nothing to consume are restored.
/// Otherwise the result of a relative input starts with `/`.
#[must_use]
pub(crate) fn remove_dot_segments(path: &str, restore_relative: bool) -> String {
    let was_relative = !path.starts_with('/');
    let rest = path.strip_prefix('/').unwrap_or(path);

    // A path ending with a dot segment refers to a directory.
    let mut segments: Vec<&str> = rest.split('/').collect();
    if matches!(segments.last(), Some(&"." | &"..")) {
        segments.push("");
    }
    let last = segments.len() - 1;
    let segments = segments
        .into_iter()
        .enumerate()
        .filter(|&(i, seg)| seg != "." && (i == last || !seg.is_empty()))
        .map(|(_, seg)| seg);

    let mut leading_parents = 0;
    let mut still_leading = true;
    let mut stack: Vec<&str> = Vec::new();
    for seg in segments {
        if seg == ".." {
            if still_leading {
                leading_parents += 1;
            }
            stack.pop();
        } else {
            still_leading = false;
            stack.push(seg);
        }
    }

    let mut buf = String::with_capacity(path.len() + 1);
    if was_relative && restore_relative {
        for _ in 0..leading_parents {
            buf.push_str("../");
        }
    } else {
        buf.push('/');
    }
    for (i, seg) in stack.iter().enumerate() {
        if i != 0 {
            buf.push('/');
        }
        buf.push_str(seg);
    }
    buf
}

/// Resolves dot segments of a path.
///
/// Relative paths stay relative, and leading `..` segments which cannot be
/// resolved are kept. An empty path stays empty.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return path.into();
    }
    remove_dot_segments(path, true)
}

/// Returns the longest common prefix of two paths ending at a `/`.
///
/// The returned string is a prefix of `one`.
#[must_use]
pub fn common_path<'a>(one: &'a str, two: &str) -> &'a str {
    let (a, b) = (one.as_bytes(), two.as_bytes());
    let len = a.len().min(b.len());
    let pos = match a[..len].iter().zip(&b[..len]).position(|(x, y)| x != y) {
        Some(mismatch) => mismatch.checked_sub(1),
        None => Some(len),
    };
    let pos = match pos {
        Some(pos) if pos >= 1 => pos,
        _ => {
            let both_root = a.first() == Some(&b'/') && b.first() == Some(&b'/');
            return if both_root { "/" } else { "" };
        }
    };
    let pos = if a.get(pos) == Some(&b'/') && b.get(pos) == Some(&b'/') {
        pos
    } else {
        match a[..pos].iter().rposition(|&c| c == b'/') {
            Some(slash) => slash,
            None => return "",
        }
    };
    &one[..=pos]
}

/// Returns the last segment of a path.
#[must_use]
pub fn filename_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[(pos + 1)..],
        None => path,
    }
}

/// Returns the path with the last segment and its separator removed.
///
/// `has_host` decides the result for paths without a directory part: `/`
/// when there is a host, empty otherwise.
#[must_use]
pub fn directory_of(path: &str, has_host: bool) -> &str {
    if path == "/" {
        return path;
    }
    let dir = path.rfind('/').map_or("", |pos| &path[..pos]);
    if dir.is_empty() && has_host {
        "/"
    } else {
        dir
    }
}

/// Returns the suffix of the last path segment, without the dot.
///
/// The suffix must consist of alphanumerics and `%`.
#[must_use]
pub fn suffix_of(path: &str) -> &str {
    let filename = filename_of(path);
    let Some(pos) = filename.rfind('.') else {
        return "";
    };
    let suffix = &filename[(pos + 1)..];
    let valid = !suffix.is_empty()
        && suffix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'%');
    if valid {
        suffix
    } else {
        ""
    }
}

/// Trims leading and trailing slashes.
#[inline]
#[must_use]
pub(crate) fn trim_slashes(s: &str) -> &str {
    s.trim_matches('/')
}

/// Builds the segment list of a path from new values.
///
/// Only a trailing empty segment is kept. Slashes around values are trimmed.
pub(crate) fn collect_segments<'a, I>(values: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segments: Vec<&str> = Vec::new();
    for value in values {
        let last_empty = segments.last().map_or(true, |last| last.is_empty());
        if value.is_empty() && last_empty {
            continue;
        }
        if segments.last().map_or(false, |last| last.is_empty()) {
            segments.pop();
        }
        segments.push(trim_slashes(value));
    }
    segments
}

/// Joins the paths of several URI references into a new relative reference.
///
/// The result is absolute when the first input has an empty or absolute
/// path. Empty segments are dropped and the result is normalized.
///
/// # Examples
///
/// ```
/// use urikit::path::join_paths;
///
/// assert_eq!(join_paths(&["/a/b", "c/d/", "../e"]).as_str(), "/a/b/c/e");
/// assert_eq!(join_paths(&["a", "", "b/"]).as_str(), "a/b/");
/// assert_eq!(join_paths(&["", ""]).as_str(), "");
/// ```
#[must_use]
pub fn join_paths(inputs: &[&str]) -> Uri {
    let uris: Vec<Uri> = inputs.iter().map(|input| Uri::parse(input)).collect();
    let all: Vec<&str> = uris.iter().flat_map(|uri| uri.segments()).collect();
    if all.iter().all(|seg| seg.is_empty()) {
        return Uri::parse("");
    }
    let joined = collect_segments(all).join("/");

    let first_path = uris.first().map_or("", |uri| uri.path());
    let mut uri = Uri::parse("");
    if first_path.is_empty() || first_path.starts_with('/') {
        uri.set_path(&alloc::format!("/{joined}"));
    } else {
        uri.set_path(&joined);
    }
    uri.normalize();
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pairs of input and normalized paths.
    const NORMALIZE_CASES: &[(&str, &str)] = &[
        ("/a/b/../../c", "/c"),
        ("a/./b/", "a/b/"),
        ("/a/./b/.", "/a/b/"),
        ("/a/b/..", "/a/"),
        ("/../a", "/a"),
        ("/a//b///c", "/a/b/c"),
        ("/a/b/", "/a/b/"),
        ("../a", "../a"),
        ("../../a/b/../c", "../../a/c"),
        ("a/../../b", "b"),
        ("./", ""),
        (".", ""),
        ("..", "../"),
        ("foo/bar/..", "foo/"),
        ("/.", "/"),
    ];

    #[test]
    fn normalize() {
        for (input, expected) in NORMALIZE_CASES {
            assert_eq!(normalize_path(input), *expected, "input={input:?}");
        }
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn keep_absolute_form() {
        assert_eq!(remove_dot_segments("../a", false), "/a");
        assert_eq!(remove_dot_segments("a/b", false), "/a/b");
    }

    /// Triples of two paths and their common path.
    const COMMON_CASES: &[(&str, &str, &str)] = &[
        ("/a/b/c", "/a/b/x", "/a/b/"),
        ("/a/b/c", "/a/bc", "/a/"),
        ("/a/b", "/a/b/c", "/a/"),
        ("/a/b/", "/a/b/c", "/a/b/"),
        ("/a", "/b", "/"),
        ("a/b", "a/c", "a/"),
        ("a", "b", ""),
        ("/x", "y", ""),
        ("", "", ""),
    ];

    #[test]
    fn common() {
        for (one, two, expected) in COMMON_CASES {
            assert_eq!(common_path(one, two), *expected, "one={one:?}, two={two:?}");
        }
    }

    #[test]
    fn common_multibyte() {
        assert_eq!(common_path("/a/\u{00E4}", "/a/\u{00F6}"), "/a/");
    }

    #[test]
    fn file_parts() {
        assert_eq!(filename_of("/a/b.html"), "b.html");
        assert_eq!(filename_of("/a/"), "");
        assert_eq!(filename_of("b"), "b");
        assert_eq!(directory_of("/a/b.html", true), "/a");
        assert_eq!(directory_of("/a", true), "/");
        assert_eq!(directory_of("/a", false), "");
        assert_eq!(directory_of("", true), "/");
        assert_eq!(directory_of("", false), "");
        assert_eq!(directory_of("/", false), "/");
        assert_eq!(suffix_of("/a/b.tar.gz"), "gz");
        assert_eq!(suffix_of("/a.b/c"), "");
        assert_eq!(suffix_of("/a/b.c-d"), "");
        assert_eq!(suffix_of("/a/b."), "");
    }

    #[test]
    fn segment_collection() {
        assert_eq!(collect_segments(["a", "", "b"]), ["a", "b"]);
        assert_eq!(collect_segments(["", "", "a"]), ["a"]);
        assert_eq!(collect_segments(["a", "b", ""]), ["a", "b", ""]);
        assert_eq!(collect_segments(["/a/", "b/", ""]), ["a", "b", ""]);
    }
}
