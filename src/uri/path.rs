//! Path accessors.
//!
//! For URNs the path is split into segments at `:`, and the directory,
//! filename, and suffix are empty.

use alloc::string::String;
use alloc::vec::Vec;

use crate::path::{collect_segments, directory_of, filename_of, suffix_of, trim_slashes};
use crate::percent_encoding::{
    decode, decode_path, decode_urn_path, encode, recode_path, recode_urn_path,
};

use super::Uri;

impl Uri {
    /// Returns the raw path.
    ///
    /// The path of a value with an authority may be empty; see
    /// [`pathname`][`Self::pathname`].
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.parts.path
    }

    /// Returns the path, or `/` if the path is empty and there is a hostname.
    #[must_use]
    pub fn pathname(&self) -> &str {
        if self.parts.path.is_empty() && self.parts.hostname.is_some() {
            "/"
        } else {
            &self.parts.path
        }
    }

    /// Returns the path with each segment percent-decoded.
    ///
    /// Escaped separators stay escaped.
    #[must_use]
    pub fn path_decoded(&self) -> String {
        if self.parts.urn {
            decode_urn_path(&self.parts.path, self.charset())
        } else {
            decode_path(self.pathname(), self.charset())
        }
    }

    /// Sets the path. Each segment is percent-encoded as needed.
    ///
    /// An empty path becomes `/` if there is a hostname.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        let charset = self.charset();
        let path = if self.parts.urn {
            recode_urn_path(path, charset)
        } else if path.is_empty() {
            if self.parts.hostname.is_some() {
                "/".into()
            } else {
                String::new()
            }
        } else {
            recode_path(path, charset)
        };
        self.update(|parts| parts.path = path)
    }

    /// Sets the path. This is the same as [`set_path`][`Self::set_path`].
    #[inline]
    pub fn set_pathname(&mut self, path: &str) -> &mut Self {
        self.set_path(path)
    }

    /// Returns the path without the filename and its preceding slash.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a/b/c.html");
    /// assert_eq!(uri.directory(), "/a/b");
    /// assert_eq!(uri.filename(), "c.html");
    /// assert_eq!(uri.suffix(), "html");
    /// ```
    #[must_use]
    pub fn directory(&self) -> &str {
        if self.parts.urn || (self.parts.path.is_empty() && self.parts.hostname.is_none()) {
            return "";
        }
        directory_of(&self.parts.path, self.parts.hostname.is_some())
    }

    /// Replaces the directory, keeping the filename.
    ///
    /// Nothing happens for a URN.
    pub fn set_directory(&mut self, directory: &str) -> &mut Self {
        if self.parts.urn {
            return self;
        }
        let mut dir = String::from(directory);
        if !self.is_relative() && !dir.starts_with('/') {
            dir.insert(0, '/');
        }
        if !dir.is_empty() && !dir.ends_with('/') {
            dir.push('/');
        }
        let mut path = recode_path(&dir, self.charset());
        path.push_str(self.filename());
        self.update(|parts| parts.path = path)
    }

    /// Returns the last path segment.
    #[must_use]
    pub fn filename(&self) -> &str {
        if self.parts.urn {
            return "";
        }
        filename_of(&self.parts.path)
    }

    /// Replaces the last path segment.
    ///
    /// A filename containing `/` changes the directory, and the path is then
    /// normalized. Nothing happens for a URN.
    pub fn set_filename(&mut self, filename: &str) -> &mut Self {
        if self.parts.urn {
            return self;
        }
        let filename = filename.strip_prefix('/').unwrap_or(filename);
        let keep = self.parts.path.len() - self.filename().len();
        let mut path = String::from(&self.parts.path[..keep]);
        path.push_str(&recode_path(filename, self.charset()));
        self.update(|parts| parts.path = path);
        if filename.contains('/') {
            self.normalize_path();
        }
        self
    }

    /// Returns the suffix of the filename, without the dot.
    ///
    /// The suffix is empty unless it consists of alphanumerics and `%`.
    #[must_use]
    pub fn suffix(&self) -> &str {
        if self.parts.urn {
            return "";
        }
        suffix_of(&self.parts.path)
    }

    /// Replaces the suffix of the filename.
    ///
    /// A leading dot is trimmed. An empty value removes the suffix and its dot.
    /// Nothing happens for a URN.
    pub fn set_suffix(&mut self, suffix: &str) -> &mut Self {
        if self.parts.urn {
            return self;
        }
        let suffix = suffix.strip_prefix('.').unwrap_or(suffix);
        let current = self.suffix().len();
        let mut path = String::from(self.parts.path.as_str());
        if current == 0 {
            if suffix.is_empty() {
                return self;
            }
            path.push('.');
        } else if suffix.is_empty() {
            path.truncate(path.len() - current - 1);
        } else {
            path.truncate(path.len() - current);
        }
        path.push_str(&recode_path(suffix, self.charset()));
        self.update(|parts| parts.path = path)
    }

    /// Returns the segment separator: `:` for URNs and `/` otherwise.
    #[inline]
    fn separator(&self) -> char {
        if self.parts.urn {
            ':'
        } else {
            '/'
        }
    }

    /// Returns the path segments.
    ///
    /// The empty segment before the leading `/` of an absolute path is not
    /// included.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a/b/");
    /// assert_eq!(uri.segments(), ["a", "b", ""]);
    /// assert_eq!(Uri::parse("urn:isbn:123").segments(), ["isbn", "123"]);
    /// ```
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        let path = self.parts.path.as_str();
        let mut segments: Vec<&str> = path.split(self.separator()).collect();
        if path.starts_with('/') {
            segments.remove(0);
        }
        segments
    }

    /// Returns the segment at the index.
    ///
    /// A negative index counts from the end.
    #[must_use]
    pub fn segment(&self, index: isize) -> Option<&str> {
        let segments = self.segments();
        let index = resolve_index(index, segments.len());
        segments.get(index).copied()
    }

    /// Joins the segments into the path.
    fn assign_segments(&mut self, segments: &[&str], absolute: bool) -> &mut Self {
        let sep = self.separator();
        let mut path = String::new();
        if absolute {
            path.push(sep);
        }
        for (i, segment) in segments.iter().enumerate() {
            if i != 0 {
                path.push(sep);
            }
            path.push_str(segment);
        }
        self.set_path(&path)
    }

    /// Replaces the segment at the index, appending if it is out of range.
    ///
    /// `None` or an empty value removes the segment. Slashes around the
    /// value are trimmed.
    pub fn set_segment(&mut self, index: isize, value: Option<&str>) -> &mut Self {
        let absolute = self.parts.path.starts_with('/');
        let mut segments: Vec<String> = self.segments().into_iter().map(Into::into).collect();
        let index = resolve_index(index, segments.len());
        if index < segments.len() {
            match value.filter(|v| !v.is_empty()) {
                Some(value) => segments[index] = trim_slashes(value).into(),
                None => {
                    segments.remove(index);
                }
            }
        } else if let Some(value) = value {
            push_trimmed(&mut segments, value);
        } else {
            return self;
        }
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.assign_segments(&segments, absolute)
    }

    /// Appends a segment, replacing a trailing empty segment.
    pub fn push_segment(&mut self, value: &str) -> &mut Self {
        let absolute = self.parts.path.starts_with('/');
        let mut segments: Vec<String> = self.segments().into_iter().map(Into::into).collect();
        push_trimmed(&mut segments, value);
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.assign_segments(&segments, absolute)
    }

    /// Replaces all segments.
    ///
    /// Empty values are dropped, except at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use urikit::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/old");
    /// uri.set_segments(&["a", "", "b c", ""]);
    /// assert_eq!(uri.as_str(), "http://example.com/a/b%20c/");
    /// ```
    pub fn set_segments(&mut self, values: &[&str]) -> &mut Self {
        let absolute = self.parts.path.starts_with('/');
        let segments = collect_segments(values.iter().copied());
        self.assign_segments(&segments, absolute)
    }

    /// Decodes a segment, falling back to the raw string.
    fn decode_segment(&self, segment: &str) -> String {
        decode(segment, self.charset()).unwrap_or_else(|_| segment.into())
    }

    /// Returns the percent-decoded segments.
    #[must_use]
    pub fn segments_decoded(&self) -> Vec<String> {
        self.segments()
            .into_iter()
            .map(|segment| self.decode_segment(segment))
            .collect()
    }

    /// Returns the percent-decoded segment at the index.
    #[must_use]
    pub fn segment_decoded(&self, index: isize) -> Option<String> {
        self.segment(index).map(|segment| self.decode_segment(segment))
    }

    /// Replaces the segment at the index with the encoded value.
    ///
    /// See [`set_segment`][`Self::set_segment`].
    pub fn set_segment_decoded(&mut self, index: isize, value: Option<&str>) -> &mut Self {
        let encoded = value.map(|value| encode(value, self.charset()));
        self.set_segment(index, encoded.as_deref())
    }

    /// Appends the encoded value as a segment.
    pub fn push_segment_decoded(&mut self, value: &str) -> &mut Self {
        let encoded = encode(value, self.charset());
        self.push_segment(&encoded)
    }

    /// Replaces all segments with the encoded values.
    pub fn set_segments_decoded(&mut self, values: &[&str]) -> &mut Self {
        let encoded: Vec<String> = values
            .iter()
            .map(|value| encode(value, self.charset()))
            .collect();
        let encoded: Vec<&str> = encoded.iter().map(String::as_str).collect();
        self.set_segments(&encoded)
    }
}

/// Converts a possibly negative index into a position.
fn resolve_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs()
    }
}

/// Appends a value, replacing a trailing empty segment.
fn push_trimmed(segments: &mut Vec<String>, value: &str) {
    let value = trim_slashes(value).into();
    match segments.last_mut() {
        Some(last) if last.is_empty() => *last = value,
        _ => segments.push(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathname_defaults_to_root() {
        let uri = Uri::parse("http://example.com");
        assert_eq!(uri.path(), "");
        assert_eq!(uri.pathname(), "/");
        assert_eq!(uri.as_str(), "http://example.com/");
        assert_eq!(Uri::parse("").pathname(), "");
    }

    #[test]
    fn set_path_encodes() {
        let mut uri = Uri::parse("http://example.com/");
        uri.set_path("/a b/c%7e/d:e");
        assert_eq!(uri.path(), "/a%20b/c~/d:e");
        assert_eq!(uri.path_decoded(), "/a b/c~/d:e");
        uri.set_path("");
        assert_eq!(uri.path(), "/");

        let mut uri = Uri::parse("urn:x:y");
        uri.set_path("a b:c");
        assert_eq!(uri.as_str(), "urn:a%20b:c");
    }

    #[test]
    fn directories() {
        let mut uri = Uri::parse("http://example.com/a/b/c.html");
        uri.set_directory("x/y");
        assert_eq!(uri.path(), "/x/y/c.html");
        uri.set_directory("");
        assert_eq!(uri.path(), "/c.html");

        let mut uri = Uri::parse("a/b/c.html");
        assert_eq!(uri.directory(), "a/b");
        uri.set_directory("d");
        assert_eq!(uri.path(), "d/c.html");
        assert_eq!(Uri::parse("file.txt").directory(), "");
        assert_eq!(Uri::parse("http://h").directory(), "/");
    }

    #[test]
    fn filenames() {
        let mut uri = Uri::parse("http://example.com/a/b.html");
        uri.set_filename("c d.txt");
        assert_eq!(uri.path(), "/a/c%20d.txt");
        uri.set_filename("../e.txt");
        assert_eq!(uri.path(), "/e.txt");
        uri.set_filename("");
        assert_eq!(uri.path(), "/");
        assert_eq!(uri.filename(), "");
    }

    #[test]
    fn suffixes() {
        let mut uri = Uri::parse("/a/b.html");
        uri.set_suffix(".txt");
        assert_eq!(uri.path(), "/a/b.txt");
        uri.set_suffix("");
        assert_eq!(uri.path(), "/a/b");
        uri.set_suffix("gz");
        assert_eq!(uri.path(), "/a/b.gz");
        assert_eq!(Uri::parse("urn:a.txt").suffix(), "");
    }

    #[test]
    fn segment_access() {
        let uri = Uri::parse("/a/b/c");
        assert_eq!(uri.segment(0), Some("a"));
        assert_eq!(uri.segment(-1), Some("c"));
        assert_eq!(uri.segment(-5), Some("a"));
        assert_eq!(uri.segment(3), None);
        assert_eq!(Uri::parse("a/b").segments(), ["a", "b"]);
    }

    #[test]
    fn segment_mutation() {
        let mut uri = Uri::parse("/a/b/c");
        uri.set_segment(1, Some("x"));
        assert_eq!(uri.path(), "/a/x/c");
        uri.set_segment(-1, None);
        assert_eq!(uri.path(), "/a/x");
        uri.set_segment(5, Some("/y/"));
        assert_eq!(uri.path(), "/a/x/y");
        uri.set_segment(5, None);
        assert_eq!(uri.path(), "/a/x/y");

        let mut uri = Uri::parse("/a/");
        uri.push_segment("b");
        assert_eq!(uri.path(), "/a/b");

        let mut uri = Uri::parse("urn:isbn:1");
        uri.set_segment(1, Some("2"));
        assert_eq!(uri.as_str(), "urn:isbn:2");
    }

    #[test]
    fn decoded_segments() {
        let mut uri = Uri::parse("/a%20b/c%2Fd/%zz");
        assert_eq!(uri.segments_decoded(), ["a b", "c/d", "%zz"]);
        assert_eq!(uri.segment_decoded(0).as_deref(), Some("a b"));
        uri.set_segment_decoded(0, Some("x/y"));
        assert_eq!(uri.path(), "/x%2Fy/c%2Fd/%zz");
        uri.push_segment_decoded("e f");
        assert_eq!(uri.path(), "/x%2Fy/c%2Fd/%zz/e%20f");
        uri.set_segments_decoded(&["1 2", "3"]);
        assert_eq!(uri.path(), "/1%202/3");
    }
}
