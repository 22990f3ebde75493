//! Path scanner and segment normalization.
//!
//! # Grammar Reference
//!
//! ```abnf
//! path-abempty  = *( "/" segment )
//! path-absolute = "/" [ segment-nz *( "/" segment ) ]
//! path-rootless = segment-nz *( "/" segment )
//! path-noscheme = segment-nz-nc *( "/" segment )
//! segment       = *pchar
//! segment-nz    = 1*pchar
//! segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )
//! ```

use crate::chars::{is_pchar, is_pchar_nc};
use crate::cursor::Cursor;
use crate::error::UriErrorKind;
use crate::flags::{DecomposeFlag, DecomposeFlags};

/// Which path production applies, determined by what precedes the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathKind {
    /// After an authority: empty or starting with `/`
    AbEmpty,
    /// After a scheme without authority
    Rootless,
    /// Relative reference without scheme or authority
    NoScheme,
}

/// Scans the path up to `?`, `#` or the end of input.
///
/// Returns the raw path text and, when `split_path_elements` is set, its
/// percent-decoded segments. Segments are scanned for validity either way.
pub(crate) fn parse_path(
    cursor: &mut Cursor<'_>,
    kind: PathKind,
    flags: DecomposeFlags,
) -> Result<(String, Vec<String>), UriErrorKind> {
    let path = cursor.eat_until(|c| c == b'?' || c == b'#');

    if kind == PathKind::AbEmpty && !path.is_empty() && !path.starts_with('/') {
        return Err(UriErrorKind::PathMalformed);
    }

    let segments = scan_segments(path, kind)?;
    let elements = if flags.contains(DecomposeFlag::SplitPathElements) {
        segments
    } else {
        Vec::new()
    };

    Ok((path.to_string(), elements))
}

/// Splits a raw path into percent-decoded segments, trimming a single
/// leading and a single trailing `/`.
pub(crate) fn split_segments(path: &str) -> Result<Vec<String>, UriErrorKind> {
    scan_segments(path, PathKind::AbEmpty)
}

fn scan_segments(path: &str, kind: PathKind) -> Result<Vec<String>, UriErrorKind> {
    let rooted = path.starts_with('/');
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let mut segments = Vec::new();
    if trimmed.is_empty() {
        return Ok(segments);
    }

    let mut cursor = Cursor::new(trimmed);
    let first = match kind {
        PathKind::NoScheme if !rooted => parse_segment_nz_nc(&mut cursor)?,
        PathKind::Rootless if !rooted => parse_segment_nz(&mut cursor)?,
        _ => parse_segment(&mut cursor)?,
    };
    segments.push(first);

    while cursor.eat(b'/') {
        segments.push(parse_segment(&mut cursor)?);
    }

    if !cursor.is_empty() {
        return Err(UriErrorKind::PathMalformed);
    }

    Ok(segments)
}

fn parse_segment(cursor: &mut Cursor<'_>) -> Result<String, UriErrorKind> {
    cursor.eat_with_pct(is_pchar)
}

fn parse_segment_nz(cursor: &mut Cursor<'_>) -> Result<String, UriErrorKind> {
    let segment = cursor.eat_with_pct(is_pchar)?;
    if segment.is_empty() {
        return Err(UriErrorKind::PathElementMalformed);
    }
    Ok(segment)
}

fn parse_segment_nz_nc(cursor: &mut Cursor<'_>) -> Result<String, UriErrorKind> {
    let segment = cursor.eat_with_pct(is_pchar_nc)?;
    if segment.is_empty() {
        return Err(UriErrorKind::PathElementMalformed);
    }
    Ok(segment)
}

/// Resolves `.` and `..` segments.
///
/// `.` is dropped, `..` removes the last kept segment, anything else is
/// kept. A `..` with nothing left to remove is dropped without error, so
/// `/../a` resolves to `["a"]`.
///
/// # Examples
///
/// ```
/// use uri_decompose::normalize_segments;
///
/// assert_eq!(normalize_segments(&["a", ".", "b", "..", "c"]), vec!["a", "c"]);
/// assert_eq!(normalize_segments(&["..", "a"]), vec!["a"]);
/// ```
#[must_use]
pub fn normalize_segments<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment.as_ref() {
            "." => {}
            ".." => {
                result.pop();
            }
            other => result.push(other.to_string()),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str, kind: PathKind) -> Result<(String, Vec<String>), UriErrorKind> {
        let mut cursor = Cursor::new(input);
        parse_path(&mut cursor, kind, DecomposeFlags::all())
    }

    #[test]
    fn stops_at_query_and_fragment() {
        let mut cursor = Cursor::new("/a/b?q#f");
        let (path, elements) =
            parse_path(&mut cursor, PathKind::AbEmpty, DecomposeFlags::all()).unwrap();
        assert_eq!(path, "/a/b");
        assert_eq!(elements, vec!["a", "b"]);
        assert_eq!(cursor.rest(), "?q#f");
    }

    #[test]
    fn segments_are_percent_decoded() {
        let (path, elements) = parse("/a%20b/c%2Fd", PathKind::AbEmpty).unwrap();
        assert_eq!(path, "/a%20b/c%2Fd");
        assert_eq!(elements, vec!["a b", "c/d"]);
    }

    #[test]
    fn single_slashes_trimmed_inner_empty_kept() {
        let (_, elements) = parse("/a//b/", PathKind::AbEmpty).unwrap();
        assert_eq!(elements, vec!["a", "", "b"]);
        let (_, elements) = parse("/", PathKind::AbEmpty).unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn no_split_keeps_raw_only() {
        let mut cursor = Cursor::new("/a/b");
        let (path, elements) =
            parse_path(&mut cursor, PathKind::AbEmpty, DecomposeFlags::empty()).unwrap();
        assert_eq!(path, "/a/b");
        assert!(elements.is_empty());
    }

    #[test]
    fn no_split_still_validates() {
        let mut cursor = Cursor::new("/a b");
        assert_eq!(
            parse_path(&mut cursor, PathKind::AbEmpty, DecomposeFlags::empty()),
            Err(UriErrorKind::PathMalformed)
        );
    }

    #[test]
    fn rootless_path_allows_colon() {
        let (_, elements) = parse("isbn:0451450523", PathKind::Rootless).unwrap();
        assert_eq!(elements, vec!["isbn:0451450523"]);
    }

    #[test]
    fn noscheme_first_segment_rejects_colon() {
        assert_eq!(
            parse("a:b/c", PathKind::NoScheme),
            Err(UriErrorKind::PathMalformed)
        );
        let (_, elements) = parse("a/b:c", PathKind::NoScheme).unwrap();
        assert_eq!(elements, vec!["a", "b:c"]);
    }

    #[test]
    fn noscheme_first_segment_must_be_non_empty() {
        assert_eq!(
            parse(":b", PathKind::NoScheme),
            Err(UriErrorKind::PathElementMalformed)
        );
    }

    #[test]
    fn bad_escape_in_segment() {
        assert_eq!(
            parse("/a%zz", PathKind::AbEmpty),
            Err(UriErrorKind::InvalidPercentEncoding)
        );
    }

    #[test]
    fn normalize_dot_segments() {
        assert_eq!(
            normalize_segments(&["a", ".", "b", "..", "c"]),
            vec!["a", "c"]
        );
    }

    #[test]
    fn normalize_is_lenient_at_root() {
        assert_eq!(normalize_segments(&["..", "a"]), vec!["a"]);
        assert_eq!(normalize_segments(&["..", ".."]), Vec::<String>::new());
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_segments(&["a", "..", "b", ".", "c", ".."]);
        assert_eq!(normalize_segments(once.as_slice()), once);
    }
}
