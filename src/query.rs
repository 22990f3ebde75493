//! Query scanner and key/value splitting.

use crate::chars::is_query_or_fragment;
use crate::cursor::Cursor;
use crate::error::UriErrorKind;
use crate::pct::percent_decode;

/// Separates query elements.
pub const QUERY_DELIMITER: char = '&';

/// Separates a key from its value inside a query element.
pub const KEY_DELIMITER: char = '=';

/// Scans the query after an already consumed `?`, up to `#` or the end of
/// input.
///
/// Returns the raw query including its leading `?`. Escapes are checked but
/// the text is kept encoded.
pub(crate) fn parse_query(cursor: &mut Cursor<'_>) -> Result<String, UriErrorKind> {
    let start = cursor.pos();
    cursor.eat_with_pct(is_query_or_fragment)?;
    let raw = cursor.slice_from(start);

    if !cursor.is_empty() && cursor.peek() != Some(b'#') {
        return Err(UriErrorKind::QueryMalformed);
    }

    Ok(format!("?{raw}"))
}

/// Splits raw query text (without the leading `?`) into percent-decoded
/// key/value pairs.
///
/// Elements are separated by `&`, keys from values by the first `=`. A bare
/// key yields an empty value. Duplicate keys are kept in order; empty
/// elements (as in `a=1&&b=2`) are skipped. Splitting happens before
/// decoding, so `%26` and `%3D` never act as delimiters.
///
/// # Errors
///
/// Returns `InvalidPercentEncoding` if an element contains a bad escape.
///
/// # Examples
///
/// ```
/// use uri_decompose::split_query_elements;
///
/// let pairs = split_query_elements("a=1&b=&c").unwrap();
/// assert_eq!(
///     pairs,
///     vec![
///         ("a".to_string(), "1".to_string()),
///         ("b".to_string(), String::new()),
///         ("c".to_string(), String::new()),
///     ]
/// );
/// ```
pub fn split_query_elements(query: &str) -> Result<Vec<(String, String)>, UriErrorKind> {
    query
        .split(QUERY_DELIMITER)
        .filter(|element| !element.is_empty())
        .map(|element| {
            let (key, value) = element.split_once(KEY_DELIMITER).unwrap_or((element, ""));
            Ok((percent_decode(key)?, percent_decode(value)?))
        })
        .collect()
}
