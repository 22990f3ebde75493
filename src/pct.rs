//! Percent-encoding and decoding.

use std::fmt::Write as _;

use crate::error::UriErrorKind;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Value of an ASCII hex digit. Callers check `is_ascii_hexdigit` first.
pub(crate) const fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// Decodes every `%XX` escape in `input`, copying all other characters.
///
/// # Errors
///
/// Returns `InvalidPercentEncoding` if a `%` is not followed by two hex
/// digits or the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use uri_decompose::percent_decode;
///
/// assert_eq!(percent_decode("a%20b").unwrap(), "a b");
/// assert!(percent_decode("100%").is_err());
/// ```
pub fn percent_decode(input: &str) -> Result<String, UriErrorKind> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let [hi, lo, ..] = bytes[i + 1..] else {
                return Err(UriErrorKind::InvalidPercentEncoding);
            };
            if !(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()) {
                return Err(UriErrorKind::InvalidPercentEncoding);
            }
            decoded.push((hex_value(hi) << 4) | hex_value(lo));
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| UriErrorKind::InvalidPercentEncoding)
}

/// Percent-encodes every byte of `input` for which `keep` returns false.
///
/// Escapes use uppercase hex digits. Non-ASCII characters are encoded
/// byte by byte from their UTF-8 representation.
///
/// # Examples
///
/// ```
/// use uri_decompose::{chars, percent_encode};
///
/// assert_eq!(percent_encode("a b/c", chars::is_pchar), "a%20b%2Fc");
/// assert_eq!(percent_encode("é", chars::is_unreserved), "%C3%A9");
/// ```
#[must_use]
pub fn percent_encode(input: &str, keep: impl Fn(u8) -> bool) -> String {
    let mut encoded = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b.is_ascii() && keep(b) {
            encoded.push(b as char);
        } else {
            encoded.push('%');
            encoded.push(HEX_UPPER[usize::from(b >> 4)] as char);
            encoded.push(HEX_UPPER[usize::from(b & 0x0F)] as char);
        }
    }
    encoded
}

/// Re-encodes already percent-encoded text so that every byte outside
/// `keep` is escaped, leaving existing escapes untouched and uppercasing
/// their hex digits.
pub(crate) fn normalize_encoded(input: &str, keep: impl Fn(u8) -> bool) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let escape = bytes
            .get(i + 1..i + 3)
            .filter(|pair| b == b'%' && pair.iter().all(u8::is_ascii_hexdigit));
        if let Some(pair) = escape {
            out.push('%');
            out.push(pair[0].to_ascii_uppercase() as char);
            out.push(pair[1].to_ascii_uppercase() as char);
            i += 3;
        } else if b.is_ascii() && keep(b) {
            out.push(b as char);
            i += 1;
        } else {
            let _ = write!(out, "%{b:02X}");
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chars::{is_pchar, is_query_or_fragment, is_unreserved};

    #[test]
    fn decode_plain_text_is_unchanged() {
        assert_eq!(percent_decode("abc/def").unwrap(), "abc/def");
    }

    #[test]
    fn decode_mixed_case_hex() {
        assert_eq!(percent_decode("%3d%3D").unwrap(), "==");
    }

    #[test]
    fn decode_rejects_short_escape() {
        assert_eq!(
            percent_decode("abc%2"),
            Err(UriErrorKind::InvalidPercentEncoding)
        );
    }

    #[test]
    fn encode_keeps_class_members() {
        assert_eq!(percent_encode("a:b@c", is_pchar), "a:b@c");
        assert_eq!(percent_encode("a:b", is_unreserved), "a%3Ab");
    }

    #[test]
    fn encode_then_decode_restores_text() {
        let text = "key=value & more/ünïcode?";
        assert_eq!(
            percent_decode(&percent_encode(text, is_unreserved)).unwrap(),
            text
        );
    }

    #[test]
    fn normalize_uppercases_existing_escapes() {
        assert_eq!(normalize_encoded("a%2fb c", is_pchar), "a%2Fb%20c");
    }

    #[test]
    fn normalize_escapes_stray_percent() {
        assert_eq!(normalize_encoded("100%", is_query_or_fragment), "100%25");
    }
}
