//! RFC 3986 character classes.
//!
//! ```abnf
//! unreserved  = ALPHA / DIGIT / "-" / "." / "_" / "~"
//! gen-delims  = ":" / "/" / "?" / "#" / "[" / "]" / "@"
//! sub-delims  = "!" / "$" / "&" / "'" / "(" / ")"
//!             / "*" / "+" / "," / ";" / "="
//! pchar       = unreserved / pct-encoded / sub-delims / ":" / "@"
//! ```
//!
//! All predicates take a single byte; `%` is never part of a class; the
//! scanners treat it separately as the start of an escape.

/// `ALPHA / DIGIT / "+" / "-" / "."`
#[must_use]
pub const fn is_scheme(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'+' | b'-' | b'.')
}

/// `ALPHA / DIGIT / "-" / "." / "_" / "~"`
#[must_use]
pub const fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~')
}

/// One of `:/?#[]@`.
#[must_use]
pub const fn is_gen_delim(c: u8) -> bool {
    matches!(c, b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@')
}

/// One of `!$&'()*+,;=`.
#[must_use]
pub const fn is_sub_delim(c: u8) -> bool {
    matches!(
        c,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

/// `gen-delims / sub-delims`
#[must_use]
pub const fn is_reserved(c: u8) -> bool {
    is_gen_delim(c) || is_sub_delim(c)
}

/// Path segment character: unreserved, sub-delims, `:` and `@`.
#[must_use]
pub const fn is_pchar(c: u8) -> bool {
    is_unreserved(c) || is_sub_delim(c) || matches!(c, b':' | b'@')
}

/// Like [`is_pchar`] without `:`, for the first segment of a relative
/// reference that has no authority.
#[must_use]
pub const fn is_pchar_nc(c: u8) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == b'@'
}

/// User-info character: unreserved, sub-delims and `:`.
#[must_use]
pub const fn is_user_info(c: u8) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == b':'
}

/// Registered-name character.
#[must_use]
pub const fn is_reg_name(c: u8) -> bool {
    is_unreserved(c)
}

/// Query and fragment character: pchar, `/` and `?`.
#[must_use]
pub const fn is_query_or_fragment(c: u8) -> bool {
    is_pchar(c) || matches!(c, b'/' | b'?')
}
