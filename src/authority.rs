//! Authority scanner: user-info, host and port.
//!
//! # Grammar Reference
//!
//! ```abnf
//! authority   = [ userinfo "@" ] host [ ":" port ]
//! userinfo    = *( unreserved / pct-encoded / sub-delims / ":" )
//! host        = IP-literal / IPv4address / reg-name
//! IP-literal  = "[" ( IPv6address / IPvFuture ) "]"
//! port        = *DIGIT
//! ```
//!
//! IP-literals are taken verbatim without checking `IPv6address` or
//! `IPvFuture` syntax.

use crate::chars::{is_reg_name, is_user_info};
use crate::cursor::Cursor;
use crate::error::UriErrorKind;
use crate::flags::{DecomposeFlag, DecomposeFlags};

/// How the host of an authority was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HostKind {
    /// No authority, or an authority with an empty host (`file:///x`)
    #[default]
    Empty,
    /// Four dot-separated decimal octets, each in `0..=255`
    Ipv4,
    /// A bracketed IP-literal, stored without its brackets
    IpLiteral,
    /// A percent-decoded registered name
    RegName,
}

impl HostKind {
    /// Returns true for IPv4 and bracketed IP-literal hosts.
    #[must_use]
    pub const fn is_ip(self) -> bool {
        matches!(self, Self::Ipv4 | Self::IpLiteral)
    }
}

/// The parts of an authority after scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthorityElements {
    pub(crate) user_info: Option<String>,
    pub(crate) host: String,
    pub(crate) host_kind: HostKind,
    pub(crate) port: Option<String>,
}

/// Splits raw authority text into its percent-decoded elements.
///
/// User-info is present iff the authority contains an `@`. A `:` after the
/// host always yields a port, possibly empty.
pub(crate) fn parse_authority_elements(
    authority: &str,
    flags: DecomposeFlags,
) -> Result<AuthorityElements, UriErrorKind> {
    let mut cursor = Cursor::new(authority);

    let user_info = if authority.contains('@') {
        let user_info = cursor.eat_with_pct(is_user_info)?;
        if !cursor.eat(b'@') {
            return Err(UriErrorKind::UserInfoMalformed);
        }
        Some(user_info)
    } else {
        None
    };

    let (host, host_kind) = parse_host(&mut cursor, flags)?;

    let port = if cursor.eat(b':') {
        Some(cursor.eat_while(|c| c.is_ascii_digit()).to_string())
    } else {
        None
    };

    if !cursor.is_empty() {
        return Err(if port.is_some() {
            UriErrorKind::PortMalformed
        } else {
            UriErrorKind::HostMalformed
        });
    }

    Ok(AuthorityElements {
        user_info,
        host,
        host_kind,
        port,
    })
}

fn parse_host(
    cursor: &mut Cursor<'_>,
    flags: DecomposeFlags,
) -> Result<(String, HostKind), UriErrorKind> {
    if cursor.eat(b'[') {
        let literal = cursor.eat_until(|c| c == b']');
        if literal.is_empty() || !cursor.eat(b']') {
            return Err(UriErrorKind::HostMalformed);
        }
        return Ok((literal.to_string(), HostKind::IpLiteral));
    }

    let start = cursor.pos();
    if let Some(ipv4) = try_parse_ipv4(cursor) {
        return Ok((ipv4.to_string(), HostKind::Ipv4));
    }
    cursor.rewind(start);

    let mut name = cursor.eat_with_pct(is_reg_name)?;
    if flags.contains(DecomposeFlag::LowercaseWhenAppropriate) {
        name.make_ascii_lowercase();
    }
    let kind = if name.is_empty() {
        HostKind::Empty
    } else {
        HostKind::RegName
    };
    Ok((name, kind))
}

/// Recognizes a host given as plain text, stripping brackets from an
/// IP-literal.
pub(crate) fn classify_host(host: &str) -> (&str, HostKind) {
    if let Some(literal) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return (literal, HostKind::IpLiteral);
    }
    if host.is_empty() {
        return (host, HostKind::Empty);
    }
    let mut cursor = Cursor::new(host);
    if try_parse_ipv4(&mut cursor).is_some() && cursor.is_empty() {
        (host, HostKind::Ipv4)
    } else {
        (host, HostKind::RegName)
    }
}

/// Consumes an IPv4 literal, leaving the cursor wherever it stopped on
/// failure. The caller rewinds.
fn try_parse_ipv4<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let start = cursor.pos();
    for i in 0..4 {
        if i > 0 && !cursor.eat(b'.') {
            return None;
        }
        let octet = cursor.eat_while(|c| c.is_ascii_digit());
        if octet.is_empty() {
            return None;
        }
        octet.parse::<u8>().ok()?;
    }
    // "1.2.3.4x" is a reg-name, not an address followed by garbage.
    match cursor.peek() {
        None | Some(b':') => Some(cursor.slice_from(start)),
        Some(_) => None,
    }
}
