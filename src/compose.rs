//! URI composition and normalization.

use crate::authority::HostKind;
use crate::chars::{is_pchar, is_pchar_nc, is_query_or_fragment, is_reg_name, is_user_info};
use crate::decompose::{check_scheme, decompose_uri};
use crate::decomposed::DecomposedUri;
use crate::error::{UriError, UriErrorKind};
use crate::flags::{ComposeFlag, ComposeFlags, DecomposeFlag, DecomposeFlags};
use crate::path::{normalize_segments, split_segments};
use crate::pct::{normalize_encoded, percent_encode};
use crate::query::{KEY_DELIMITER, QUERY_DELIMITER};
use crate::registry::query_uri_scheme;
use crate::scheme::KnownUriScheme;

/// Serializes a decomposed URI back to text.
///
/// Decoded components are re-encoded, raw query and fragment text is kept
/// with its escapes uppercased. With `use_known_scheme`, the scheme's
/// normalization hooks run on every component, so `http` drops port 80
/// and turns an empty path into `/`.
///
/// # Errors
///
/// `SchemeMalformed` for a bad scheme name, `PortMalformed` for a
/// non-numeric port, `PathMalformed` for a rootless path after an
/// authority.
///
/// # Examples
///
/// ```
/// use uri_decompose::{compose_uri, decompose_uri, ComposeFlags, DecomposeFlags};
///
/// let text = "HTTP://Example.COM:80/a/./b/../c/?q=%3d";
/// let uri = decompose_uri(text, DecomposeFlags::all()).unwrap();
/// assert_eq!(
///     compose_uri(&uri, ComposeFlags::all()).unwrap(),
///     "http://example.com/a/c/?q=%3D"
/// );
/// ```
pub fn compose_uri(uri: &DecomposedUri, flags: ComposeFlags) -> Result<String, UriError> {
    compose_inner(uri, flags).map_err(|kind| UriError::new(&describe(uri), kind))
}

/// Decomposes and recomposes `uri` with every option enabled.
///
/// # Errors
///
/// Returns the decomposition error, or the composition error reported
/// against `uri`.
///
/// # Examples
///
/// ```
/// use uri_decompose::normalize_uri;
///
/// assert_eq!(
///     normalize_uri("HTTPS://User@Example.COM:443/a/../b#Top").unwrap(),
///     "https://User@example.com/b#Top"
/// );
/// assert_eq!(normalize_uri("http://example.com").unwrap(), "http://example.com/");
/// ```
pub fn normalize_uri(uri: &str) -> Result<String, UriError> {
    let decomposed = decompose_uri(uri, DecomposeFlags::all())?;
    compose_uri(&decomposed, ComposeFlags::all()).map_err(|err| UriError::new(uri, err.kind))
}

fn compose_inner(uri: &DecomposedUri, flags: ComposeFlags) -> Result<String, UriErrorKind> {
    let lowercase = flags.contains(ComposeFlag::LowercaseWhenAppropriate);
    let known = if flags.contains(ComposeFlag::UseKnownScheme) {
        uri.known_scheme()
            .or_else(|| query_uri_scheme(&uri.scheme().to_ascii_lowercase()))
    } else {
        None
    };

    let mut out = String::new();

    if !uri.scheme().is_empty() {
        check_scheme(uri.scheme())?;
        if lowercase {
            out.push_str(&uri.scheme().to_ascii_lowercase());
        } else {
            out.push_str(uri.scheme());
        }
        out.push(':');
    }

    if uri.has_authority() {
        let authority = compose_authority(uri, known, lowercase)?;
        out.push_str("//");
        if let Some(scheme) = known {
            out.push_str(&scheme.normalize_authority(&authority));
        } else {
            out.push_str(&authority);
        }
    }

    out.push_str(&compose_path(uri, known, flags)?);

    if !uri.query().is_empty() || !uri.query_elements().is_empty() {
        let raw = if uri.query().is_empty() {
            encode_query_elements(uri.query_elements())
        } else {
            uri.query()[1..].to_string()
        };
        let raw = if let Some(scheme) = known {
            scheme.normalize_query(&raw)
        } else {
            raw
        };
        out.push('?');
        out.push_str(&normalize_encoded(&raw, is_query_or_fragment));
    }

    if let Some(raw) = uri.fragment().strip_prefix('#') {
        let raw = known.map_or_else(
            || raw.to_string(),
            |scheme| scheme.normalize_fragment(raw),
        );
        out.push('#');
        out.push_str(&normalize_encoded(&raw, is_query_or_fragment));
    }

    Ok(out)
}

pub(crate) fn compose_authority(
    uri: &DecomposedUri,
    known: Option<&dyn KnownUriScheme>,
    lowercase: bool,
) -> Result<String, UriErrorKind> {
    let mut authority = String::new();

    if uri.has_user_info() {
        let user_info = known.map_or_else(
            || uri.user_info().to_string(),
            |scheme| scheme.normalize_user_info(uri.user_info()),
        );
        authority.push_str(&percent_encode(&user_info, is_user_info));
        authority.push('@');
    }

    let mut host = known.map_or_else(
        || uri.host().to_string(),
        |scheme| scheme.normalize_host(uri.host()),
    );
    match uri.host_kind() {
        HostKind::IpLiteral => {
            authority.push('[');
            authority.push_str(&host);
            authority.push(']');
        }
        HostKind::Ipv4 => authority.push_str(&host),
        HostKind::Empty | HostKind::RegName => {
            if lowercase {
                host.make_ascii_lowercase();
            }
            authority.push_str(&percent_encode(&host, is_reg_name));
        }
    }

    if uri.has_port() {
        if !uri.port().bytes().all(|c| c.is_ascii_digit()) {
            return Err(UriErrorKind::PortMalformed);
        }
        let port = known.map_or_else(
            || uri.port().to_string(),
            |scheme| scheme.normalize_port(uri.port()),
        );
        // a policy may drop its default port
        if known.is_none() || !port.is_empty() {
            authority.push(':');
            authority.push_str(&port);
        }
    }

    Ok(authority)
}

fn compose_path(
    uri: &DecomposedUri,
    known: Option<&dyn KnownUriScheme>,
    flags: ComposeFlags,
) -> Result<String, UriErrorKind> {
    if uri.has_authority() && !uri.path().is_empty() && !uri.path().starts_with('/') {
        return Err(UriErrorKind::PathMalformed);
    }

    let raw = known.map_or_else(
        || uri.path().to_string(),
        |scheme| scheme.normalize_path(uri.path()),
    );
    let mut segments = if uri.decompose_flags().contains(DecomposeFlag::SplitPathElements) {
        uri.path_elements().to_vec()
    } else {
        split_segments(&raw)?
    };
    if flags.contains(ComposeFlag::NormalizePath) {
        segments = normalize_segments(segments.as_slice());
    }
    // an empty first segment would read as `//` or drop the rootless shape
    if !uri.has_authority() && segments.first().is_some_and(String::is_empty) {
        segments.insert(0, ".".to_string());
    }

    let rooted = raw.starts_with('/');
    let leading = (rooted && flags.contains(ComposeFlag::PathLeadingSlash))
        || (uri.has_authority() && !segments.is_empty());
    let trailing = raw.len() > 1
        && raw.ends_with('/')
        && !segments.is_empty()
        && flags.contains(ComposeFlag::PathTrailingSlash);
    // a scheme-less, authority-less first segment must not look like a scheme
    let guard_colon = uri.scheme().is_empty() && !uri.has_authority() && !leading;

    let mut path = String::new();
    if leading {
        path.push('/');
    }
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push('/');
        }
        if i == 0 && guard_colon {
            path.push_str(&percent_encode(segment, is_pchar_nc));
        } else {
            path.push_str(&percent_encode(segment, is_pchar));
        }
    }
    if trailing {
        path.push('/');
    }

    Ok(path)
}

pub(crate) fn encode_query_elements(elements: &[(String, String)]) -> String {
    let keep = |c: u8| is_query_or_fragment(c) && c != b'&' && c != b'=' && c != b'+';
    let mut query = String::new();
    for (i, (key, value)) in elements.iter().enumerate() {
        if i > 0 {
            query.push(QUERY_DELIMITER);
        }
        query.push_str(&percent_encode(key, keep));
        if !value.is_empty() {
            query.push(KEY_DELIMITER);
            query.push_str(&percent_encode(value, keep));
        }
    }
    query
}

/// Best-effort text of `uri` for error reports.
fn describe(uri: &DecomposedUri) -> String {
    let mut text = String::new();
    if !uri.scheme().is_empty() {
        text.push_str(uri.scheme());
        text.push(':');
    }
    if uri.has_authority() {
        text.push_str("//");
        text.push_str(uri.authority());
    }
    text.push_str(uri.path());
    text.push_str(uri.query());
    text.push_str(uri.fragment());
    text
}
