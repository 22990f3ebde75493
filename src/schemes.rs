//! Built-in scheme policies: `http`, `https`, `file` and `data`.

use crate::constants::{
    DATA_DEFAULT_MEDIA_TYPE, DATA_DEFAULT_PARAMETERS, DATA_SCHEME, FILE_SCHEME, HTTPS_DEFAULT_PORT,
    HTTPS_SCHEME, HTTP_DEFAULT_PORT, HTTP_SCHEME, LOCALHOST,
};
use crate::decompose::decompose_uri;
use crate::decomposed::{DecomposedUri, trim_leading_zeros};
use crate::error::UriErrorKind;
use crate::flags::DecomposeFlags;
use crate::pct::percent_decode;
use crate::scheme::KnownUriScheme;

/// Policy for hierarchical URL schemes with a required host and a
/// well-known port.
///
/// # Examples
///
/// ```
/// use uri_decompose::{KnownUriScheme, UriErrorKind, schemes::HTTPS};
///
/// assert_eq!(HTTPS.default_port(), Some("443"));
/// assert_eq!(
///     HTTPS.normalize_uri("HTTPS://Example.com:443").unwrap(),
///     "https://example.com/"
/// );
/// assert_eq!(HTTPS.validate("https:///x"), Err(UriErrorKind::HostRequiredInScheme));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpScheme {
    name: &'static str,
    default_port: &'static str,
}

impl HttpScheme {
    /// Creates a policy for `name` with the given default port digits.
    #[must_use]
    pub const fn new(name: &'static str, default_port: &'static str) -> Self {
        Self { name, default_port }
    }
}

/// The `http` policy.
pub static HTTP: HttpScheme = HttpScheme::new(HTTP_SCHEME, HTTP_DEFAULT_PORT);

/// The `https` policy.
pub static HTTPS: HttpScheme = HttpScheme::new(HTTPS_SCHEME, HTTPS_DEFAULT_PORT);

impl KnownUriScheme for HttpScheme {
    fn scheme(&self) -> &'static str {
        self.name
    }

    fn validate_host(&self, host: &str) -> Result<(), UriErrorKind> {
        if host.is_empty() {
            return Err(UriErrorKind::HostRequiredInScheme);
        }
        Ok(())
    }

    fn validate_port(&self, port: &str) -> Result<(), UriErrorKind> {
        if !port.is_empty() && port.parse::<u16>().is_err() {
            return Err(UriErrorKind::PortInvalidForScheme);
        }
        Ok(())
    }

    fn validate_path(&self, path: &str) -> Result<(), UriErrorKind> {
        if !path.is_empty() && !path.starts_with('/') {
            return Err(UriErrorKind::PathMalformed);
        }
        Ok(())
    }

    fn default_port(&self) -> Option<&'static str> {
        Some(self.default_port)
    }

    fn normalize_host(&self, host: &str) -> String {
        host.to_ascii_lowercase()
    }

    fn normalize_port(&self, port: &str) -> String {
        let trimmed = trim_leading_zeros(port);
        if trimmed == self.default_port {
            String::new()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_path(&self, path: &str) -> String {
        if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        }
    }
}

/// The `file` policy.
///
/// An empty host and `localhost` both name the local machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileScheme;

/// The `file` policy.
pub static FILE: FileScheme = FileScheme;

impl FileScheme {
    /// Returns true if `uri` refers to a file on the local machine.
    ///
    /// ```
    /// use uri_decompose::{decompose_uri, DecomposeFlags, schemes::FILE};
    ///
    /// let local = decompose_uri("file:///etc/hosts", DecomposeFlags::all()).unwrap();
    /// let remote = decompose_uri("file://server/share", DecomposeFlags::all()).unwrap();
    /// assert!(FILE.is_local(&local));
    /// assert!(!FILE.is_local(&remote));
    /// ```
    #[must_use]
    pub fn is_local(&self, uri: &DecomposedUri) -> bool {
        uri.scheme().eq_ignore_ascii_case(FILE_SCHEME)
            && (uri.host().is_empty() || uri.host().eq_ignore_ascii_case(LOCALHOST))
    }
}

impl KnownUriScheme for FileScheme {
    fn scheme(&self) -> &'static str {
        FILE_SCHEME
    }

    fn default_host(&self) -> Option<&'static str> {
        Some(LOCALHOST)
    }
}

/// The `data` policy: `data:[<media type>][;<parameter>]*[;base64],<data>`.
///
/// Scheme-specific elements are reported as `scheme`, `media_type`,
/// `parameters` and the percent-decoded `data`, in that order. An empty
/// header reports `text/plain;charset=US-ASCII`. Base64 payloads are not
/// decoded.
///
/// ```
/// use uri_decompose::{KnownUriScheme, schemes::DATA};
///
/// let mut elements = Vec::new();
/// DATA.iterate_scheme_elements("data:text/plain;charset=utf-8,hello%20world", &mut |name, value| {
///     elements.push((name.to_string(), value.to_string()));
///     true
/// })
/// .unwrap();
/// assert_eq!(elements[1], ("media_type".to_string(), "text/plain".to_string()));
/// assert_eq!(elements[2], ("parameters".to_string(), ";charset=utf-8".to_string()));
/// assert_eq!(elements[3], ("data".to_string(), "hello world".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataScheme;

/// The `data` policy.
pub static DATA: DataScheme = DataScheme;

impl KnownUriScheme for DataScheme {
    fn scheme(&self) -> &'static str {
        DATA_SCHEME
    }

    fn validate_authority(&self, uri: &DecomposedUri) -> Result<(), UriErrorKind> {
        if uri.has_authority() {
            return Err(UriErrorKind::AuthorityNotAllowedInScheme);
        }
        Ok(())
    }

    fn validate_path(&self, path: &str) -> Result<(), UriErrorKind> {
        if !path.contains(',') {
            return Err(UriErrorKind::SchemeSpecificElementMalformed);
        }
        Ok(())
    }

    fn iterate_scheme_elements(
        &self,
        uri: &str,
        callback: &mut dyn FnMut(&str, &str) -> bool,
    ) -> Result<(), UriErrorKind> {
        let decomposed = decompose_uri(uri, DecomposeFlags::empty())?;
        if !decomposed.scheme().eq_ignore_ascii_case(DATA_SCHEME) {
            return Err(UriErrorKind::SchemeInvalid);
        }
        self.validate_authority(&decomposed)?;

        let (header, payload) = decomposed
            .path()
            .split_once(',')
            .ok_or(UriErrorKind::SchemeSpecificElementMalformed)?;
        let (media_type, parameters) = if header.is_empty() {
            (DATA_DEFAULT_MEDIA_TYPE, DATA_DEFAULT_PARAMETERS)
        } else {
            header.split_at(header.find(';').unwrap_or(header.len()))
        };
        // a '?' inside the payload was scanned as a query
        let data = percent_decode(&format!("{payload}{}", decomposed.query()))?;

        let elements = [
            ("scheme", DATA_SCHEME),
            ("media_type", media_type),
            ("parameters", parameters),
            ("data", data.as_str()),
        ];
        for (name, value) in elements {
            if !callback(name, value) {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::DecomposeFlag;

    fn collect(uri: &str) -> Result<Vec<(String, String)>, UriErrorKind> {
        let mut elements = Vec::new();
        DATA.iterate_scheme_elements(uri, &mut |name, value| {
            elements.push((name.to_string(), value.to_string()));
            true
        })?;
        Ok(elements)
    }

    #[test]
    fn http_requires_host() {
        assert_eq!(
            HTTP.validate("http:///a"),
            Err(UriErrorKind::HostRequiredInScheme)
        );
        assert!(HTTP.validate("http://a/").is_ok());
        assert!(HTTP.validate("http://a").is_ok());
    }

    #[test]
    fn http_path_must_be_rooted_or_empty() {
        let uri = decompose_uri("http:relative", DecomposeFlags::empty()).unwrap();
        assert_eq!(
            HTTP.validate_decomposed(&uri),
            Err(UriErrorKind::HostRequiredInScheme)
        );
        assert_eq!(
            HTTP.validate_path("relative"),
            Err(UriErrorKind::PathMalformed)
        );
        assert!(HTTP.validate_path("").is_ok());
        assert!(HTTP.validate_path("/a").is_ok());
    }

    #[test]
    fn http_port_range() {
        assert_eq!(
            HTTP.validate("http://h:70000/"),
            Err(UriErrorKind::PortInvalidForScheme)
        );
        assert!(HTTP.validate("http://h:65535/").is_ok());
        assert!(HTTP.validate("http://h:/").is_ok());
    }

    #[test]
    fn http_normalization_hooks() {
        assert_eq!(HTTP.normalize_port("80"), "");
        assert_eq!(HTTP.normalize_port("0080"), "");
        assert_eq!(HTTP.normalize_port("8080"), "8080");
        assert_eq!(HTTPS.normalize_port("80"), "80");
        assert_eq!(HTTP.normalize_path(""), "/");
        assert_eq!(HTTP.normalize_host("Example.COM"), "example.com");
    }

    #[test]
    fn https_default_port_fills_in() {
        let uri = decompose_uri("https://h/", DecomposeFlags::all()).unwrap();
        assert_eq!(uri.port(), "443");
        let flags = DecomposeFlags::all().without(DecomposeFlag::UseWellKnownPortNumbers);
        assert_eq!(decompose_uri("https://h/", flags).unwrap().port(), "");
    }

    #[test]
    fn file_locality() {
        let uri = decompose_uri("file://LOCALHOST/tmp", DecomposeFlags::empty()).unwrap();
        assert!(FILE.is_local(&uri));
        let uri = decompose_uri("http://localhost/tmp", DecomposeFlags::empty()).unwrap();
        assert!(!FILE.is_local(&uri));
    }

    #[test]
    fn data_elements() {
        assert_eq!(
            collect("data:,A%20brief%20note").unwrap(),
            vec![
                ("scheme".to_string(), "data".to_string()),
                ("media_type".to_string(), "text/plain".to_string()),
                ("parameters".to_string(), ";charset=US-ASCII".to_string()),
                ("data".to_string(), "A brief note".to_string()),
            ]
        );
    }

    #[test]
    fn data_payload_keeps_question_mark_and_commas() {
        let elements = collect("data:text/csv,a,b?c").unwrap();
        assert_eq!(elements[3].1, "a,b?c");
    }

    #[test]
    fn data_callback_stops_early() {
        let mut names = Vec::new();
        DATA.iterate_scheme_elements("data:text/plain,x", &mut |name, _| {
            names.push(name.to_string());
            name != "media_type"
        })
        .unwrap();
        assert_eq!(names, vec!["scheme", "media_type"]);
    }

    #[test]
    fn data_without_comma_fails() {
        assert_eq!(
            collect("data:text/plain"),
            Err(UriErrorKind::SchemeSpecificElementMalformed)
        );
        assert_eq!(
            DATA.validate("data:text/plain"),
            Err(UriErrorKind::SchemeSpecificElementMalformed)
        );
    }

    #[test]
    fn data_rejects_authority() {
        assert_eq!(
            DATA.validate("data://host/,x"),
            Err(UriErrorKind::AuthorityNotAllowedInScheme)
        );
        assert_eq!(
            collect("data://host/,x"),
            Err(UriErrorKind::AuthorityNotAllowedInScheme)
        );
    }

    #[test]
    fn data_elements_for_other_scheme_fail() {
        assert_eq!(collect("http://h/,x"), Err(UriErrorKind::SchemeInvalid));
    }
}
