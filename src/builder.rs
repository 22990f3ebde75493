//! Typestate builder for constructing [`DecomposedUri`] values.
//!
//! The builder uses phantom types to enforce at compile time that a scheme
//! is set before anything can be built.

use std::marker::PhantomData;

use crate::authority::classify_host;
use crate::compose::{compose_authority, compose_uri, encode_query_elements};
use crate::cursor::Cursor;
use crate::decompose::check_scheme;
use crate::decomposed::DecomposedUri;
use crate::error::{UriError, UriErrorKind};
use crate::flags::{ComposeFlags, DecomposeFlag, DecomposeFlags};
use crate::fragment::parse_fragment;
use crate::path::{PathKind, parse_path};
use crate::query::{parse_query, split_query_elements};
use crate::registry::query_uri_scheme;

/// Marker: no scheme set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: the scheme has been set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasScheme;

/// A typestate builder for [`DecomposedUri`].
///
/// User-info, host and query elements are given decoded and are encoded on
/// output. Path, query and fragment text are given as written and are
/// checked when building. Setting any of user-info, host or port produces
/// an authority.
///
/// # Examples
///
/// ```
/// use uri_decompose::{ComposeFlags, UriBuilder};
///
/// let uri = UriBuilder::new()
///     .scheme("https")
///     .host("example.com")
///     .path("/search")
///     .query_element("q", "rust & uri")
///     .build()
///     .unwrap();
///
/// assert_eq!(uri.query_value("q"), Some("rust & uri"));
/// assert_eq!(
///     uri.compose(ComposeFlags::all()).unwrap(),
///     "https://example.com/search?q=rust%20%26%20uri"
/// );
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use uri_decompose::UriBuilder;
///
/// // Error: cannot call build() before scheme()
/// let uri = UriBuilder::new().host("example.com").build();
/// ```
#[derive(Debug, Clone)]
pub struct UriBuilder<State = Empty> {
    scheme: String,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<String>,
    path: String,
    query: Option<String>,
    query_elements: Vec<(String, String)>,
    fragment: Option<String>,
    _state: PhantomData<State>,
}

impl UriBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheme: String::new(),
            user_info: None,
            host: None,
            port: None,
            path: String::new(),
            query: None,
            query_elements: Vec::new(),
            fragment: None,
            _state: PhantomData,
        }
    }

    /// Sets the scheme and advances to the [`HasScheme`] state.
    #[must_use]
    pub fn scheme(self, scheme: impl Into<String>) -> UriBuilder<HasScheme> {
        UriBuilder {
            scheme: scheme.into(),
            user_info: self.user_info,
            host: self.host,
            port: self.port,
            path: self.path,
            query: self.query,
            query_elements: self.query_elements,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }
}

impl Default for UriBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

/// Methods available in every state.
impl<State> UriBuilder<State> {
    /// Sets the decoded user-info.
    #[must_use]
    pub fn user_info(mut self, user_info: impl Into<String>) -> Self {
        self.user_info = Some(user_info.into());
        self
    }

    /// Sets the host. A bracketed value is taken as an IP-literal.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port digits.
    #[must_use]
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Sets the path as written, percent-encoded where needed.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the query text as written, without its `?`. Takes precedence
    /// over [`query_element`](Self::query_element).
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Appends a decoded key/value pair to the query.
    #[must_use]
    pub fn query_element(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_elements.push((key.into(), value.into()));
        self
    }

    /// Sets the fragment text as written, without its `#`.
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Sets the fragment if provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_fragment(self, fragment: Option<&str>) -> Self {
        match fragment {
            Some(f) => self.fragment(f),
            None => self,
        }
    }

    fn has_authority(&self) -> bool {
        self.user_info.is_some() || self.host.is_some() || self.port.is_some()
    }
}

impl UriBuilder<HasScheme> {
    /// Builds the [`DecomposedUri`], split into path and query elements.
    ///
    /// # Errors
    ///
    /// Returns a [`UriError`] for a malformed scheme, port, path, query or
    /// fragment, or a path that does not start with `/` after an
    /// authority.
    pub fn build(self) -> Result<DecomposedUri, UriError> {
        let input = self.describe();
        self.build_inner().map_err(|kind| UriError::new(&input, kind))
    }

    /// Builds and composes in one step.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build) and [`compose_uri`](crate::compose_uri).
    pub fn compose(self, flags: ComposeFlags) -> Result<String, UriError> {
        compose_uri(&self.build()?, flags)
    }

    fn build_inner(self) -> Result<DecomposedUri, UriErrorKind> {
        check_scheme(&self.scheme)?;

        let flags = DecomposeFlags::empty()
            .with(DecomposeFlag::SplitPathElements)
            .with(DecomposeFlag::SplitQueryElements);
        let mut uri = DecomposedUri {
            known_scheme: query_uri_scheme(&self.scheme.to_ascii_lowercase()),
            decompose_flags: flags,
            ..DecomposedUri::default()
        };

        let path_kind = if self.has_authority() {
            let (host, host_kind) = classify_host(self.host.as_deref().unwrap_or_default());
            uri.host = host.to_string();
            uri.host_kind = host_kind;
            uri.user_info = self.user_info;
            uri.port = self.port;
            uri.authority = Some(compose_authority(&uri, None, false)?);
            PathKind::AbEmpty
        } else {
            PathKind::Rootless
        };

        let mut cursor = Cursor::new(&self.path);
        let (path, path_elements) = parse_path(&mut cursor, path_kind, flags)?;
        if !cursor.is_empty() {
            return Err(UriErrorKind::PathMalformed);
        }
        uri.path = path;
        uri.path_elements = path_elements;

        let query = self.query.or_else(|| {
            (!self.query_elements.is_empty()).then(|| encode_query_elements(&self.query_elements))
        });
        if let Some(query) = query {
            let mut cursor = Cursor::new(&query);
            uri.query = parse_query(&mut cursor)?;
            if !cursor.is_empty() {
                return Err(UriErrorKind::QueryMalformed);
            }
            uri.query_elements = split_query_elements(&query)?;
        }

        if let Some(fragment) = self.fragment {
            uri.fragment = parse_fragment(&mut Cursor::new(&fragment))?;
        }

        uri.scheme = self.scheme;
        Ok(uri)
    }

    /// Best-effort text of the builder's parts for error reports.
    fn describe(&self) -> String {
        let mut text = format!("{}:", self.scheme);
        if self.has_authority() {
            text.push_str("//");
            if let Some(user_info) = &self.user_info {
                text.push_str(user_info);
                text.push('@');
            }
            text.push_str(self.host.as_deref().unwrap_or_default());
            if let Some(port) = &self.port {
                text.push(':');
                text.push_str(port);
            }
        }
        text.push_str(&self.path);
        if let Some(query) = &self.query {
            text.push('?');
            text.push_str(query);
        } else if !self.query_elements.is_empty() {
            text.push('?');
            text.push_str(&encode_query_elements(&self.query_elements));
        }
        if let Some(fragment) = &self.fragment {
            text.push('#');
            text.push_str(fragment);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::HostKind;

    #[test]
    fn new_creates_empty_builder() {
        let builder = UriBuilder::new();
        assert!(builder.scheme.is_empty());
        assert!(builder.host.is_none());
        assert!(!builder.has_authority());
    }

    #[test]
    fn scheme_transitions_to_has_scheme() {
        let builder = UriBuilder::new().host("h").scheme("foo");
        assert_eq!(builder.scheme, "foo");
        assert_eq!(builder.host.as_deref(), Some("h"));
    }

    #[test]
    fn build_without_authority() {
        let uri = UriBuilder::new()
            .scheme("urn")
            .path("isbn:0451450523")
            .build()
            .unwrap();
        assert!(!uri.has_authority());
        assert_eq!(uri.path_elements(), ["isbn:0451450523"]);
        assert_eq!(
            uri.compose(ComposeFlags::all()).unwrap(),
            "urn:isbn:0451450523"
        );
    }

    #[test]
    fn build_full_uri() {
        let uri = UriBuilder::new()
            .scheme("ftp")
            .user_info("anne marie")
            .host("[::1]")
            .port("2121")
            .path("/pub/a%20b")
            .query("x=1&y")
            .fragment("top")
            .build()
            .unwrap();
        assert_eq!(uri.authority(), "anne%20marie@[::1]:2121");
        assert_eq!(uri.host(), "::1");
        assert_eq!(uri.host_kind(), HostKind::IpLiteral);
        assert_eq!(uri.path_elements(), ["pub", "a b"]);
        assert_eq!(uri.query_value("y"), Some(""));
        assert_eq!(uri.fragment(), "#top");
        assert_eq!(
            uri.compose(ComposeFlags::all()).unwrap(),
            "ftp://anne%20marie@[::1]:2121/pub/a%20b?x=1&y#top"
        );
    }

    #[test]
    fn build_matches_decomposition() {
        let built = UriBuilder::new()
            .scheme("http")
            .host("example.com")
            .path("/a/b")
            .build()
            .unwrap();
        let parsed =
            crate::decompose_uri("http://example.com/a/b", DecomposeFlags::empty()).unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.known_scheme().map(|s| s.scheme()), Some("http"));
    }

    #[test]
    fn known_scheme_hooks_apply_on_compose() {
        let text = UriBuilder::new()
            .scheme("HTTP")
            .host("Example.COM")
            .port("80")
            .compose(ComposeFlags::all())
            .unwrap();
        assert_eq!(text, "http://example.com/");
    }

    #[test]
    fn raw_query_wins_over_elements() {
        let uri = UriBuilder::new()
            .scheme("foo")
            .query_element("a", "1")
            .query("b=2")
            .build()
            .unwrap();
        assert_eq!(uri.query(), "?b=2");
    }

    #[test]
    fn invalid_parts_rejected() {
        let kind = |builder: UriBuilder<HasScheme>| builder.build().unwrap_err().kind;

        assert_eq!(
            kind(UriBuilder::new().scheme("")),
            UriErrorKind::SchemeEmpty
        );
        assert_eq!(
            kind(UriBuilder::new().scheme("9p")),
            UriErrorKind::SchemeMalformed
        );
        assert_eq!(
            kind(UriBuilder::new().scheme("foo").port("eighty")),
            UriErrorKind::PortMalformed
        );
        assert_eq!(
            kind(UriBuilder::new().scheme("foo").host("h").path("rel")),
            UriErrorKind::PathMalformed
        );
        assert_eq!(
            kind(UriBuilder::new().scheme("foo").path("/a?b")),
            UriErrorKind::PathMalformed
        );
        assert_eq!(
            kind(UriBuilder::new().scheme("foo").query("a#b")),
            UriErrorKind::QueryMalformed
        );
        assert_eq!(
            kind(UriBuilder::new().scheme("foo").fragment("a b")),
            UriErrorKind::FragmentMalformed
        );
    }

    #[test]
    fn error_names_the_builder_input() {
        let err = UriBuilder::new()
            .scheme("foo")
            .host("h")
            .path("rel")
            .build()
            .unwrap_err();
        assert_eq!(err.input, "foo://hrel");

        let err = UriBuilder::new()
            .scheme("foo")
            .user_info("u")
            .host("h")
            .port("8x")
            .path("/p")
            .query("q=1")
            .fragment("f")
            .build()
            .unwrap_err();
        assert_eq!(err.kind, UriErrorKind::PortMalformed);
        assert_eq!(err.input, "foo://u@h:8x/p?q=1#f");

        let err = UriBuilder::new()
            .scheme("foo")
            .path("a b")
            .query_element("k", "v")
            .build()
            .unwrap_err();
        assert_eq!(err.input, "foo:a b?k=v");
    }

    #[test]
    fn maybe_fragment() {
        let uri = UriBuilder::new()
            .scheme("foo")
            .maybe_fragment(None)
            .build()
            .unwrap();
        assert_eq!(uri.fragment(), "");
        let uri = UriBuilder::new()
            .scheme("foo")
            .maybe_fragment(Some("x"))
            .build()
            .unwrap();
        assert_eq!(uri.fragment(), "#x");
    }

    #[test]
    fn default_creates_empty_builder() {
        let builder: UriBuilder<Empty> = UriBuilder::default();
        assert!(builder.scheme.is_empty());
    }

    #[test]
    fn debug_output_is_useful() {
        let builder = UriBuilder::new().scheme("foo");
        let debug_str = format!("{builder:?}");
        assert!(debug_str.contains("UriBuilder"));
        assert!(debug_str.contains("scheme"));
    }
}
