//! The per-scheme policy trait.

use std::fmt;

use crate::compose::compose_uri;
use crate::decompose::decompose_uri;
use crate::decomposed::DecomposedUri;
use crate::error::{UriError, UriErrorKind};
use crate::flags::{ComposeFlags, DecomposeFlag, DecomposeFlags};
use crate::query;

/// Scheme-specific validation, defaults and normalization.
///
/// Every hook except [`scheme`](Self::scheme) has a default that accepts
/// everything or changes nothing, so a policy only overrides what its
/// scheme constrains. Policies are registered by `'static` reference in a
/// [`SchemeRegistry`](crate::SchemeRegistry).
///
/// Validation chains stop at the first failing hook.
///
/// # Examples
///
/// ```
/// use uri_decompose::{KnownUriScheme, UriErrorKind};
///
/// #[derive(Debug)]
/// struct Mailto;
///
/// impl KnownUriScheme for Mailto {
///     fn scheme(&self) -> &'static str {
///         "mailto"
///     }
///
///     fn validate_path(&self, path: &str) -> Result<(), UriErrorKind> {
///         if path.contains('@') { Ok(()) } else { Err(UriErrorKind::PathMalformed) }
///     }
/// }
///
/// assert!(Mailto.validate("mailto:someone@example.com").is_ok());
/// assert_eq!(Mailto.validate("mailto:nobody"), Err(UriErrorKind::PathMalformed));
/// assert_eq!(Mailto.validate("http://x/"), Err(UriErrorKind::SchemeInvalid));
/// ```
pub trait KnownUriScheme: fmt::Debug + Send + Sync {
    /// The scheme name this policy answers for, in lowercase.
    fn scheme(&self) -> &'static str;

    /// Decomposes `uri` with [`default_decompose_flags`](Self::default_decompose_flags)
    /// and validates the result.
    ///
    /// # Errors
    ///
    /// Returns the decomposition error, or the first validator failure.
    fn validate(&self, uri: &str) -> Result<(), UriErrorKind> {
        let flags = self
            .default_decompose_flags()
            .without(DecomposeFlag::ValidateKnownScheme);
        let decomposed = decompose_uri(uri, flags)?;
        self.validate_decomposed(&decomposed)
    }

    /// Checks that the scheme matches, then runs the authority, path, query
    /// and fragment validators in that order.
    ///
    /// # Errors
    ///
    /// `SchemeInvalid` on a scheme mismatch, otherwise the first validator
    /// failure.
    fn validate_decomposed(&self, uri: &DecomposedUri) -> Result<(), UriErrorKind> {
        if !uri.scheme().eq_ignore_ascii_case(self.scheme()) {
            return Err(UriErrorKind::SchemeInvalid);
        }
        self.validate_authority(uri)?;
        self.validate_path(uri.path())?;
        self.validate_query(uri.query())?;
        self.validate_fragment(uri.fragment())
    }

    /// Runs the user-info, host and port validators in that order.
    ///
    /// # Errors
    ///
    /// The first validator failure.
    fn validate_authority(&self, uri: &DecomposedUri) -> Result<(), UriErrorKind> {
        self.validate_user_info(uri.user_info())?;
        self.validate_host(uri.host())?;
        self.validate_port(uri.port())
    }

    /// Validates the decoded user-info.
    ///
    /// # Errors
    ///
    /// A `UserInfo*` kind when rejected.
    fn validate_user_info(&self, _user_info: &str) -> Result<(), UriErrorKind> {
        Ok(())
    }

    /// Validates the decoded host.
    ///
    /// # Errors
    ///
    /// A `Host*` kind when rejected.
    fn validate_host(&self, _host: &str) -> Result<(), UriErrorKind> {
        Ok(())
    }

    /// Validates the port digits.
    ///
    /// # Errors
    ///
    /// A `Port*` kind when rejected.
    fn validate_port(&self, _port: &str) -> Result<(), UriErrorKind> {
        Ok(())
    }

    /// Validates the raw path.
    ///
    /// # Errors
    ///
    /// A `Path*` kind when rejected.
    fn validate_path(&self, _path: &str) -> Result<(), UriErrorKind> {
        Ok(())
    }

    /// Validates the raw query, including its `?`.
    ///
    /// # Errors
    ///
    /// A `Query*` kind when rejected.
    fn validate_query(&self, _query: &str) -> Result<(), UriErrorKind> {
        Ok(())
    }

    /// Validates the raw fragment, including its `#`.
    ///
    /// # Errors
    ///
    /// A `Fragment*` kind when rejected.
    fn validate_fragment(&self, _fragment: &str) -> Result<(), UriErrorKind> {
        Ok(())
    }

    /// Default authority.
    fn default_authority(&self) -> Option<&'static str> {
        None
    }

    /// Default user-info.
    fn default_user_info(&self) -> Option<&'static str> {
        None
    }

    /// Default host.
    fn default_host(&self) -> Option<&'static str> {
        None
    }

    /// Default port, used by `use_well_known_port_numbers`.
    fn default_port(&self) -> Option<&'static str> {
        None
    }

    /// Default path.
    fn default_path(&self) -> Option<&'static str> {
        None
    }

    /// Default query.
    fn default_query(&self) -> Option<&'static str> {
        None
    }

    /// Default fragment.
    fn default_fragment(&self) -> Option<&'static str> {
        None
    }

    /// Options used by [`validate`](Self::validate) and
    /// [`normalize_uri`](Self::normalize_uri).
    fn default_decompose_flags(&self) -> DecomposeFlags {
        DecomposeFlags::all()
    }

    /// Options used by [`normalize_uri`](Self::normalize_uri).
    fn default_compose_flags(&self) -> ComposeFlags {
        ComposeFlags::all()
    }

    /// Splits raw query text (without `?`) into decoded key/value pairs.
    ///
    /// # Errors
    ///
    /// `InvalidPercentEncoding` on a bad escape.
    fn split_query_elements(&self, query: &str) -> Result<Vec<(String, String)>, UriErrorKind> {
        query::split_query_elements(query)
    }

    /// Normalizes the composed authority text.
    fn normalize_authority(&self, authority: &str) -> String {
        authority.to_string()
    }

    /// Normalizes the decoded user-info.
    fn normalize_user_info(&self, user_info: &str) -> String {
        user_info.to_string()
    }

    /// Normalizes the decoded host.
    fn normalize_host(&self, host: &str) -> String {
        host.to_string()
    }

    /// Normalizes the port digits. An empty result drops the port.
    fn normalize_port(&self, port: &str) -> String {
        port.to_string()
    }

    /// Normalizes the raw path.
    fn normalize_path(&self, path: &str) -> String {
        path.to_string()
    }

    /// Normalizes the raw query text, without its `?`.
    fn normalize_query(&self, query: &str) -> String {
        query.to_string()
    }

    /// Normalizes the raw fragment text, without its `#`.
    fn normalize_fragment(&self, fragment: &str) -> String {
        fragment.to_string()
    }

    /// Calls `callback` with `(element name, element value)` for every
    /// scheme-specific element of `uri`, stopping early when it returns
    /// false.
    ///
    /// # Errors
    ///
    /// `NoSchemeSpecificElements` unless the scheme overrides this;
    /// otherwise decomposition errors or `SchemeSpecificElementMalformed`.
    fn iterate_scheme_elements(
        &self,
        _uri: &str,
        _callback: &mut dyn FnMut(&str, &str) -> bool,
    ) -> Result<(), UriErrorKind> {
        Err(UriErrorKind::NoSchemeSpecificElements)
    }

    /// Decomposes and recomposes `uri` with this scheme's default flags.
    ///
    /// # Errors
    ///
    /// Returns the decomposition or composition error, or `SchemeInvalid`
    /// if `uri` belongs to another scheme.
    fn normalize_uri(&self, uri: &str) -> Result<String, UriError> {
        let decomposed = decompose_uri(uri, self.default_decompose_flags())?;
        if !decomposed.scheme().eq_ignore_ascii_case(self.scheme()) {
            return Err(UriError::new(uri, UriErrorKind::SchemeInvalid));
        }
        compose_uri(&decomposed, self.default_compose_flags())
            .map_err(|err| UriError::new(uri, err.kind))
    }

    /// Returns true if both URIs decompose and compare equal.
    fn equivalent(&self, u1: &str, u2: &str) -> bool {
        let flags = self.default_decompose_flags();
        match (decompose_uri(u1, flags), decompose_uri(u2, flags)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Strict;

    impl KnownUriScheme for Strict {
        fn scheme(&self) -> &'static str {
            "strict"
        }

        fn validate_user_info(&self, user_info: &str) -> Result<(), UriErrorKind> {
            if user_info.is_empty() {
                Ok(())
            } else {
                Err(UriErrorKind::UserInfoNotAllowedInScheme)
            }
        }

        fn validate_host(&self, host: &str) -> Result<(), UriErrorKind> {
            if host.is_empty() {
                Err(UriErrorKind::HostRequiredInScheme)
            } else {
                Ok(())
            }
        }

        fn validate_fragment(&self, fragment: &str) -> Result<(), UriErrorKind> {
            if fragment.is_empty() {
                Ok(())
            } else {
                Err(UriErrorKind::FragmentNotAllowedInScheme)
            }
        }
    }

    #[derive(Debug)]
    struct Permissive;

    impl KnownUriScheme for Permissive {
        fn scheme(&self) -> &'static str {
            "permissive"
        }
    }

    #[test]
    fn defaults_accept_everything() {
        assert!(Permissive.validate("permissive://u@h:1/p?q#f").is_ok());
        assert!(Permissive.validate("permissive:anything").is_ok());
        assert_eq!(Permissive.default_port(), None);
        assert_eq!(
            Permissive.default_decompose_flags(),
            DecomposeFlags::all()
        );
    }

    #[test]
    fn scheme_mismatch_is_invalid() {
        assert_eq!(
            Permissive.validate("other://h/"),
            Err(UriErrorKind::SchemeInvalid)
        );
    }

    #[test]
    fn validation_short_circuits_in_order() {
        // user-info is checked before host, host before fragment
        assert_eq!(
            Strict.validate("strict://u@/p#f"),
            Err(UriErrorKind::UserInfoNotAllowedInScheme)
        );
        assert_eq!(
            Strict.validate("strict:///p#f"),
            Err(UriErrorKind::HostRequiredInScheme)
        );
        assert_eq!(
            Strict.validate("strict://h/p#f"),
            Err(UriErrorKind::FragmentNotAllowedInScheme)
        );
        assert!(Strict.validate("strict://h/p").is_ok());
    }

    #[test]
    fn decomposition_errors_pass_through() {
        assert_eq!(
            Strict.validate("strict://h/%zz"),
            Err(UriErrorKind::InvalidPercentEncoding)
        );
    }

    #[test]
    fn scheme_elements_unsupported_by_default() {
        let mut calls = 0;
        let result = Permissive.iterate_scheme_elements("permissive:x", &mut |_, _| {
            calls += 1;
            true
        });
        assert_eq!(result, Err(UriErrorKind::NoSchemeSpecificElements));
        assert_eq!(calls, 0);
    }

    #[test]
    fn equivalent_uses_decomposed_equality() {
        assert!(Permissive.equivalent("PERMISSIVE://H/a/../b", "permissive://h/b"));
        assert!(!Permissive.equivalent("permissive://h/a", "permissive://h/b"));
        assert!(!Permissive.equivalent("permissive://h/%zz", "permissive://h/%zz"));
    }

    #[test]
    fn normalize_uri_checks_scheme() {
        let err = Permissive.normalize_uri("other://h/").unwrap_err();
        assert_eq!(err.kind, UriErrorKind::SchemeInvalid);
        assert_eq!(
            Permissive.normalize_uri("PERMISSIVE://H/./a").unwrap(),
            "permissive://h/a"
        );
    }

    #[test]
    fn default_query_splitting() {
        assert_eq!(
            Permissive.split_query_elements("a=1&b").unwrap(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), String::new())
            ]
        );
    }
}
