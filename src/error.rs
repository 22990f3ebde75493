//! Error types for URI decomposition, composition and scheme validation.

use std::fmt;

/// The grammar production an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriComponent {
    /// The scheme, before the first `:`
    Scheme,
    /// The `//`-prefixed authority as a whole
    Authority,
    /// The user-info, before `@` in the authority
    UserInfo,
    /// The host of the authority
    Host,
    /// The port of the authority
    Port,
    /// The path, or one of its segments
    Path,
    /// The `?`-prefixed query
    Query,
    /// The `#`-prefixed fragment
    Fragment,
}

impl fmt::Display for UriComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scheme => "scheme",
            Self::Authority => "authority",
            Self::UserInfo => "user-info",
            Self::Host => "host",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

/// The kind of failure reported by every decomposition, composition and
/// validation entry point.
///
/// The set is flat so callers can `match` on it directly. Grammar-level
/// failures come from the scanners (`*Malformed`, `InvalidPercentEncoding`);
/// the `*NotAllowedInScheme`, `*InvalidForScheme` and `*RequiredInScheme`
/// kinds come from [`KnownUriScheme`](crate::KnownUriScheme) validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriErrorKind {
    /// No policy is registered for the scheme
    UnknownUriScheme,

    /// Scheme does not start with a letter, or is not followed by `:`
    SchemeMalformed,
    /// Scheme does not match the policy it was validated against
    SchemeInvalid,
    /// Scheme is missing
    SchemeEmpty,

    /// Authority is syntactically invalid
    AuthorityMalformed,
    /// Authority is empty where one is needed
    AuthorityEmpty,
    /// Scheme forbids an authority
    AuthorityNotAllowedInScheme,
    /// Authority is well-formed but rejected by the scheme
    AuthorityInvalidForScheme,
    /// Scheme requires an authority
    AuthorityRequiredInScheme,

    /// User-info is syntactically invalid
    UserInfoMalformed,
    /// Scheme forbids user-info
    UserInfoNotAllowedInScheme,
    /// User-info is rejected by the scheme
    UserInfoInvalidForScheme,
    /// Scheme requires user-info
    UserInfoRequiredInScheme,

    /// Host is syntactically invalid
    HostMalformed,
    /// Scheme forbids a host
    HostNotAllowedInScheme,
    /// Host is rejected by the scheme
    HostInvalidForScheme,
    /// Scheme requires a host
    HostRequiredInScheme,

    /// Port is syntactically invalid
    PortMalformed,
    /// Scheme forbids a port
    PortNotAllowedInScheme,
    /// Port is rejected by the scheme
    PortInvalidForScheme,
    /// Scheme requires a port
    PortRequiredInScheme,

    /// Path is syntactically invalid
    PathMalformed,
    /// A path segment is empty where a non-empty one is required
    PathElementMalformed,

    /// Query is syntactically invalid
    QueryMalformed,
    /// Scheme forbids a query
    QueryNotAllowedInScheme,
    /// Query is rejected by the scheme
    QueryInvalidForScheme,
    /// Scheme requires a query
    QueryRequiredInScheme,

    /// Fragment is syntactically invalid
    FragmentMalformed,
    /// Scheme forbids a fragment
    FragmentNotAllowedInScheme,
    /// Fragment is rejected by the scheme
    FragmentInvalidForScheme,
    /// Scheme requires a fragment
    FragmentRequiredInScheme,

    /// `%` not followed by two hex digits, or decoded octets are not UTF-8
    InvalidPercentEncoding,

    /// The scheme policy does not support element iteration
    NoSchemeSpecificElements,
    /// A scheme-specific element is malformed or missing
    SchemeSpecificElementMalformed,
}

impl UriErrorKind {
    /// Every error kind, in declaration order.
    pub const ALL: [Self; 34] = [
        Self::UnknownUriScheme,
        Self::SchemeMalformed,
        Self::SchemeInvalid,
        Self::SchemeEmpty,
        Self::AuthorityMalformed,
        Self::AuthorityEmpty,
        Self::AuthorityNotAllowedInScheme,
        Self::AuthorityInvalidForScheme,
        Self::AuthorityRequiredInScheme,
        Self::UserInfoMalformed,
        Self::UserInfoNotAllowedInScheme,
        Self::UserInfoInvalidForScheme,
        Self::UserInfoRequiredInScheme,
        Self::HostMalformed,
        Self::HostNotAllowedInScheme,
        Self::HostInvalidForScheme,
        Self::HostRequiredInScheme,
        Self::PortMalformed,
        Self::PortNotAllowedInScheme,
        Self::PortInvalidForScheme,
        Self::PortRequiredInScheme,
        Self::PathMalformed,
        Self::PathElementMalformed,
        Self::QueryMalformed,
        Self::QueryNotAllowedInScheme,
        Self::QueryInvalidForScheme,
        Self::QueryRequiredInScheme,
        Self::FragmentMalformed,
        Self::FragmentNotAllowedInScheme,
        Self::FragmentInvalidForScheme,
        Self::FragmentRequiredInScheme,
        Self::InvalidPercentEncoding,
        Self::NoSchemeSpecificElements,
        Self::SchemeSpecificElementMalformed,
    ];

    /// Returns the stable `snake_case` code of this error kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnknownUriScheme => "unknown_uri_scheme",
            Self::SchemeMalformed => "scheme_malformed",
            Self::SchemeInvalid => "scheme_invalid",
            Self::SchemeEmpty => "scheme_empty",
            Self::AuthorityMalformed => "authority_malformed",
            Self::AuthorityEmpty => "authority_empty",
            Self::AuthorityNotAllowedInScheme => "authority_not_allowed_in_scheme",
            Self::AuthorityInvalidForScheme => "authority_invalid_for_scheme",
            Self::AuthorityRequiredInScheme => "authority_required_in_scheme",
            Self::UserInfoMalformed => "user_info_malformed",
            Self::UserInfoNotAllowedInScheme => "user_info_not_allowed_in_scheme",
            Self::UserInfoInvalidForScheme => "user_info_invalid_for_scheme",
            Self::UserInfoRequiredInScheme => "user_info_required_in_scheme",
            Self::HostMalformed => "host_malformed",
            Self::HostNotAllowedInScheme => "host_not_allowed_in_scheme",
            Self::HostInvalidForScheme => "host_invalid_for_scheme",
            Self::HostRequiredInScheme => "host_required_in_scheme",
            Self::PortMalformed => "port_malformed",
            Self::PortNotAllowedInScheme => "port_not_allowed_in_scheme",
            Self::PortInvalidForScheme => "port_invalid_for_scheme",
            Self::PortRequiredInScheme => "port_required_in_scheme",
            Self::PathMalformed => "path_malformed",
            Self::PathElementMalformed => "path_element_malformed",
            Self::QueryMalformed => "query_malformed",
            Self::QueryNotAllowedInScheme => "query_not_allowed_in_scheme",
            Self::QueryInvalidForScheme => "query_invalid_for_scheme",
            Self::QueryRequiredInScheme => "query_required_in_scheme",
            Self::FragmentMalformed => "fragment_malformed",
            Self::FragmentNotAllowedInScheme => "fragment_not_allowed_in_scheme",
            Self::FragmentInvalidForScheme => "fragment_invalid_for_scheme",
            Self::FragmentRequiredInScheme => "fragment_required_in_scheme",
            Self::InvalidPercentEncoding => "invalid_percent_encoding",
            Self::NoSchemeSpecificElements => "no_scheme_specific_elements",
            Self::SchemeSpecificElementMalformed => "scheme_specific_element_malformed",
        }
    }

    /// Looks up an error kind by its [`code`](Self::code).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Returns the grammar production this error belongs to, or `None` for
    /// the generic kinds (unknown scheme, percent-encoding, scheme-specific
    /// elements).
    #[must_use]
    pub const fn component(self) -> Option<UriComponent> {
        match self {
            Self::SchemeMalformed | Self::SchemeInvalid | Self::SchemeEmpty => {
                Some(UriComponent::Scheme)
            }
            Self::AuthorityMalformed
            | Self::AuthorityEmpty
            | Self::AuthorityNotAllowedInScheme
            | Self::AuthorityInvalidForScheme
            | Self::AuthorityRequiredInScheme => Some(UriComponent::Authority),
            Self::UserInfoMalformed
            | Self::UserInfoNotAllowedInScheme
            | Self::UserInfoInvalidForScheme
            | Self::UserInfoRequiredInScheme => Some(UriComponent::UserInfo),
            Self::HostMalformed
            | Self::HostNotAllowedInScheme
            | Self::HostInvalidForScheme
            | Self::HostRequiredInScheme => Some(UriComponent::Host),
            Self::PortMalformed
            | Self::PortNotAllowedInScheme
            | Self::PortInvalidForScheme
            | Self::PortRequiredInScheme => Some(UriComponent::Port),
            Self::PathMalformed | Self::PathElementMalformed => Some(UriComponent::Path),
            Self::QueryMalformed
            | Self::QueryNotAllowedInScheme
            | Self::QueryInvalidForScheme
            | Self::QueryRequiredInScheme => Some(UriComponent::Query),
            Self::FragmentMalformed
            | Self::FragmentNotAllowedInScheme
            | Self::FragmentInvalidForScheme
            | Self::FragmentRequiredInScheme => Some(UriComponent::Fragment),
            Self::UnknownUriScheme
            | Self::InvalidPercentEncoding
            | Self::NoSchemeSpecificElements
            | Self::SchemeSpecificElementMalformed => None,
        }
    }

    /// Returns true if the error was raised by a scheme policy rather than
    /// by the grammar scanners.
    #[must_use]
    pub const fn is_scheme_specific(self) -> bool {
        matches!(
            self,
            Self::UnknownUriScheme
                | Self::SchemeInvalid
                | Self::AuthorityNotAllowedInScheme
                | Self::AuthorityInvalidForScheme
                | Self::AuthorityRequiredInScheme
                | Self::UserInfoNotAllowedInScheme
                | Self::UserInfoInvalidForScheme
                | Self::UserInfoRequiredInScheme
                | Self::HostNotAllowedInScheme
                | Self::HostInvalidForScheme
                | Self::HostRequiredInScheme
                | Self::PortNotAllowedInScheme
                | Self::PortInvalidForScheme
                | Self::PortRequiredInScheme
                | Self::QueryNotAllowedInScheme
                | Self::QueryInvalidForScheme
                | Self::QueryRequiredInScheme
                | Self::FragmentNotAllowedInScheme
                | Self::FragmentInvalidForScheme
                | Self::FragmentRequiredInScheme
                | Self::NoSchemeSpecificElements
                | Self::SchemeSpecificElementMalformed
        )
    }
}

impl fmt::Display for UriErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUriScheme => write!(f, "no policy is registered for this scheme"),
            Self::SchemeMalformed => {
                write!(f, "scheme must start with a letter and be followed by ':'")
            }
            Self::SchemeInvalid => write!(f, "scheme does not match the expected scheme"),
            Self::SchemeEmpty => write!(f, "scheme cannot be empty"),
            Self::AuthorityEmpty => write!(f, "authority cannot be empty"),
            Self::PathElementMalformed => write!(f, "path segment cannot be empty here"),
            Self::InvalidPercentEncoding => write!(
                f,
                "'%' must be followed by two hex digits and decode to valid UTF-8"
            ),
            Self::NoSchemeSpecificElements => {
                write!(f, "scheme does not define scheme-specific elements")
            }
            Self::SchemeSpecificElementMalformed => {
                write!(f, "scheme-specific element is malformed or missing")
            }
            other => {
                // Per-component kinds share their wording.
                let component = other.component().unwrap_or(UriComponent::Scheme);
                let code = other.code();
                if code.ends_with("_malformed") {
                    write!(f, "{component} is malformed")
                } else if code.ends_with("_not_allowed_in_scheme") {
                    write!(f, "{component} is not allowed in this scheme")
                } else if code.ends_with("_invalid_for_scheme") {
                    write!(f, "{component} is invalid for this scheme")
                } else {
                    write!(f, "{component} is required in this scheme")
                }
            }
        }
    }
}

impl std::error::Error for UriErrorKind {}

/// An error returned by a text-taking entry point, carrying the input that
/// failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriError {
    /// The input that was rejected
    pub input: String,
    /// The specific error that occurred
    pub kind: UriErrorKind,
}

impl UriError {
    pub(crate) fn new(input: &str, kind: UriErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> UriErrorKind {
        self.kind
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid URI '{}': {} ({})",
            self.input,
            self.kind,
            self.kind.code()
        )
    }
}

impl std::error::Error for UriError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<UriError> for UriErrorKind {
    fn from(error: UriError) -> Self {
        error.kind
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UriErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UriErrorKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_code(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown URI error code '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique_and_round_trip() {
        for kind in UriErrorKind::ALL {
            assert_eq!(UriErrorKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(UriErrorKind::from_code("no_error"), None);
    }

    #[test]
    fn component_grouping() {
        assert_eq!(
            UriErrorKind::PortRequiredInScheme.component(),
            Some(UriComponent::Port)
        );
        assert_eq!(
            UriErrorKind::PathElementMalformed.component(),
            Some(UriComponent::Path)
        );
        assert_eq!(UriErrorKind::InvalidPercentEncoding.component(), None);
    }

    #[test]
    fn scheme_specific_kinds() {
        assert!(UriErrorKind::HostRequiredInScheme.is_scheme_specific());
        assert!(!UriErrorKind::HostMalformed.is_scheme_specific());
        assert!(!UriErrorKind::InvalidPercentEncoding.is_scheme_specific());
    }

    #[test]
    fn display_mentions_component() {
        assert_eq!(
            UriErrorKind::HostMalformed.to_string(),
            "host is malformed"
        );
        assert_eq!(
            UriErrorKind::QueryNotAllowedInScheme.to_string(),
            "query is not allowed in this scheme"
        );
        assert_eq!(
            UriErrorKind::UserInfoRequiredInScheme.to_string(),
            "user-info is required in this scheme"
        );
    }

    #[test]
    fn uri_error_display_includes_input_and_code() {
        let err = UriError::new("1http:", UriErrorKind::SchemeMalformed);
        let msg = err.to_string();
        assert!(msg.contains("'1http:'"));
        assert!(msg.contains("scheme_malformed"));
    }

    #[test]
    fn uri_error_display_is_operation_neutral() {
        let err = UriError::new("foo://h", UriErrorKind::PortMalformed);
        assert_eq!(
            err.to_string(),
            "invalid URI 'foo://h': port is malformed (port_malformed)"
        );
    }
}
