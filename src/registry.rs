//! Scheme policy registry.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::scheme::KnownUriScheme;
use crate::schemes::{DATA, FILE, HTTP, HTTPS};

static GLOBAL_REGISTRY: LazyLock<SchemeRegistry> = LazyLock::new(|| {
    let registry = SchemeRegistry::with_known_schemes();
    debug!(
        "Initialized global scheme registry with {} schemes",
        registry.len()
    );
    registry
});

/// Maps lowercase scheme names to their policies.
///
/// The process-wide [`global`](Self::global) registry holds the built-in
/// policies and is read-only. Build a registry of your own to add schemes,
/// and pass it to [`decompose_uri_with`](crate::decompose_uri_with).
///
/// # Examples
///
/// ```
/// use uri_decompose::{KnownUriScheme, SchemeRegistry};
///
/// #[derive(Debug)]
/// struct Gopher;
///
/// impl KnownUriScheme for Gopher {
///     fn scheme(&self) -> &'static str {
///         "gopher"
///     }
///     fn default_port(&self) -> Option<&'static str> {
///         Some("70")
///     }
/// }
///
/// static GOPHER: Gopher = Gopher;
///
/// let mut registry = SchemeRegistry::with_known_schemes();
/// registry.register(&GOPHER);
/// assert!(registry.contains("gopher"));
/// assert!(!SchemeRegistry::global().contains("gopher"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    schemes: BTreeMap<&'static str, &'static dyn KnownUriScheme>,
}

impl SchemeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `file`, `http`, `https` and `data`
    /// policies.
    #[must_use]
    pub fn with_known_schemes() -> Self {
        let mut registry = Self::new();
        registry.register(&FILE);
        registry.register(&HTTP);
        registry.register(&HTTPS);
        registry.register(&DATA);
        registry
    }

    /// Returns the process-wide registry, initialized on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Adds `scheme` under its name, returning the policy it replaced.
    pub fn register(
        &mut self,
        scheme: &'static dyn KnownUriScheme,
    ) -> Option<&'static dyn KnownUriScheme> {
        let name = scheme.scheme();
        debug!("Registering URI scheme policy: {}", name);
        self.schemes.insert(name, scheme)
    }

    /// Looks up the policy for `scheme`. The match is case-sensitive.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&'static dyn KnownUriScheme> {
        self.schemes.get(scheme).copied()
    }

    /// Returns true if a policy is registered for `scheme`.
    #[must_use]
    pub fn contains(&self, scheme: &str) -> bool {
        self.schemes.contains_key(scheme)
    }

    /// Returns the number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Returns true if no policy is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Iterates over the registered scheme names in sorted order.
    pub fn schemes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemes.keys().copied()
    }
}

/// Looks up `scheme` in the global registry.
///
/// ```
/// use uri_decompose::query_uri_scheme;
///
/// assert_eq!(query_uri_scheme("https").and_then(|s| s.default_port()), Some("443"));
/// assert!(query_uri_scheme("HTTPS").is_none());
/// assert!(query_uri_scheme("gopher").is_none());
/// ```
#[must_use]
pub fn query_uri_scheme(scheme: &str) -> Option<&'static dyn KnownUriScheme> {
    SchemeRegistry::global().get(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Custom(&'static str);

    impl KnownUriScheme for Custom {
        fn scheme(&self) -> &'static str {
            self.0
        }
    }

    static HTTP_OVERRIDE: Custom = Custom("http");

    #[test]
    fn global_has_builtins() {
        let names: Vec<_> = SchemeRegistry::global().schemes().collect();
        assert_eq!(names, vec!["data", "file", "http", "https"]);
    }

    #[test]
    fn empty_registry() {
        let registry = SchemeRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("http").is_none());
    }

    #[test]
    fn register_replaces_and_returns_previous() {
        let mut registry = SchemeRegistry::with_known_schemes();
        let previous = registry.register(&HTTP_OVERRIDE);
        assert_eq!(previous.and_then(|s| s.default_port()), Some("80"));
        assert_eq!(registry.get("http").and_then(|s| s.default_port()), None);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(query_uri_scheme("http").is_some());
        assert!(query_uri_scheme("Http").is_none());
    }
}
