//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for all common types, making it easy
//! to get started with the crate:
//!
//! ```rust
//! use uri_decompose::prelude::*;
//!
//! let uri = decompose_uri("https://example.com/a?b=c", DecomposeFlags::all()).unwrap();
//! assert_eq!(uri.query_value("b"), Some("c"));
//! ```
//!
//! Builder state markers (`Empty`, `HasScheme`) and the built-in scheme
//! policies are left out; reach them through the crate root.

pub use crate::{
    // Core types
    DecomposedUri, HostKind, KnownUriScheme, SchemeRegistry,
    // Options
    ComposeFlag, ComposeFlags, DecomposeFlag, DecomposeFlags,
    // Builder
    UriBuilder,
    // Errors
    UriComponent, UriError, UriErrorKind,
    // Operations
    compose_uri, decompose_uri, decompose_uri_reference, decompose_uri_with, normalize_uri,
    query_uri_scheme, validate_uri,
};
