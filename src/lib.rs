//! Decomposition, validation and composition of generic URIs (RFC 3986).
//!
//! This crate splits URI text into its constituents, validates each one
//! against the RFC 3986 character classes, and writes decomposed values
//! back out. Per-scheme rules plug in through the [`KnownUriScheme`] trait
//! and a [`SchemeRegistry`].
//!
//! # Overview
//!
//! ```text
//!   foo://user@example.com:8042/over/there?name=ferret#nose
//!   \_/   \________________________/\_________/ \_________/ \__/
//!    |                 |                 |           |        |
//! scheme           authority            path        query  fragment
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use uri_decompose::{decompose_uri, normalize_uri, DecomposeFlags};
//!
//! let uri = decompose_uri(
//!     "HTTP://user@Example.COM/docs/./guide/../index.html?lang=en#intro",
//!     DecomposeFlags::all(),
//! ).unwrap();
//!
//! assert_eq!(uri.scheme(), "http");
//! assert_eq!(uri.user_info(), "user");
//! assert_eq!(uri.host(), "example.com");
//! assert_eq!(uri.port(), "80");
//! assert_eq!(uri.path_elements(), ["docs", "index.html"]);
//! assert_eq!(uri.query_value("lang"), Some("en"));
//! assert_eq!(uri.fragment(), "#intro");
//!
//! assert_eq!(
//!     normalize_uri("HTTP://Example.COM:80/a/../b").unwrap(),
//!     "http://example.com/b"
//! );
//! ```
//!
//! # Builder Pattern
//!
//! Use the typestate builder for compile-time enforced construction:
//!
//! ```rust
//! use uri_decompose::{ComposeFlags, UriBuilder};
//!
//! let text = UriBuilder::new()
//!     .scheme("https")
//!     .host("example.com")
//!     .path("/a b")
//!     .compose(ComposeFlags::all());
//! assert!(text.is_err());
//!
//! let text = UriBuilder::new()
//!     .scheme("https")
//!     .host("example.com")
//!     .path("/a%20b")
//!     .compose(ComposeFlags::all())
//!     .unwrap();
//! assert_eq!(text, "https://example.com/a%20b");
//! ```
//!
//! # Decomposition Options
//!
//! | Flag | Effect |
//! |------|--------|
//! | `split_query_elements` | fill `query_elements` with decoded pairs |
//! | `split_path_elements` | fill `path_elements` with decoded segments |
//! | `use_well_known_port_numbers` | fill an absent port from the scheme |
//! | `lowercase_when_appropriate` | lowercase scheme and reg-name host |
//! | `normalize_path` | resolve `.` and `..` in `path_elements` |
//! | `query_known_scheme` | attach the registered scheme policy |
//! | `validate_known_scheme` | run the scheme policy's validators |
//!
//! # Logging
//!
//! Registry setup is logged at `debug` and rejected input at `trace`
//! through [`tracing`]; install a subscriber to see them.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod authority;
mod builder;
pub mod chars;
mod compose;
mod constants;
mod cursor;
mod decompose;
mod decomposed;
mod error;
mod flags;
mod fragment;
mod path;
mod pct;
pub mod prelude;
mod query;
mod registry;
mod scheme;
pub mod schemes;

pub use authority::HostKind;
pub use builder::{Empty, HasScheme, UriBuilder};
pub use compose::{compose_uri, normalize_uri};
pub use constants::{
    DATA_DEFAULT_MEDIA_TYPE, DATA_DEFAULT_PARAMETERS, DATA_SCHEME, FILE_SCHEME, HTTPS_DEFAULT_PORT,
    HTTPS_SCHEME, HTTP_DEFAULT_PORT, HTTP_SCHEME, LOCALHOST,
};
pub use decompose::{
    decompose_uri, decompose_uri_reference, decompose_uri_with, extract_authority, extract_fragment,
    extract_path, extract_query, extract_scheme, make_uri_safe_for_display, validate_uri,
};
pub use decomposed::DecomposedUri;
pub use error::{UriComponent, UriError, UriErrorKind};
pub use flags::{ComposeFlag, ComposeFlags, DecomposeFlag, DecomposeFlags};
pub use path::normalize_segments;
pub use pct::{percent_decode, percent_encode};
pub use query::{KEY_DELIMITER, QUERY_DELIMITER, split_query_elements};
pub use registry::{SchemeRegistry, query_uri_scheme};
pub use scheme::KnownUriScheme;
