//! Scheme names and well-known ports of the built-in policies.

/// The `file` scheme (RFC 8089).
pub const FILE_SCHEME: &str = "file";

/// The `http` scheme.
pub const HTTP_SCHEME: &str = "http";

/// The `https` scheme.
pub const HTTPS_SCHEME: &str = "https";

/// The `data` scheme (RFC 2397).
pub const DATA_SCHEME: &str = "data";

/// Default port of `http`.
pub const HTTP_DEFAULT_PORT: &str = "80";

/// Default port of `https`.
pub const HTTPS_DEFAULT_PORT: &str = "443";

/// The host that names the local machine in a `file` URI.
pub const LOCALHOST: &str = "localhost";

/// Media type of a `data` URI with an empty header.
pub const DATA_DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// Parameters of a `data` URI with an empty header.
pub const DATA_DEFAULT_PARAMETERS: &str = ";charset=US-ASCII";
