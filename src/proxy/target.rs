//! Target URL derivation.
//!
//! The target is exactly the inbound request line minus the leading slash:
//! path and query are taken as the raw substring the client sent and
//! reparsed as an absolute URL. Nothing is percent-decoded or re-encoded on
//! the way through, so encoded characters and nested query strings reach
//! the origin untouched. The first `?` in the request line demarcates the
//! query, which is re-appended verbatim.

use axum::http::Uri;
use url::Url;

/// Why a request path was rejected as a proxy target.
#[derive(Debug, PartialEq, Eq)]
pub enum TargetError {
    /// The path is not a syntactically valid absolute URL.
    InvalidUrl,
    /// The URL parsed, but its scheme is not http or https.
    UnsupportedScheme(String),
}

/// Reconstruct the substring the client intended as the target URL.
pub fn raw_target(uri: &Uri) -> &str {
    let raw = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    raw.strip_prefix('/').unwrap_or(raw)
}

/// Parse a raw target into a validated URL with an allowed scheme.
pub fn parse_target(raw: &str) -> Result<Url, TargetError> {
    let url = Url::parse(raw).map_err(|_| TargetError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TargetError::UnsupportedScheme(other.to_string())),
    }
}
