//! Outbound header sanitization.
//!
//! Pure function from inbound headers to outbound headers, so the rewrite
//! rules are testable without a network.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Build the outbound header collection for a proxied request.
///
/// Host, connection, keep-alive, and content-length are hop-specific and
/// must not travel verbatim: connection management belongs to each leg of
/// the relay, and content-length is recomputed when the body is re-framed.
/// Host is rewritten to the target authority.
pub fn sanitize(inbound: &HeaderMap, target: &Url) -> HeaderMap {
    let mut outbound = inbound.clone();

    outbound.remove(header::HOST);
    outbound.remove(header::CONNECTION);
    outbound.remove(HeaderName::from_static("keep-alive"));
    outbound.remove(header::CONTENT_LENGTH);

    if let Ok(host) = HeaderValue::from_str(&host_header_value(target)) {
        outbound.insert(header::HOST, host);
    }

    outbound
}

/// The `host[:port]` form of the target, default ports elided.
pub fn host_header_value(target: &Url) -> String {
    let host = target.host_str().unwrap_or_default();
    match target.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
