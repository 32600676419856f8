//! The proxy handler: one inbound request in, one relayed response out.
//!
//! # Responsibilities
//! - Derive the target URL from the inbound request path
//! - Sanitize hop-specific headers before forwarding
//! - Dispatch the outbound request and stream the response back
//! - Map rejections and transport failures to structured error responses

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::http::error::ProxyError;
use crate::http::server::AppState;
use crate::proxy::{headers, target};

/// Value of the identifying header attached to every relayed response.
pub const PROXY_IDENTITY: &str = "forward-proxy";

/// Relay one inbound request to the URL encoded in its path.
pub async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match relay(state, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(error = %error, "proxy request failed");
            error.into_response()
        }
    }
}

async fn relay(state: AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let usage = usage_hint(request.headers());
    let raw = target::raw_target(request.uri()).to_owned();

    let target = match target::parse_target(&raw) {
        Ok(url) => url,
        Err(target::TargetError::InvalidUrl) => return Err(ProxyError::InvalidUrl { usage }),
        Err(target::TargetError::UnsupportedScheme(scheme)) => {
            return Err(ProxyError::InvalidProtocol { scheme, usage })
        }
    };

    tracing::debug!(method = %request.method(), target = %target, "dispatching upstream");

    let (parts, body) = request.into_parts();
    let outbound_headers = headers::sanitize(&parts.headers, &target);

    let mut outbound = state
        .client
        .request(parts.method.clone(), target.clone())
        .headers(outbound_headers);

    // GET and HEAD never carry a body upstream, whatever the client sent.
    if parts.method != Method::GET && parts.method != Method::HEAD {
        outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let upstream = outbound.send().await.map_err(|source| ProxyError::Upstream {
        target: target.to_string(),
        source,
    })?;

    Ok(relay_response(upstream, &target))
}

/// Copy the upstream status and headers, stamp the proxy headers on top,
/// and pipe the body through as bytes arrive.
fn relay_response(upstream: reqwest::Response, target: &Url) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, PATCH, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("x-proxied-by"),
        HeaderValue::from_static(PROXY_IDENTITY),
    );
    // a parsed URL always serializes to ASCII
    if let Ok(value) = HeaderValue::from_str(target.as_str()) {
        headers.insert(HeaderName::from_static("x-target-url"), value);
    }

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// `<scheme>://<host>/https://example.com`, built from the inbound request.
/// The listener itself only speaks plain HTTP.
fn usage_hint(inbound: &HeaderMap) -> String {
    let host = inbound
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost:3000");
    format!("http://{host}/https://example.com")
}
