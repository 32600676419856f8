//! Terminal per-request failures and their response bodies.
//!
//! Every failure is local to its request: a malformed target and a
//! disallowed scheme reject before any network I/O, and an upstream
//! transport failure surfaces as a gateway error carrying the attempted
//! target. None of them touch the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why a proxied request ended without a relayed response.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The request path is not a parseable absolute URL.
    #[error("target is not a valid absolute URL")]
    InvalidUrl { usage: String },

    /// The target parsed, but its scheme is not http or https.
    #[error("unsupported target scheme `{scheme}`")]
    InvalidProtocol { scheme: String, usage: String },

    /// The outbound request could not be completed.
    #[error("upstream dispatch to {target} failed: {source}")]
    Upstream {
        target: String,
        #[source]
        source: reqwest::Error,
    },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::InvalidUrl { usage } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid URL",
                    "message": "Please provide a valid URL to proxy",
                    "usage": usage,
                }),
            ),
            ProxyError::InvalidProtocol { usage, .. } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid Protocol",
                    "message": "Only HTTP and HTTPS protocols are supported",
                    "usage": usage,
                }),
            ),
            ProxyError::Upstream { target, source } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Proxy Error",
                    "message": source.to_string(),
                    "target": target,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
