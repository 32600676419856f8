//! HTTP forward proxy that derives its destination from the request path.
//!
//! A client asks for `GET /https://example.com/resource` and the proxy
//! fetches `https://example.com/resource` on its behalf, relaying status,
//! headers, and body back with a small set of proxy-safety adjustments:
//! hop-specific request headers are stripped and `Host` rewritten, CORS and
//! identification headers are added, and the response body is streamed
//! through without buffering.
//!
//! Requests are independent. No state is shared between them beyond the
//! outbound client's transparent connection reuse.

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
