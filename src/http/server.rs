//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: greeting route plus catch-all proxy route
//! - Build the shared outbound client (redirect cap, connection reuse)
//! - Wire up middleware (tracing, request ID)
//! - Serve until the shutdown signal fires

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::proxy::handler::proxy_handler;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Outbound client, shared across requests. Connection reuse is
    /// transparent and carries no per-request state.
    pub client: reqwest::Client,
}

/// HTTP server for the forward proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        // no request timeout: a long-running streamed relay must not be cut
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(
                config.upstream.max_redirects,
            ))
            .build()
            .expect("failed to build outbound HTTP client");

        let router = Self::build_router(AppState { client });
        Self { router, config }
    }

    /// Build the Axum router.
    ///
    /// `GET /` answers the greeting. Everything else, whatever the method or
    /// path, lands in the proxy handler — including non-GET requests to `/`,
    /// which it rejects as invalid targets.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(root_handler).fallback(proxy_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "proxy server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("proxy server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

async fn root_handler() -> &'static str {
    "Hello World"
}
