//! HTTP Chat Endpoint
//!
//! Thin axum layer over the matcher.
//!
//! Endpoints:
//! - GET /: embedded chat page
//! - POST /get: `{"message": ...}` → `{"response": ...}`
//! - GET /health: corpus and model summary

pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use faqmatch_core::MatcherHandle;
use state::AppState;

/// Maximum number of requests processed at once
pub const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Build the axum router with all chat routes
pub fn build_router(matcher: MatcherHandle, port: u16) -> Router {
    let origins: Vec<HeaderValue> = [
        format!("http://127.0.0.1:{}", port),
        format!("http://localhost:{}", port),
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let csp = SetResponseHeaderLayer::overriding(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self' 'unsafe-inline'"),
    );

    Router::new()
        .route("/", get(handlers::serve_index))
        .route("/get", post(handlers::ask))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .concurrency_limit(MAX_CONCURRENT_REQUESTS)
                .layer(cors)
                .layer(csp),
        )
        .with_state(AppState::new(matcher))
}

/// HTTP server for the chat endpoint
pub struct HttpServer {
    config: HttpServerConfig,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig) -> Self {
        Self { config }
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self, matcher: MatcherHandle) -> Result<(), std::io::Error> {
        let app = build_router(matcher, self.config.port);

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("FAQ chat available at http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server shutting down");
        Ok(())
    }
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

// ============================================================================
// TESTS
// ============================================================================
