use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
};
use scrub_config::ServerConfig;
use scrub_engine::Scrubber;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::handlers;

pub const API_PATH: &str = "/api/endpoint";
pub const HEALTH_PATH: &str = "/health";

#[derive(Clone)]
pub struct AppState {
    pub scrubber: Arc<Scrubber>,
    pub max_body_bytes: usize,
}

pub struct ScrubServer;

impl ScrubServer {
    /// Bind `host:port` and serve until Ctrl-C or SIGTERM.
    pub async fn serve(scrubber: Arc<Scrubber>, config: &ServerConfig) -> anyhow::Result<()> {
        let app = router(scrubber, config);

        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).await?;

        info!("scrub server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("scrub server stopped");
        Ok(())
    }
}

/// Routes and middleware, without binding a socket.
pub fn router(scrubber: Arc<Scrubber>, config: &ServerConfig) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %uuid::Uuid::new_v4()
            )
        })
        .on_response(
            |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                info!(
                    parent: span,
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "request completed"
                );
            },
        );

    let mut app = Router::new()
        .route(API_PATH, post(handlers::redact))
        .route(HEALTH_PATH, get(handlers::health))
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    if config.cors {
        // Allow connections from any origin
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(trace).with_state(AppState {
        scrubber,
        max_body_bytes: config.max_body_bytes,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
