//! # HTTP Server
//!
//! Metrics and health probe endpoints.
//!
//! - `GET /metrics` - Prometheus text exposition
//! - `GET /healthz` - liveness, always `200 OK` while the process serves
//! - `GET /readyz` - readiness, `200 OK` once every controller is running

use crate::observability::metrics;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared probe state
#[derive(Debug, Default)]
pub struct ServerState {
    /// Set once the listener is bound
    pub is_ready: AtomicBool,
    /// Set once the watch loop has started every controller
    pub controllers_started: AtomicBool,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_controllers_started(&self) {
        self.controllers_started.store(true, Ordering::Relaxed);
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .with_state(state)
}

/// Serve on an already bound listener
///
/// # Errors
///
/// Returns an error if the server stops with an I/O failure.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> anyhow::Result<()> {
    state.is_ready.store(true, Ordering::Relaxed);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Bind `0.0.0.0:<port>` and serve until the process exits
///
/// # Errors
///
/// Returns an error if the port cannot be bound or serving fails.
pub async fn start_server(port: u16, state: Arc<ServerState>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Metrics and probe server listening on {}", addr);
    serve(listener, state).await
}

async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn readyz(State(state): State<Arc<ServerState>>) -> Response {
    if state.controllers_started.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "controllers not started").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_server() -> (String, Arc<ServerState>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(ServerState::new());
        tokio::spawn(serve(listener, state.clone()));
        (format!("http://{addr}"), state)
    }

    #[tokio::test]
    async fn test_probes_follow_controller_state() {
        let (base, state) = spawn_server().await;
        let client = reqwest::Client::new();

        let health = client.get(format!("{base}/healthz")).send().await.unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::OK);

        let ready = client.get(format!("{base}/readyz")).send().await.unwrap();
        assert_eq!(ready.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

        state.mark_controllers_started();
        let ready = client.get(format!("{base}/readyz")).send().await.unwrap();
        assert_eq!(ready.status(), reqwest::StatusCode::OK);
        assert!(state.is_ready.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_exposes_registry() {
        let _ = metrics::register_metrics();
        metrics::increment_reconciliations("Monitor");

        let (base, _state) = spawn_server().await;
        let response = reqwest::get(format!("{base}/metrics")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body = response.text().await.unwrap();
        assert!(body.contains("betterstack_operator_reconciliations_total"));
    }
}
