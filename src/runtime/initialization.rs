//! # Initialization
//!
//! Process start-up: rustls provider, tracing, metrics, probe server,
//! configuration and the Kubernetes client.

use crate::config::{load_config, ControllerConfig, ServerConfig};
use crate::constants;
use crate::controller::server::{start_server, ServerState};
use crate::observability;
use crate::provider::betterstack::build_http_client;
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Everything the watch loop needs
pub struct InitializationResult {
    /// Kubernetes client
    pub client: Client,
    /// Reconciler settings
    pub controller_config: ControllerConfig,
    /// Probe state shared with the HTTP server
    pub server_state: Arc<ServerState>,
    /// Better Stack transport shared by every API client
    pub http: reqwest::Client,
}

/// Initialize the operator runtime
///
/// Order matters: the rustls provider must be installed before any TLS
/// client is built, and the probe server must be up before the first
/// reconcile so liveness checks pass during a slow initial sync.
pub async fn initialize() -> Result<InitializationResult> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_provider| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| constants::DEFAULT_LOG_FILTER.into()),
        )
        .init();

    info!("Starting Better Stack operator v{}", env!("CARGO_PKG_VERSION"));

    let (controller_config, server_config) = load_config();
    info!(
        error_retry_secs = controller_config.error_retry_interval.as_secs(),
        resync_secs = controller_config.resync_interval.map(|d| d.as_secs()),
        http_timeout_secs = controller_config.http_timeout.as_secs(),
        max_concurrent_reconciles = controller_config.max_concurrent_reconciles,
        watch_namespace = controller_config.watch_namespace.as_deref().unwrap_or("<all>"),
        metrics_port = server_config.metrics_port,
        "Loaded configuration"
    );

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::new());
    let server_state_clone = server_state.clone();
    let server_port = server_config.metrics_port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });

    wait_for_server_ready(&server_state, &server_handle, &server_config).await?;

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let http = build_http_client(controller_config.http_timeout)
        .context("Failed to build Better Stack HTTP client")?;

    info!("Operator initialized, starting controllers...");

    Ok(InitializationResult {
        client,
        controller_config,
        server_state,
        http,
    })
}

/// Wait for the HTTP server to bind
async fn wait_for_server_ready(
    server_state: &Arc<ServerState>,
    server_handle: &tokio::task::JoinHandle<()>,
    config: &ServerConfig,
) -> Result<()> {
    let startup_timeout = Duration::from_secs(config.startup_timeout_secs);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let start_time = Instant::now();

    loop {
        if server_handle.is_finished() {
            return Err(anyhow::anyhow!("HTTP server failed to start"));
        }

        if server_state
            .is_ready
            .load(std::sync::atomic::Ordering::Relaxed)
        {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow::anyhow!(
                "HTTP server failed to become ready within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}
