//! # Better Stack Operator
//!
//! Syncs `Monitor`, `MonitorGroup` and `Heartbeat` resources to Better Stack Uptime.
//!
//! ## Environment
//!
//! - `RUST_LOG` - tracing filter (default `betterstack_operator=info,kube_runtime=warn`)
//! - `METRICS_PORT` - metrics and probe port (default `8080`)
//! - `ERROR_RETRY_INTERVAL_SECS` - retry after Better Stack or credential failures (default `30`)
//! - `RESYNC_INTERVAL_SECS` - periodic resync after success (default off)
//! - `HTTP_TIMEOUT_SECS` - Better Stack request timeout (default `30`)
//! - `MAX_CONCURRENT_RECONCILES` - per kind (default `4`)
//! - `WATCH_NAMESPACE` - restrict to one namespace (default all)

use anyhow::Result;
use betterstack_operator::runtime::initialization::initialize;
use betterstack_operator::runtime::watch_loop::run_watch_loop;

#[tokio::main]
async fn main() -> Result<()> {
    let init_result = initialize().await?;

    run_watch_loop(init_result).await?;

    Ok(())
}
