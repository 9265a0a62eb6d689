//! # Remote Metrics
//!
//! Better Stack API request counters.

use crate::observability::metrics::registry::REGISTRY;
use anyhow::Result;
use prometheus::IntCounterVec;
use std::sync::LazyLock;

static REMOTE_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "betterstack_operator_remote_requests_total",
            "Total number of Better Stack API requests by HTTP method and outcome",
        ),
        &["method", "outcome"],
    )
    .expect("Failed to create REMOTE_REQUESTS_TOTAL metric - this should never happen")
});

pub(crate) fn register_remote_metrics() -> Result<()> {
    REGISTRY.register(Box::new(REMOTE_REQUESTS_TOTAL.clone()))?;
    Ok(())
}

/// Count one Better Stack request
///
/// `outcome` is `success`, `not_found`, `api_error` or `transport_error`.
pub fn record_remote_request(method: &str, outcome: &str) {
    REMOTE_REQUESTS_TOTAL
        .with_label_values(&[method, outcome])
        .inc();
}
