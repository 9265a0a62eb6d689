//! # Controller Configuration
//!
//! Reconciler timing, HTTP transport and watch scope.

use super::{env_var_optional, env_var_or_default};
use crate::constants::{
    DEFAULT_ERROR_RETRY_INTERVAL_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENT_RECONCILES,
};
use std::time::Duration;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Reschedule after credential or Better Stack failures
    pub error_retry_interval: Duration,
    /// Periodic resync after a successful reconcile
    /// `None` waits for the next change event
    pub resync_interval: Option<Duration>,
    /// Per-call timeout of the shared Better Stack transport
    pub http_timeout: Duration,
    /// Concurrent reconciliations per kind (0 = unbounded)
    pub max_concurrent_reconciles: u16,
    /// Restrict watches to one namespace; `None` watches all
    pub watch_namespace: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            error_retry_interval: Duration::from_secs(DEFAULT_ERROR_RETRY_INTERVAL_SECS),
            resync_interval: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_concurrent_reconciles: DEFAULT_MAX_CONCURRENT_RECONCILES,
            watch_namespace: None,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            error_retry_interval: Duration::from_secs(env_var_or_default(
                "ERROR_RETRY_INTERVAL_SECS",
                DEFAULT_ERROR_RETRY_INTERVAL_SECS,
            )),
            resync_interval: env_var_optional::<u64>("RESYNC_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            http_timeout: Duration::from_secs(env_var_or_default(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )),
            max_concurrent_reconciles: env_var_or_default(
                "MAX_CONCURRENT_RECONCILES",
                DEFAULT_MAX_CONCURRENT_RECONCILES,
            ),
            watch_namespace: env_var_optional("WATCH_NAMESPACE"),
        }
    }
}
