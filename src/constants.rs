//! # Constants
//!
//! Default values for process configuration and runtime behaviour.

/// Default metrics/probe server port
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default server startup timeout in seconds
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default server readiness poll interval in milliseconds
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Default reschedule after a recoverable reconcile error, in seconds
pub const DEFAULT_ERROR_RETRY_INTERVAL_SECS: u64 = 30;

/// Default per-call timeout of the Better Stack HTTP transport, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default number of concurrent reconciliations per kind
pub const DEFAULT_MAX_CONCURRENT_RECONCILES: u16 = 4;

/// Lower bound of the hard-error backoff, in seconds
pub const ERROR_BACKOFF_MIN_SECS: u64 = 5;

/// Upper bound of the hard-error backoff, in seconds
pub const ERROR_BACKOFF_MAX_SECS: u64 = 300;

/// Field manager used for status and finalizer patches
pub const FIELD_MANAGER: &str = "betterstack-operator";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "betterstack_operator=info,kube_runtime=warn";
