//! # Controller Errors

use thiserror::Error;

/// Errors returned from a reconcile
///
/// Better Stack and credential failures never surface here; they end in a
/// status condition and a reschedule. What remains are failures to talk to
/// the Kubernetes API itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
    #[error("conflicting update to {key}, object changed since it was read")]
    Conflict { key: String },
    #[error("failed to serialize status: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Status write failed after Better Stack accepted the change
    #[error("failed to record sync result for {key}: {source}")]
    StatusCommit {
        key: String,
        #[source]
        source: Box<Error>,
    },
}
