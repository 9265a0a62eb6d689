//! # Error Policy
//!
//! Requeue policy for reconciles that returned an error.
//!
//! Better Stack and credential failures never reach this point; the
//! reconciler records them in status and schedules its own retry. What does
//! arrive here are Kubernetes read/write failures, which back off per object
//! along a Fibonacci sequence so one broken object cannot hot-loop.

use crate::constants::{ERROR_BACKOFF_MAX_SECS, ERROR_BACKOFF_MIN_SECS};
use crate::controller::backoff::FibonacciBackoff;
use crate::controller::reconciler::{Context, ManagedKind};
use crate::controller::Error;
use crate::observability;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Next requeue for `obj` after `error`
pub fn handle_reconciliation_error<K: ManagedKind>(
    obj: Arc<K>,
    error: &Error,
    ctx: Arc<Context<K>>,
) -> Action {
    let name = obj.name_any();
    let namespace = obj.namespace().unwrap_or_default();

    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.reconciliation_error",
        resource.kind = K::KIND,
        resource.name = %name,
        resource.namespace = %namespace,
        error = %error
    );
    let _error_guard = error_span.enter();

    error!("Reconciliation error for {} {}/{}: {}", K::KIND, namespace, name, error);
    observability::metrics::increment_reconciliation_errors(K::KIND);

    let resource_key = format!("{namespace}/{name}");
    let (backoff, attempts) = match ctx.backoff_states.lock() {
        Ok(mut states) => {
            let backoff = states
                .entry(resource_key)
                .or_insert_with(|| FibonacciBackoff::new(ERROR_BACKOFF_MIN_SECS, ERROR_BACKOFF_MAX_SECS));
            (backoff.next_backoff(), backoff.attempts())
        }
        Err(e) => {
            warn!("Failed to lock backoff states: {}, using minimum backoff", e);
            (Duration::from_secs(ERROR_BACKOFF_MIN_SECS), 0)
        }
    };

    info!(
        "Retrying in {}s (attempt {}, trigger source: error-backoff)",
        backoff.as_secs(),
        attempts
    );
    observability::metrics::increment_requeues_total(K::KIND, "error-backoff");
    Action::requeue(backoff)
}

/// Forget the backoff of `namespace/name` after a successful reconcile
pub fn reset_backoff<K: ManagedKind>(ctx: &Context<K>, namespace: &str, name: &str) {
    if let Ok(mut states) = ctx.backoff_states.lock() {
        states.remove(&format!("{namespace}/{name}"));
    }
}
