//! # Reconciler
//!
//! The state machine shared by every managed kind.
//!
//! One invocation drives a single resource one step toward its declared
//! state:
//!
//! 1. **Load** the object; a missing object needs nothing.
//! 2. **Delete**: when `deletionTimestamp` is set and our finalizer is
//!    present, delete the remote entity (best effort) and drop the finalizer.
//! 3. **Finalizer**: add it and stop. The resulting watch event starts the
//!    next reconcile, so the finalizer is stored before any remote create.
//! 4. **Credentials**: resolve the API token or report `TokenUnavailable`.
//! 5. **Sync**: fetch (monitors only), update or create the remote entity;
//!    a 404 on fetch or update means the entity is gone and it is recreated.
//! 6. **Commit**: record the remote id, generation and `Ready=True`.
//!
//! Better Stack and credential failures end in a status condition and a
//! reschedule after `error_retry_interval`. Only Kubernetes write failures,
//! most importantly a failed status commit after a successful remote write,
//! are returned as errors.

mod cluster;
mod kinds;
pub mod patch;
mod remote;

pub use cluster::{ClusterState, KubeState};
pub use kinds::ManagedKind;
pub use remote::{HttpRemoteFactory, RemoteApi, RemoteFactory};

use crate::config::ControllerConfig;
use crate::controller::backoff::FibonacciBackoff;
use crate::controller::conditions::{now_rfc3339, set_condition, ConditionType, Reason};
use crate::controller::credentials::{resolve_token, SecretSource};
use crate::controller::Error;
use crate::crd::RemoteSyncStatus;
use crate::observability::metrics;
use crate::provider::betterstack;
use kube::runtime::controller::Action;
use kube::{Resource, ResourceExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

/// Shared state handed to every reconcile of kind `K`
pub struct Context<K: ManagedKind> {
    pub cluster: Arc<dyn ClusterState<K>>,
    pub secrets: Arc<dyn SecretSource>,
    pub remotes: Arc<dyn RemoteFactory<K>>,
    /// Reschedule after credential or Better Stack failures
    pub error_retry_interval: Duration,
    /// Reschedule after success; `None` waits for the next change
    pub resync_interval: Option<Duration>,
    /// Per-object backoff for hard errors, keyed by `namespace/name`
    pub backoff_states: Mutex<HashMap<String, FibonacciBackoff>>,
}

impl<K: ManagedKind> std::fmt::Debug for Context<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("kind", &K::KIND)
            .field("error_retry_interval", &self.error_retry_interval)
            .field("resync_interval", &self.resync_interval)
            .finish_non_exhaustive()
    }
}

impl<K: ManagedKind> Context<K> {
    pub fn new(
        cluster: Arc<dyn ClusterState<K>>,
        secrets: Arc<dyn SecretSource>,
        remotes: Arc<dyn RemoteFactory<K>>,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            cluster,
            secrets,
            remotes,
            error_retry_interval: config.error_retry_interval,
            resync_interval: config.resync_interval,
            backoff_states: Mutex::new(HashMap::new()),
        }
    }

    fn retry_after_error(&self) -> Action {
        metrics::increment_requeues_total(K::KIND, "error-retry");
        Action::requeue(self.error_retry_interval)
    }

    fn after_success(&self) -> Action {
        match self.resync_interval {
            Some(interval) => {
                metrics::increment_requeues_total(K::KIND, "resync");
                Action::requeue(interval)
            }
            None => Action::await_change(),
        }
    }
}

/// Reconcile the object `namespace/name` of kind `K`
///
/// # Errors
///
/// Returns an error only when a Kubernetes read or write fails.
pub async fn reconcile_key<K: ManagedKind>(
    ctx: &Context<K>,
    namespace: &str,
    name: &str,
) -> Result<Action, Error> {
    let span = info_span!("reconcile", kind = K::KIND, namespace, name);
    reconcile_inner(ctx, namespace, name).instrument(span).await
}

async fn reconcile_inner<K: ManagedKind>(
    ctx: &Context<K>,
    namespace: &str,
    name: &str,
) -> Result<Action, Error> {
    let Some(obj) = ctx.cluster.get(namespace, name).await? else {
        debug!("{} {namespace}/{name} no longer exists", K::KIND);
        return Ok(Action::await_change());
    };

    if obj.meta().deletion_timestamp.is_some() {
        return finalize(ctx, &obj, namespace).await;
    }

    if !has_finalizer(&obj) {
        let mut finalizers = obj.finalizers().to_vec();
        finalizers.push(K::FINALIZER.to_string());
        ctx.cluster.patch_finalizers(&obj, &finalizers).await?;
        info!("Added finalizer {}", K::FINALIZER);
        return Ok(Action::await_change());
    }

    sync(ctx, &obj, namespace, name).await
}

fn has_finalizer<K: ManagedKind>(obj: &K) -> bool {
    obj.finalizers().iter().any(|f| f == K::FINALIZER)
}

async fn finalize<K: ManagedKind>(
    ctx: &Context<K>,
    obj: &K,
    namespace: &str,
) -> Result<Action, Error> {
    if !has_finalizer(obj) {
        debug!("Deletion in progress without our finalizer, nothing to do");
        return Ok(Action::await_change());
    }

    let remote_id = obj
        .sync_status()
        .map(|s| s.remote_id.clone())
        .unwrap_or_default();

    if remote_id.is_empty() {
        debug!("No remote entity recorded, skipping remote delete");
    } else {
        match resolve_token(ctx.secrets.as_ref(), namespace, obj.token_ref()).await {
            Err(e) => {
                warn!(remote_id = %remote_id, error = %e, "Credentials unavailable, skipping remote delete");
            }
            Ok(token) => {
                let remote = ctx.remotes.connect(obj.base_url(), &token);
                match remote.delete(&remote_id).await {
                    Ok(()) => info!(remote_id = %remote_id, "Deleted {} from Better Stack", K::KIND),
                    Err(e) if e.is_not_found() => {
                        info!(remote_id = %remote_id, "{} already absent from Better Stack", K::KIND);
                    }
                    Err(e) => warn!(
                        remote_id = %remote_id,
                        error = %e,
                        "Failed to delete {} from Better Stack, removing finalizer anyway",
                        K::KIND
                    ),
                }
            }
        }
    }

    let finalizers: Vec<String> = obj
        .finalizers()
        .iter()
        .filter(|f| f.as_str() != K::FINALIZER)
        .cloned()
        .collect();
    ctx.cluster.patch_finalizers(obj, &finalizers).await?;
    info!("Removed finalizer {}", K::FINALIZER);
    Ok(Action::await_change())
}

async fn sync<K: ManagedKind>(
    ctx: &Context<K>,
    obj: &K,
    namespace: &str,
    name: &str,
) -> Result<Action, Error> {
    let key = format!("{namespace}/{name}");
    let mut snapshot = obj.sync_status().cloned().unwrap_or_default();
    let mut status = snapshot.clone();

    let token = match resolve_token(ctx.secrets.as_ref(), namespace, obj.token_ref()).await {
        Ok(token) => token,
        Err(e) => {
            let message = e.to_string();
            warn!(error = %message, "API token unavailable");
            set_condition(
                &mut status.conditions,
                ConditionType::CredentialsAvailable,
                false,
                Reason::TokenUnavailable,
                message.clone(),
            );
            set_condition(
                &mut status.conditions,
                ConditionType::Ready,
                false,
                Reason::TokenUnavailable,
                message,
            );
            if let Err(e) = write_status(ctx, obj, &snapshot, &status).await {
                warn!(error = %e, "Failed to record credential failure");
            }
            return Ok(ctx.retry_after_error());
        }
    };

    set_condition(
        &mut status.conditions,
        ConditionType::CredentialsAvailable,
        true,
        Reason::TokenResolved,
        "API token resolved",
    );
    // Best effort; the final commit carries the condition again if this fails.
    match write_status(ctx, obj, &snapshot, &status).await {
        Ok(()) => snapshot = status.clone(),
        Err(e) => debug!(error = %e, "Ignoring failed credentials status update"),
    }

    let remote = ctx.remotes.connect(obj.base_url(), &token);
    let mut remote_id = status.remote_id.clone();

    let mut existing = None;
    if K::FETCH_EXISTING && !remote_id.is_empty() {
        match remote.get(&remote_id).await {
            Ok(entity) => existing = Some(entity),
            Err(e) if e.is_not_found() => {
                info!(remote_id = %remote_id, "{} vanished from Better Stack, recreating", K::KIND);
                remote_id.clear();
            }
            Err(e) => warn!(remote_id = %remote_id, error = %e, "Failed to fetch {}, updating without it", K::KIND),
        }
    }

    let request = obj.build_request(existing.as_ref());

    let mut outcome = None;
    if !remote_id.is_empty() {
        match remote.update(&remote_id, &request).await {
            Err(e) if e.is_not_found() => {
                info!(remote_id = %remote_id, "{} vanished from Better Stack, recreating", K::KIND);
                remote_id.clear();
            }
            result => outcome = Some(result),
        }
    }
    let outcome = match outcome {
        Some(result) => result,
        None => remote.create(&request).await,
    };

    match outcome {
        Ok(entity) => {
            status.remote_id = K::entity_id(&entity).to_string();
            status.observed_generation = obj.meta().generation;
            status.last_synced_time = Some(now_rfc3339());
            let message = format!("{} synced to Better Stack", K::KIND);
            set_condition(
                &mut status.conditions,
                ConditionType::Synced,
                true,
                K::SYNCED_REASON,
                message.clone(),
            );
            set_condition(
                &mut status.conditions,
                ConditionType::Ready,
                true,
                K::SYNCED_REASON,
                message,
            );

            write_status(ctx, obj, &snapshot, &status)
                .await
                .map_err(|source| Error::StatusCommit {
                    key,
                    source: Box::new(source),
                })?;
            info!(remote_id = %status.remote_id, "{} synced", K::KIND);
            Ok(ctx.after_success())
        }
        Err(e) => {
            let (reason, message) = classify_remote_error::<K>(&e);
            warn!(error = %e, reason = %reason, "Failed to sync {} to Better Stack", K::KIND);
            status.remote_id = remote_id;
            set_condition(
                &mut status.conditions,
                ConditionType::Synced,
                false,
                reason,
                message.clone(),
            );
            set_condition(
                &mut status.conditions,
                ConditionType::Ready,
                false,
                reason,
                message,
            );
            if let Err(e) = write_status(ctx, obj, &snapshot, &status).await {
                warn!(error = %e, "Failed to record sync failure");
            }
            Ok(ctx.retry_after_error())
        }
    }
}

/// Reason and user-facing message for a failed Better Stack write
///
/// Quota errors get the kind's dedicated reason and a fixed message, since
/// the raw one carries upgrade copy; everything else keeps the API message.
fn classify_remote_error<K: ManagedKind>(err: &betterstack::Error) -> (Reason, String) {
    match K::QUOTA {
        Some((reason, message)) if err.is_quota_exceeded() => (reason, message.to_string()),
        _ => (
            Reason::SyncFailed,
            err.api()
                .map_or_else(|| err.to_string(), |api| api.message.clone()),
        ),
    }
}

async fn write_status<K: ManagedKind>(
    ctx: &Context<K>,
    obj: &K,
    before: &RemoteSyncStatus,
    after: &RemoteSyncStatus,
) -> Result<(), Error> {
    match patch::status_patch(before, after)? {
        Some(body) => ctx.cluster.patch_status(obj, body).await,
        None => Ok(()),
    }
}
