//! # Watch Loop
//!
//! One kube-runtime controller per managed kind, all running concurrently
//! until SIGTERM/SIGINT.
//!
//! Each controller watches its own kind, filtered to spec and finalizer
//! changes, plus Secrets; a Secret event is mapped through [`SecretIndex`] to
//! every object referencing it, so token rotation re-reconciles dependents
//! without a spec change.

use super::error_policy::{handle_reconciliation_error, reset_backoff};
use super::initialization::InitializationResult;
use crate::config::ControllerConfig;
use crate::controller::reconciler::{
    reconcile_key, Context, HttpRemoteFactory, KubeState, ManagedKind,
};
use crate::controller::secret_index::SecretIndex;
use crate::controller::Error;
use crate::crd::{Heartbeat, Monitor, MonitorGroup};
use crate::observability::metrics;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::runtime::controller::{self, Action, Controller};
use kube::runtime::reflector::{self, reflector};
use kube::runtime::watcher::{self, watcher};
use kube::runtime::{predicates, Predicate, WatchStreamExt};
use kube::{Api, Client, Resource, ResourceExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run every controller until shutdown
pub async fn run_watch_loop(init: InitializationResult) -> anyhow::Result<()> {
    let InitializationResult {
        client,
        controller_config,
        server_state,
        http,
    } = init;

    let cluster = Arc::new(KubeState::new(client.clone()));
    let remotes = Arc::new(HttpRemoteFactory::new(http));

    let monitors = run_controller::<Monitor>(
        client.clone(),
        Arc::new(Context::new(cluster.clone(), cluster.clone(), remotes.clone(), &controller_config)),
        &controller_config,
    );
    let monitor_groups = run_controller::<MonitorGroup>(
        client.clone(),
        Arc::new(Context::new(cluster.clone(), cluster.clone(), remotes.clone(), &controller_config)),
        &controller_config,
    );
    let heartbeats = run_controller::<Heartbeat>(
        client,
        Arc::new(Context::new(cluster.clone(), cluster, remotes, &controller_config)),
        &controller_config,
    );

    server_state.mark_controllers_started();
    info!("Controllers started for Monitor, MonitorGroup and Heartbeat");

    tokio::join!(monitors, monitor_groups, heartbeats);

    info!("Controllers stopped, shutting down");
    Ok(())
}

fn scoped_api<T>(client: Client, namespace: Option<&str>) -> Api<T>
where
    T: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope, DynamicType = ()>,
{
    match namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::all(client),
    }
}

async fn run_controller<K: ManagedKind>(
    client: Client,
    ctx: Arc<Context<K>>,
    config: &ControllerConfig,
) {
    let namespace = config.watch_namespace.as_deref();
    let resources: Api<K> = scoped_api(client.clone(), namespace);
    let secrets: Api<Secret> = scoped_api(client, namespace);

    let (store, writer) = reflector::store();
    let trigger = reflector(writer, watcher(resources, watcher::Config::default()))
        .applied_objects()
        .default_backoff()
        .predicate_filter(trigger_predicate::<K>());
    let index = SecretIndex::new(store.clone());

    Controller::for_stream(trigger, store)
        .with_config(controller::Config::default().concurrency(config.max_concurrent_reconciles))
        .watches(secrets, watcher::Config::default(), move |secret| {
            index.lookup(&secret)
        })
        .shutdown_on_signal()
        .run(reconcile::<K>, handle_reconciliation_error::<K>, ctx)
        .for_each(|result| async move {
            match result {
                Ok((obj, _action)) => debug!("Reconciled {} {}", K::KIND, obj),
                Err(e) => warn!("{} controller stream error: {}", K::KIND, e),
            }
        })
        .await;
}

/// Own-kind events that start a reconcile
///
/// Only spec (generation) and finalizer changes pass; the operator's own
/// status writes would otherwise re-trigger a sync after every commit.
fn trigger_predicate<K: Resource>() -> impl Predicate<K> {
    predicates::generation::<K>.combine(predicates::finalizers::<K>)
}

/// Controller entry point: timing, metrics and backoff reset around [`reconcile_key`]
async fn reconcile<K: ManagedKind>(obj: Arc<K>, ctx: Arc<Context<K>>) -> Result<Action, Error> {
    let start = Instant::now();
    metrics::increment_reconciliations(K::KIND);

    let namespace = obj.namespace().unwrap_or_default();
    let name = obj.name_any();
    let result = reconcile_key(&ctx, &namespace, &name).await;

    metrics::observe_reconciliation_duration(K::KIND, start.elapsed().as_secs_f64());
    if result.is_ok() {
        reset_backoff(&ctx, &namespace, &name);
    }
    result
}
