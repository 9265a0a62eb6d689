//! # Managed Kinds
//!
//! What the reconciler needs to know about each custom resource kind.

use crate::controller::conditions::Reason;
use crate::controller::request::{
    build_heartbeat_request, build_monitor_group_request, build_monitor_request,
};
use crate::crd::{Heartbeat, Monitor, MonitorGroup, RemoteSyncStatus, SecretKeyRef};
use crate::provider::betterstack::{
    HeartbeatRequest, MonitorGroupRequest, MonitorPayload, RemoteHeartbeat, RemoteMonitor,
    RemoteMonitorGroup,
};
use kube::core::NamespaceResourceScope;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A custom resource kind projected into Better Stack
pub trait ManagedKind:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Kind name used in logs, metrics and condition messages
    const KIND: &'static str;
    /// Finalizer guarding remote cleanup
    const FINALIZER: &'static str;
    /// Reason recorded on `Synced`/`Ready` after a successful write
    const SYNCED_REASON: Reason;
    /// Reason and sanitized message used when the account quota is exhausted
    ///
    /// Kinds without one report quota errors as `SyncFailed`.
    const QUOTA: Option<(Reason, &'static str)> = None;
    /// GET the remote entity before updating so its state can feed the request
    const FETCH_EXISTING: bool = false;

    /// Create/update payload
    type Request: Serialize + Debug + Send + Sync;
    /// Remote entity returned by the API
    type Entity: DeserializeOwned + Debug + Clone + Send + Sync;

    fn token_ref(&self) -> &SecretKeyRef;
    fn base_url(&self) -> Option<&str>;
    fn sync_status(&self) -> Option<&RemoteSyncStatus>;
    fn build_request(&self, existing: Option<&Self::Entity>) -> Self::Request;
    fn entity_id(entity: &Self::Entity) -> &str;
}

impl ManagedKind for Monitor {
    const KIND: &'static str = "Monitor";
    const FINALIZER: &'static str = "betterstack.monitoring.loks0n/monitor-finalizer";
    const SYNCED_REASON: Reason = Reason::MonitorSynced;
    const QUOTA: Option<(Reason, &'static str)> = Some((
        Reason::MonitorQuotaExceeded,
        "Better Stack monitor quota reached",
    ));
    const FETCH_EXISTING: bool = true;

    type Request = MonitorPayload;
    type Entity = RemoteMonitor;

    fn token_ref(&self) -> &SecretKeyRef {
        &self.spec.api_token_secret_ref
    }

    fn base_url(&self) -> Option<&str> {
        self.spec.base_url.as_deref()
    }

    fn sync_status(&self) -> Option<&RemoteSyncStatus> {
        self.status.as_ref()
    }

    fn build_request(&self, existing: Option<&RemoteMonitor>) -> MonitorPayload {
        build_monitor_request(&self.spec, existing)
    }

    fn entity_id(entity: &RemoteMonitor) -> &str {
        &entity.id
    }
}

impl ManagedKind for MonitorGroup {
    const KIND: &'static str = "MonitorGroup";
    const FINALIZER: &'static str = "betterstack.monitoring.loks0n/monitorgroup-finalizer";
    const SYNCED_REASON: Reason = Reason::MonitorGroupSynced;

    type Request = MonitorGroupRequest;
    type Entity = RemoteMonitorGroup;

    fn token_ref(&self) -> &SecretKeyRef {
        &self.spec.api_token_secret_ref
    }

    fn base_url(&self) -> Option<&str> {
        self.spec.base_url.as_deref()
    }

    fn sync_status(&self) -> Option<&RemoteSyncStatus> {
        self.status.as_ref()
    }

    fn build_request(&self, _existing: Option<&RemoteMonitorGroup>) -> MonitorGroupRequest {
        build_monitor_group_request(&self.spec)
    }

    fn entity_id(entity: &RemoteMonitorGroup) -> &str {
        &entity.id
    }
}

impl ManagedKind for Heartbeat {
    const KIND: &'static str = "Heartbeat";
    const FINALIZER: &'static str = "betterstack.monitoring.loks0n/heartbeat-finalizer";
    const SYNCED_REASON: Reason = Reason::HeartbeatSynced;
    const QUOTA: Option<(Reason, &'static str)> = Some((
        Reason::HeartbeatQuotaExceeded,
        "Better Stack heartbeat quota reached",
    ));

    type Request = HeartbeatRequest;
    type Entity = RemoteHeartbeat;

    fn token_ref(&self) -> &SecretKeyRef {
        &self.spec.api_token_secret_ref
    }

    fn base_url(&self) -> Option<&str> {
        self.spec.base_url.as_deref()
    }

    fn sync_status(&self) -> Option<&RemoteSyncStatus> {
        self.status.as_ref()
    }

    fn build_request(&self, _existing: Option<&RemoteHeartbeat>) -> HeartbeatRequest {
        build_heartbeat_request(&self.spec)
    }

    fn entity_id(entity: &RemoteHeartbeat) -> &str {
        &entity.id
    }
}
