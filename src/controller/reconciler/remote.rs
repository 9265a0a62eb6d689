//! # Remote Seam
//!
//! Per-kind CRUD over Better Stack, as seen by the reconciler.
//!
//! [`BetterStackClient`] implements [`RemoteApi`] for every managed kind;
//! [`HttpRemoteFactory`] hands out clients bound to a resource's base URL and
//! token, all sharing one HTTP transport.

use super::ManagedKind;
use crate::crd::{Heartbeat, Monitor, MonitorGroup};
use crate::provider::betterstack::{
    BetterStackClient, Error, HeartbeatRequest, MonitorGroupRequest, MonitorPayload,
    RemoteHeartbeat, RemoteMonitor, RemoteMonitorGroup,
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RemoteApi<K: ManagedKind>: Send + Sync {
    async fn get(&self, id: &str) -> Result<K::Entity, Error>;
    async fn create(&self, request: &K::Request) -> Result<K::Entity, Error>;
    async fn update(&self, id: &str, request: &K::Request) -> Result<K::Entity, Error>;
    /// Must treat an already deleted entity as success
    async fn delete(&self, id: &str) -> Result<(), Error>;
}

/// Produces a [`RemoteApi`] bound to one base URL and token
pub trait RemoteFactory<K: ManagedKind>: Send + Sync {
    fn connect(&self, base_url: Option<&str>, token: &str) -> Arc<dyn RemoteApi<K>>;
}

/// [`RemoteFactory`] backed by [`BetterStackClient`]
#[derive(Debug, Clone)]
pub struct HttpRemoteFactory {
    http: reqwest::Client,
}

impl HttpRemoteFactory {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl<K> RemoteFactory<K> for HttpRemoteFactory
where
    K: ManagedKind,
    BetterStackClient: RemoteApi<K>,
{
    fn connect(&self, base_url: Option<&str>, token: &str) -> Arc<dyn RemoteApi<K>> {
        Arc::new(BetterStackClient::new(self.http.clone(), base_url, token))
    }
}

#[async_trait]
impl RemoteApi<Monitor> for BetterStackClient {
    async fn get(&self, id: &str) -> Result<RemoteMonitor, Error> {
        self.get_monitor(id).await
    }

    async fn create(&self, request: &MonitorPayload) -> Result<RemoteMonitor, Error> {
        self.create_monitor(request).await
    }

    async fn update(&self, id: &str, request: &MonitorPayload) -> Result<RemoteMonitor, Error> {
        self.update_monitor(id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.delete_monitor(id).await
    }
}

#[async_trait]
impl RemoteApi<MonitorGroup> for BetterStackClient {
    async fn get(&self, id: &str) -> Result<RemoteMonitorGroup, Error> {
        self.get_monitor_group(id).await
    }

    async fn create(&self, request: &MonitorGroupRequest) -> Result<RemoteMonitorGroup, Error> {
        self.create_monitor_group(request).await
    }

    async fn update(
        &self,
        id: &str,
        request: &MonitorGroupRequest,
    ) -> Result<RemoteMonitorGroup, Error> {
        self.update_monitor_group(id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.delete_monitor_group(id).await
    }
}

#[async_trait]
impl RemoteApi<Heartbeat> for BetterStackClient {
    async fn get(&self, id: &str) -> Result<RemoteHeartbeat, Error> {
        self.get_heartbeat(id).await
    }

    async fn create(&self, request: &HeartbeatRequest) -> Result<RemoteHeartbeat, Error> {
        self.create_heartbeat(request).await
    }

    async fn update(&self, id: &str, request: &HeartbeatRequest) -> Result<RemoteHeartbeat, Error> {
        self.update_heartbeat(id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.delete_heartbeat(id).await
    }
}
