//! Monitor endpoints (`/monitors`)

use super::{BetterStackClient, Error, MonitorPayload, RemoteMonitor, MONITORS_PATH};

impl BetterStackClient {
    pub async fn create_monitor(&self, request: &MonitorPayload) -> Result<RemoteMonitor, Error> {
        self.create_resource(MONITORS_PATH, request).await
    }

    pub async fn get_monitor(&self, id: &str) -> Result<RemoteMonitor, Error> {
        self.get_resource(MONITORS_PATH, id).await
    }

    /// Partial update; fields absent from `request` are left unchanged
    pub async fn update_monitor(
        &self,
        id: &str,
        request: &MonitorPayload,
    ) -> Result<RemoteMonitor, Error> {
        self.update_resource(MONITORS_PATH, id, request).await
    }

    pub async fn delete_monitor(&self, id: &str) -> Result<(), Error> {
        self.delete_resource(MONITORS_PATH, id).await
    }

    pub async fn list_monitors(&self) -> Result<Vec<RemoteMonitor>, Error> {
        self.list_resources(MONITORS_PATH).await
    }
}
