//! Monitor group endpoints (`/monitor-groups`)

use super::{BetterStackClient, Error, MonitorGroupRequest, RemoteMonitorGroup, MONITOR_GROUPS_PATH};

impl BetterStackClient {
    pub async fn create_monitor_group(
        &self,
        request: &MonitorGroupRequest,
    ) -> Result<RemoteMonitorGroup, Error> {
        self.create_resource(MONITOR_GROUPS_PATH, request).await
    }

    pub async fn get_monitor_group(&self, id: &str) -> Result<RemoteMonitorGroup, Error> {
        self.get_resource(MONITOR_GROUPS_PATH, id).await
    }

    pub async fn update_monitor_group(
        &self,
        id: &str,
        request: &MonitorGroupRequest,
    ) -> Result<RemoteMonitorGroup, Error> {
        self.update_resource(MONITOR_GROUPS_PATH, id, request).await
    }

    pub async fn delete_monitor_group(&self, id: &str) -> Result<(), Error> {
        self.delete_resource(MONITOR_GROUPS_PATH, id).await
    }

    pub async fn list_monitor_groups(&self) -> Result<Vec<RemoteMonitorGroup>, Error> {
        self.list_resources(MONITOR_GROUPS_PATH).await
    }
}
