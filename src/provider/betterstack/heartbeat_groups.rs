//! Heartbeat group endpoints (`/heartbeat-groups`)
//!
//! Not backed by a custom resource; exposed for completeness of the client.

use super::{
    BetterStackClient, Error, HeartbeatGroupRequest, RemoteHeartbeatGroup, HEARTBEAT_GROUPS_PATH,
};

impl BetterStackClient {
    pub async fn create_heartbeat_group(
        &self,
        request: &HeartbeatGroupRequest,
    ) -> Result<RemoteHeartbeatGroup, Error> {
        self.create_resource(HEARTBEAT_GROUPS_PATH, request).await
    }

    pub async fn get_heartbeat_group(&self, id: &str) -> Result<RemoteHeartbeatGroup, Error> {
        self.get_resource(HEARTBEAT_GROUPS_PATH, id).await
    }

    pub async fn update_heartbeat_group(
        &self,
        id: &str,
        request: &HeartbeatGroupRequest,
    ) -> Result<RemoteHeartbeatGroup, Error> {
        self.update_resource(HEARTBEAT_GROUPS_PATH, id, request).await
    }

    pub async fn delete_heartbeat_group(&self, id: &str) -> Result<(), Error> {
        self.delete_resource(HEARTBEAT_GROUPS_PATH, id).await
    }

    pub async fn list_heartbeat_groups(&self) -> Result<Vec<RemoteHeartbeatGroup>, Error> {
        self.list_resources(HEARTBEAT_GROUPS_PATH).await
    }
}
