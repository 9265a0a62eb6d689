//! Heartbeat endpoints (`/heartbeats`)

use super::{BetterStackClient, Error, HeartbeatRequest, RemoteHeartbeat, HEARTBEATS_PATH};

impl BetterStackClient {
    pub async fn create_heartbeat(
        &self,
        request: &HeartbeatRequest,
    ) -> Result<RemoteHeartbeat, Error> {
        self.create_resource(HEARTBEATS_PATH, request).await
    }

    pub async fn get_heartbeat(&self, id: &str) -> Result<RemoteHeartbeat, Error> {
        self.get_resource(HEARTBEATS_PATH, id).await
    }

    pub async fn update_heartbeat(
        &self,
        id: &str,
        request: &HeartbeatRequest,
    ) -> Result<RemoteHeartbeat, Error> {
        self.update_resource(HEARTBEATS_PATH, id, request).await
    }

    pub async fn delete_heartbeat(&self, id: &str) -> Result<(), Error> {
        self.delete_resource(HEARTBEATS_PATH, id).await
    }

    pub async fn list_heartbeats(&self) -> Result<Vec<RemoteHeartbeat>, Error> {
        self.list_resources(HEARTBEATS_PATH).await
    }
}
