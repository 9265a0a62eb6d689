//! # Remote Sync Status
//!
//! Status types shared by every managed kind.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Observed state written by the operator
///
/// Identical for [`Monitor`](super::Monitor), [`MonitorGroup`](super::MonitorGroup)
/// and [`Heartbeat`](super::Heartbeat).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSyncStatus {
    /// Identifier of the Better Stack entity backing this resource
    /// Empty until the first successful create
    #[serde(rename = "remoteID", default, skip_serializing_if = "String::is_empty")]
    pub remote_id: String,
    /// Generation of the spec observed by the last successful reconciliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Conditions represent the latest available observations
    /// At most one condition per type
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Time of the last successful sync (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synced_time: Option<String>,
}

/// Condition represents a condition of a resource
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,
    /// Status of the condition (True, False, Unknown)
    pub status: String,
    /// Last transition time
    #[serde(default)]
    pub last_transition_time: Option<String>,
    /// Reason for the condition
    #[serde(default)]
    pub reason: Option<String>,
    /// Message describing the condition
    #[serde(default)]
    pub message: Option<String>,
}
