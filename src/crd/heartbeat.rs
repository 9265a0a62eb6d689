//! # Heartbeat
//!
//! Better Stack heartbeat: an incident is opened when no check-in arrives
//! within `periodSeconds + graceSeconds`.

use super::{RemoteSyncStatus, SecretKeyRef};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Heartbeat Custom Resource Definition
#[derive(CustomResource, Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Heartbeat",
    group = "betterstack.monitoring.loks0n",
    version = "v1alpha1",
    namespaced,
    status = "RemoteSyncStatus",
    shortname = "bshb",
    printcolumn = r#"{"name":"Name", "type":"string", "jsonPath":".spec.name"}, {"name":"Period", "type":"integer", "jsonPath":".spec.periodSeconds"}, {"name":"Remote ID", "type":"string", "jsonPath":".status.remoteID"}, {"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatSpec {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Expected interval between check-ins, in seconds
    #[serde(default)]
    pub period_seconds: i64,
    /// Extra time allowed after the period before alerting, in seconds
    #[serde(default)]
    pub grace_seconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_alert: Option<bool>,
    /// Seconds to wait before escalating to the whole team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_wait_seconds: Option<i64>,
    /// Team the heartbeat belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Position in the dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Start of the daily maintenance window (HH:MM:SS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_from: Option<String>,
    /// End of the daily maintenance window (HH:MM:SS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_to: Option<String>,
    /// IANA timezone of the maintenance window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance_days: Vec<String>,
    /// Better Stack heartbeat group id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat_group_id: Option<String>,
    /// Escalation policy id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    /// Better Stack API base URL
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Secret holding the Better Stack API token
    pub api_token_secret_ref: SecretKeyRef,
}
