//! # MonitorGroup
//!
//! Better Stack monitor group.

use super::{RemoteSyncStatus, SecretKeyRef};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MonitorGroup Custom Resource Definition
///
/// Groups are reconciled independently of monitors; a Monitor references a
/// group through `spec.monitorGroupId` using the remote id.
#[derive(CustomResource, Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "MonitorGroup",
    group = "betterstack.monitoring.loks0n",
    version = "v1alpha1",
    namespaced,
    status = "RemoteSyncStatus",
    shortname = "bsmg",
    printcolumn = r#"{"name":"Name", "type":"string", "jsonPath":".spec.name"}, {"name":"Remote ID", "type":"string", "jsonPath":".status.remoteID"}, {"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MonitorGroupSpec {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Team the group belongs to (required for organisation-scoped tokens)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Position in the dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<i64>,
    /// Pause every monitor in the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Better Stack API base URL
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Secret holding the Better Stack API token
    pub api_token_secret_ref: SecretKeyRef,
}
