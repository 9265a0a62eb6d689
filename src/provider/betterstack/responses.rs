//! # Response Types
//!
//! Better Stack Uptime REST API response structures.
//!
//! Single entities arrive wrapped as `{"data": {"id", "type", "attributes"}}`,
//! lists as `{"data": [...], "pagination": {...}}`.
//!
//! Ids are documented as strings but several endpoints (notably monitor group
//! references) return bare numbers, so every id field accepts both.
//!
//! API Reference: https://betterstack.com/docs/uptime/api/

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Single-entity envelope
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// List envelope with pagination links
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination links; absent or null `next` ends the listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// A remote entity: id, JSON:API type and kind-specific attributes
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Resource<A> {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub attributes: A,
}

pub type RemoteMonitor = Resource<MonitorAttributes>;
pub type RemoteMonitorGroup = Resource<MonitorGroupAttributes>;
pub type RemoteHeartbeat = Resource<HeartbeatAttributes>;
pub type RemoteHeartbeatGroup = Resource<HeartbeatGroupAttributes>;

/// Monitor attributes as returned by `/monitors`
///
/// Only the fields the operator reads are modelled; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorAttributes {
    pub url: Option<String>,
    pub pronounceable_name: Option<String>,
    pub monitor_type: Option<String>,
    pub status: Option<String>,
    pub paused: bool,
    pub check_frequency: Option<i64>,
    pub request_timeout: Option<i64>,
    pub expected_status_codes: Vec<i64>,
    pub http_method: Option<String>,
    #[serde(deserialize_with = "flexible_optional_id")]
    pub monitor_group_id: Option<String>,
    #[serde(deserialize_with = "flexible_optional_id")]
    pub policy_id: Option<String>,
    pub maintenance_timezone: Option<String>,
    pub request_headers: Vec<RemoteHeader>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Request header stored on a remote monitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteHeader {
    #[serde(default, deserialize_with = "flexible_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorGroupAttributes {
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub sort_index: Option<i64>,
    pub paused: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeartbeatAttributes {
    /// Check-in URL to ping
    pub url: Option<String>,
    pub name: Option<String>,
    pub period: Option<i64>,
    pub grace: Option<i64>,
    pub status: Option<String>,
    pub paused: bool,
    #[serde(deserialize_with = "flexible_optional_id")]
    pub heartbeat_group_id: Option<String>,
    #[serde(deserialize_with = "flexible_optional_id")]
    pub policy_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeartbeatGroupAttributes {
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub sort_index: Option<i64>,
    pub paused: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn id_from_value<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}

/// Accept `"123"` or `123`, normalised to `"123"`
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)?
        .ok_or_else(|| D::Error::custom("id must not be null"))
}

/// Like [`flexible_id`] but `null` maps to `None`
pub(crate) fn flexible_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)
}
