//! # Request Types
//!
//! Better Stack Uptime REST API request structures.
//!
//! Create (`POST`) and update (`PATCH`) share one payload type per kind; the
//! API applies partial-update semantics, so every field is optional and unset
//! fields are omitted from the JSON entirely.
//!
//! API Reference: https://betterstack.com/docs/uptime/api/

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Reference to another remote entity (group, policy)
///
/// Better Stack ids are numeric; references that look numeric are sent as
/// JSON numbers, anything else is passed through as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RemoteRef {
    Numeric(u64),
    Text(String),
}

impl RemoteRef {
    /// Parse a user supplied reference, `None` for blank input
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            trimmed
                .parse::<u64>()
                .map_or_else(|_| RemoteRef::Text(trimmed.to_string()), RemoteRef::Numeric),
        )
    }
}

/// Structured monitor attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonitorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronounceable_name: Option<String>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_frequency: Option<i64>,
    /// Seconds for HTTP monitors, milliseconds for server probes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_status_codes: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_alert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_wait: Option<i64>,
    /// Always present: omission means "leave unchanged" to the API
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_cookies: Option<bool>,
    /// Decimal string, as the API expects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_group_id: Option<RemoteRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<RemoteRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_days: Option<Vec<String>>,
    /// Lowercase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<Vec<RequestHeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_expiration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_expiration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playwright_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
}

/// Monitor request header; `id` ties it to an existing remote header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub value: String,
}

/// Body of `POST /monitors` and `PATCH /monitors/{id}`
///
/// Serializes the structured [`MonitorRequest`] to a JSON object, then merges
/// `additional_attributes` over it at the top level. Passthrough keys win on
/// collision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorPayload {
    pub request: MonitorRequest,
    pub additional_attributes: BTreeMap<String, Value>,
}

impl MonitorPayload {
    /// The merged JSON object sent on the wire
    ///
    /// # Errors
    ///
    /// Fails only if the structured request does not serialize to an object.
    pub fn to_json(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut object = match serde_json::to_value(&self.request)? {
            Value::Object(map) => map,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "monitor request serialized to a non-object: {other}"
                )))
            }
        };
        for (key, value) in &self.additional_attributes {
            object.insert(key.clone(), value.clone());
        }
        Ok(object)
    }
}

impl Serialize for MonitorPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Body of `POST /monitor-groups` and `PATCH /monitor-groups/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

/// Body of `POST /heartbeats` and `PATCH /heartbeats/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeartbeatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_alert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_wait: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_days: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heartbeat_group_id: Option<RemoteRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<RemoteRef>,
}

/// Body of `POST /heartbeat-groups` and `PATCH /heartbeat-groups/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeartbeatGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}
