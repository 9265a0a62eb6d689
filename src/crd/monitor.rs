//! # Monitor
//!
//! Better Stack uptime monitor.

use super::{RemoteSyncStatus, SecretKeyRef};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monitor Custom Resource Definition
///
/// # Example
///
/// ```yaml
/// apiVersion: betterstack.monitoring.loks0n/v1alpha1
/// kind: Monitor
/// metadata:
///   name: api-healthz
///   namespace: default
/// spec:
///   url: https://example.com/healthz
///   monitorType: status
///   checkFrequencyMinutes: 3
///   expectedStatusCodes: [200]
///   requestMethod: HEAD
///   apiTokenSecretRef:
///     name: betterstack
///     key: token
/// ```
#[derive(CustomResource, Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "Monitor",
    group = "betterstack.monitoring.loks0n",
    version = "v1alpha1",
    namespaced,
    status = "RemoteSyncStatus",
    shortname = "bsmon",
    printcolumn = r#"{"name":"URL", "type":"string", "jsonPath":".spec.url"}, {"name":"Type", "type":"string", "jsonPath":".spec.monitorType"}, {"name":"Remote ID", "type":"string", "jsonPath":".status.remoteID"}, {"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSpec {
    /// URL or host to probe
    pub url: String,
    /// Monitor kind: status, expected_status_code, keyword, keyword_absence, ping, tcp,
    /// udp, smtp, pop, imap, dns, playwright
    #[serde(default = "default_monitor_type")]
    pub monitor_type: String,
    /// Human readable name used in voice alerts and the dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronounceable_name: Option<String>,
    /// How often to probe, in minutes
    /// 0 leaves the Better Stack default
    #[serde(default)]
    pub check_frequency_minutes: i64,
    /// Request timeout in seconds
    /// Converted to milliseconds for server probes (ping, tcp, udp, smtp, pop, imap, dns)
    #[serde(default)]
    pub request_timeout_seconds: i64,
    /// Seconds the monitor must be up before an incident is resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_period_seconds: Option<i64>,
    /// Seconds to wait before confirming an outage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_period_seconds: Option<i64>,
    /// Single expected HTTP status code
    /// Ignored when `expectedStatusCodes` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status_code: Option<i32>,
    /// Expected HTTP status codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_status_codes: Vec<i32>,
    /// Keyword to look for (keyword / keyword_absence monitors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_keyword: Option<String>,
    /// Notify on-call via email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    /// Notify on-call via SMS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms: Option<bool>,
    /// Notify on-call via phone call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call: Option<bool>,
    /// Notify on-call via push notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    /// Alert with critical alerts on iOS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_alert: Option<bool>,
    /// Seconds to wait before escalating to the whole team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_wait_seconds: Option<i64>,
    /// Pause the monitor
    /// Always sent, so unpausing in the cluster unpauses remotely
    #[serde(default)]
    pub paused: bool,
    /// Follow HTTP redirects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,
    /// Verify SSL certificates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_ssl: Option<bool>,
    /// Keep cookies between redirects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_cookies: Option<bool>,
    /// Port for tcp, udp, smtp, pop and imap monitors
    #[serde(default)]
    pub port: i32,
    /// Probe regions (us, eu, as, au)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    /// Better Stack monitor group id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_group_id: Option<String>,
    /// Escalation policy id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    /// Start of the daily maintenance window (HH:MM:SS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_from: Option<String>,
    /// End of the daily maintenance window (HH:MM:SS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_to: Option<String>,
    /// IANA timezone of the maintenance window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_timezone: Option<String>,
    /// Days the maintenance window applies to (mon, tue, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance_days: Vec<String>,
    /// HTTP method (GET, HEAD, POST, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    /// HTTP request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    /// HTTP request headers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_headers: Vec<HttpHeader>,
    /// Basic auth username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    /// Basic auth password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,
    /// Alert this many days before the SSL certificate expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_expiration_days: Option<i32>,
    /// Alert this many days before the domain expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_expiration_days: Option<i32>,
    /// Playwright scenario source (playwright monitors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playwright_script: Option<String>,
    /// Playwright scenario name (playwright monitors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_name: Option<String>,
    /// Extra attributes merged into the request payload as-is
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[schemars(schema_with = "super::preserve_unknown_fields")]
    pub additional_attributes: BTreeMap<String, serde_json::Value>,
    /// Better Stack API base URL
    /// Defaults to https://uptime.betterstack.com/api/v2
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Secret holding the Better Stack API token
    pub api_token_secret_ref: SecretKeyRef,
}

/// HTTP header sent with each probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct HttpHeader {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

fn default_monitor_type() -> String {
    "status".to_string()
}
