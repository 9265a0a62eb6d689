//! # Custom Resource Definitions
//!
//! CRD types for the Better Stack operator.
//!
//! Three namespaced kinds live in the `betterstack.monitoring.loks0n` group:
//!
//! - [`Monitor`] - an uptime monitor (HTTP status, keyword, TCP, ping, DNS, Playwright, ...)
//! - [`MonitorGroup`] - a monitor group used to organise monitors in the dashboard
//! - [`Heartbeat`] - a heartbeat (cron-style check-in) monitor
//!
//! All three share the same status shape ([`RemoteSyncStatus`]) and the same
//! credential reference ([`SecretKeyRef`]).

mod heartbeat;
mod monitor;
mod monitor_group;
mod status;

pub use heartbeat::{Heartbeat, HeartbeatSpec};
pub use monitor::{HttpHeader, Monitor, MonitorSpec};
pub use monitor_group::{MonitorGroup, MonitorGroupSpec};
pub use status::{Condition, RemoteSyncStatus};

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

/// API group shared by every kind managed by the operator
pub const API_GROUP: &str = "betterstack.monitoring.loks0n";

/// Reference to a key inside a Secret in the resource's own namespace
///
/// The referenced value is used verbatim as the Better Stack API bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeyRef {
    /// Name of the Secret
    #[serde(default)]
    pub name: String,
    /// Key within the Secret's data map
    #[serde(default)]
    pub key: String,
}

/// Schema for free-form passthrough maps
///
/// Kubernetes rejects `{}`/`true` schemas in structural CRDs, so arbitrary
/// JSON values have to be declared with `x-kubernetes-preserve-unknown-fields`.
pub(crate) fn preserve_unknown_fields(_gen: &mut SchemaGenerator) -> Schema {
    schemars::json_schema!({
        "type": "object",
        "x-kubernetes-preserve-unknown-fields": true,
        "description": "Additional Better Stack attributes merged verbatim into the request payload. Keys collide with, and override, structured fields."
    })
}
