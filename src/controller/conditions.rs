//! # Conditions
//!
//! Condition types and reasons written to `status.conditions`.
//!
//! The condition list is treated as a set keyed by type: [`set_condition`]
//! replaces an existing entry of the same type and only moves
//! `lastTransitionTime` when the status value actually changes.

use crate::crd::Condition;
use chrono::{SecondsFormat, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionType {
    /// The API token Secret could be read
    CredentialsAvailable,
    /// The last write to Better Stack succeeded
    Synced,
    /// Aggregate of the two above, stored so clients can watch one field
    Ready,
}

impl ConditionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConditionType::CredentialsAvailable => "CredentialsAvailable",
            ConditionType::Synced => "Synced",
            ConditionType::Ready => "Ready",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of condition reasons; stable strings suitable for alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    TokenUnavailable,
    TokenResolved,
    SyncFailed,
    MonitorSynced,
    HeartbeatSynced,
    MonitorGroupSynced,
    MonitorQuotaExceeded,
    HeartbeatQuotaExceeded,
}

impl Reason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Reason::TokenUnavailable => "TokenUnavailable",
            Reason::TokenResolved => "TokenResolved",
            Reason::SyncFailed => "SyncFailed",
            Reason::MonitorSynced => "MonitorSynced",
            Reason::HeartbeatSynced => "HeartbeatSynced",
            Reason::MonitorGroupSynced => "MonitorGroupSynced",
            Reason::MonitorQuotaExceeded => "MonitorQuotaExceeded",
            Reason::HeartbeatQuotaExceeded => "HeartbeatQuotaExceeded",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn status_str(status: bool) -> &'static str {
    if status {
        "True"
    } else {
        "False"
    }
}

/// Current time in the format Kubernetes uses for `metav1.Time`
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn find_condition(conditions: &[Condition], condition_type: ConditionType) -> Option<&Condition> {
    conditions
        .iter()
        .find(|c| c.r#type == condition_type.as_str())
}

/// Insert or replace the condition of `condition_type`
pub fn set_condition(
    conditions: &mut Vec<Condition>,
    condition_type: ConditionType,
    status: bool,
    reason: Reason,
    message: impl Into<String>,
) {
    let status = status_str(status);
    let mut condition = Condition {
        r#type: condition_type.as_str().to_string(),
        status: status.to_string(),
        last_transition_time: Some(now_rfc3339()),
        reason: Some(reason.as_str().to_string()),
        message: Some(message.into()),
    };

    match conditions
        .iter_mut()
        .find(|c| c.r#type == condition_type.as_str())
    {
        Some(existing) => {
            if existing.status == status && existing.last_transition_time.is_some() {
                condition
                    .last_transition_time
                    .clone_from(&existing.last_transition_time);
            }
            *existing = condition;
        }
        None => conditions.push(condition),
    }
}
