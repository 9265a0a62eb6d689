//! Heartbeat payload
//!
//! `periodSeconds` and `graceSeconds` are already in the API's unit.

use super::{non_empty, non_empty_vec, positive, remote_ref};
use crate::crd::HeartbeatSpec;
use crate::provider::betterstack::HeartbeatRequest;

pub fn build_heartbeat_request(spec: &HeartbeatSpec) -> HeartbeatRequest {
    HeartbeatRequest {
        name: non_empty(&spec.name),
        period: positive(spec.period_seconds),
        grace: positive(spec.grace_seconds),
        email: spec.email,
        sms: spec.sms,
        call: spec.call,
        push: spec.push,
        critical_alert: spec.critical_alert,
        team_wait: spec.team_wait_seconds,
        team_name: spec.team_name.clone(),
        sort_index: spec.sort_index,
        paused: spec.paused,
        maintenance_from: spec.maintenance_from.clone(),
        maintenance_to: spec.maintenance_to.clone(),
        maintenance_timezone: spec.maintenance_timezone.clone(),
        maintenance_days: non_empty_vec(&spec.maintenance_days),
        heartbeat_group_id: remote_ref(spec.heartbeat_group_id.as_ref()),
        policy_id: remote_ref(spec.policy_id.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heartbeat_payload() {
        let spec = HeartbeatSpec {
            name: "nightly-backup".to_string(),
            period_seconds: 86_400,
            grace_seconds: 0,
            email: Some(false),
            push: Some(true),
            heartbeat_group_id: Some("981".to_string()),
            policy_id: Some("escalate-ops".to_string()),
            maintenance_days: vec!["sat".to_string(), "sun".to_string()],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(build_heartbeat_request(&spec)).unwrap(),
            json!({
                "name": "nightly-backup",
                "period": 86_400,
                "email": false,
                "push": true,
                "maintenance_days": ["sat", "sun"],
                "heartbeat_group_id": 981,
                "policy_id": "escalate-ops"
            })
        );
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let request = build_heartbeat_request(&HeartbeatSpec::default());
        assert_eq!(serde_json::to_value(request).unwrap(), json!({}));
    }
}
