//! Monitor group payload

use super::non_empty;
use crate::crd::MonitorGroupSpec;
use crate::provider::betterstack::MonitorGroupRequest;

pub fn build_monitor_group_request(spec: &MonitorGroupSpec) -> MonitorGroupRequest {
    MonitorGroupRequest {
        name: non_empty(&spec.name),
        team_name: spec.team_name.clone(),
        sort_index: spec.sort_index,
        paused: spec.paused,
    }
}
