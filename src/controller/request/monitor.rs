//! Monitor payload
//!
//! Unit conversions:
//!
//! - `checkFrequencyMinutes` is sent as seconds
//! - `requestTimeoutSeconds` is sent as seconds for HTTP monitors and as
//!   milliseconds for server probes ([`SERVER_PROBE_TYPES`])
//! - `port` is sent as a decimal string
//!
//! Request headers keep their remote identity: each spec header takes the id
//! of the first unclaimed remote header with the same name (ASCII
//! case-insensitive), so editing a value is an update, not drop and recreate.

use super::{non_empty, non_empty_vec, positive, remote_ref};
use crate::crd::{HttpHeader, MonitorSpec};
use crate::provider::betterstack::{
    MonitorPayload, MonitorRequest, RemoteHeader, RemoteMonitor, RequestHeader,
};

/// Monitor types whose `request_timeout` is expressed in milliseconds
pub const SERVER_PROBE_TYPES: [&str; 7] = ["ping", "tcp", "udp", "smtp", "pop", "imap", "dns"];

pub fn is_server_probe(monitor_type: &str) -> bool {
    SERVER_PROBE_TYPES
        .iter()
        .any(|probe| probe.eq_ignore_ascii_case(monitor_type.trim()))
}

pub fn build_monitor_request(spec: &MonitorSpec, existing: Option<&RemoteMonitor>) -> MonitorPayload {
    let request_timeout = positive(spec.request_timeout_seconds).map(|secs| {
        if is_server_probe(&spec.monitor_type) {
            secs.saturating_mul(1000)
        } else {
            secs
        }
    });

    let expected_status_codes = non_empty_vec(&spec.expected_status_codes)
        .or_else(|| spec.expected_status_code.map(|code| vec![code]));

    let existing_headers = existing
        .map(|monitor| monitor.attributes.request_headers.as_slice())
        .unwrap_or_default();

    let request = MonitorRequest {
        url: non_empty(&spec.url),
        monitor_type: non_empty(&spec.monitor_type),
        pronounceable_name: spec.pronounceable_name.clone(),
        check_frequency: positive(spec.check_frequency_minutes).map(|mins| mins.saturating_mul(60)),
        request_timeout,
        recovery_period: spec.recovery_period_seconds,
        confirmation_period: spec.confirmation_period_seconds,
        expected_status_codes,
        required_keyword: spec.required_keyword.clone(),
        email: spec.email,
        sms: spec.sms,
        call: spec.call,
        push: spec.push,
        critical_alert: spec.critical_alert,
        team_wait: spec.team_wait_seconds,
        paused: spec.paused,
        follow_redirects: spec.follow_redirects,
        verify_ssl: spec.verify_ssl,
        remember_cookies: spec.remember_cookies,
        port: positive(spec.port).map(|port| port.to_string()),
        regions: non_empty_vec(&spec.regions),
        monitor_group_id: remote_ref(spec.monitor_group_id.as_ref()),
        policy_id: remote_ref(spec.policy_id.as_ref()),
        maintenance_from: spec.maintenance_from.clone(),
        maintenance_to: spec.maintenance_to.clone(),
        maintenance_timezone: spec.maintenance_timezone.clone(),
        maintenance_days: non_empty_vec(&spec.maintenance_days),
        http_method: spec.request_method.as_deref().map(str::to_lowercase),
        request_body: spec.request_body.clone(),
        request_headers: (!spec.request_headers.is_empty())
            .then(|| merge_headers(&spec.request_headers, existing_headers)),
        auth_username: spec.auth_username.clone(),
        auth_password: spec.auth_password.clone(),
        ssl_expiration: spec.ssl_expiration_days,
        domain_expiration: spec.domain_expiration_days,
        playwright_script: spec.playwright_script.clone(),
        scenario_name: spec.scenario_name.clone(),
    };

    MonitorPayload {
        request,
        additional_attributes: spec.additional_attributes.clone(),
    }
}

fn merge_headers(desired: &[HttpHeader], existing: &[RemoteHeader]) -> Vec<RequestHeader> {
    let mut pool: Vec<&RemoteHeader> = existing.iter().filter(|h| h.id.is_some()).collect();

    desired
        .iter()
        .map(|header| {
            let id = pool
                .iter()
                .position(|remote| remote.name.eq_ignore_ascii_case(&header.name))
                .and_then(|index| pool.remove(index).id.clone());
            RequestHeader {
                id,
                name: header.name.clone(),
                value: header.value.clone(),
            }
        })
        .collect()
}
