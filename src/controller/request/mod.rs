//! # Request Builders
//!
//! Pure functions from a resource spec (plus, for monitors, the existing
//! remote entity) to the Better Stack request payload.
//!
//! Payloads are sparse so the API's partial-update semantics apply:
//!
//! - optional spec fields are emitted only when set
//! - plain strings only when non-empty, plain numbers only when `> 0`
//! - lists only when non-empty
//! - group and policy references are sent as numbers when they are numeric

mod heartbeat;
mod monitor;
mod monitor_group;

pub use heartbeat::build_heartbeat_request;
pub use monitor::{build_monitor_request, is_server_probe, SERVER_PROBE_TYPES};
pub use monitor_group::build_monitor_group_request;

use crate::provider::betterstack::RemoteRef;

pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn positive<T>(value: T) -> Option<T>
where
    T: PartialOrd + Default,
{
    (value > T::default()).then_some(value)
}

pub(crate) fn non_empty_vec<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}

pub(crate) fn remote_ref(value: Option<&String>) -> Option<RemoteRef> {
    value.and_then(|v| RemoteRef::parse(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x").as_deref(), Some("x"));
        assert_eq!(positive(0_i64), None);
        assert_eq!(positive(-3_i64), None);
        assert_eq!(positive(7_i32), Some(7));
        assert_eq!(non_empty_vec::<String>(&[]), None);
        assert_eq!(remote_ref(Some(&"12".to_string())), Some(RemoteRef::Numeric(12)));
        assert_eq!(remote_ref(None), None);
    }
}
