//! # Status Merge Patches
//!
//! Status is written as a JSON merge patch (RFC 7386) computed against the
//! status the reconcile started from, so fields this operator did not touch
//! are never sent and concurrent writers are not clobbered.

use crate::crd::RemoteSyncStatus;
use serde_json::{Map, Value};

/// Merge patch turning `before` into `after`; `None` when they are equal
///
/// Objects are diffed recursively, removed keys become `null`, anything
/// else (arrays included) is replaced wholesale.
pub fn merge_diff(before: &Value, after: &Value) -> Option<Value> {
    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut patch = Map::new();
            for (key, new_value) in new {
                match old.get(key) {
                    Some(old_value) => {
                        if let Some(diff) = merge_diff(old_value, new_value) {
                            patch.insert(key.clone(), diff);
                        }
                    }
                    None => {
                        patch.insert(key.clone(), new_value.clone());
                    }
                }
            }
            for key in old.keys() {
                if !new.contains_key(key) {
                    patch.insert(key.clone(), Value::Null);
                }
            }
            (!patch.is_empty()).then_some(Value::Object(patch))
        }
        _ if before == after => None,
        _ => Some(after.clone()),
    }
}

/// `{"status": <diff>}`, or `None` when nothing changed
///
/// # Errors
///
/// Fails only if a status cannot be serialized.
pub fn status_patch(
    before: &RemoteSyncStatus,
    after: &RemoteSyncStatus,
) -> Result<Option<Value>, serde_json::Error> {
    let before = serde_json::to_value(before)?;
    let after = serde_json::to_value(after)?;
    Ok(merge_diff(&before, &after).map(|diff| {
        let mut body = Map::new();
        body.insert("status".to_string(), diff);
        Value::Object(body)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::Condition;
    use serde_json::json;

    #[test]
    fn test_merge_diff_objects_and_nulls() {
        let before = json!({"a": 1, "b": {"c": 2, "d": 3}, "gone": true, "list": [1, 2]});
        let after = json!({"a": 1, "b": {"c": 5, "d": 3}, "new": "x", "list": [1, 2, 3]});

        assert_eq!(
            merge_diff(&before, &after),
            Some(json!({"b": {"c": 5}, "new": "x", "gone": null, "list": [1, 2, 3]}))
        );
        assert_eq!(merge_diff(&before, &before), None);
    }

    #[test]
    fn test_status_patch_skips_unchanged() {
        let status = RemoteSyncStatus {
            remote_id: "m1".to_string(),
            observed_generation: Some(2),
            ..Default::default()
        };
        assert_eq!(status_patch(&status, &status).unwrap(), None);
    }

    #[test]
    fn test_status_patch_carries_only_changes() {
        let before = RemoteSyncStatus {
            remote_id: "m1".to_string(),
            observed_generation: Some(1),
            ..Default::default()
        };
        let after = RemoteSyncStatus {
            remote_id: String::new(),
            observed_generation: Some(1),
            conditions: vec![Condition {
                r#type: "Synced".to_string(),
                status: "False".to_string(),
                last_transition_time: None,
                reason: Some("SyncFailed".to_string()),
                message: Some("boom".to_string()),
            }],
            last_synced_time: None,
        };

        let patch = status_patch(&before, &after).unwrap().unwrap();
        assert_eq!(patch["status"]["remoteID"], Value::Null);
        assert!(patch["status"].get("observedGeneration").is_none());
        assert_eq!(patch["status"]["conditions"][0]["reason"], json!("SyncFailed"));
    }
}
