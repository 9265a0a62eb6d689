//! # Secret Fan-out Tests
//!
//! A Secret event must enqueue exactly the objects whose
//! `apiTokenSecretRef` names that Secret in the same namespace.

use betterstack_operator::controller::secret_index::{secret_index_key, SecretIndex};
use betterstack_operator::crd::{Heartbeat, HeartbeatSpec, Monitor, MonitorSpec, SecretKeyRef};
use k8s_openapi::api::core::v1::Secret;
use kube::runtime::reflector;
use kube::runtime::watcher;

fn token_ref(secret: &str) -> SecretKeyRef {
    SecretKeyRef {
        name: secret.to_string(),
        key: "token".to_string(),
    }
}

fn monitor(namespace: &str, name: &str, secret: &str) -> Monitor {
    let mut monitor = Monitor::new(
        name,
        MonitorSpec {
            url: "https://example.com".to_string(),
            api_token_secret_ref: token_ref(secret),
            ..Default::default()
        },
    );
    monitor.metadata.namespace = Some(namespace.to_string());
    monitor
}

fn secret(namespace: Option<&str>, name: &str) -> Secret {
    let mut secret = Secret::default();
    secret.metadata.name = Some(name.to_string());
    secret.metadata.namespace = namespace.map(str::to_string);
    secret
}

fn monitor_index(objects: Vec<Monitor>) -> SecretIndex<Monitor> {
    let (reader, mut writer) = reflector::store::<Monitor>();
    for obj in objects {
        writer.apply_watcher_event(&watcher::Event::Apply(obj));
    }
    SecretIndex::new(reader)
}

#[test]
fn test_secret_event_enqueues_dependents_in_namespace() {
    let index = monitor_index(vec![
        monitor("default", "api", "betterstack"),
        monitor("default", "web", "betterstack"),
        monitor("default", "batch", "other-token"),
        monitor("staging", "api", "betterstack"),
    ]);

    let mut names: Vec<(String, Option<String>)> = index
        .lookup(&secret(Some("default"), "betterstack"))
        .into_iter()
        .map(|r| (r.name, r.namespace))
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            ("api".to_string(), Some("default".to_string())),
            ("web".to_string(), Some("default".to_string())),
        ]
    );

    let staging = index.lookup(&secret(Some("staging"), "betterstack"));
    assert_eq!(staging.len(), 1);
    assert_eq!(staging[0].namespace.as_deref(), Some("staging"));
}

#[test]
fn test_unreferenced_secret_enqueues_nothing() {
    let index = monitor_index(vec![monitor("default", "api", "betterstack")]);

    assert!(index.lookup(&secret(Some("default"), "unrelated")).is_empty());
    assert!(index.lookup(&secret(None, "betterstack")).is_empty());
}

#[test]
fn test_objects_without_secret_name_are_not_indexed() {
    let index = monitor_index(vec![monitor("default", "api", "")]);

    assert_eq!(secret_index_key(&monitor("default", "api", "")), None);
    assert!(index.lookup(&secret(Some("default"), "")).is_empty());
}

#[test]
fn test_heartbeat_index() {
    let mut heartbeat = Heartbeat::new(
        "backup",
        HeartbeatSpec {
            name: "Nightly backup".to_string(),
            api_token_secret_ref: token_ref("betterstack"),
            ..Default::default()
        },
    );
    heartbeat.metadata.namespace = Some("ops".to_string());

    assert_eq!(
        secret_index_key(&heartbeat),
        Some("ops/betterstack".to_string())
    );

    let (reader, mut writer) = reflector::store::<Heartbeat>();
    writer.apply_watcher_event(&watcher::Event::Apply(heartbeat));
    let index = SecretIndex::new(reader);

    let refs = index.lookup(&secret(Some("ops"), "betterstack"));
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].name, "backup");
}
