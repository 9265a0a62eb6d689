//! # Test Doubles
//!
//! In-memory stand-ins for the cluster, Secrets and Better Stack, used to
//! drive the reconciler end to end without a cluster or network.
//!
//! - [`FakeCluster`] stores objects as JSON, applies merge patches, enforces
//!   `resourceVersion` on finalizer writes and garbage-collects deleted
//!   objects once their finalizers are gone.
//! - [`FakeRemote`] records every call and keeps entities in memory.
//! - [`FakeFactory`] hands out the shared [`FakeRemote`] and remembers the
//!   token and base URL it was asked for.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use async_trait::async_trait;
use betterstack_operator::config::ControllerConfig;
use betterstack_operator::controller::credentials::SecretSource;
use betterstack_operator::controller::reconciler::{
    ClusterState, Context, ManagedKind, RemoteApi, RemoteFactory,
};
use betterstack_operator::controller::Error;
use betterstack_operator::provider::betterstack::{self, ApiError};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::ResourceExt;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const NAMESPACE: &str = "default";
pub const TOKEN: &str = "bs-token-123";
pub const RETRY: Duration = Duration::from_secs(30);

/// RFC 7386 merge patch application
pub fn apply_merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target) = target {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                apply_merge_patch(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

#[derive(Default)]
pub struct FakeCluster {
    objects: Mutex<HashMap<(String, String), Value>>,
    resource_version: AtomicU64,
    status_failures: AtomicUsize,
    pub status_patches: Mutex<Vec<Value>>,
    pub finalizer_patches: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_version(&self) -> String {
        (self.resource_version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    /// Store `obj`, defaulting namespace, generation and resourceVersion
    pub fn insert<K: ManagedKind>(&self, obj: &K) {
        let mut value = serde_json::to_value(obj).unwrap();
        let metadata = value["metadata"].as_object_mut().unwrap();
        metadata
            .entry("namespace")
            .or_insert_with(|| json!(NAMESPACE));
        metadata.entry("generation").or_insert_with(|| json!(1));
        metadata.insert("resourceVersion".to_string(), json!(self.next_version()));

        let namespace = value["metadata"]["namespace"].as_str().unwrap().to_string();
        self.objects
            .lock()
            .unwrap()
            .insert((namespace, obj.name_any()), value);
    }

    pub fn get_object<K: ManagedKind>(&self, name: &str) -> Option<K> {
        self.objects
            .lock()
            .unwrap()
            .get(&(NAMESPACE.to_string(), name.to_string()))
            .map(|value| serde_json::from_value(value.clone()).unwrap())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&(NAMESPACE.to_string(), name.to_string()))
    }

    /// Apply `patch` to the stored object as a user edit would
    ///
    /// A change under `spec` bumps `metadata.generation`.
    pub fn edit(&self, name: &str, patch: Value) {
        let mut objects = self.objects.lock().unwrap();
        let value = objects
            .get_mut(&(NAMESPACE.to_string(), name.to_string()))
            .unwrap();
        if patch.get("spec").is_some() {
            let generation = value["metadata"]["generation"].as_i64().unwrap_or(1);
            value["metadata"]["generation"] = json!(generation + 1);
        }
        apply_merge_patch(value, &patch);
        value["metadata"]["resourceVersion"] = json!(self.next_version());
    }

    /// Set `deletionTimestamp`; an object without finalizers goes away at once
    pub fn mark_deleting(&self, name: &str) {
        self.edit(
            name,
            json!({"metadata": {"deletionTimestamp": "2026-01-01T00:00:00Z"}}),
        );
        let key = (NAMESPACE.to_string(), name.to_string());
        let mut objects = self.objects.lock().unwrap();
        let unguarded = objects.get(&key).is_some_and(|value| {
            value["metadata"]["finalizers"]
                .as_array()
                .is_none_or(Vec::is_empty)
        });
        if unguarded {
            objects.remove(&key);
        }
    }

    /// Fail the next `count` status patches
    pub fn fail_status_patches(&self, count: usize) {
        self.status_failures.store(count, Ordering::SeqCst);
    }

    pub fn status_patch_count(&self) -> usize {
        self.status_patches.lock().unwrap().len()
    }
}

fn key_of<K: ManagedKind>(obj: &K) -> (String, String) {
    (obj.namespace().unwrap_or_default(), obj.name_any())
}

#[async_trait]
impl<K: ManagedKind> ClusterState<K> for FakeCluster {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, Error> {
        let objects = self.objects.lock().unwrap();
        match objects.get(&(namespace.to_string(), name.to_string())) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn patch_finalizers(&self, obj: &K, finalizers: &[String]) -> Result<(), Error> {
        let key = key_of(obj);
        let conflict = || Error::Conflict {
            key: format!("{}/{}", key.0, key.1),
        };

        let mut objects = self.objects.lock().unwrap();
        let Some(value) = objects.get_mut(&key) else {
            return Err(conflict());
        };
        if value["metadata"]["resourceVersion"].as_str() != obj.resource_version().as_deref() {
            return Err(conflict());
        }

        value["metadata"]["finalizers"] = json!(finalizers);
        value["metadata"]["resourceVersion"] = json!(self.next_version());
        self.finalizer_patches.fetch_add(1, Ordering::SeqCst);

        let deleting = !value["metadata"]["deletionTimestamp"].is_null();
        if deleting && finalizers.is_empty() {
            objects.remove(&key);
        }
        Ok(())
    }

    async fn patch_status(&self, obj: &K, patch: Value) -> Result<(), Error> {
        let key = key_of(obj);
        if self
            .status_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(Error::Conflict {
                key: format!("{}/{}", key.0, key.1),
            });
        }

        self.status_patches.lock().unwrap().push(patch.clone());
        let mut objects = self.objects.lock().unwrap();
        if let Some(value) = objects.get_mut(&key) {
            apply_merge_patch(value, &patch);
            value["metadata"]["resourceVersion"] = json!(self.next_version());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSecrets {
    secrets: Mutex<HashMap<(String, String), Secret>>,
}

impl FakeSecrets {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_token() -> Arc<Self> {
        let secrets = Self::new();
        secrets.put("betterstack", "token", TOKEN);
        secrets
    }

    pub fn put(&self, name: &str, key: &str, value: &str) {
        let mut secret = Secret::default();
        secret.metadata.name = Some(name.to_string());
        secret.metadata.namespace = Some(NAMESPACE.to_string());
        secret.data = Some(BTreeMap::from([(
            key.to_string(),
            ByteString(value.as_bytes().to_vec()),
        )]));
        self.secrets
            .lock()
            .unwrap()
            .insert((NAMESPACE.to_string(), name.to_string()), secret);
    }

    pub fn remove(&self, name: &str) {
        self.secrets
            .lock()
            .unwrap()
            .remove(&(NAMESPACE.to_string(), name.to_string()));
    }
}

#[async_trait]
impl SecretSource for FakeSecrets {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, Error> {
        Ok(self
            .secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }
}

/// One recorded Better Stack call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeRemote {
    calls: Mutex<Vec<Call>>,
    entities: Mutex<BTreeMap<String, Value>>,
    next_id: AtomicU64,
    next_header_id: AtomicU64,
    failures: Mutex<HashMap<&'static str, VecDeque<ApiError>>>,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a remote entity with the given attributes
    pub fn seed(&self, id: &str, attributes: Value) {
        self.entities
            .lock()
            .unwrap()
            .insert(id.to_string(), attributes);
    }

    /// Delete an entity behind the operator's back
    pub fn vanish(&self, id: &str) {
        self.entities.lock().unwrap().remove(id);
    }

    pub fn attributes(&self, id: &str) -> Option<Value> {
        self.entities.lock().unwrap().get(id).cloned()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.lock().unwrap().len()
    }

    /// Make the next `method` call (`GET`, `POST`, `PATCH`, `DELETE`) fail
    pub fn fail_next(&self, method: &'static str, error: ApiError) {
        self.failures
            .lock()
            .unwrap()
            .entry(method)
            .or_default()
            .push_back(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, method: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub fn writes(&self) -> usize {
        self.calls_of("POST").len() + self.calls_of("PATCH").len()
    }

    fn record(
        &self,
        method: &'static str,
        id: Option<&str>,
        body: Option<Value>,
    ) -> Result<(), betterstack::Error> {
        self.calls.lock().unwrap().push(Call {
            method,
            id: id.map(str::to_string),
            body,
        });
        let scripted = self
            .failures
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }

    fn not_found() -> betterstack::Error {
        ApiError::new(404, "Resource not found").into()
    }

    /// Give every request header without an id a fresh one, as the API does
    fn assign_header_ids(&self, attributes: &mut Value) {
        if let Some(Value::Array(headers)) = attributes.get_mut("request_headers") {
            for header in headers {
                if header.get("id").is_none() {
                    let id = self.next_header_id.fetch_add(1, Ordering::SeqCst) + 1;
                    header["id"] = json!(format!("h-{id}"));
                }
            }
        }
    }

    fn entity<E: serde::de::DeserializeOwned>(
        id: &str,
        attributes: &Value,
    ) -> Result<E, betterstack::Error> {
        Ok(serde_json::from_value(json!({
            "id": id,
            "type": "entity",
            "attributes": attributes,
        }))?)
    }
}

#[async_trait]
impl<K: ManagedKind> RemoteApi<K> for FakeRemote {
    async fn get(&self, id: &str) -> Result<K::Entity, betterstack::Error> {
        self.record("GET", Some(id), None)?;
        let attributes = self.attributes(id).ok_or_else(Self::not_found)?;
        Self::entity(id, &attributes)
    }

    async fn create(&self, request: &K::Request) -> Result<K::Entity, betterstack::Error> {
        let body = serde_json::to_value(request)?;
        self.record("POST", None, Some(body.clone()))?;

        let id = format!("{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1001);
        let mut attributes = body;
        self.assign_header_ids(&mut attributes);
        self.seed(&id, attributes.clone());
        Self::entity(&id, &attributes)
    }

    async fn update(&self, id: &str, request: &K::Request) -> Result<K::Entity, betterstack::Error> {
        let body = serde_json::to_value(request)?;
        self.record("PATCH", Some(id), Some(body.clone()))?;

        let mut entities = self.entities.lock().unwrap();
        let attributes = entities.get_mut(id).ok_or_else(Self::not_found)?;
        apply_merge_patch(attributes, &body);
        self.assign_header_ids(attributes);
        Self::entity(id, attributes)
    }

    async fn delete(&self, id: &str) -> Result<(), betterstack::Error> {
        self.record("DELETE", Some(id), None)?;
        self.entities.lock().unwrap().remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeFactory {
    remote: Arc<FakeRemote>,
    pub connections: Mutex<Vec<(Option<String>, String)>>,
}

impl FakeFactory {
    pub fn new(remote: Arc<FakeRemote>) -> Arc<Self> {
        Arc::new(Self {
            remote,
            connections: Mutex::new(Vec::new()),
        })
    }
}

impl<K: ManagedKind> RemoteFactory<K> for FakeFactory {
    fn connect(&self, base_url: Option<&str>, token: &str) -> Arc<dyn RemoteApi<K>> {
        self.connections
            .lock()
            .unwrap()
            .push((base_url.map(str::to_string), token.to_string()));
        Arc::clone(&self.remote) as Arc<dyn RemoteApi<K>>
    }
}

/// Everything a reconciler test needs, wired together
pub struct Harness<K: ManagedKind> {
    pub cluster: Arc<FakeCluster>,
    pub secrets: Arc<FakeSecrets>,
    pub remote: Arc<FakeRemote>,
    pub factory: Arc<FakeFactory>,
    pub ctx: Context<K>,
}

impl<K: ManagedKind> Harness<K> {
    pub fn new() -> Self {
        Self::with_secrets(FakeSecrets::with_token())
    }

    pub fn with_secrets(secrets: Arc<FakeSecrets>) -> Self {
        let cluster = FakeCluster::new();
        let remote = FakeRemote::new();
        let factory = FakeFactory::new(Arc::clone(&remote));
        let config = ControllerConfig {
            error_retry_interval: RETRY,
            ..ControllerConfig::default()
        };
        let ctx = Context::new(
            Arc::clone(&cluster) as Arc<dyn ClusterState<K>>,
            Arc::clone(&secrets) as Arc<dyn SecretSource>,
            Arc::clone(&factory) as Arc<dyn RemoteFactory<K>>,
            &config,
        );
        Self {
            cluster,
            secrets,
            remote,
            factory,
            ctx,
        }
    }
}
