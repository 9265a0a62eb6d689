//! # Cluster Seam
//!
//! Reads and writes against the Kubernetes API, as seen by the reconciler.

use super::ManagedKind;
use crate::constants::FIELD_MANAGER;
use crate::controller::credentials::SecretSource;
use crate::controller::Error;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, Patch, PatchParams};
use kube::{Client, ResourceExt};
use serde_json::{json, Value};
use tracing::debug;

#[async_trait]
pub trait ClusterState<K: ManagedKind>: Send + Sync {
    /// `Ok(None)` when the object does not exist
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, Error>;

    /// Replace `metadata.finalizers`, guarded by the object's `resourceVersion`
    ///
    /// Fails with [`Error::Conflict`] if the object changed since `obj` was read.
    async fn patch_finalizers(&self, obj: &K, finalizers: &[String]) -> Result<(), Error>;

    /// Merge-patch the status subresource; a vanished object is not an error
    async fn patch_status(&self, obj: &K, patch: Value) -> Result<(), Error>;
}

/// [`ClusterState`] and [`SecretSource`] over a live cluster
#[derive(Clone)]
pub struct KubeState {
    client: Client,
}

impl std::fmt::Debug for KubeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeState").finish_non_exhaustive()
    }
}

impl KubeState {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K: ManagedKind>(&self, namespace: &str) -> Api<K> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

fn object_key<K: ManagedKind>(obj: &K) -> String {
    format!(
        "{}/{}",
        obj.namespace().unwrap_or_default(),
        obj.name_any()
    )
}

#[async_trait]
impl<K: ManagedKind> ClusterState<K> for KubeState {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<K>, Error> {
        Ok(self.api::<K>(namespace).get_opt(name).await?)
    }

    async fn patch_finalizers(&self, obj: &K, finalizers: &[String]) -> Result<(), Error> {
        let namespace = obj.namespace().unwrap_or_default();
        let patch = json!({
            "metadata": {
                "finalizers": finalizers,
                "resourceVersion": obj.resource_version(),
            }
        });

        match self
            .api::<K>(&namespace)
            .patch(
                &obj.name_any(),
                &PatchParams::apply(FIELD_MANAGER),
                &Patch::Merge(patch),
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(api_err)) if api_err.code == 409 => Err(Error::Conflict {
                key: object_key(obj),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn patch_status(&self, obj: &K, patch: Value) -> Result<(), Error> {
        let namespace = obj.namespace().unwrap_or_default();
        match self
            .api::<K>(&namespace)
            .patch_status(
                &obj.name_any(),
                &PatchParams::apply(FIELD_MANAGER),
                &Patch::Merge(patch),
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(api_err)) if api_err.code == 404 => {
                debug!(
                    "{} {} was deleted during reconciliation, skipping status update",
                    K::KIND,
                    object_key(obj)
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SecretSource for KubeState {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, Error> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }
}
