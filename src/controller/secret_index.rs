//! # Secret Index
//!
//! Maps a Secret to the resources whose `spec.apiTokenSecretRef` points at it,
//! so that creating, rotating or editing a token Secret re-reconciles every
//! dependent resource without a spec change.
//!
//! The index key is `"<namespace>/<secretName>"`. Lookups scan the
//! controller's reflector store, which already holds every watched object.

use crate::controller::reconciler::ManagedKind;
use k8s_openapi::api::core::v1::Secret;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::ResourceExt;
use tracing::debug;

/// `"<namespace>/<secretName>"` for `obj`, or `None` when no Secret is referenced
pub fn secret_index_key<K: ManagedKind>(obj: &K) -> Option<String> {
    let secret_name = &obj.token_ref().name;
    if secret_name.is_empty() {
        return None;
    }
    obj.namespace()
        .map(|namespace| format!("{namespace}/{secret_name}"))
}

/// Secret to dependent-resource index over a reflector store
#[derive(Clone)]
pub struct SecretIndex<K: ManagedKind> {
    store: Store<K>,
}

impl<K: ManagedKind> std::fmt::Debug for SecretIndex<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretIndex")
            .field("kind", &K::KIND)
            .finish_non_exhaustive()
    }
}

impl<K: ManagedKind> SecretIndex<K> {
    pub fn new(store: Store<K>) -> Self {
        Self { store }
    }

    /// Objects to reconcile after `secret` changed
    pub fn lookup(&self, secret: &Secret) -> Vec<ObjectRef<K>> {
        let Some(namespace) = secret.namespace() else {
            return Vec::new();
        };
        let key = format!("{namespace}/{}", secret.name_any());

        let refs: Vec<ObjectRef<K>> = self
            .store
            .state()
            .iter()
            .filter(|obj| secret_index_key(obj.as_ref()).as_deref() == Some(key.as_str()))
            .map(|obj| ObjectRef::from_obj(obj.as_ref()))
            .collect();

        if !refs.is_empty() {
            debug!(
                secret = %key,
                count = refs.len(),
                "Secret changed, enqueueing dependent {} resources",
                K::KIND
            );
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{Heartbeat, HeartbeatSpec, SecretKeyRef};

    fn heartbeat(namespace: &str, secret: &str) -> Heartbeat {
        let mut hb = Heartbeat::new(
            "nightly-backup",
            HeartbeatSpec {
                name: "nightly backup".to_string(),
                api_token_secret_ref: SecretKeyRef {
                    name: secret.to_string(),
                    key: "token".to_string(),
                },
                ..Default::default()
            },
        );
        hb.metadata.namespace = Some(namespace.to_string());
        hb
    }

    #[test]
    fn test_index_key_uses_own_namespace() {
        assert_eq!(
            secret_index_key(&heartbeat("ops", "betterstack")),
            Some("ops/betterstack".to_string())
        );
    }

    #[test]
    fn test_index_key_absent_without_secret_name() {
        assert_eq!(secret_index_key(&heartbeat("ops", "")), None);
    }
}
