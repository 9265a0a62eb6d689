//! # Credentials
//!
//! Resolves `spec.apiTokenSecretRef` into a Better Stack API token.
//!
//! The Secret is read from the resource's own namespace on every reconcile;
//! nothing is cached here. Token values are never logged.

use crate::controller::Error;
use crate::crd::SecretKeyRef;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;

/// Read access to Secrets
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// `Ok(None)` when the Secret does not exist
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("apiTokenSecretRef.name is empty")]
    MissingSecretName,
    #[error("secret {namespace}/{name} not found")]
    SecretNotFound { namespace: String, name: String },
    #[error("key {key:?} not found in secret {namespace}/{name}")]
    KeyMissing {
        namespace: String,
        name: String,
        key: String,
    },
    #[error("key {key:?} in secret {namespace}/{name} is empty")]
    EmptyValue {
        namespace: String,
        name: String,
        key: String,
    },
    #[error("failed to read secret {namespace}/{name}: {source}")]
    Lookup {
        namespace: String,
        name: String,
        #[source]
        source: Error,
    },
}

/// Resolve the API token referenced by `secret_ref` in `namespace`
///
/// # Errors
///
/// Returns a [`CredentialError`] describing why no token is available.
pub async fn resolve_token(
    secrets: &dyn SecretSource,
    namespace: &str,
    secret_ref: &SecretKeyRef,
) -> Result<String, CredentialError> {
    if secret_ref.name.is_empty() {
        return Err(CredentialError::MissingSecretName);
    }

    let secret = secrets
        .get_secret(namespace, &secret_ref.name)
        .await
        .map_err(|source| CredentialError::Lookup {
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
            source,
        })?
        .ok_or_else(|| CredentialError::SecretNotFound {
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
        })?;

    let value = secret
        .data
        .as_ref()
        .and_then(|data| data.get(&secret_ref.key))
        .ok_or_else(|| CredentialError::KeyMissing {
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
            key: secret_ref.key.clone(),
        })?;

    if value.0.is_empty() {
        return Err(CredentialError::EmptyValue {
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
            key: secret_ref.key.clone(),
        });
    }

    Ok(String::from_utf8_lossy(&value.0).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Default)]
    struct StaticSecrets {
        secrets: HashMap<(String, String), Secret>,
        fail: bool,
    }

    impl StaticSecrets {
        fn with(namespace: &str, name: &str, data: &[(&str, &str)]) -> Self {
            let mut secret = Secret::default();
            secret.metadata.name = Some(name.to_string());
            secret.metadata.namespace = Some(namespace.to_string());
            secret.data = Some(
                data.iter()
                    .map(|(k, v)| ((*k).to_string(), ByteString(v.as_bytes().to_vec())))
                    .collect::<BTreeMap<_, _>>(),
            );
            let mut secrets = HashMap::new();
            secrets.insert((namespace.to_string(), name.to_string()), secret);
            Self {
                secrets,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl SecretSource for StaticSecrets {
        async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>, Error> {
            if self.fail {
                return Err(Error::Conflict {
                    key: format!("{namespace}/{name}"),
                });
            }
            Ok(self
                .secrets
                .get(&(namespace.to_string(), name.to_string()))
                .cloned())
        }
    }

    fn secret_ref(name: &str, key: &str) -> SecretKeyRef {
        SecretKeyRef {
            name: name.to_string(),
            key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolves_token() {
        let secrets = StaticSecrets::with("apps", "betterstack", &[("token", "abc123")]);
        let token = resolve_token(&secrets, "apps", &secret_ref("betterstack", "token"))
            .await
            .unwrap();
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_failure_classification() {
        let secrets = StaticSecrets::with("apps", "betterstack", &[("token", ""), ("other", "x")]);

        let err = resolve_token(&secrets, "apps", &secret_ref("", "token"))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::MissingSecretName));

        let err = resolve_token(&secrets, "other-ns", &secret_ref("betterstack", "token"))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::SecretNotFound { .. }));

        let err = resolve_token(&secrets, "apps", &secret_ref("betterstack", "missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::KeyMissing { ref key, .. } if key == "missing"));

        let err = resolve_token(&secrets, "apps", &secret_ref("betterstack", "token"))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::EmptyValue { .. }));
        assert_eq!(
            err.to_string(),
            "key \"token\" in secret apps/betterstack is empty"
        );
    }

    #[tokio::test]
    async fn test_lookup_error_is_wrapped() {
        let secrets = StaticSecrets {
            fail: true,
            ..StaticSecrets::default()
        };
        let err = resolve_token(&secrets, "apps", &secret_ref("betterstack", "token"))
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::Lookup { .. }));
    }
}
