use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Service};
use kube::api::{Api, PostParams};
use kube::core::NamespaceResourceScope;
use kube::{Client, Resource};
use tracing::debug;

use super::{ObjectKey, Store, StoreError, StoreResult};
use crate::crd::NextCloud;
use crate::types::{Secondary, SecondaryKind};

/// `Store` backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get<K>(&self, kind: &'static str, key: &ObjectKey) -> StoreResult<K>
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
            + Clone
            + std::fmt::Debug,
        K: serde::Serialize + for<'de> serde::Deserialize<'de>,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), &key.namespace);
        api.get(&key.name)
            .await
            .map_err(|e| classify(e, kind, key))
    }

    async fn post<K>(&self, kind: &'static str, object: &K) -> StoreResult<()>
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
            + Clone
            + std::fmt::Debug,
        K: serde::Serialize + for<'de> serde::Deserialize<'de>,
    {
        let meta = object.meta();
        let key = ObjectKey::new(
            meta.namespace.clone().unwrap_or_default(),
            meta.name.clone().unwrap_or_default(),
        );
        let api: Api<K> = Api::namespaced(self.client.clone(), &key.namespace);

        api.create(&PostParams::default(), object)
            .await
            .map_err(|e| classify(e, kind, &key))?;

        debug!(kind, %key, "created object");
        Ok(())
    }
}

/// Maps API status codes onto the store's error variants.
fn classify(err: kube::Error, kind: &'static str, key: &ObjectKey) -> StoreError {
    match err {
        kube::Error::Api(ref resp) if resp.code == 404 => StoreError::NotFound {
            kind,
            key: key.clone(),
        },
        kube::Error::Api(ref resp) if resp.code == 409 && resp.reason == "AlreadyExists" => {
            StoreError::AlreadyExists {
                kind,
                key: key.clone(),
            }
        }
        e => StoreError::Kube(e),
    }
}

#[async_trait]
impl Store for KubeStore {
    async fn get_primary(&self, key: &ObjectKey) -> StoreResult<NextCloud> {
        self.get::<NextCloud>("NextCloud", key).await
    }

    async fn get_secondary(
        &self,
        kind: SecondaryKind,
        key: &ObjectKey,
    ) -> StoreResult<Secondary> {
        let name = kind.api_kind();
        match kind {
            SecondaryKind::Config => self.get::<ConfigMap>(name, key).await.map(Secondary::Config),
            SecondaryKind::Workload => self
                .get::<Deployment>(name, key)
                .await
                .map(Secondary::Workload),
            SecondaryKind::Network => self.get::<Service>(name, key).await.map(Secondary::Network),
        }
    }

    async fn create(&self, object: &Secondary) -> StoreResult<()> {
        let kind = object.kind().api_kind();
        match object {
            Secondary::Config(o) => self.post(kind, o).await,
            Secondary::Workload(o) => self.post(kind, o).await,
            Secondary::Network(o) => self.post(kind, o).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{reason} from API server"),
            reason: reason.to_string(),
            code,
        })
    }

    fn key() -> ObjectKey {
        ObjectKey::new("default", "demo")
    }

    #[test]
    fn not_found_is_classified() {
        let err = classify(api_error(404, "NotFound"), "Deployment", &key());
        assert!(matches!(
            err,
            StoreError::NotFound { kind: "Deployment", key: ref k } if k.name == "demo"
        ));
    }

    #[test]
    fn already_exists_is_classified() {
        let err = classify(api_error(409, "AlreadyExists"), "Service", &key());
        assert!(matches!(err, StoreError::AlreadyExists { kind: "Service", .. }));
    }

    #[test]
    fn write_conflict_stays_an_api_error() {
        let err = classify(api_error(409, "Conflict"), "ConfigMap", &key());
        assert!(matches!(
            err,
            StoreError::Kube(kube::Error::Api(ref resp)) if resp.code == 409
        ));
        assert!(!err.is_already_exists());
    }

    #[test]
    fn other_failures_stay_api_errors() {
        for (code, reason) in [
            (403, "Forbidden"),
            (500, "InternalError"),
            (503, "ServiceUnavailable"),
        ] {
            let err = classify(api_error(code, reason), "Deployment", &key());
            assert!(matches!(err, StoreError::Kube(_)), "{code} {reason}");
        }
    }
}
