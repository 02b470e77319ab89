//! The narrow capability the reconciler needs from the cluster.

mod kubernetes;
mod memory;

pub use self::kubernetes::KubeStore;
pub use self::memory::MemoryStore;

use std::fmt;

use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Resource, ResourceExt};
use thiserror::Error;

use crate::crd::NextCloud;
use crate::types::{Secondary, SecondaryKind};

/// Namespace and name of an object.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Key of an existing resource, `None` if it lacks a name or namespace.
    pub fn of<K: Resource>(resource: &K) -> Option<Self> {
        let meta = resource.meta();
        Some(Self::new(meta.namespace.clone()?, meta.name.clone()?))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Store failures, classified so callers can branch on the variant.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} {key} not found")]
    NotFound { kind: &'static str, key: ObjectKey },

    #[error("{kind} {key} already exists")]
    AlreadyExists { kind: &'static str, key: ObjectKey },

    #[error("Kubernetes API error: {0}")]
    Kube(#[source] kube::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Ownership error: {0}")]
    Ownership(String),
}

impl StoreError {
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn get_primary(&self, key: &ObjectKey) -> StoreResult<NextCloud>;

    async fn get_secondary(&self, kind: SecondaryKind, key: &ObjectKey)
        -> StoreResult<Secondary>;

    async fn create(&self, object: &Secondary) -> StoreResult<()>;

    /// Marks `owner` as the controlling owner of `child`, so deleting the
    /// owner cascades to the child.
    fn set_owner_reference(&self, child: &mut Secondary, owner: &NextCloud) -> StoreResult<()> {
        let owner_ref = controller_reference(owner)?;

        if let Some(existing) = child.controller_reference() {
            if existing.uid != owner_ref.uid {
                return Err(StoreError::Ownership(format!(
                    "{} {} is already controlled by {} {}",
                    child.kind(),
                    child.name(),
                    existing.kind,
                    existing.name
                )));
            }
        }

        let refs = child
            .metadata_mut()
            .owner_references
            .get_or_insert_with(Vec::new);
        refs.retain(|r| r.uid != owner_ref.uid);
        refs.push(owner_ref);
        Ok(())
    }
}

/// Controller reference pointing at `owner`, with owner deletion blocked
/// until the child has been collected.
pub fn controller_reference(owner: &NextCloud) -> StoreResult<OwnerReference> {
    let uid = owner.uid().ok_or_else(|| {
        StoreError::Ownership(format!("NextCloud {} has no uid", owner.name_any()))
    })?;
    let name = owner
        .meta()
        .name
        .clone()
        .ok_or_else(|| StoreError::Ownership("NextCloud has no name".to_string()))?;

    Ok(OwnerReference {
        api_version: NextCloud::api_version(&()).to_string(),
        kind: NextCloud::kind(&()).to_string(),
        name,
        uid,
        controller: Some(true),
        block_owner_deletion: Some(true),
    })
}
