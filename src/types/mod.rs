pub mod container;
pub mod core_v1;
pub mod metadata;
pub mod volume;
pub mod workloads;

pub use container::*;
pub use core_v1::*;
pub use metadata::*;
pub use volume::*;
pub use workloads::*;

use std::fmt;

use k8s_openapi::api::apps::v1 as apps;
use k8s_openapi::api::core::v1 as k8s;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

/// A typed builder that renders into the Kubernetes object it describes.
/// Ownership is attached afterwards by the store.
pub trait ChildResource: Send + Sync {
    type K8sType: kube::Resource<DynamicType = ()>
        + Clone
        + std::fmt::Debug
        + serde::Serialize
        + for<'de> serde::Deserialize<'de>;

    fn into_k8s(self, namespace: &str) -> Self::K8sType;
}

/// The three kinds of object a `NextCloud` owns, in the order they are ensured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecondaryKind {
    Config,
    Workload,
    Network,
}

impl SecondaryKind {
    pub const ALL: [SecondaryKind; 3] = [
        SecondaryKind::Config,
        SecondaryKind::Workload,
        SecondaryKind::Network,
    ];

    /// Kubernetes kind backing this secondary.
    pub fn api_kind(&self) -> &'static str {
        match self {
            SecondaryKind::Config => "ConfigMap",
            SecondaryKind::Workload => "Deployment",
            SecondaryKind::Network => "Service",
        }
    }
}

impl fmt::Display for SecondaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_kind())
    }
}

/// A fully built child object, ready to be handed to a store.
#[derive(Clone, Debug, PartialEq)]
pub enum Secondary {
    Config(k8s::ConfigMap),
    Workload(apps::Deployment),
    Network(k8s::Service),
}

impl Secondary {
    pub fn kind(&self) -> SecondaryKind {
        match self {
            Secondary::Config(_) => SecondaryKind::Config,
            Secondary::Workload(_) => SecondaryKind::Workload,
            Secondary::Network(_) => SecondaryKind::Network,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Secondary::Config(o) => &o.metadata,
            Secondary::Workload(o) => &o.metadata,
            Secondary::Network(o) => &o.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Secondary::Config(o) => &mut o.metadata,
            Secondary::Workload(o) => &mut o.metadata,
            Secondary::Network(o) => &mut o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    pub fn namespace(&self) -> &str {
        self.metadata().namespace.as_deref().unwrap_or_default()
    }

    pub fn owner_references(&self) -> &[OwnerReference] {
        self.metadata().owner_references.as_deref().unwrap_or_default()
    }

    pub fn controller_reference(&self) -> Option<&OwnerReference> {
        self.owner_references()
            .iter()
            .find(|r| r.controller == Some(true))
    }

    pub fn as_config_map(&self) -> Option<&k8s::ConfigMap> {
        match self {
            Secondary::Config(o) => Some(o),
            _ => None,
        }
    }
}
