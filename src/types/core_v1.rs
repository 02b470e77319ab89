use super::{Labels, Selector};
use crate::types::ChildResource;
use k8s_openapi::api::core::v1 as k8s;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct ConfigMap {
    pub name: String,
    pub labels: Labels,
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
            data: BTreeMap::new(),
        }
    }

    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

impl ChildResource for ConfigMap {
    type K8sType = k8s::ConfigMap;

    fn into_k8s(self, namespace: &str) -> Self::K8sType {
        k8s::ConfigMap {
            metadata: ObjectMeta {
                name: Some(self.name),
                namespace: Some(namespace.to_string()),
                labels: self.labels.into_optional(),
                ..Default::default()
            },
            data: if self.data.is_empty() {
                None
            } else {
                Some(self.data)
            },
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct Service {
    pub name: String,
    pub labels: Labels,
    pub selector: Selector,
    pub ports: Vec<ServicePort>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Labels::new(),
            selector: Selector::new(),
            ports: Vec::new(),
        }
    }

    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    pub fn port(mut self, port: ServicePort) -> Self {
        self.ports.push(port);
        self
    }
}

impl ChildResource for Service {
    type K8sType = k8s::Service;

    fn into_k8s(self, namespace: &str) -> Self::K8sType {
        k8s::Service {
            metadata: ObjectMeta {
                name: Some(self.name),
                namespace: Some(namespace.to_string()),
                labels: self.labels.into_optional(),
                ..Default::default()
            },
            spec: Some(k8s::ServiceSpec {
                selector: Some(self.selector.into_inner()),
                ports: if self.ports.is_empty() {
                    None
                } else {
                    Some(self.ports.into_iter().map(|p| p.into_k8s()).collect())
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServicePort {
    pub name: String,
    pub port: i32,
    pub target_port: i32,
    pub protocol: String,
}

impl ServicePort {
    /// A TCP port forwarding to the same port number on the pods.
    pub fn tcp(name: impl Into<String>, port: i32) -> Self {
        Self {
            name: name.into(),
            port,
            target_port: port,
            protocol: "TCP".to_string(),
        }
    }

    pub fn target_port(mut self, port: i32) -> Self {
        self.target_port = port;
        self
    }

    pub fn into_k8s(self) -> k8s::ServicePort {
        k8s::ServicePort {
            name: Some(self.name),
            port: self.port,
            target_port: Some(IntOrString::Int(self.target_port)),
            protocol: Some(self.protocol),
            ..Default::default()
        }
    }
}
