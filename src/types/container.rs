use k8s_openapi::api::core::v1 as k8s;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub ports: Vec<ContainerPort>,
    pub resources: Option<Resources>,
    pub volume_mounts: Vec<VolumeMount>,
}

impl Container {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ports: Vec::new(),
            resources: None,
            volume_mounts: Vec::new(),
        }
    }

    pub fn port(mut self, port: i32) -> Self {
        self.ports.push(ContainerPort {
            container_port: port,
        });
        self
    }

    pub fn resources(mut self, resources: Resources) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Mounts a single key of `volume` at `mount_path`.
    pub fn volume_sub_path_mount(
        mut self,
        volume: impl Into<String>,
        mount_path: impl Into<String>,
        sub_path: impl Into<String>,
    ) -> Self {
        self.volume_mounts.push(VolumeMount {
            name: volume.into(),
            mount_path: mount_path.into(),
            sub_path: Some(sub_path.into()),
        });
        self
    }

    pub fn into_k8s(self) -> k8s::Container {
        k8s::Container {
            name: self.name,
            image: Some(self.image),
            ports: if self.ports.is_empty() {
                None
            } else {
                Some(self.ports.into_iter().map(|p| p.into_k8s()).collect())
            },
            resources: self.resources.map(|r| r.into_k8s()),
            volume_mounts: if self.volume_mounts.is_empty() {
                None
            } else {
                Some(
                    self.volume_mounts
                        .into_iter()
                        .map(|v| v.into_k8s())
                        .collect(),
                )
            },
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContainerPort {
    pub container_port: i32,
}

impl ContainerPort {
    pub fn into_k8s(self) -> k8s::ContainerPort {
        k8s::ContainerPort {
            container_port: self.container_port,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Resources {
    pub requests: BTreeMap<String, String>,
    pub limits: BTreeMap<String, String>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cpu(mut self, request: impl Into<String>, limit: impl Into<String>) -> Self {
        self.requests.insert("cpu".to_string(), request.into());
        self.limits.insert("cpu".to_string(), limit.into());
        self
    }

    pub fn memory(mut self, request: impl Into<String>, limit: impl Into<String>) -> Self {
        self.requests.insert("memory".to_string(), request.into());
        self.limits.insert("memory".to_string(), limit.into());
        self
    }

    pub fn into_k8s(self) -> k8s::ResourceRequirements {
        fn quantities(map: BTreeMap<String, String>) -> Option<BTreeMap<String, Quantity>> {
            if map.is_empty() {
                None
            } else {
                Some(map.into_iter().map(|(k, v)| (k, Quantity(v))).collect())
            }
        }

        k8s::ResourceRequirements {
            requests: quantities(self.requests),
            limits: quantities(self.limits),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
    pub sub_path: Option<String>,
}

impl VolumeMount {
    pub fn into_k8s(self) -> k8s::VolumeMount {
        k8s::VolumeMount {
            name: self.name,
            mount_path: self.mount_path,
            sub_path: self.sub_path,
            ..Default::default()
        }
    }
}
