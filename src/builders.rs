//! Canonical definitions of the objects a `NextCloud` owns.
//!
//! Builders are pure: the same key and defaults always produce the same
//! object. Ownership is attached separately by the ensure pipeline.

use crate::config::ServerDefaults;
use crate::naming::{default_labels, default_selector, secondary_name};
use crate::store::ObjectKey;
use crate::types::{
    ChildResource, ConfigMap, Container, Deployment, Resources, Secondary, SecondaryKind, Service,
    ServicePort, Volume,
};

/// Name of the server container in the pod template.
pub const CONTAINER_NAME: &str = "nextcloud";

/// Name of the pod volume holding the Apache configuration.
pub const CONFIG_VOLUME: &str = "nextcloud-config";

pub const PORTS_CONFIG_KEY: &str = "ports.conf";
pub const APACHE_CONFIG_KEY: &str = "apache.conf";

pub const HTTP_PORT_NAME: &str = "http";

/// Builds the `kind` child of the primary identified by `primary`.
pub fn build(kind: SecondaryKind, primary: &ObjectKey, defaults: &ServerDefaults) -> Secondary {
    match kind {
        SecondaryKind::Config => Secondary::Config(config_map(primary, defaults)),
        SecondaryKind::Workload => Secondary::Workload(deployment(primary, defaults)),
        SecondaryKind::Network => Secondary::Network(service(primary, defaults)),
    }
}

pub fn config_map(
    primary: &ObjectKey,
    defaults: &ServerDefaults,
) -> k8s_openapi::api::core::v1::ConfigMap {
    ConfigMap::new(secondary_name(&primary.name, SecondaryKind::Config))
        .labels(default_labels(&primary.name, &defaults.part_of))
        .data(PORTS_CONFIG_KEY, defaults.ports_config())
        .data(APACHE_CONFIG_KEY, defaults.apache_config())
        .into_k8s(&primary.namespace)
}

pub fn deployment(
    primary: &ObjectKey,
    defaults: &ServerDefaults,
) -> k8s_openapi::api::apps::v1::Deployment {
    let server = Container::new(CONTAINER_NAME, defaults.container_image())
        .port(defaults.http_port)
        .resources(
            Resources::new()
                .cpu(&defaults.cpu_request, &defaults.cpu_limit)
                .memory(&defaults.memory_request, &defaults.memory_limit),
        )
        .volume_sub_path_mount(CONFIG_VOLUME, &defaults.ports_config_path, PORTS_CONFIG_KEY)
        .volume_sub_path_mount(CONFIG_VOLUME, &defaults.vhost_config_path, APACHE_CONFIG_KEY);

    Deployment::new(secondary_name(&primary.name, SecondaryKind::Workload))
        .replicas(defaults.replicas)
        .labels(default_labels(&primary.name, &defaults.part_of))
        .selector(default_selector(&primary.name, &defaults.part_of))
        .container(server)
        .volume(Volume::configmap(
            CONFIG_VOLUME,
            secondary_name(&primary.name, SecondaryKind::Config),
        ))
        .into_k8s(&primary.namespace)
}

pub fn service(
    primary: &ObjectKey,
    defaults: &ServerDefaults,
) -> k8s_openapi::api::core::v1::Service {
    Service::new(secondary_name(&primary.name, SecondaryKind::Network))
        .labels(default_labels(&primary.name, &defaults.part_of))
        .selector(default_selector(&primary.name, &defaults.part_of))
        .port(
            ServicePort::tcp(HTTP_PORT_NAME, defaults.http_port).target_port(defaults.http_port),
        )
        .into_k8s(&primary.namespace)
}
