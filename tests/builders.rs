use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use nextcloud_operator::builders::{self, CONFIG_VOLUME};
use nextcloud_operator::naming::{combine_image_tag, default_labels, secondary_name};
use nextcloud_operator::{ObjectKey, SecondaryKind, ServerDefaults};

const DEFAULT_VHOST: &str = "
<VirtualHost *:8080>
    DocumentRoot /usr/src/nextcloud
    ErrorLog ${APACHE_LOG_DIR}/error.log
    CustomLog ${APACHE_LOG_DIR}/access.log combined
</VirtualHost>";

fn demo() -> ObjectKey {
    ObjectKey::new("default", "demo")
}

#[test]
fn names_follow_the_primary() {
    assert_eq!(secondary_name("demo", SecondaryKind::Config), "demo-config");
    assert_eq!(secondary_name("demo", SecondaryKind::Workload), "demo");
    assert_eq!(secondary_name("demo", SecondaryKind::Network), "demo");
    assert_eq!(
        secondary_name("demo", SecondaryKind::Config),
        secondary_name("demo", SecondaryKind::Config)
    );
    assert_ne!(
        secondary_name("a", SecondaryKind::Config),
        secondary_name("b", SecondaryKind::Config)
    );
}

#[test]
fn image_reference_forms() {
    assert_eq!(combine_image_tag("nextcloud", "20.0.4-apache"), "nextcloud:20.0.4-apache");
    assert_eq!(
        combine_image_tag("nextcloud", "sha256:abc123"),
        "nextcloud@sha256:abc123"
    );
    assert_eq!(combine_image_tag("nextcloud", ""), "nextcloud");
}

#[test]
fn config_map_carries_apache_config() {
    let cm = builders::config_map(&demo(), &ServerDefaults::default());

    assert_eq!(cm.metadata.name.as_deref(), Some("demo-config"));
    assert_eq!(cm.metadata.namespace.as_deref(), Some("default"));
    assert!(cm.metadata.owner_references.is_none());

    let data = cm.data.unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["ports.conf"], "Listen 8080");
    assert_eq!(data["apache.conf"], DEFAULT_VHOST);
}

#[test]
fn deployment_runs_one_server_container() {
    let deploy = builders::deployment(&demo(), &ServerDefaults::default());
    let labels = default_labels("demo", "nextcloud").into_inner();

    assert_eq!(deploy.metadata.name.as_deref(), Some("demo"));
    assert_eq!(deploy.metadata.labels.as_ref(), Some(&labels));

    let spec = deploy.spec.unwrap();
    assert_eq!(spec.replicas, Some(1));
    assert_eq!(spec.selector.match_labels.as_ref(), Some(&labels));
    assert_eq!(
        spec.template.metadata.as_ref().unwrap().labels.as_ref(),
        Some(&labels)
    );

    let pod = spec.template.spec.unwrap();
    assert_eq!(pod.containers.len(), 1);
    let container = &pod.containers[0];
    assert_eq!(container.name, "nextcloud");
    assert_eq!(container.image.as_deref(), Some("nextcloud:20.0.4-apache"));

    let ports = container.ports.as_ref().unwrap();
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0].container_port, 8080);

    let mounts = container.volume_mounts.as_ref().unwrap();
    assert_eq!(mounts.len(), 2);
    assert!(mounts.iter().all(|m| m.name == CONFIG_VOLUME));
    assert_eq!(mounts[0].mount_path, "/etc/apache2/ports.conf");
    assert_eq!(mounts[0].sub_path.as_deref(), Some("ports.conf"));
    assert_eq!(
        mounts[1].mount_path,
        "/etc/apache/sites-available/000-default.conf"
    );
    assert_eq!(mounts[1].sub_path.as_deref(), Some("apache.conf"));

    let resources = container.resources.as_ref().unwrap();
    let requests = resources.requests.as_ref().unwrap();
    let limits = resources.limits.as_ref().unwrap();
    assert_eq!(requests["cpu"], Quantity("250m".to_string()));
    assert_eq!(requests["memory"], Quantity("512Mi".to_string()));
    assert_eq!(limits["cpu"], Quantity("1000m".to_string()));
    assert_eq!(limits["memory"], Quantity("1Gi".to_string()));

    let volumes = pod.volumes.unwrap();
    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes[0].name, CONFIG_VOLUME);
    assert_eq!(volumes[0].config_map.as_ref().unwrap().name, "demo-config");
}

#[test]
fn service_exposes_http() {
    let svc = builders::service(&demo(), &ServerDefaults::default());

    assert_eq!(svc.metadata.name.as_deref(), Some("demo"));

    let spec = svc.spec.unwrap();
    assert_eq!(
        spec.selector,
        Some(default_labels("demo", "nextcloud").into_inner())
    );

    let ports = spec.ports.unwrap();
    assert_eq!(ports.len(), 1);
    assert_eq!(ports[0].name.as_deref(), Some("http"));
    assert_eq!(ports[0].port, 8080);
    assert_eq!(ports[0].target_port, Some(IntOrString::Int(8080)));
    assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
}

#[test]
fn service_selects_the_deployment_pods() {
    let defaults = ServerDefaults::default();
    let svc = builders::service(&demo(), &defaults);
    let deploy = builders::deployment(&demo(), &defaults);

    let selector = svc.spec.unwrap().selector.unwrap();
    let pod_labels = deploy.spec.unwrap().template.metadata.unwrap().labels.unwrap();

    assert!(selector.iter().all(|(k, v)| pod_labels.get(k) == Some(v)));
}

#[test]
fn defaults_flow_into_every_builder() {
    let defaults = ServerDefaults::new()
        .image("registry.local/nextcloud")
        .version("sha256:feed")
        .http_port(9090)
        .part_of("storage");

    let cm = builders::config_map(&demo(), &defaults);
    assert_eq!(cm.data.as_ref().unwrap()["ports.conf"], "Listen 9090");
    assert!(cm.data.as_ref().unwrap()["apache.conf"].contains("<VirtualHost *:9090>"));
    assert_eq!(
        cm.metadata.labels.unwrap()["app.kubernetes.io/part-of"],
        "storage"
    );

    let deploy = builders::deployment(&demo(), &defaults);
    let container = &deploy.spec.unwrap().template.spec.unwrap().containers[0];
    assert_eq!(
        container.image.as_deref(),
        Some("registry.local/nextcloud@sha256:feed")
    );
    assert_eq!(container.ports.as_ref().unwrap()[0].container_port, 9090);

    let svc = builders::service(&demo(), &defaults);
    let port = &svc.spec.unwrap().ports.unwrap()[0];
    assert_eq!(port.port, 9090);
    assert_eq!(port.target_port, Some(IntOrString::Int(9090)));
}

#[test]
fn build_is_deterministic() {
    let defaults = ServerDefaults::default();
    for kind in SecondaryKind::ALL {
        let a = builders::build(kind, &demo(), &defaults);
        let b = builders::build(kind, &demo(), &defaults);
        assert_eq!(a, b);
        assert_eq!(a.kind(), kind);
        assert_eq!(a.name(), secondary_name("demo", kind));
    }
}

#[test]
fn built_children_carry_no_owner_until_the_store_sets_one() {
    let defaults = ServerDefaults::default();
    for kind in SecondaryKind::ALL {
        let child = builders::build(kind, &demo(), &defaults);
        assert!(child.owner_references().is_empty(), "{kind}");
        assert_eq!(child.namespace(), "default");
    }
}
