use std::collections::HashMap;
use std::time::Duration;

use nextcloud_operator::{Error, OperatorConfig, ServerDefaults};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn unset_environment_keeps_defaults() {
    let config = OperatorConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.namespace, None);
    assert_eq!(config.workers, 4);
    assert_eq!(config.error_requeue, Duration::from_secs(60));
    assert_eq!(config.defaults, ServerDefaults::default());
    assert_eq!(config.defaults.container_image(), "nextcloud:20.0.4-apache");
}

#[test]
fn environment_overrides_apply() {
    let config = OperatorConfig::from_lookup(lookup(&[
        ("WATCH_NAMESPACE", "apps"),
        ("RECONCILE_WORKERS", "8"),
        ("ERROR_REQUEUE_SECS", "15"),
        ("NEXTCLOUD_IMAGE", "mirror/nextcloud"),
        ("NEXTCLOUD_VERSION", "21.0.0-apache"),
        ("NEXTCLOUD_HTTP_PORT", "8443"),
    ]))
    .unwrap();

    assert_eq!(config.namespace.as_deref(), Some("apps"));
    assert_eq!(config.workers, 8);
    assert_eq!(config.error_requeue, Duration::from_secs(15));
    assert_eq!(
        config.defaults.container_image(),
        "mirror/nextcloud:21.0.0-apache"
    );
    assert_eq!(config.defaults.http_port, 8443);
    assert_eq!(config.defaults.ports_config(), "Listen 8443");
}

#[test]
fn empty_namespace_means_all_namespaces() {
    let config = OperatorConfig::from_lookup(lookup(&[("WATCH_NAMESPACE", "")])).unwrap();
    assert_eq!(config.namespace, None);
}

#[test]
fn invalid_values_are_rejected() {
    for pairs in [
        [("RECONCILE_WORKERS", "0")],
        [("RECONCILE_WORKERS", "many")],
        [("ERROR_REQUEUE_SECS", "-1")],
        [("ERROR_REQUEUE_SECS", "0")],
        [("NEXTCLOUD_HTTP_PORT", "0")],
        [("NEXTCLOUD_HTTP_PORT", "70000")],
    ] {
        let err = OperatorConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{pairs:?}");
    }
}
