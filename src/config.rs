use std::time::Duration;

use crate::error::{Error, Result};
use crate::naming::{combine_image_tag, DEFAULT_PART_OF};

/// Values baked into every object the operator generates.
///
/// Everything a builder needs beyond the primary's identity lives here, so
/// reconcilers can be constructed with alternative defaults in tests or from
/// the environment in production.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerDefaults {
    /// Container image name, without tag.
    pub image: String,
    /// Image tag, or a digest such as `sha256:...`. Empty means no tag.
    pub version: String,
    /// Port Apache listens on inside the container and the Service exposes.
    pub http_port: i32,
    pub replicas: i32,
    pub cpu_request: String,
    pub cpu_limit: String,
    pub memory_request: String,
    pub memory_limit: String,
    /// Value of the `app.kubernetes.io/part-of` label.
    pub part_of: String,
    /// Where `ports.conf` is mounted in the container.
    pub ports_config_path: String,
    /// Where the virtual host configuration is mounted in the container.
    pub vhost_config_path: String,
}

impl Default for ServerDefaults {
    fn default() -> Self {
        Self {
            image: "nextcloud".to_string(),
            version: "20.0.4-apache".to_string(),
            http_port: 8080,
            replicas: 1,
            cpu_request: "250m".to_string(),
            cpu_limit: "1000m".to_string(),
            memory_request: "512Mi".to_string(),
            memory_limit: "1Gi".to_string(),
            part_of: DEFAULT_PART_OF.to_string(),
            ports_config_path: "/etc/apache2/ports.conf".to_string(),
            vhost_config_path: "/etc/apache/sites-available/000-default.conf".to_string(),
        }
    }
}

impl ServerDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn http_port(mut self, port: i32) -> Self {
        self.http_port = port;
        self
    }

    pub fn part_of(mut self, group: impl Into<String>) -> Self {
        self.part_of = group.into();
        self
    }

    pub fn container_image(&self) -> String {
        combine_image_tag(&self.image, &self.version)
    }

    /// Contents of Apache's `ports.conf`.
    pub fn ports_config(&self) -> String {
        format!("Listen {}", self.http_port)
    }

    /// Default virtual host serving the NextCloud document root.
    pub fn apache_config(&self) -> String {
        format!(
            "\n<VirtualHost *:{}>\n    DocumentRoot /usr/src/nextcloud\n    ErrorLog ${{APACHE_LOG_DIR}}/error.log\n    CustomLog ${{APACHE_LOG_DIR}}/access.log combined\n</VirtualHost>",
            self.http_port
        )
    }
}

#[derive(Clone, Debug)]
pub struct OperatorConfig {
    /// Restrict the watch to one namespace; `None` watches all of them.
    pub namespace: Option<String>,
    /// Upper bound on reconciles running at once across different objects.
    pub workers: u16,
    /// Delay before a failed reconcile is retried.
    pub error_requeue: Duration,
    pub defaults: ServerDefaults,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            workers: 4,
            error_requeue: Duration::from_secs(60),
            defaults: ServerDefaults::default(),
        }
    }
}

impl OperatorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("WATCH_NAMESPACE").filter(|v| !v.is_empty()) {
            config.namespace = Some(val);
        }

        if let Some(val) = lookup("RECONCILE_WORKERS") {
            config.workers = val
                .parse::<u16>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    Error::InvalidConfig(format!("Invalid RECONCILE_WORKERS: {val}"))
                })?;
        }

        if let Some(val) = lookup("ERROR_REQUEUE_SECS") {
            let secs = val
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    Error::InvalidConfig(format!("Invalid ERROR_REQUEUE_SECS: {val}"))
                })?;
            config.error_requeue = Duration::from_secs(secs);
        }

        if let Some(val) = lookup("NEXTCLOUD_IMAGE") {
            config.defaults.image = val;
        }

        if let Some(val) = lookup("NEXTCLOUD_VERSION") {
            config.defaults.version = val;
        }

        if let Some(val) = lookup("NEXTCLOUD_HTTP_PORT") {
            config.defaults.http_port = val
                .parse::<i32>()
                .ok()
                .filter(|p| (1..=65535).contains(p))
                .ok_or_else(|| {
                    Error::InvalidConfig(format!("Invalid NEXTCLOUD_HTTP_PORT: {val}"))
                })?;
        }

        Ok(config)
    }
}
