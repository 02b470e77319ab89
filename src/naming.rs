//! Deterministic names and labels for the objects owned by a `NextCloud`.

use crate::types::{Labels, SecondaryKind, Selector};

/// Label key carrying the owning `NextCloud` name.
pub const KEY_APP_NAME: &str = "app.kubernetes.io/name";

/// Label key carrying the application group.
pub const KEY_PART_OF: &str = "app.kubernetes.io/part-of";

/// Default value for the `part-of` label.
pub const DEFAULT_PART_OF: &str = "nextcloud";

const CONFIG_SUFFIX: &str = "config";

/// Name of the `kind` child of the primary called `primary`.
///
/// Only the ConfigMap is suffixed. The Deployment and Service share the
/// primary's own name, which keeps the Service selector and the pod template
/// labels derived from the same string.
pub fn secondary_name(primary: &str, kind: SecondaryKind) -> String {
    match kind {
        SecondaryKind::Config => name_with_suffix(primary, CONFIG_SUFFIX),
        SecondaryKind::Workload | SecondaryKind::Network => primary.to_string(),
    }
}

pub fn name_with_suffix(name: &str, suffix: &str) -> String {
    format!("{name}-{suffix}")
}

pub fn default_labels(primary: &str, part_of: &str) -> Labels {
    Labels::new()
        .insert(KEY_APP_NAME, primary)
        .insert(KEY_PART_OF, part_of)
}

pub fn default_selector(primary: &str, part_of: &str) -> Selector {
    default_labels(primary, part_of).into_iter().collect()
}

/// Joins an image and a tag, switching to digest form when the tag already
/// contains a colon (`sha256:...`).
pub fn combine_image_tag(image: &str, tag: &str) -> String {
    if tag.contains(':') {
        format!("{image}@{tag}")
    } else if !tag.is_empty() {
        format!("{image}:{tag}")
    } else {
        image.to_string()
    }
}
