use kube::{CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Desired state of a NextCloud server.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "server.nextcloud.com",
    version = "v1",
    kind = "NextCloud",
    plural = "nextclouds",
    namespaced,
    status = "NextCloudStatus"
)]
pub struct NextCloudSpec {
    /// Free-form example field, carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foo: Option<String>,
}

/// Observed state of a NextCloud server. Nothing is reported yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NextCloudStatus {}

impl NextCloud {
    /// True once the API server has stamped a deletion timestamp.
    pub fn is_terminating(&self) -> bool {
        self.meta().deletion_timestamp.is_some()
    }
}
