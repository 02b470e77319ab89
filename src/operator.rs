use crate::config::OperatorConfig;
use crate::crd::NextCloud;
use crate::error::{Error, Result};
use crate::reconciler::Reconciler;
use crate::store::{KubeStore, ObjectKey};
use futures::StreamExt;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Service};
use kube::api::Api;
use kube::runtime::controller::{Action, Config as ControllerConfig, Controller};
use kube::runtime::watcher::Config as WatcherConfig;
use kube::{Client, Resource, ResourceExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Binds the reconciler to a kube-runtime controller.
///
/// The controller owns the work queue: it deduplicates keys, never runs two
/// passes for the same `NextCloud` at once, and schedules retries through
/// [`error_policy`]. Changes to owned ConfigMaps, Deployments and Services
/// re-trigger their owner, so a deleted child is recreated on the next pass.
pub struct Operator {
    config: OperatorConfig,
}

impl Operator {
    pub fn new(config: OperatorConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let client = Client::try_default().await.map_err(Error::Kube)?;
        self.run_with_client(client).await
    }

    pub async fn run_with_client(self, client: Client) -> Result<()> {
        let OperatorConfig {
            namespace,
            workers,
            error_requeue,
            defaults,
        } = self.config;

        info!(
            "Starting operator for {}/{} in {}",
            NextCloud::group(&()),
            NextCloud::kind(&()),
            namespace.as_deref().unwrap_or("all namespaces")
        );

        let store = Arc::new(KubeStore::new(client.clone()));
        let ctx = Arc::new(ControllerContext {
            reconciler: Reconciler::new(store, defaults),
            error_requeue,
        });

        Controller::new(api::<NextCloud>(&client, &namespace), WatcherConfig::default())
            .owns(api::<ConfigMap>(&client, &namespace), WatcherConfig::default())
            .owns(api::<Deployment>(&client, &namespace), WatcherConfig::default())
            .owns(api::<Service>(&client, &namespace), WatcherConfig::default())
            .with_config(ControllerConfig::default().concurrency(workers))
            .shutdown_on_signal()
            .run(reconcile, error_policy, ctx)
            .for_each(|result| async move {
                match result {
                    Ok((resource, action)) => {
                        info!("Reconciled {} - {:?}", resource.name, action);
                    }
                    Err(e) => {
                        error!("Reconciliation error: {:?}", e);
                    }
                }
            })
            .await;

        info!("Operator stopped");
        Ok(())
    }
}

fn api<K>(client: &Client, namespace: &Option<String>) -> Api<K>
where
    K: Resource<DynamicType = (), Scope = kube::core::NamespaceResourceScope>,
{
    match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    }
}

struct ControllerContext {
    reconciler: Reconciler<KubeStore>,
    error_requeue: Duration,
}

async fn reconcile(resource: Arc<NextCloud>, ctx: Arc<ControllerContext>) -> Result<Action> {
    let key = ObjectKey::of(resource.as_ref())
        .ok_or(Error::MissingField("metadata.name or metadata.namespace"))?;

    ctx.reconciler.reconcile(&key).await?;
    Ok(Action::await_change())
}

fn error_policy(resource: Arc<NextCloud>, error: &Error, ctx: Arc<ControllerContext>) -> Action {
    error!(
        "Error reconciling {}/{}: {}",
        resource.namespace().unwrap_or_default(),
        resource.name_any(),
        error
    );
    Action::requeue(ctx.error_requeue)
}
