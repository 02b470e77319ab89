use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::ServerDefaults;
use crate::ensure::{ensure, EnsureOutcome};
use crate::error::Result;
use crate::store::{ObjectKey, Store, StoreError};
use crate::types::SecondaryKind;

/// Result of one successful reconcile pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The primary no longer exists. Its children are the garbage
    /// collector's business.
    Missing,
    /// The primary is being deleted; nothing was touched.
    Terminating,
    /// Every child exists. Lists what each ensure step did, in order.
    Converged(Vec<(SecondaryKind, EnsureOutcome)>),
}

impl ReconcileOutcome {
    /// Kinds created by this pass.
    pub fn created(&self) -> Vec<SecondaryKind> {
        match self {
            ReconcileOutcome::Converged(steps) => steps
                .iter()
                .filter(|(_, outcome)| *outcome == EnsureOutcome::Created)
                .map(|(kind, _)| *kind)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Drives a `NextCloud` toward having its ConfigMap, Deployment and Service.
///
/// Holds no mutable state; passes for different keys may run concurrently
/// against a shared instance. Passes for the same key must be serialized by
/// the caller.
pub struct Reconciler<S> {
    store: Arc<S>,
    defaults: ServerDefaults,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            defaults: self.defaults.clone(),
        }
    }
}

impl<S: Store> Reconciler<S> {
    pub fn new(store: Arc<S>, defaults: ServerDefaults) -> Self {
        Self { store, defaults }
    }

    /// One level-triggered pass for `key`. Errors are returned unmodified and
    /// never retried here.
    #[instrument(skip(self, key), fields(nextcloud = %key))]
    pub async fn reconcile(&self, key: &ObjectKey) -> Result<ReconcileOutcome> {
        info!("Reconcile starting");

        let primary = match self.store.get_primary(key).await {
            Ok(primary) => primary,
            Err(StoreError::NotFound { .. }) => {
                info!("NextCloud not found, assuming it was deleted");
                return Ok(ReconcileOutcome::Missing);
            }
            Err(e) => return Err(e.into()),
        };

        if primary.is_terminating() {
            info!("NextCloud is being deleted, leaving cleanup to owner references");
            return Ok(ReconcileOutcome::Terminating);
        }

        let mut steps = Vec::with_capacity(SecondaryKind::ALL.len());
        for kind in SecondaryKind::ALL {
            let outcome = ensure(self.store.as_ref(), &self.defaults, &primary, kind).await?;
            steps.push((kind, outcome));
        }

        info!("Reconcile complete");
        Ok(ReconcileOutcome::Converged(steps))
    }
}
