pub mod builders;
pub mod config;
pub mod crd;
pub mod ensure;
pub mod error;
pub mod naming;
pub mod operator;
pub mod reconciler;
pub mod store;
pub mod types;

pub use config::{OperatorConfig, ServerDefaults};
pub use crd::{NextCloud, NextCloudSpec, NextCloudStatus};
pub use ensure::{ensure, EnsureOutcome};
pub use error::{Error, Result};
pub use operator::Operator;
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use store::{KubeStore, MemoryStore, ObjectKey, Store, StoreError};
pub use types::{Secondary, SecondaryKind};
