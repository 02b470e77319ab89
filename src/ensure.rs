use tracing::{debug, info};

use crate::builders;
use crate::config::ServerDefaults;
use crate::crd::NextCloud;
use crate::error::{Error, Result};
use crate::naming::secondary_name;
use crate::store::{ObjectKey, Store, StoreError};
use crate::types::SecondaryKind;

/// What a single ensure step found or did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The object was already there; nothing was sent.
    Present,
    /// The object was missing and has been created.
    Created,
    /// The object was missing at lookup but another pass created it first.
    AlreadyExists,
}

/// Creates the `kind` child of `primary` if it does not exist yet.
///
/// Existing objects are left exactly as they are, even when they differ from
/// what the builders would produce today.
pub async fn ensure<S>(
    store: &S,
    defaults: &ServerDefaults,
    primary: &NextCloud,
    kind: SecondaryKind,
) -> Result<EnsureOutcome>
where
    S: Store + ?Sized,
{
    let owner =
        ObjectKey::of(primary).ok_or(Error::MissingField("metadata.name or metadata.namespace"))?;
    let key = ObjectKey::new(&owner.namespace, secondary_name(&owner.name, kind));

    match store.get_secondary(kind, &key).await {
        Ok(_) => {
            debug!(%kind, %key, "already present");
            return Ok(EnsureOutcome::Present);
        }
        Err(StoreError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    let mut child = builders::build(kind, &owner, defaults);
    store.set_owner_reference(&mut child, primary)?;

    match store.create(&child).await {
        Ok(()) => {
            info!(%kind, %key, "created");
            Ok(EnsureOutcome::Created)
        }
        Err(StoreError::AlreadyExists { .. }) => {
            debug!(%kind, %key, "created concurrently by another pass");
            Ok(EnsureOutcome::AlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}
