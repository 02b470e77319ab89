use std::collections::{BTreeMap, HashMap, VecDeque};

use async_trait::async_trait;
use kube::ResourceExt;
use parking_lot::Mutex;

use super::{ObjectKey, Store, StoreError, StoreResult};
use crate::crd::NextCloud;
use crate::types::{Secondary, SecondaryKind};

/// In-process `Store` for exercising reconcilers without an API server.
///
/// Creates are counted, one-shot failures can be injected per call site, and
/// removing a primary cascades to every object it controls, as the API
/// server's garbage collector would. Every lookup yields to the runtime once,
/// so concurrent reconcile passes interleave between lookup and create.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    primaries: BTreeMap<ObjectKey, NextCloud>,
    objects: BTreeMap<(SecondaryKind, ObjectKey), Secondary>,
    create_calls: usize,
    primary_faults: VecDeque<String>,
    lookup_faults: HashMap<SecondaryKind, String>,
    create_faults: HashMap<SecondaryKind, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `primary`; it must carry a namespace and name.
    pub fn insert_primary(&self, primary: NextCloud) -> Option<ObjectKey> {
        let key = ObjectKey::of(&primary)?;
        self.inner.lock().primaries.insert(key.clone(), primary);
        Some(key)
    }

    /// Deletes a primary and every object whose controller is that primary.
    pub fn delete_primary(&self, key: &ObjectKey) -> Option<NextCloud> {
        let mut inner = self.inner.lock();
        let removed = inner.primaries.remove(key)?;
        if let Some(uid) = removed.uid() {
            inner
                .objects
                .retain(|_, o| o.controller_reference().map(|r| &r.uid) != Some(&uid));
        }
        Some(removed)
    }

    /// Places an object directly, bypassing `create` and its counter.
    pub fn insert_secondary(&self, object: Secondary) {
        let key = ObjectKey::new(object.namespace(), object.name());
        self.inner.lock().objects.insert((object.kind(), key), object);
    }

    pub fn secondary(&self, kind: SecondaryKind, key: &ObjectKey) -> Option<Secondary> {
        self.inner.lock().objects.get(&(kind, key.clone())).cloned()
    }

    pub fn secondaries(&self) -> Vec<Secondary> {
        self.inner.lock().objects.values().cloned().collect()
    }

    /// Number of `create` calls received, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.inner.lock().create_calls
    }

    /// Makes the next primary lookup fail with `StoreError::Unavailable`.
    pub fn fail_next_primary_lookup(&self, message: impl Into<String>) {
        self.inner.lock().primary_faults.push_back(message.into());
    }

    /// Makes the next lookup of a `kind` child fail with
    /// `StoreError::Unavailable`.
    pub fn fail_next_secondary_lookup(&self, kind: SecondaryKind, message: impl Into<String>) {
        self.inner.lock().lookup_faults.insert(kind, message.into());
    }

    /// Makes the next create of `kind` fail with `StoreError::Unavailable`.
    pub fn fail_next_create(&self, kind: SecondaryKind, message: impl Into<String>) {
        self.inner.lock().create_faults.insert(kind, message.into());
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_primary(&self, key: &ObjectKey) -> StoreResult<NextCloud> {
        let found = {
            let mut inner = self.inner.lock();
            if let Some(message) = inner.primary_faults.pop_front() {
                return Err(StoreError::Unavailable(message));
            }
            inner.primaries.get(key).cloned()
        };
        tokio::task::yield_now().await;

        found.ok_or_else(|| StoreError::NotFound {
            kind: "NextCloud",
            key: key.clone(),
        })
    }

    async fn get_secondary(
        &self,
        kind: SecondaryKind,
        key: &ObjectKey,
    ) -> StoreResult<Secondary> {
        let found = {
            let mut inner = self.inner.lock();
            if let Some(message) = inner.lookup_faults.remove(&kind) {
                return Err(StoreError::Unavailable(message));
            }
            inner.objects.get(&(kind, key.clone())).cloned()
        };
        tokio::task::yield_now().await;

        found.ok_or_else(|| StoreError::NotFound {
            kind: kind.api_kind(),
            key: key.clone(),
        })
    }

    async fn create(&self, object: &Secondary) -> StoreResult<()> {
        let kind = object.kind();
        let key = ObjectKey::new(object.namespace(), object.name());

        let mut inner = self.inner.lock();
        inner.create_calls += 1;

        if let Some(message) = inner.create_faults.remove(&kind) {
            return Err(StoreError::Unavailable(message));
        }

        if inner.objects.contains_key(&(kind, key.clone())) {
            return Err(StoreError::AlreadyExists {
                kind: kind.api_kind(),
                key,
            });
        }

        inner.objects.insert((kind, key), object.clone());
        Ok(())
    }
}
