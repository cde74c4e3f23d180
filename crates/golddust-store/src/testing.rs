//! Fault injection for exercising failure paths.
//!
//! Enabled by the `testing` feature. Manager crates pull it in as a
//! dev-dependency to prove that storage failures surface as errors and
//! that lost write races are retried.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use golddust_model::{Collection, Document};

use crate::{Filter, Store, StoreError};

/// Wraps another [`Store`] and fails or drops calls on demand.
#[derive(Debug)]
pub struct FaultyStore<S> {
    inner: S,
    unavailable: AtomicBool,
    writes_unavailable: AtomicBool,
    dropped_updates: AtomicU32,
}

impl<S: Store> FaultyStore<S> {
    /// Wraps `inner` with no faults armed.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            unavailable: AtomicBool::new(false),
            writes_unavailable: AtomicBool::new(false),
            dropped_updates: AtomicU32::new(0),
        }
    }

    /// The wrapped store, for inspecting state behind the faults.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Makes every call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    /// Makes inserts and updates fail while reads keep working.
    pub fn set_writes_unavailable(&self, down: bool) {
        self.writes_unavailable.store(down, Ordering::SeqCst);
    }

    /// Reports the next `n` updates as unmatched without applying them,
    /// as if another writer had bumped the revision first.
    pub fn drop_next_updates(&self, n: u32) {
        self.dropped_updates.store(n, Ordering::SeqCst);
    }

    fn check(&self, write: bool) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst)
            || (write && self.writes_unavailable.load(Ordering::SeqCst))
        {
            return Err(StoreError::Unavailable("injected fault".into()));
        }
        Ok(())
    }

    fn take_dropped_update(&self) -> bool {
        self.dropped_updates
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl<S: Store> Store for FaultyStore<S> {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.check(false)?;
        self.inner.find_one(collection, filter).await
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<(), StoreError> {
        self.check(true)?;
        self.inner.insert_one(collection, document).await
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Document,
    ) -> Result<bool, StoreError> {
        self.check(true)?;
        if self.take_dropped_update() {
            return Ok(false);
        }
        self.inner.update_one(collection, filter, patch).await
    }
}
