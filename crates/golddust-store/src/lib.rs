//! Storage abstraction for the Gold Dust economy layer.
//!
//! Provides the [`Store`] trait: a keyed document store with three
//! single-document operations, each atomic per call. There are no
//! multi-document transactions.
//!
//! # Conditional writes
//!
//! Every record carries a `revision` counter. Writers read a record,
//! compute the new state, then call [`Store::update_one`] with a filter
//! that pins the revision they saw. If someone else wrote in between,
//! nothing matches, `update_one` returns `false`, and the writer starts
//! over from a fresh read. [`WritePolicy`] bounds how many times.
//!
//! # Feature Flags
//!
//! - `memory` (default) — [`MemoryStore`], an in-process implementation
//! - `testing` — [`testing::FaultyStore`], a fault-injecting wrapper

#![allow(async_fn_in_trait)]

mod error;
mod filter;
#[cfg(feature = "memory")]
mod memory;
mod policy;
#[cfg(feature = "testing")]
pub mod testing;

pub use error::StoreError;
pub use filter::{Filter, REVISION_FIELD};
pub use golddust_model::{Collection, Document};
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use policy::WritePolicy;

use std::future::Future;

/// A document store reachable by exact-match lookup and single-document
/// atomic update.
///
/// Implementations must make each call atomic on its own. They are not
/// expected to provide transactions spanning calls; callers that need
/// read-modify-write safety use the revision pattern described in the
/// crate docs.
pub trait Store: Send + Sync + 'static {
    /// Returns the first document in `collection` matching `filter`, if any.
    fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Inserts a new document.
    ///
    /// # Errors
    /// - [`StoreError::DuplicateKey`] if a document with the same
    ///   identity key (see [`Collection::identity_fields`]) exists
    /// - [`StoreError::MissingField`] if the document lacks an identity field
    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Sets every field of `patch` on the first document matching `filter`.
    ///
    /// Fields not named in `patch` are left untouched. Returns `true` if
    /// a document matched and was updated, `false` if nothing matched
    /// (in which case nothing changed).
    fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Document,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
