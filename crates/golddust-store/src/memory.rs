//! In-process [`Store`] implementation.

use std::collections::HashMap;

use golddust_model::{Collection, Document};
use tokio::sync::Mutex;

use crate::{Filter, Store, StoreError};

/// A [`Store`] that keeps every collection in memory.
///
/// All collections sit behind one async mutex, taken once per call, so
/// each operation observes and mutates a consistent snapshot. That is
/// exactly the per-call atomicity the [`Store`] contract promises, and
/// nothing more: two calls from the same caller can interleave with
/// other callers' calls.
///
/// Documents within a collection keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .lock()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

impl Store for MemoryStore {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().await;
        let found = collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned();
        tracing::trace!(%collection, hit = found.is_some(), "find_one");
        Ok(found)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<(), StoreError> {
        let identity = Filter::identity_of(collection, &document)?;
        let mut collections = self.collections.lock().await;
        let docs = collections.entry(collection).or_default();
        if docs.iter().any(|doc| identity.matches(doc)) {
            return Err(StoreError::DuplicateKey { collection });
        }
        docs.push(document);
        tracing::trace!(%collection, "insert_one");
        Ok(())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Document,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.lock().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)))
        else {
            tracing::trace!(%collection, "update_one matched nothing");
            return Ok(false);
        };
        doc.extend(patch);
        tracing::trace!(%collection, "update_one");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    #[tokio::test]
    async fn test_find_one_empty_store_returns_none() {
        let store = MemoryStore::new();
        let found = store
            .find_one(Collection::Games, &Filter::new().eq("gameId", "g1"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::Games, document(json!({"gameId": "g1", "players": []})))
            .await
            .unwrap();

        let found = store
            .find_one(Collection::Games, &Filter::new().eq("gameId", "g1"))
            .await
            .unwrap()
            .expect("should find inserted game");
        assert_eq!(found["players"], json!([]));
        assert_eq!(store.count(Collection::Games).await, 1);
        assert_eq!(store.count(Collection::Points).await, 0);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .insert_one(
                Collection::Points,
                document(json!({"wallet": "w", "email": "e", "balance": 1, "revision": 0})),
            )
            .await
            .unwrap();

        let matched = store
            .update_one(
                Collection::Points,
                &Filter::new().eq("wallet", "w").eq("email", "e"),
                document(json!({"balance": 7})),
            )
            .await
            .unwrap();
        assert!(matched);

        let found = store
            .find_one(Collection::Points, &Filter::new().eq("wallet", "w"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found["balance"], 7);
        assert_eq!(found["revision"], 0);
    }

    #[tokio::test]
    async fn test_update_no_match_is_noop() {
        let store = MemoryStore::new();
        let matched = store
            .update_one(
                Collection::Games,
                &Filter::new().eq("gameId", "nope"),
                document(json!({"players": []})),
            )
            .await
            .unwrap();
        assert!(!matched);
        assert_eq!(store.count(Collection::Games).await, 0);
    }
}
