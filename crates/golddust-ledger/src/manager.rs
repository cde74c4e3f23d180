//! The ledger manager: signed balance updates with overdraft rejection.

use std::sync::Arc;

use chrono::Utc;
use golddust_model::{Codec, Collection, JsonCodec, PlayerKey};
use golddust_store::{Filter, Store, StoreError, WritePolicy};

use crate::{LedgerError, LedgerRecord};

/// Applies Gold Dust credits and debits to per-player accounts.
///
/// Each call re-reads the account, validates the delta against the
/// balance it just read, and writes conditionally on that read's
/// revision. A concurrent writer forces a fresh read and a fresh
/// validation, so two debits racing for the last coins can't both
/// succeed.
pub struct LedgerManager<S> {
    store: Arc<S>,
    policy: WritePolicy,
    codec: JsonCodec,
}

impl<S: Store> LedgerManager<S> {
    /// Creates a ledger manager over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: WritePolicy::default(),
            codec: JsonCodec,
        }
    }

    /// Overrides how many times a contended write is retried.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Credits (`delta > 0`) or debits (`delta < 0`) a player's balance.
    ///
    /// A player without an account gets one opened on their first
    /// non-negative delta, with that delta as the starting balance.
    ///
    /// # Errors
    /// - [`LedgerError::InsufficientBalance`] — debit exceeds the balance
    /// - [`LedgerError::InvalidInitialBalance`] — first delta is negative
    /// - [`LedgerError::Overflow`] — credit exceeds `u64::MAX`
    /// - [`LedgerError::Storage`] — the store failed
    ///
    /// Nothing is written when an error is returned.
    pub async fn apply_delta(
        &self,
        key: &PlayerKey,
        delta: i64,
    ) -> Result<LedgerRecord, LedgerError> {
        let attempts = self.policy.attempts();

        for attempt in 1..=attempts {
            let now = Utc::now();

            let Some(current) = self.load(key).await? else {
                if delta < 0 {
                    tracing::warn!(player = %key, delta, "rejected negative opening balance");
                    return Err(LedgerError::InvalidInitialBalance {
                        key: key.clone(),
                        delta,
                    });
                }
                let record = LedgerRecord::open(key, delta.unsigned_abs(), now);
                let document = self.codec.encode(&record).map_err(StoreError::from)?;
                match self.store.insert_one(Collection::Points, document).await {
                    Ok(()) => {
                        tracing::info!(player = %key, balance = record.balance, "ledger account opened");
                        return Ok(record);
                    }
                    Err(StoreError::DuplicateKey { .. }) => {
                        tracing::debug!(player = %key, attempt, "lost account open race");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            let balance = settle(key, current.balance, delta)?;
            let next = current.with_balance(balance, now);
            let patch = self.codec.encode(&next).map_err(StoreError::from)?;
            let filter = Filter::player(key).at_revision(current.revision);
            if self.store.update_one(Collection::Points, &filter, patch).await? {
                tracing::debug!(
                    player = %key,
                    delta,
                    from = current.balance,
                    to = balance,
                    "ledger balance updated"
                );
                return Ok(next);
            }

            tracing::warn!(player = %key, attempt, "ledger account changed underneath us, retrying");
        }

        Err(StoreError::Contention {
            collection: Collection::Points,
            attempts,
        }
        .into())
    }

    /// Looks up a player's account without changing it.
    pub async fn balance(&self, key: &PlayerKey) -> Result<Option<LedgerRecord>, LedgerError> {
        Ok(self.load(key).await?)
    }

    async fn load(&self, key: &PlayerKey) -> Result<Option<LedgerRecord>, StoreError> {
        let Some(document) = self
            .store
            .find_one(Collection::Points, &Filter::player(key))
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.codec.decode(document)?))
    }
}

/// Applies `delta` to `balance`, refusing to go below zero or past `u64::MAX`.
fn settle(key: &PlayerKey, balance: u64, delta: i64) -> Result<u64, LedgerError> {
    if delta >= 0 {
        balance
            .checked_add(delta.unsigned_abs())
            .ok_or_else(|| LedgerError::Overflow {
                key: key.clone(),
                balance,
                delta,
            })
    } else {
        balance.checked_sub(delta.unsigned_abs()).ok_or_else(|| {
            tracing::warn!(player = %key, balance, delta, "debit rejected: insufficient balance");
            LedgerError::InsufficientBalance {
                key: key.clone(),
                balance,
                delta,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golddust_store::MemoryStore;

    fn manager() -> LedgerManager<MemoryStore> {
        LedgerManager::new(Arc::new(MemoryStore::new()))
    }

    fn key() -> PlayerKey {
        PlayerKey::new("0xgold", "miner@example.com").unwrap()
    }

    // -- settle() ---------------------------------------------------------

    #[test]
    fn test_settle_credit_adds_exactly() {
        assert_eq!(settle(&key(), 10, 5).unwrap(), 15);
        assert_eq!(settle(&key(), 10, 0).unwrap(), 10);
    }

    #[test]
    fn test_settle_debit_to_zero_allowed() {
        assert_eq!(settle(&key(), 10, -10).unwrap(), 0);
    }

    #[test]
    fn test_settle_overdraft_rejected() {
        let err = settle(&key(), 10, -11).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance { balance: 10, delta: -11, .. }
        ));
    }

    #[test]
    fn test_settle_i64_min_debit_rejected() {
        assert!(settle(&key(), u64::MAX, i64::MIN).is_ok());
        assert!(settle(&key(), 5, i64::MIN).is_err());
    }

    #[test]
    fn test_settle_overflow_rejected() {
        let err = settle(&key(), u64::MAX, 1).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow { .. }));
    }

    // -- apply_delta() ----------------------------------------------------

    #[tokio::test]
    async fn test_apply_delta_first_credit_opens_account() {
        let ledger = manager();

        let record = ledger.apply_delta(&key(), 50).await.unwrap();

        assert_eq!(record.balance, 50);
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.revision, 0);
    }

    #[tokio::test]
    async fn test_apply_delta_zero_opens_empty_account() {
        let ledger = manager();

        let record = ledger.apply_delta(&key(), 0).await.unwrap();

        assert_eq!(record.balance, 0);
        assert!(ledger.balance(&key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_apply_delta_first_debit_rejected_and_nothing_created() {
        let ledger = manager();

        let result = ledger.apply_delta(&key(), -1).await;

        assert!(matches!(
            result,
            Err(LedgerError::InvalidInitialBalance { delta: -1, .. })
        ));
        assert!(ledger.balance(&key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_apply_delta_overdraft_leaves_balance_unchanged() {
        let ledger = manager();
        ledger.apply_delta(&key(), 50).await.unwrap();

        let result = ledger.apply_delta(&key(), -70).await;

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { balance: 50, delta: -70, .. })
        ));
        let stored = ledger.balance(&key()).await.unwrap().unwrap();
        assert_eq!(stored.balance, 50);
        assert_eq!(stored.revision, 0);
    }

    #[tokio::test]
    async fn test_apply_delta_credit_past_max_rejected_without_write() {
        let ledger = manager();
        ledger.apply_delta(&key(), i64::MAX).await.unwrap();
        let seeded = ledger.apply_delta(&key(), i64::MAX).await.unwrap();
        assert_eq!(seeded.balance, u64::MAX - 1);

        let result = ledger.apply_delta(&key(), 2).await;

        assert!(matches!(
            result,
            Err(LedgerError::Overflow { balance, delta: 2, .. }) if balance == u64::MAX - 1
        ));
        let stored = ledger.balance(&key()).await.unwrap().unwrap();
        assert_eq!(stored.balance, u64::MAX - 1);
        assert_eq!(stored.revision, seeded.revision);
        assert_eq!(stored.updated_at, seeded.updated_at);
    }

    #[tokio::test]
    async fn test_apply_delta_updates_timestamp_not_created_at() {
        let ledger = manager();
        let opened = ledger.apply_delta(&key(), 5).await.unwrap();

        let updated = ledger.apply_delta(&key(), 5).await.unwrap();

        assert_eq!(updated.balance, 10);
        assert_eq!(updated.created_at, opened.created_at);
        assert!(updated.updated_at >= opened.updated_at);
        assert_eq!(updated.revision, 1);
    }

    #[tokio::test]
    async fn test_apply_delta_keys_are_independent() {
        let ledger = manager();
        let other = PlayerKey::new("0xgold", "someone-else@example.com").unwrap();

        ledger.apply_delta(&key(), 30).await.unwrap();
        ledger.apply_delta(&other, 4).await.unwrap();

        assert_eq!(ledger.balance(&key()).await.unwrap().unwrap().balance, 30);
        assert_eq!(ledger.balance(&other).await.unwrap().unwrap().balance, 4);
    }
}
