//! The stored ledger account.

use golddust_model::{PlayerKey, Timestamp};
use serde::{Deserialize, Serialize};

/// One player's balance, as stored in the `points` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub wallet: String,
    pub email: String,
    /// Current Gold Dust balance. Unsigned: never negative at rest.
    pub balance: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Bumped on every write; guards conditional updates.
    pub revision: u64,
}

impl LedgerRecord {
    pub(crate) fn open(key: &PlayerKey, balance: u64, now: Timestamp) -> Self {
        Self {
            wallet: key.wallet().to_string(),
            email: key.email().to_string(),
            balance,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    pub(crate) fn with_balance(&self, balance: u64, now: Timestamp) -> Self {
        Self {
            balance,
            updated_at: now,
            revision: self.revision + 1,
            ..self.clone()
        }
    }
}
