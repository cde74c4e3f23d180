//! Error types for the ledger.

use golddust_model::PlayerKey;
use golddust_store::StoreError;

/// Errors that can occur when applying a delta to a ledger account.
///
/// Every domain variant is detected before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The debit is larger than the current balance.
    #[error("insufficient Gold Dust for {key}: balance {balance}, delta {delta}")]
    InsufficientBalance {
        key: PlayerKey,
        balance: u64,
        delta: i64,
    },

    /// No account exists yet and the first delta is negative.
    #[error("cannot open an account for {key} with a negative balance ({delta})")]
    InvalidInitialBalance { key: PlayerKey, delta: i64 },

    /// The credit would push the balance past `u64::MAX`.
    #[error("balance overflow for {key}: balance {balance}, delta {delta}")]
    Overflow {
        key: PlayerKey,
        balance: u64,
        delta: i64,
    },

    /// The store failed.
    #[error("ledger operation failed: {0}")]
    Storage(#[from] StoreError),
}
