//! The Gold Dust ledger: one non-negative balance per player.
//!
//! Balances are keyed by `(wallet, email)` and live in the `points`
//! collection, independent of any game. The only mutation is
//! [`LedgerManager::apply_delta`], which credits or debits a signed
//! amount.
//!
//! The ledger never holds a negative balance. A debit that would
//! overdraw is rejected with [`LedgerError::InsufficientBalance`] and
//! the balance stays where it was. Contrast with game rosters, which
//! clamp at zero instead.

mod account;
mod error;
mod manager;

pub use account::LedgerRecord;
pub use error::LedgerError;
pub use manager::LedgerManager;
