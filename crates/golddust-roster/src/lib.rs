//! Game rosters for Gold Dust.
//!
//! Each game has an ordered list of players and a Gold Dust balance per
//! player, tracked separately from the player's ledger account.
//!
//! # Key types
//!
//! - [`RosterManager`] — creates games, looks them up, applies deltas
//! - [`GameRecord`] / [`PlayerEntry`] — the stored roster
//! - [`PlayerDelta`] — one signed change requested for one player
//!
//! # Balance floor
//!
//! Roster balances clamp at zero. A debit larger than a player's balance
//! leaves them at exactly 0 and is not an error; an unseen player with a
//! negative delta joins at 0. This differs on purpose from the ledger,
//! which rejects overdrafts.

mod error;
mod game;
mod manager;

pub use error::RosterError;
pub use game::{GameRecord, PlayerDelta, PlayerEntry};
pub use manager::RosterManager;
