//! # Gold Dust
//!
//! State-mutation core for a multiplayer session and economy layer.
//!
//! Three independent managers share one [`Store`](golddust_store::Store):
//!
//! - [`SessionManager`](golddust_session::SessionManager) — issues,
//!   reuses, rotates, and validates player sessions
//! - [`LedgerManager`](golddust_ledger::LedgerManager) — per-player Gold
//!   Dust balances; overdrafts are rejected
//! - [`RosterManager`](golddust_roster::RosterManager) — per-game player
//!   rosters; overdrafts clamp at zero
//!
//! [`Economy`] wires all three onto one store.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use golddust::prelude::*;
//!
//! # async fn run() -> Result<(), GoldDustError> {
//! let economy = EconomyBuilder::new().build(Arc::new(MemoryStore::new()));
//!
//! let _session = economy.create_or_get_session("0xabc", "a@b.io").await?;
//! let _account = economy.apply_delta("0xabc", "a@b.io", 50).await?;
//! let _game = economy.create_game().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod economy;
mod error;
pub mod telemetry;

pub use config::EconomyConfig;
pub use economy::{Economy, EconomyBuilder};
pub use error::GoldDustError;

/// Everything a caller normally needs, in one import.
pub mod prelude {
    pub use crate::{Economy, EconomyBuilder, EconomyConfig, GoldDustError};
    pub use golddust_ledger::{LedgerError, LedgerManager, LedgerRecord};
    pub use golddust_model::{GameId, PlayerKey, SessionId};
    pub use golddust_roster::{GameRecord, PlayerDelta, PlayerEntry, RosterError, RosterManager};
    pub use golddust_session::{
        SessionConfig, SessionError, SessionManager, SessionRecord, SessionStatus,
    };
    pub use golddust_store::{MemoryStore, Store, StoreError, WritePolicy};
}
