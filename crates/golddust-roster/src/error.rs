//! Error types for the roster layer.

use golddust_model::GameId;
use golddust_store::StoreError;

/// Errors that can occur during roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The game does not exist. Rosters are never created implicitly.
    #[error("game {0} not found")]
    GameNotFound(GameId),

    /// The store failed.
    #[error("roster operation failed: {0}")]
    Storage(#[from] StoreError),
}
