//! Error types for the session layer.

use golddust_model::PlayerKey;
use golddust_store::StoreError;

/// Errors that can occur during session management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session has ever been issued for this player.
    #[error("no session for {0}")]
    NotFound(PlayerKey),

    /// The presented token isn't the player's current session token.
    /// Could be a token from before a rotation, or a forged one.
    #[error("session token does not match the current session for {0}")]
    InvalidToken(PlayerKey),

    /// The token matches but its validity window has passed.
    #[error("session expired for {0}")]
    Expired(PlayerKey),

    /// The store failed. Nothing was returned, and whatever the store
    /// holds is the last state it acknowledged.
    #[error("session operation failed: {0}")]
    Storage(#[from] StoreError),
}
