//! Unified error type for the Gold Dust crates.

use golddust_ledger::LedgerError;
use golddust_model::ModelError;
use golddust_roster::RosterError;
use golddust_session::SessionError;
use golddust_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum GoldDustError {
    /// The caller supplied an unusable identity (blank wallet or email).
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A configuration document couldn't be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
}

impl GoldDustError {
    /// Returns `true` if the system failed to service the request, as
    /// opposed to the request itself being rejected.
    ///
    /// Storage failures are worth retrying later; domain errors
    /// (insufficient balance, unknown game, bad token...) are not.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Store(_)
                | Self::Session(SessionError::Storage(_))
                | Self::Ledger(LedgerError::Storage(_))
                | Self::Roster(RosterError::Storage(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golddust_model::{GameId, PlayerKey};

    fn key() -> PlayerKey {
        PlayerKey::new("w", "e").unwrap()
    }

    #[test]
    fn test_from_session_error() {
        let err: GoldDustError = SessionError::NotFound(key()).into();
        assert!(matches!(err, GoldDustError::Session(_)));
        assert!(err.to_string().contains("w/e"));
        assert!(!err.is_storage());
    }

    #[test]
    fn test_from_ledger_error() {
        let err: GoldDustError = LedgerError::InsufficientBalance {
            key: key(),
            balance: 1,
            delta: -2,
        }
        .into();
        assert!(matches!(err, GoldDustError::Ledger(_)));
        assert!(!err.is_storage());
    }

    #[test]
    fn test_from_roster_error() {
        let err: GoldDustError = RosterError::GameNotFound(GameId::from("g")).into();
        assert!(matches!(err, GoldDustError::Roster(_)));
        assert_eq!(err.to_string(), "game g not found");
    }

    #[test]
    fn test_storage_errors_classified_in_every_layer() {
        let down = || StoreError::Unavailable("down".into());
        assert!(GoldDustError::from(down()).is_storage());
        assert!(GoldDustError::from(SessionError::Storage(down())).is_storage());
        assert!(GoldDustError::from(LedgerError::Storage(down())).is_storage());
        assert!(GoldDustError::from(RosterError::Storage(down())).is_storage());
    }

    #[test]
    fn test_model_error_is_a_request_error() {
        let err: GoldDustError = PlayerKey::new("", "e").unwrap_err().into();
        assert!(!err.is_storage());
    }
}
