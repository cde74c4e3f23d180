//! Identity types shared by every manager.
//!
//! Records are located by one of two kinds of identity key:
//! - a player's `(wallet, email)` pair ([`PlayerKey`]) for sessions and
//!   ledger accounts
//! - an opaque [`GameId`] for game rosters

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Wall-clock timestamp stored on every record.
///
/// Serialized as an RFC 3339 string.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// PlayerKey
// ---------------------------------------------------------------------------

/// The `(wallet, email)` pair that identifies a player.
///
/// Both halves must be present: a wallet alone or an email alone is not
/// an identity. Construction goes through [`PlayerKey::new`], which
/// rejects blank values, so a `PlayerKey` in hand is always usable as a
/// lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerKey {
    wallet: String,
    email: String,
}

impl PlayerKey {
    /// Builds a key from a wallet address and an email.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidKey`] if either value is empty or
    /// whitespace-only.
    pub fn new(
        wallet: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let wallet = wallet.into();
        let email = email.into();
        match (wallet.trim().is_empty(), email.trim().is_empty()) {
            (true, true) => {
                Err(ModelError::InvalidKey("wallet and email are required".into()))
            }
            (true, false) => Err(ModelError::InvalidKey("wallet is required".into())),
            (false, true) => Err(ModelError::InvalidKey("email is required".into())),
            (false, false) => Ok(Self { wallet, email }),
        }
    }

    /// The wallet half of the key.
    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    /// The email half of the key.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns `true` if this key names the given wallet and email.
    pub fn matches(&self, wallet: &str, email: &str) -> bool {
        self.wallet == wallet && self.email == email
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.wallet, self.email)
    }
}

// ---------------------------------------------------------------------------
// Opaque tokens
// ---------------------------------------------------------------------------

/// An opaque session token handed to a player.
///
/// Freshly issued tokens come from [`SessionId::generate`]. The
/// `#[serde(transparent)]` attribute stores it as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Issues a new random token (version-4 UUID format).
    pub fn generate() -> Self {
        Self(generate_token())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identifier of one game and its roster.
///
/// Callers may hand in any string (it's just looked up); only ids
/// produced by [`GameId::generate`] are ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Issues a new random game id (version-4 UUID format).
    pub fn generate() -> Self {
        Self(generate_token())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws 128 random bits and stamps them as a version-4 UUID.
///
/// The version and variant nibbles take 6 of the bits, leaving 122 bits
/// of randomness, so collisions are negligible at any realistic record
/// count.
fn generate_token() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// The three logical tables the economy layer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Game rosters, keyed by `gameId`.
    Games,
    /// Ledger accounts, keyed by `(wallet, email)`.
    Points,
    /// Player sessions, keyed by `(wallet, email)`.
    SessionLogs,
}

impl Collection {
    /// The collection's name in the backing store.
    pub fn name(self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Points => "points",
            Self::SessionLogs => "sessionLogs",
        }
    }

    /// Document fields that together form the identity key.
    ///
    /// At most one document per collection may carry a given combination
    /// of these values.
    pub fn identity_fields(self) -> &'static [&'static str] {
        match self {
            Self::Games => &["gameId"],
            Self::Points | Self::SessionLogs => &["wallet", "email"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
