//! Session types: the stored record and the rules for its validity window.
//!
//! A session record tracks:
//! - WHO it belongs to (`wallet`, `email`)
//! - WHAT token the player holds (`sessionId`)
//! - WHEN it was issued and when it stops being valid

use chrono::TimeDelta;
use golddust_model::{PlayerKey, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

/// Upper bound on a configurable validity window (ten years).
///
/// Keeps `issued_at + ttl` far away from the calendar's representable
/// limits no matter what ends up in a config file.
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long (in seconds) a freshly issued session stays valid.
    ///
    /// Default: 24 hours. A value of 0 makes every session expire the
    /// instant it's issued, so every request rotates the token.
    pub ttl_secs: u64,
}

impl SessionConfig {
    /// The validity window as a `TimeDelta`, capped at ten years.
    pub fn ttl(&self) -> TimeDelta {
        // The cap keeps the value well inside i64 seconds.
        TimeDelta::seconds(self.ttl_secs.min(MAX_TTL_SECS) as i64)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Whether a stored session is usable at a given instant.
///
/// ```text
///   Absent ──(create)──→ Active ──(time passes)──→ Expired
///                          ↑  ↺ refresh                │
///                          └──────(create / refresh)───┘
/// ```
///
/// Only the timestamps are stored. The status is derived from them every
/// time it's asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// `now < expiresAt`: the token is valid.
    Active,
    /// `now >= expiresAt`: the next create-or-get will rotate it.
    Expired,
}

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// One player's session, as stored in the `sessionLogs` collection.
///
/// At most one record exists per `(wallet, email)`. Rotation replaces
/// the token and timestamps in place; the record is never deleted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub wallet: String,
    pub email: String,
    /// The opaque token the player presents.
    pub session_id: SessionId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    /// Bumped on every write; guards conditional updates.
    pub revision: u64,
}

impl SessionRecord {
    /// A brand-new session for `key`, valid from `now`.
    pub(crate) fn issue(key: &PlayerKey, now: Timestamp, config: &SessionConfig) -> Self {
        Self {
            wallet: key.wallet().to_string(),
            email: key.email().to_string(),
            session_id: SessionId::generate(),
            created_at: now,
            expires_at: now + config.ttl(),
            revision: 0,
        }
    }

    /// The same record with a new token and a fresh validity window.
    pub(crate) fn rotated(&self, now: Timestamp, config: &SessionConfig) -> Self {
        Self {
            wallet: self.wallet.clone(),
            email: self.email.clone(),
            session_id: SessionId::generate(),
            created_at: now,
            expires_at: now + config.ttl(),
            revision: self.revision + 1,
        }
    }

    /// Returns `true` once `now` has reached `expires_at`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// The session's status at `now`.
    pub fn status_at(&self, now: Timestamp) -> SessionStatus {
        if self.is_expired_at(now) {
            SessionStatus::Expired
        } else {
            SessionStatus::Active
        }
    }
}
