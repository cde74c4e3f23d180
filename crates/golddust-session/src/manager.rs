//! The session manager: issues, reuses, rotates, and validates sessions.
//!
//! # Concurrency note
//!
//! `SessionManager` keeps no state of its own between calls. Every
//! operation reads the current record from the store first, and every
//! write is conditional on the revision that was read. When two requests
//! race on the same player, one write lands and the other re-reads and
//! decides again from the winner's result. For `create_or_get` that
//! means both callers end up with the same, single token.

use std::sync::Arc;

use chrono::Utc;
use golddust_model::{Codec, Collection, JsonCodec, PlayerKey, SessionId};
use golddust_store::{Filter, Store, StoreError, WritePolicy};

use crate::{SessionConfig, SessionError, SessionRecord};

/// What to do with a session that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rotation {
    /// Keep it while valid, replace it once expired.
    WhenExpired,
    /// Replace it no matter what.
    Always,
}

/// Manages player sessions stored in the `sessionLogs` collection.
///
/// ## Lifecycle
///
/// ```text
/// create_or_get() ──→ [Active] ──(expiresAt passes)──→ [Expired]
///                       ↑  │                               │
///                       │  └─ refresh() ─┐                 │
///                       └────────────────┴── create_or_get() / refresh()
/// ```
pub struct SessionManager<S> {
    store: Arc<S>,
    config: SessionConfig,
    policy: WritePolicy,
    codec: JsonCodec,
}

impl<S: Store> SessionManager<S> {
    /// Creates a session manager over `store`.
    pub fn new(store: Arc<S>, config: SessionConfig) -> Self {
        Self {
            store,
            config,
            policy: WritePolicy::default(),
            codec: JsonCodec,
        }
    }

    /// Overrides how many times a contended write is retried.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The session configuration in use.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the player's session, issuing or rotating it if needed.
    ///
    /// - No session yet → a new one is issued.
    /// - Session still valid → returned as stored, nothing is written.
    /// - Session expired → token and timestamps replaced in place.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the store fails; no record is
    /// returned in that case.
    pub async fn create_or_get(
        &self,
        key: &PlayerKey,
    ) -> Result<SessionRecord, SessionError> {
        self.issue(key, Rotation::WhenExpired).await
    }

    /// Issues a new token for the player regardless of the current one.
    ///
    /// Unlike [`create_or_get`](Self::create_or_get), this never returns
    /// an unchanged existing session. Creates one if none exists.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the store fails.
    pub async fn refresh(&self, key: &PlayerKey) -> Result<SessionRecord, SessionError> {
        self.issue(key, Rotation::Always).await
    }

    /// Looks up the player's stored session without touching it.
    ///
    /// Returns `None` if no session was ever issued. An expired session
    /// is still returned; check [`SessionRecord::status_at`].
    pub async fn find_session(
        &self,
        key: &PlayerKey,
    ) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.load(key).await?)
    }

    /// Checks a presented token against the player's current session.
    ///
    /// Read-only: an expired session is reported, not rotated.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`] — no session for this player
    /// - [`SessionError::InvalidToken`] — token isn't the current one
    /// - [`SessionError::Expired`] — token matches but has expired
    pub async fn validate(
        &self,
        key: &PlayerKey,
        session_id: &SessionId,
    ) -> Result<SessionRecord, SessionError> {
        let record = self
            .load(key)
            .await?
            .ok_or_else(|| SessionError::NotFound(key.clone()))?;

        if record.session_id != *session_id {
            tracing::debug!(player = %key, "presented session token is stale or unknown");
            return Err(SessionError::InvalidToken(key.clone()));
        }
        if record.is_expired_at(Utc::now()) {
            return Err(SessionError::Expired(key.clone()));
        }
        Ok(record)
    }

    /// Shared read-decide-write loop for both issuing operations.
    async fn issue(
        &self,
        key: &PlayerKey,
        rotation: Rotation,
    ) -> Result<SessionRecord, SessionError> {
        let attempts = self.policy.attempts();

        for attempt in 1..=attempts {
            let now = Utc::now();

            let Some(current) = self.load(key).await? else {
                let record = SessionRecord::issue(key, now, &self.config);
                let document = self.codec.encode(&record).map_err(StoreError::from)?;
                match self.store.insert_one(Collection::SessionLogs, document).await {
                    Ok(()) => {
                        tracing::info!(
                            player = %key,
                            expires_at = %record.expires_at,
                            "session created"
                        );
                        return Ok(record);
                    }
                    // Someone else created it first; go read theirs.
                    Err(StoreError::DuplicateKey { .. }) => {
                        tracing::debug!(player = %key, attempt, "lost session insert race");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            if rotation == Rotation::WhenExpired && !current.is_expired_at(now) {
                tracing::debug!(player = %key, "session still valid");
                return Ok(current);
            }

            let next = current.rotated(now, &self.config);
            let patch = self.codec.encode(&next).map_err(StoreError::from)?;
            let filter = Filter::player(key).at_revision(current.revision);
            if self
                .store
                .update_one(Collection::SessionLogs, &filter, patch)
                .await?
            {
                match rotation {
                    Rotation::WhenExpired => tracing::info!(
                        player = %key,
                        expired_at = %current.expires_at,
                        "expired session rotated"
                    ),
                    Rotation::Always => tracing::info!(
                        player = %key,
                        "session refreshed"
                    ),
                }
                return Ok(next);
            }

            tracing::warn!(
                player = %key,
                attempt,
                "session changed underneath us, retrying"
            );
        }

        Err(StoreError::Contention {
            collection: Collection::SessionLogs,
            attempts,
        }
        .into())
    }

    async fn load(&self, key: &PlayerKey) -> Result<Option<SessionRecord>, StoreError> {
        let Some(document) = self
            .store
            .find_one(Collection::SessionLogs, &Filter::player(key))
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.codec.decode(document)?))
    }
}

// =========================================================================
// Tests
// =========================================================================
