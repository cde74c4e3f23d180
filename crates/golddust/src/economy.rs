//! `Economy` builder and facade.
//!
//! Ties the three managers to one shared store. Each manager still works
//! on its own; the facade adds caller-facing entry points that take raw
//! identifiers and convert every failure into [`GoldDustError`].

use std::sync::Arc;

use golddust_ledger::{LedgerManager, LedgerRecord};
use golddust_model::{GameId, PlayerKey, SessionId};
use golddust_roster::{GameRecord, PlayerDelta, RosterManager};
use golddust_session::{SessionConfig, SessionManager, SessionRecord};
use golddust_store::{Store, WritePolicy};

use crate::{EconomyConfig, GoldDustError};

/// Builder for configuring an [`Economy`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use golddust::prelude::*;
///
/// let economy = EconomyBuilder::new()
///     .session_config(SessionConfig { ttl_secs: 3600 })
///     .write_policy(WritePolicy { max_attempts: 4 })
///     .build(Arc::new(MemoryStore::new()));
/// assert_eq!(economy.sessions().config().ttl_secs, 3600);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EconomyBuilder {
    config: EconomyConfig,
}

impl EconomyBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: EconomyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.config.session = config;
        self
    }

    /// Sets the retry bound for contended writes, for every manager.
    pub fn write_policy(mut self, policy: WritePolicy) -> Self {
        self.config.write = policy;
        self
    }

    /// Builds the managers over `store`.
    pub fn build<S: Store>(self, store: Arc<S>) -> Economy<S> {
        let EconomyConfig { session, write } = self.config;
        tracing::debug!(ttl_secs = session.ttl_secs, max_attempts = write.max_attempts, "economy built");
        Economy {
            sessions: SessionManager::new(Arc::clone(&store), session).with_write_policy(write),
            ledger: LedgerManager::new(Arc::clone(&store)).with_write_policy(write),
            roster: RosterManager::new(Arc::clone(&store)).with_write_policy(write),
            store,
        }
    }
}

/// The session, ledger, and roster managers over one store.
pub struct Economy<S> {
    store: Arc<S>,
    sessions: SessionManager<S>,
    ledger: LedgerManager<S>,
    roster: RosterManager<S>,
}

impl<S: Store> Economy<S> {
    /// The shared store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    pub fn ledger(&self) -> &LedgerManager<S> {
        &self.ledger
    }

    pub fn roster(&self) -> &RosterManager<S> {
        &self.roster
    }

    // -- Sessions ---------------------------------------------------------

    /// See [`SessionManager::create_or_get`].
    pub async fn create_or_get_session(
        &self,
        wallet: &str,
        email: &str,
    ) -> Result<SessionRecord, GoldDustError> {
        let key = PlayerKey::new(wallet, email)?;
        Ok(self.sessions.create_or_get(&key).await?)
    }

    /// See [`SessionManager::refresh`].
    pub async fn refresh_session(
        &self,
        wallet: &str,
        email: &str,
    ) -> Result<SessionRecord, GoldDustError> {
        let key = PlayerKey::new(wallet, email)?;
        Ok(self.sessions.refresh(&key).await?)
    }

    /// See [`SessionManager::validate`].
    pub async fn validate_session(
        &self,
        wallet: &str,
        email: &str,
        session_id: &str,
    ) -> Result<SessionRecord, GoldDustError> {
        let key = PlayerKey::new(wallet, email)?;
        Ok(self.sessions.validate(&key, &SessionId::from(session_id)).await?)
    }

    // -- Ledger -----------------------------------------------------------

    /// See [`LedgerManager::apply_delta`].
    pub async fn apply_delta(
        &self,
        wallet: &str,
        email: &str,
        delta: i64,
    ) -> Result<LedgerRecord, GoldDustError> {
        let key = PlayerKey::new(wallet, email)?;
        Ok(self.ledger.apply_delta(&key, delta).await?)
    }

    /// See [`LedgerManager::balance`].
    pub async fn balance(
        &self,
        wallet: &str,
        email: &str,
    ) -> Result<Option<LedgerRecord>, GoldDustError> {
        let key = PlayerKey::new(wallet, email)?;
        Ok(self.ledger.balance(&key).await?)
    }

    // -- Rosters ----------------------------------------------------------

    /// See [`RosterManager::create_game`].
    pub async fn create_game(&self) -> Result<GameRecord, GoldDustError> {
        Ok(self.roster.create_game().await?)
    }

    /// See [`RosterManager::find_game`].
    pub async fn game(&self, game_id: &str) -> Result<Option<GameRecord>, GoldDustError> {
        Ok(self.roster.find_game(&GameId::from(game_id)).await?)
    }

    /// See [`RosterManager::apply_player_deltas`].
    pub async fn apply_player_deltas(
        &self,
        game_id: &str,
        deltas: &[PlayerDelta],
    ) -> Result<GameRecord, GoldDustError> {
        Ok(self
            .roster
            .apply_player_deltas(&GameId::from(game_id), deltas)
            .await?)
    }
}
