//! Roster manager: creates games and merges player deltas into them.

use std::sync::Arc;

use chrono::Utc;
use golddust_model::{Codec, Collection, GameId, JsonCodec};
use golddust_store::{Filter, Store, StoreError, WritePolicy};

use crate::{GameRecord, PlayerDelta, RosterError};

/// Manages game rosters stored in the `games` collection.
///
/// This is the entry point for roster operations from higher layers.
/// Like the other managers it holds no per-game state: each call reads
/// the game, merges in memory, and writes back conditionally on the
/// revision it read.
pub struct RosterManager<S> {
    store: Arc<S>,
    policy: WritePolicy,
    codec: JsonCodec,
}

impl<S: Store> RosterManager<S> {
    /// Creates a roster manager over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: WritePolicy::default(),
            codec: JsonCodec,
        }
    }

    /// Overrides how many times a contended write is retried.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates a new game with an empty roster and returns it.
    pub async fn create_game(&self) -> Result<GameRecord, RosterError> {
        let attempts = self.policy.attempts();

        for attempt in 1..=attempts {
            let game = GameRecord::new(GameId::generate(), Utc::now());
            let document = self.codec.encode(&game).map_err(StoreError::from)?;
            match self.store.insert_one(Collection::Games, document).await {
                Ok(()) => {
                    tracing::info!(game_id = %game.game_id, "game created");
                    return Ok(game);
                }
                // A fresh id collided; draw another.
                Err(StoreError::DuplicateKey { .. }) => {
                    tracing::warn!(game_id = %game.game_id, attempt, "game id collision");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StoreError::Contention {
            collection: Collection::Games,
            attempts,
        }
        .into())
    }

    /// Looks up a game and its roster.
    ///
    /// Returns `None` for an unknown id.
    pub async fn find_game(&self, game_id: &GameId) -> Result<Option<GameRecord>, RosterError> {
        Ok(self.load(game_id).await?)
    }

    /// Applies each delta to the game's roster, in input order.
    ///
    /// - Known player → `balance + delta`, floored at 0, same position.
    /// - Unknown player → appended with `max(delta, 0)`.
    ///
    /// The whole roster and `updatedAt` are written back in one update.
    ///
    /// # Errors
    /// - [`RosterError::GameNotFound`] — no game with this id
    /// - [`RosterError::Storage`] — the store failed
    pub async fn apply_player_deltas(
        &self,
        game_id: &GameId,
        deltas: &[PlayerDelta],
    ) -> Result<GameRecord, RosterError> {
        let attempts = self.policy.attempts();

        for attempt in 1..=attempts {
            let Some(current) = self.load(game_id).await? else {
                tracing::debug!(%game_id, "roster update for unknown game");
                return Err(RosterError::GameNotFound(game_id.clone()));
            };

            let (next, clamped) = current.merged(deltas, Utc::now());
            let patch = self.codec.encode(&next).map_err(StoreError::from)?;
            let filter = Filter::game(game_id).at_revision(current.revision);
            if !self.store.update_one(Collection::Games, &filter, patch).await? {
                tracing::warn!(%game_id, attempt, "roster changed underneath us, retrying");
                continue;
            }

            for c in &clamped {
                tracing::warn!(
                    %game_id,
                    player = %c.key,
                    balance = c.balance,
                    delta = c.delta,
                    "roster balance clamped at zero"
                );
            }
            tracing::debug!(
                %game_id,
                deltas = deltas.len(),
                players = next.players.len(),
                "roster updated"
            );
            return Ok(next);
        }

        Err(StoreError::Contention {
            collection: Collection::Games,
            attempts,
        }
        .into())
    }

    async fn load(&self, game_id: &GameId) -> Result<Option<GameRecord>, StoreError> {
        let Some(document) = self
            .store
            .find_one(Collection::Games, &Filter::game(game_id))
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.codec.decode(document)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golddust_model::PlayerKey;
    use golddust_store::MemoryStore;

    fn manager() -> RosterManager<MemoryStore> {
        RosterManager::new(Arc::new(MemoryStore::new()))
    }

    fn delta(wallet: &str, email: &str, delta: i64) -> PlayerDelta {
        PlayerDelta::new(PlayerKey::new(wallet, email).unwrap(), delta)
    }

    #[tokio::test]
    async fn test_create_game_starts_empty() {
        let roster = manager();

        let game = roster.create_game().await.unwrap();

        assert!(game.players.is_empty());
        assert_eq!(game.created_at, game.updated_at);
        let found = roster.find_game(&game.game_id).await.unwrap();
        assert_eq!(found, Some(game));
    }

    #[tokio::test]
    async fn test_create_game_ids_are_unique() {
        let roster = manager();
        let a = roster.create_game().await.unwrap();
        let b = roster.create_game().await.unwrap();
        assert_ne!(a.game_id, b.game_id);
    }

    #[tokio::test]
    async fn test_find_game_unknown_returns_none() {
        let roster = manager();
        let found = roster.find_game(&GameId::from("nope")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_apply_player_deltas_unknown_game_not_found() {
        let roster = manager();

        let result = roster
            .apply_player_deltas(&GameId::from("unknown-game"), &[delta("w1", "e1", 10)])
            .await;

        assert!(matches!(
            result,
            Err(RosterError::GameNotFound(id)) if id.as_str() == "unknown-game"
        ));
    }

    #[tokio::test]
    async fn test_apply_player_deltas_persists_roster() {
        let roster = manager();
        let game = roster.create_game().await.unwrap();

        let updated = roster
            .apply_player_deltas(&game.game_id, &[delta("w1", "e1", 10), delta("w2", "e2", 4)])
            .await
            .unwrap();

        let stored = roster.find_game(&game.game_id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.players.len(), 2);
        assert_eq!(stored.created_at, game.created_at);
        assert!(stored.updated_at >= game.updated_at);
    }

    #[tokio::test]
    async fn test_apply_player_deltas_empty_list_touches_game() {
        let roster = manager();
        let game = roster.create_game().await.unwrap();

        let updated = roster.apply_player_deltas(&game.game_id, &[]).await.unwrap();

        assert!(updated.players.is_empty());
        assert_eq!(updated.revision, 1);
    }
}
