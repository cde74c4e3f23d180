//! Roster types and the merge rule for player deltas.

use golddust_model::{GameId, PlayerKey, Timestamp};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PlayerEntry / PlayerDelta
// ---------------------------------------------------------------------------

/// One player's standing within a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub wallet: String,
    pub email: String,
    /// Gold Dust held in this game. Never negative.
    pub balance: u64,
}

impl PlayerEntry {
    /// Returns `true` if this entry belongs to `key`.
    pub fn is(&self, key: &PlayerKey) -> bool {
        key.matches(&self.wallet, &self.email)
    }
}

/// A requested change to one player's roster balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDelta {
    pub key: PlayerKey,
    pub delta: i64,
}

impl PlayerDelta {
    pub fn new(key: PlayerKey, delta: i64) -> Self {
        Self { key, delta }
    }
}

// ---------------------------------------------------------------------------
// GameRecord
// ---------------------------------------------------------------------------

/// A game and its roster, as stored in the `games` collection.
///
/// `players` holds at most one entry per `(wallet, email)`. New players
/// are appended; existing ones are updated where they stand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_id: GameId,
    pub players: Vec<PlayerEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Bumped on every write; guards conditional updates.
    pub revision: u64,
}

/// A delta that hit the zero floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Clamped {
    pub(crate) key: PlayerKey,
    /// Balance before the delta (0 for a player who just joined).
    pub(crate) balance: u64,
    pub(crate) delta: i64,
}

impl GameRecord {
    /// A new game with an empty roster.
    pub(crate) fn new(game_id: GameId, now: Timestamp) -> Self {
        Self {
            game_id,
            players: Vec::new(),
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// The roster entry for `key`, if the player has joined.
    pub fn player(&self, key: &PlayerKey) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| p.is(key))
    }

    /// Applies `deltas` in order and returns the next revision of the
    /// record, plus every delta that was floored at zero.
    ///
    /// A key that appears twice in `deltas` is applied twice, the second
    /// time against the result of the first.
    pub(crate) fn merged(&self, deltas: &[PlayerDelta], now: Timestamp) -> (Self, Vec<Clamped>) {
        let mut players = self.players.clone();
        let mut clamped = Vec::new();

        for PlayerDelta { key, delta } in deltas {
            match players.iter_mut().find(|p| p.is(key)) {
                Some(entry) => {
                    let (balance, floored) = apply_floored(entry.balance, *delta);
                    if floored {
                        clamped.push(Clamped {
                            key: key.clone(),
                            balance: entry.balance,
                            delta: *delta,
                        });
                    }
                    entry.balance = balance;
                }
                None => {
                    let (balance, floored) = apply_floored(0, *delta);
                    if floored {
                        clamped.push(Clamped {
                            key: key.clone(),
                            balance: 0,
                            delta: *delta,
                        });
                    }
                    players.push(PlayerEntry {
                        wallet: key.wallet().to_string(),
                        email: key.email().to_string(),
                        balance,
                    });
                }
            }
        }

        let next = Self {
            game_id: self.game_id.clone(),
            players,
            created_at: self.created_at,
            updated_at: now,
            revision: self.revision + 1,
        };
        (next, clamped)
    }
}

/// `balance + delta`, floored at 0 and saturating at `u64::MAX`.
///
/// The flag is `true` when the floor kicked in.
fn apply_floored(balance: u64, delta: i64) -> (u64, bool) {
    if delta >= 0 {
        (balance.saturating_add(delta.unsigned_abs()), false)
    } else {
        match balance.checked_sub(delta.unsigned_abs()) {
            Some(b) => (b, false),
            None => (0, true),
        }
    }
}
