//! Exact-match document filters.

use golddust_model::{Collection, Document, GameId, PlayerKey};
use serde_json::Value;

use crate::StoreError;

/// Name of the optimistic-concurrency counter carried by every record.
pub const REVISION_FIELD: &str = "revision";

/// A conjunction of `field == value` conditions.
///
/// ```rust
/// use golddust_store::Filter;
///
/// let filter = Filter::new().eq("wallet", "0xabc").eq("email", "a@b.io");
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// An empty filter. Matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `field == value` condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Filter on a player's `(wallet, email)` identity key.
    pub fn player(key: &PlayerKey) -> Self {
        Self::new().eq("wallet", key.wallet()).eq("email", key.email())
    }

    /// Filter on a game's identity key.
    pub fn game(game_id: &GameId) -> Self {
        Self::new().eq("gameId", game_id.as_str())
    }

    /// Narrows this filter to one exact revision of the record.
    pub fn at_revision(self, revision: u64) -> Self {
        self.eq(REVISION_FIELD, revision)
    }

    /// Builds the identity-key filter for a document about to be stored.
    ///
    /// # Errors
    /// Returns [`StoreError::MissingField`] if the document lacks one of
    /// the collection's identity fields.
    pub fn identity_of(
        collection: Collection,
        document: &Document,
    ) -> Result<Self, StoreError> {
        let mut filter = Self::new();
        for &field in collection.identity_fields() {
            let value = document
                .get(field)
                .ok_or(StoreError::MissingField { collection, field })?;
            filter = filter.eq(field, value.clone());
        }
        Ok(filter)
    }

    /// Returns `true` if every condition holds for `document`.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` if the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterates over `(field, value)` conditions in insertion order.
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions.iter().map(|(f, v)| (f.as_str(), v))
    }
}
