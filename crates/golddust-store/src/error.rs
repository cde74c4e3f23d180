use golddust_model::{Collection, ModelError};

/// Errors that can occur in the store layer.
///
/// Every variant means the same thing to a caller: the system could not
/// service the request. None of them say anything about whether the
/// request itself was valid.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An insert collided with an existing record's identity key.
    #[error("duplicate identity key in {collection}")]
    DuplicateKey { collection: Collection },

    /// A document was inserted without one of its identity fields.
    #[error("document for {collection} is missing identity field `{field}`")]
    MissingField {
        collection: Collection,
        field: &'static str,
    },

    /// A conditional write kept losing to concurrent writers.
    #[error("write contention on {collection}: gave up after {attempts} attempts")]
    Contention { collection: Collection, attempts: u32 },

    /// A record couldn't be converted to or from its stored document.
    #[error("stored document is corrupt: {0}")]
    Corrupt(#[from] ModelError),
}
