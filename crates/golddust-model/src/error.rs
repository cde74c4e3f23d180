//! Error types for the model layer.

/// Errors that can occur while building identity types or converting
/// records to and from store documents.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A player key was built from a blank wallet or email.
    #[error("invalid player key: {0}")]
    InvalidKey(String),

    /// Serializing a record into a document failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored document doesn't match the shape of the requested record.
    ///
    /// Common causes: a field was renamed, a required field is missing,
    /// or the document was written by something other than this crate.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The value serialized to something other than a JSON object
    /// (a bare string, number, array...). Only objects are documents.
    #[error("value is not a document (got {0})")]
    NotADocument(&'static str),
}
