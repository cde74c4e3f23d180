//! Codec trait and implementations for mapping records to documents.
//!
//! Managers work with typed records (`SessionRecord`, `LedgerRecord`,
//! `GameRecord`); the store only knows schemaless [`Document`]s. A codec
//! sits between the two, so neither side has to know how the other
//! represents data.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::ModelError;

/// A stored record: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Converts typed records to documents and back.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded record
/// owns all its data, so the document can be dropped right after.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a record into a document.
    ///
    /// # Errors
    /// Returns [`ModelError::Encode`] if serialization fails, or
    /// [`ModelError::NotADocument`] if the value isn't an object.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Document, ModelError>;

    /// Deserializes a document back into a record.
    ///
    /// # Errors
    /// Returns [`ModelError::Decode`] if the document doesn't have the
    /// shape of `T`.
    fn decode<T: DeserializeOwned>(&self, document: Document) -> Result<T, ModelError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] built on `serde_json`'s value model.
///
/// ## Example
///
/// ```rust
/// use golddust_model::{Codec, JsonCodec};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct Account { wallet: String, balance: u64 }
///
/// let codec = JsonCodec;
/// let account = Account { wallet: "0xabc".into(), balance: 5 };
///
/// let doc = codec.encode(&account).unwrap();
/// assert_eq!(doc["balance"], 5);
///
/// let back: Account = codec.decode(doc).unwrap();
/// assert_eq!(back, account);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Document, ModelError> {
        match serde_json::to_value(value).map_err(ModelError::Encode)? {
            Value::Object(map) => Ok(map),
            Value::Null => Err(ModelError::NotADocument("null")),
            Value::Bool(_) => Err(ModelError::NotADocument("bool")),
            Value::Number(_) => Err(ModelError::NotADocument("number")),
            Value::String(_) => Err(ModelError::NotADocument("string")),
            Value::Array(_) => Err(ModelError::NotADocument("array")),
        }
    }

    fn decode<T: DeserializeOwned>(&self, document: Document) -> Result<T, ModelError> {
        serde_json::from_value(Value::Object(document)).map_err(ModelError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        game_id: String,
        balance: u64,
    }

    #[test]
    fn test_encode_uses_serde_field_names() {
        let doc = JsonCodec
            .encode(&Sample { game_id: "g1".into(), balance: 3 })
            .unwrap();
        assert_eq!(doc["gameId"], "g1");
        assert_eq!(doc["balance"], 3);
    }

    #[test]
    fn test_encode_non_object_rejected() {
        let result = JsonCodec.encode(&42u32);
        assert!(matches!(result, Err(ModelError::NotADocument("number"))));
    }

    #[test]
    fn test_decode_missing_field_fails() {
        let mut doc = Document::new();
        doc.insert("gameId".into(), Value::from("g1"));
        let result: Result<Sample, _> = JsonCodec.decode(doc);
        assert!(matches!(result, Err(ModelError::Decode(_))));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let mut doc = Document::new();
        doc.insert("gameId".into(), Value::from("g1"));
        doc.insert("balance".into(), Value::from(9));
        doc.insert("_id".into(), Value::from("internal"));
        let sample: Sample = JsonCodec.decode(doc).unwrap();
        assert_eq!(sample, Sample { game_id: "g1".into(), balance: 9 });
    }
}
