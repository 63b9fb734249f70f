//! Decode and encode errors.

/// Errors that can occur while decoding or encoding deltas.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// An embed insert did not have exactly one key
    #[error("malformed embed: expected exactly one key, got {keys}")]
    MalformedEmbed {
        /// Number of keys found
        keys: usize,
    },
    /// A record did not set exactly one of insert/retain/delete
    #[error("invalid operation record: expected one of insert/retain/delete, got {fields}")]
    InvalidRecord {
        /// Number of operation fields set
        fields: usize,
    },
    /// An insert that is neither text nor an embed
    #[error("invalid insert: expected a string or an object, got {0}")]
    InvalidInsert(String),
    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(String),
    /// CBOR serialization failed
    #[error("CBOR serialization failed: {0}")]
    CborSerialize(String),
    /// CBOR deserialization failed
    #[error("CBOR deserialization failed: {0}")]
    CborDeserialize(String),
}
