//! JSON and CBOR codecs for deltas.
//!
//! A delta encodes as an ordered list of [`OpRecord`]s. Decoding also accepts
//! the document shape `{"ops": [...]}` used by rich-text editors. Decoded
//! records are pushed through [`Delta::push`], so the result is always in
//! canonical form.

use crate::error::CodecError;
use crate::record::OpRecord;
use richdelta_core::{Delta, Op};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Incoming {
    Records(Vec<OpRecord>),
    Document { ops: Vec<OpRecord> },
}

impl Incoming {
    fn into_records(self) -> Vec<OpRecord> {
        match self {
            Incoming::Records(records) | Incoming::Document { ops: records } => records,
        }
    }
}

/// Decode a list of records into a delta.
///
/// # Errors
///
/// Returns the error of the first record that fails to decode.
pub fn decode_ops(records: Vec<OpRecord>) -> Result<Delta, CodecError> {
    let count = records.len();
    let mut delta = Delta::new();
    for (index, record) in records.into_iter().enumerate() {
        let op = Op::try_from(record).map_err(|e| {
            tracing::debug!(index, error = %e, "Rejected operation record");
            e
        })?;
        delta.push(op);
    }
    tracing::debug!(records = count, ops = delta.ops().len(), "Decoded delta");
    Ok(delta)
}

/// Encode a delta as a list of records.
#[must_use]
pub fn encode_ops(delta: &Delta) -> Vec<OpRecord> {
    delta.ops().iter().map(OpRecord::from).collect()
}

/// Decode a delta from JSON text.
///
/// # Errors
///
/// Returns error if the text is not a record list or `{"ops": [...]}`, or if
/// any record is malformed.
pub fn from_json(input: &str) -> Result<Delta, CodecError> {
    let incoming: Incoming =
        serde_json::from_str(input).map_err(|e| CodecError::Json(e.to_string()))?;
    decode_ops(incoming.into_records())
}

/// Decode a delta from a parsed JSON value.
///
/// # Errors
///
/// Same as [`from_json`].
pub fn from_json_value(value: Value) -> Result<Delta, CodecError> {
    let incoming: Incoming =
        serde_json::from_value(value).map_err(|e| CodecError::Json(e.to_string()))?;
    decode_ops(incoming.into_records())
}

/// Encode a delta as compact JSON text.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_json(delta: &Delta) -> Result<String, CodecError> {
    serde_json::to_string(&encode_ops(delta)).map_err(|e| CodecError::Json(e.to_string()))
}

/// Encode a delta as indented JSON text.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_json_pretty(delta: &Delta) -> Result<String, CodecError> {
    serde_json::to_string_pretty(&encode_ops(delta)).map_err(|e| CodecError::Json(e.to_string()))
}

/// Encode a delta as a JSON value.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_json_value(delta: &Delta) -> Result<Value, CodecError> {
    serde_json::to_value(encode_ops(delta)).map_err(|e| CodecError::Json(e.to_string()))
}

/// Encode a delta as CBOR bytes.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn to_cbor(delta: &Delta) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(&encode_ops(delta), &mut bytes)
        .map_err(|e| CodecError::CborSerialize(e.to_string()))?;
    Ok(bytes)
}

/// Decode a delta from CBOR bytes.
///
/// # Errors
///
/// Returns error if deserialization fails or any record is malformed.
pub fn from_cbor(bytes: &[u8]) -> Result<Delta, CodecError> {
    let records: Vec<OpRecord> =
        ciborium::from_reader(bytes).map_err(|e| CodecError::CborDeserialize(e.to_string()))?;
    decode_ops(records)
}
