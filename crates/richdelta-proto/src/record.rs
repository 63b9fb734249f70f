//! Plain operation records.
//!
//! The interchange shape of one operation:
//!
//! ```json
//! {"insert": "Hello", "attributes": {"bold": true}}
//! {"insert": {"image": "cat.png"}}
//! {"retain": 5, "attributes": {"color": null}}
//! {"delete": 3}
//! ```
//!
//! Exactly one of `insert`, `retain` or `delete` is set. A string `insert` is
//! text; a single-key object is an embed. `attributes` is omitted when absent
//! and `null` attribute values are written literally.

use crate::error::CodecError;
use richdelta_core::{AttributeMap, Content, Embed, Op, OpKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One operation as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpRecord {
    /// Text (string) or embed (single-key object) to insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<Value>,
    /// Units to retain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retain: Option<usize>,
    /// Units to delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<usize>,
    /// Formatting attributes; values may be `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,
}

impl OpRecord {
    /// Number of operation fields that are set.
    #[must_use]
    pub fn field_count(&self) -> usize {
        usize::from(self.insert.is_some())
            + usize::from(self.retain.is_some())
            + usize::from(self.delete.is_some())
    }
}

/// Decode the raw value of an `insert` field.
///
/// # Errors
///
/// Returns [`CodecError::MalformedEmbed`] for an object without exactly one
/// key and [`CodecError::InvalidInsert`] for anything that is neither a
/// string nor an object.
pub fn decode_insert(value: Value) -> Result<Content, CodecError> {
    match value {
        Value::String(text) => Ok(Content::Text(text)),
        Value::Object(map) => {
            if map.len() != 1 {
                return Err(CodecError::MalformedEmbed { keys: map.len() });
            }
            let Some((key, value)) = map.into_iter().next() else {
                return Err(CodecError::MalformedEmbed { keys: 0 });
            };
            Ok(Content::Embed(Embed::new(key, value)))
        }
        other => Err(CodecError::InvalidInsert(kind_name(&other).to_string())),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<OpRecord> for Op {
    type Error = CodecError;

    fn try_from(record: OpRecord) -> Result<Self, Self::Error> {
        let fields = record.field_count();
        let kind = match (record.insert, record.retain, record.delete) {
            (Some(insert), None, None) => OpKind::Insert(decode_insert(insert)?),
            (None, Some(n), None) => OpKind::Retain(n),
            (None, None, Some(n)) => OpKind::Delete(n),
            _ => return Err(CodecError::InvalidRecord { fields }),
        };
        Ok(Op::new(kind, record.attributes))
    }
}

impl From<&Op> for OpRecord {
    fn from(op: &Op) -> Self {
        let mut record = OpRecord {
            attributes: op.attrs().cloned(),
            ..OpRecord::default()
        };
        match op.kind() {
            OpKind::Insert(Content::Text(text)) => {
                record.insert = Some(Value::String(text.clone()));
            }
            OpKind::Insert(Content::Embed(embed)) => {
                let mut map = serde_json::Map::new();
                map.insert(embed.key.clone(), embed.value.clone());
                record.insert = Some(Value::Object(map));
            }
            OpKind::Retain(n) => record.retain = Some(*n),
            OpKind::Delete(n) => record.delete = Some(*n),
        }
        record
    }
}
