//! Operation model.
//!
//! An [`Op`] is one atomic step of a delta: insert content, retain a run of
//! existing units, or delete a run of existing units. The step kind is a sum
//! type, so an operation with no payload or with two payloads cannot exist.

use crate::attributes::AttributeMap;
use serde_json::Value;

/// A non-text document unit, such as an image, stored as one name/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    /// Embed name (e.g. "image")
    pub key: String,
    /// Opaque embed payload
    pub value: Value,
}

impl Embed {
    /// Create a new embed.
    #[must_use]
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Content carried by an insert.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A run of characters
    Text(String),
    /// A single embedded object
    Embed(Embed),
}

impl Content {
    /// Length in document units: characters for text, one for an embed.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Content::Text(text) => text.chars().count(),
            Content::Embed(_) => 1,
        }
    }

    /// Check if this is empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(text) => text.is_empty(),
            Content::Embed(_) => false,
        }
    }

    /// The text, if this is a text insert.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Embed(_) => None,
        }
    }
}

/// The step an operation performs.
#[derive(Debug, Clone, PartialEq)]
pub enum OpKind {
    /// Insert new content
    Insert(Content),
    /// Keep `n` existing units, optionally reformatting them
    Retain(usize),
    /// Remove `n` existing units
    Delete(usize),
}

/// Operation type without payload, as reported by [`crate::OpIter::peek_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    /// An insert
    Insert,
    /// A retain
    Retain,
    /// A delete
    Delete,
}

impl std::fmt::Display for OpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpType::Insert => write!(f, "insert"),
            OpType::Retain => write!(f, "retain"),
            OpType::Delete => write!(f, "delete"),
        }
    }
}

/// A single delta operation with optional formatting attributes.
///
/// Fields are private so that every operation goes through [`Op::new`]:
/// attributes are never `Some(empty)` and the unit length is computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Op {
    kind: OpKind,
    attributes: Option<AttributeMap>,
    len: usize,
}

impl Op {
    /// Create an operation, normalizing an empty attribute map to `None`.
    /// Deletes never carry attributes.
    #[must_use]
    pub fn new(kind: OpKind, attributes: Option<AttributeMap>) -> Self {
        let (len, attributes) = match &kind {
            OpKind::Insert(content) => (content.len(), attributes),
            OpKind::Retain(n) => (*n, attributes),
            OpKind::Delete(n) => (*n, None),
        };
        Self {
            kind,
            attributes: attributes.filter(|attrs| !attrs.is_empty()),
            len,
        }
    }

    /// Insert text.
    #[must_use]
    pub fn insert(text: impl Into<String>, attributes: Option<AttributeMap>) -> Self {
        Self::new(OpKind::Insert(Content::Text(text.into())), attributes)
    }

    /// Insert an embedded object.
    #[must_use]
    pub fn insert_embed(embed: Embed, attributes: Option<AttributeMap>) -> Self {
        Self::new(OpKind::Insert(Content::Embed(embed)), attributes)
    }

    /// Retain `n` units.
    #[must_use]
    pub fn retain(n: usize, attributes: Option<AttributeMap>) -> Self {
        Self::new(OpKind::Retain(n), attributes)
    }

    /// Delete `n` units.
    #[must_use]
    pub fn delete(n: usize) -> Self {
        Self::new(OpKind::Delete(n), None)
    }

    /// Length in document units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// A zero-length operation changes nothing and is never stored in a delta.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// What the operation does.
    #[must_use]
    pub fn kind(&self) -> &OpKind {
        &self.kind
    }

    /// Consume the operation, returning its kind and attributes.
    #[must_use]
    pub fn into_parts(self) -> (OpKind, Option<AttributeMap>) {
        (self.kind, self.attributes)
    }

    /// The operation type.
    #[must_use]
    pub fn op_type(&self) -> OpType {
        match self.kind {
            OpKind::Insert(_) => OpType::Insert,
            OpKind::Retain(_) => OpType::Retain,
            OpKind::Delete(_) => OpType::Delete,
        }
    }

    /// Check if this is an insert.
    #[must_use]
    pub fn is_insert(&self) -> bool {
        matches!(self.kind, OpKind::Insert(_))
    }

    /// Check if this is a retain.
    #[must_use]
    pub fn is_retain(&self) -> bool {
        matches!(self.kind, OpKind::Retain(_))
    }

    /// Check if this is a delete.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.kind, OpKind::Delete(_))
    }

    /// Inserted content, if this is an insert.
    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        match &self.kind {
            OpKind::Insert(content) => Some(content),
            _ => None,
        }
    }

    /// Attributes as a borrowed option.
    #[must_use]
    pub fn attrs(&self) -> Option<&AttributeMap> {
        self.attributes.as_ref()
    }

    /// Fold `next` into this operation if the two are mergeable.
    ///
    /// Deletes always merge. Retains and text inserts merge when their
    /// attributes are equal. Embeds never merge.
    pub(crate) fn absorb(&mut self, next: &Op) -> bool {
        let same_attributes = self.attributes == next.attributes;
        match (&mut self.kind, &next.kind) {
            (OpKind::Delete(count), OpKind::Delete(n)) => {
                *count = count.saturating_add(*n);
            }
            (OpKind::Retain(count), OpKind::Retain(n)) if same_attributes => {
                *count = count.saturating_add(*n);
            }
            (OpKind::Insert(Content::Text(text)), OpKind::Insert(Content::Text(more)))
                if same_attributes =>
            {
                text.push_str(more);
            }
            _ => return false,
        }
        self.len = self.len.saturating_add(next.len);
        true
    }

    /// Take `len` units starting at byte `byte_offset` of a text insert.
    ///
    /// Returns the piece and the number of bytes it covers. For non-text
    /// operations the offset is ignored and the byte count is zero.
    pub(crate) fn slice(&self, byte_offset: usize, len: usize) -> (Op, usize) {
        match &self.kind {
            OpKind::Insert(Content::Text(text)) => {
                let rest = text.get(byte_offset..).unwrap_or_default();
                let end = rest.char_indices().nth(len).map_or(rest.len(), |(i, _)| i);
                let piece = Op::insert(&rest[..end], self.attributes.clone());
                (piece, end)
            }
            OpKind::Insert(Content::Embed(_)) => (self.clone(), 0),
            OpKind::Retain(_) => (Op::retain(len, self.attributes.clone()), 0),
            OpKind::Delete(_) => (Op::delete(len), 0),
        }
    }
}
