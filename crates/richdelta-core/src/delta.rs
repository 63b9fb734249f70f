//! The delta type and its normalization rules.
//!
//! A [`Delta`] is an ordered list of operations describing either a document
//! (inserts only) or a change to a document. All mutation goes through
//! [`Delta::push`], which keeps the list in canonical form:
//!
//! | Last op | New op | Result |
//! |---------|--------|--------|
//! | delete | delete | counts summed |
//! | delete | insert | insert placed before the delete |
//! | text insert | text insert, same attributes | text concatenated |
//! | retain | retain, same attributes | counts summed |
//! | any | zero-length op | dropped |

use crate::attributes::AttributeMap;
use crate::iter::OpIter;
use crate::op::{Embed, Op};

/// An ordered, normalized sequence of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    ops: Vec<Op>,
}

impl Delta {
    /// Create an empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Build a delta by pushing each operation in turn.
    #[must_use]
    pub fn from_ops(ops: impl IntoIterator<Item = Op>) -> Self {
        ops.into_iter().collect()
    }

    /// The operations, in order.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Consume the delta, returning its operations.
    #[must_use]
    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    /// Check if the delta has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Append a text insert.
    #[must_use]
    pub fn insert(mut self, text: impl Into<String>, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::insert(text, attributes));
        self
    }

    /// Append an embed insert. An embed with an empty key or a `null`
    /// value is ignored.
    #[must_use]
    pub fn insert_embed(mut self, embed: Embed, attributes: Option<AttributeMap>) -> Self {
        if embed.key.is_empty() || embed.value.is_null() {
            return self;
        }
        self.push(Op::insert_embed(embed, attributes));
        self
    }

    /// Append a retain of `n` units. Zero is a no-op.
    #[must_use]
    pub fn retain(mut self, n: usize, attributes: Option<AttributeMap>) -> Self {
        self.push(Op::retain(n, attributes));
        self
    }

    /// Append a delete of `n` units. Zero is a no-op.
    #[must_use]
    pub fn delete(mut self, n: usize) -> Self {
        self.push(Op::delete(n));
        self
    }

    /// Add an operation, merging or reordering it to keep canonical form.
    pub fn push(&mut self, op: Op) -> &mut Self {
        if op.is_empty() {
            return self;
        }

        let mut index = self.ops.len();
        let Some(last) = self.ops.last_mut() else {
            self.ops.push(op);
            return self;
        };

        if last.is_delete() {
            if op.is_delete() {
                last.absorb(&op);
                return self;
            }
            // Insert and delete at the same position commute; inserts go first.
            if op.is_insert() {
                index -= 1;
                if index == 0 {
                    self.ops.insert(0, op);
                    return self;
                }
            }
        }

        if !self.ops[index - 1].absorb(&op) {
            self.ops.insert(index, op);
        }
        self
    }

    /// Drop a trailing retain without attributes.
    pub fn chop(&mut self) -> &mut Self {
        if self
            .ops
            .last()
            .is_some_and(|op| op.is_retain() && op.attrs().is_none())
        {
            self.ops.pop();
        }
        self
    }

    /// Append `other` to this delta.
    ///
    /// Only the first operation of `other` is pushed, so at most one merge
    /// happens at the seam; the rest is appended verbatim.
    #[must_use]
    pub fn concat(&self, other: &Delta) -> Delta {
        let mut delta = self.clone();
        if let Some((first, rest)) = other.ops.split_first() {
            delta.push(first.clone());
            delta.ops.extend_from_slice(rest);
        }
        delta
    }

    /// The operations covering units `start..end`.
    ///
    /// Pass [`crate::INFINITY`] as `end` to slice to the end.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Delta {
        let mut iter = OpIter::new(&self.ops);
        let mut delta = Delta::new();
        let mut index = 0;

        while index < end && iter.has_next() {
            let op = if index < start {
                iter.next_op(start - index)
            } else {
                let op = iter.next_op(end - index);
                delta.push(op.clone());
                op
            };
            index += op.len();
        }

        delta
    }

    /// Sum of all operation lengths.
    #[must_use]
    ///
    /// Saturates at `usize::MAX` rather than overflowing.
    pub fn length(&self) -> usize {
        self.ops
            .iter()
            .fold(0, |total: usize, op| total.saturating_add(op.len()))
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        let mut delta = Delta::new();
        delta.extend(iter);
        delta
    }
}

impl Extend<Op> for Delta {
    fn extend<I: IntoIterator<Item = Op>>(&mut self, iter: I) {
        for op in iter {
            self.push(op);
        }
    }
}

impl From<Delta> for Vec<Op> {
    fn from(delta: Delta) -> Self {
        delta.ops
    }
}
