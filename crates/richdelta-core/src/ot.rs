//! Operational transformation over deltas.
//!
//! | Algorithm | Meaning |
//! |-----------|---------|
//! | [`Delta::compose`] | `self` followed by `other`, as one delta |
//! | [`Delta::transform`] | `other` rewritten to apply after concurrent `self` |
//! | [`Delta::transform_position`] | a cursor index moved across `self` |
//! | [`Delta::invert`] | the delta that undoes `self` on a given base document |
//!
//! Compose and transform walk two [`OpIter`]s in lockstep. Each step consumes
//! a positive length from at least one side, and an exhausted side reads as
//! an infinite retain, so the loops always terminate.

use crate::attributes;
use crate::delta::Delta;
use crate::iter::OpIter;
use crate::op::{Op, OpKind, OpType};

impl Delta {
    /// Combine `self` and then `other` into a single equivalent delta.
    #[must_use]
    pub fn compose(&self, other: &Delta) -> Delta {
        let mut this_iter = OpIter::new(self.ops());
        let mut other_iter = OpIter::new(other.ops());
        let mut delta = Delta::new();

        while this_iter.has_next() || other_iter.has_next() {
            if other_iter.peek_type() == OpType::Insert {
                delta.push(other_iter.next_whole());
            } else if this_iter.peek_type() == OpType::Delete {
                delta.push(this_iter.next_whole());
            } else {
                let len = this_iter.peek_len().min(other_iter.peek_len());
                let this_op = this_iter.next_op(len);
                let other_op = other_iter.next_op(len);

                match other_op.op_type() {
                    OpType::Retain => {
                        // Nulls only mean something on a retain
                        let keep_null = this_op.is_retain();
                        let attributes =
                            attributes::compose(this_op.attrs(), other_op.attrs(), keep_null);
                        let kind = match this_op.into_parts().0 {
                            OpKind::Insert(content) => OpKind::Insert(content),
                            _ => OpKind::Retain(len),
                        };
                        delta.push(Op::new(kind, attributes));
                    }
                    // An insert under a later delete cancels out
                    OpType::Delete if this_op.is_retain() => {
                        delta.push(other_op);
                    }
                    _ => {}
                }
            }
        }

        delta.chop();
        tracing::trace!(
            this_ops = self.ops().len(),
            other_ops = other.ops().len(),
            result_ops = delta.ops().len(),
            "Composed deltas"
        );
        delta
    }

    /// Rewrite `other` so it applies on top of a document that already has
    /// `self` applied.
    ///
    /// `priority` marks `self` as the side that happened first: its inserts
    /// win position ties and its attributes win formatting conflicts.
    #[must_use]
    pub fn transform(&self, other: &Delta, priority: bool) -> Delta {
        let mut this_iter = OpIter::new(self.ops());
        let mut other_iter = OpIter::new(other.ops());
        let mut delta = Delta::new();

        while this_iter.has_next() || other_iter.has_next() {
            if this_iter.peek_type() == OpType::Insert
                && (priority || other_iter.peek_type() != OpType::Insert)
            {
                let len = this_iter.next_whole().len();
                delta.push(Op::retain(len, None));
            } else if other_iter.peek_type() == OpType::Insert {
                delta.push(other_iter.next_whole());
            } else {
                let len = this_iter.peek_len().min(other_iter.peek_len());
                let this_op = this_iter.next_op(len);
                let other_op = other_iter.next_op(len);

                if this_op.is_delete() {
                    // Our delete already removed what they retain or delete
                    continue;
                }
                if other_op.is_delete() {
                    delta.push(other_op);
                } else {
                    let attributes =
                        attributes::transform(this_op.attrs(), other_op.attrs(), priority);
                    delta.push(Op::retain(len, attributes));
                }
            }
        }

        delta.chop();
        tracing::trace!(
            this_ops = self.ops().len(),
            other_ops = other.ops().len(),
            priority,
            result_ops = delta.ops().len(),
            "Transformed delta"
        );
        delta
    }

    /// Move a cursor `index` across this delta.
    ///
    /// With `priority` an insert exactly at `index` leaves the cursor in
    /// place; without it the cursor is pushed past the inserted content.
    #[must_use]
    pub fn transform_position(&self, index: usize, priority: bool) -> usize {
        let mut iter = OpIter::new(self.ops());
        let mut index = index;
        let mut offset: usize = 0;

        while iter.has_next() && offset <= index {
            let len = iter.peek_len();
            let op_type = iter.peek_type();
            let _ = iter.next_whole();

            match op_type {
                OpType::Delete => {
                    index -= len.min(index - offset);
                    continue;
                }
                OpType::Insert if offset < index || !priority => {
                    index = index.saturating_add(len);
                }
                _ => {}
            }
            offset = offset.saturating_add(len);
        }

        index
    }

    /// The delta that undoes `self` when applied after it.
    ///
    /// `base` is the document `self` was applied to, so that
    /// `base.compose(self).compose(&self.invert(base)) == base`.
    #[must_use]
    pub fn invert(&self, base: &Delta) -> Delta {
        let mut inverted = Delta::new();
        let mut base_index: usize = 0;

        for op in self.ops() {
            let end = base_index.saturating_add(op.len());
            match op.kind() {
                OpKind::Insert(_) => {
                    inverted.push(Op::delete(op.len()));
                }
                OpKind::Retain(n) => match op.attrs() {
                    None => {
                        inverted.push(Op::retain(*n, None));
                        base_index = end;
                    }
                    Some(attrs) => {
                        for base_op in base.slice(base_index, end).ops() {
                            let restored = attributes::invert(Some(attrs), base_op.attrs());
                            inverted.push(Op::retain(base_op.len(), restored));
                        }
                        base_index = end;
                    }
                },
                OpKind::Delete(_) => {
                    inverted.extend(base.slice(base_index, end).into_ops());
                    base_index = end;
                }
            }
        }

        tracing::trace!(
            ops = self.ops().len(),
            base_ops = base.ops().len(),
            result_ops = inverted.ops().len(),
            "Inverted delta"
        );
        inverted
    }
}
