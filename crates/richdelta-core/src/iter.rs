//! Length-aware cursor over a sequence of operations.
//!
//! The iterator can hand out a prefix of the current operation of any
//! requested length, splitting the operation and remembering the offset.
//! Past the end it behaves as an infinite retain, which lets two-cursor
//! algorithms pad the shorter side without special cases.

use crate::op::{Op, OpType};

/// Length reported for the implicit retain past the end of a sequence.
pub const INFINITY: usize = usize::MAX;

/// Cursor over a slice of operations.
#[derive(Debug, Clone)]
pub struct OpIter<'a> {
    ops: &'a [Op],
    index: usize,
    offset: usize,
    // Byte position of `offset` inside a text insert.
    byte_offset: usize,
}

impl<'a> OpIter<'a> {
    /// Create a cursor at the first operation.
    #[must_use]
    pub fn new(ops: &'a [Op]) -> Self {
        Self {
            ops,
            index: 0,
            offset: 0,
            byte_offset: 0,
        }
    }

    /// Check if any real operation remains.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.peek_len() < INFINITY
    }

    /// The operation under the cursor, ignoring the intra-op offset.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Op> {
        self.ops.get(self.index)
    }

    /// Remaining length of the operation under the cursor.
    #[must_use]
    pub fn peek_len(&self) -> usize {
        self.peek().map_or(INFINITY, |op| op.len() - self.offset)
    }

    /// Type of the operation under the cursor; retain past the end.
    #[must_use]
    pub fn peek_type(&self) -> OpType {
        self.peek().map_or(OpType::Retain, Op::op_type)
    }

    /// Take up to `max_len` units from the operation under the cursor.
    ///
    /// Advances to the next operation once the current one is used up.
    /// Past the end this returns an infinite retain and leaves the cursor
    /// where it is.
    pub fn next_op(&mut self, max_len: usize) -> Op {
        debug_assert!(max_len > 0, "zero-length slice requested");

        let Some(op) = self.peek() else {
            return Op::retain(INFINITY, None);
        };

        let remaining = op.len() - self.offset;
        if self.offset == 0 && max_len >= remaining {
            self.index += 1;
            return op.clone();
        }

        let len = max_len.min(remaining);
        let (piece, bytes) = op.slice(self.byte_offset, len);
        if len == remaining {
            self.index += 1;
            self.offset = 0;
            self.byte_offset = 0;
        } else {
            self.offset += len;
            self.byte_offset += bytes;
        }
        piece
    }

    /// Take the rest of the operation under the cursor.
    pub fn next_whole(&mut self) -> Op {
        self.next_op(INFINITY)
    }
}
