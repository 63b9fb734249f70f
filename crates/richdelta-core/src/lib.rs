//! # richdelta Core
//!
//! Rich-text delta model and operational transformation.
//!
//! This crate provides:
//! - Attribute algebra over formatting maps (compose, diff, transform, invert)
//! - The operation model (insert text/embed, retain, delete)
//! - A length-aware operation iterator that splits operations on demand
//! - The [`Delta`] type with its push normalization rules
//! - Compose, transform, position transform and invert algorithms

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attributes;
pub mod delta;
pub mod iter;
pub mod op;
pub mod ot;

pub use attributes::AttributeMap;
pub use delta::Delta;
pub use iter::{OpIter, INFINITY};
pub use op::{Content, Embed, Op, OpKind, OpType};
