//! # richdelta Protocol
//!
//! Interchange encoding for deltas.
//!
//! ## Records
//!
//! A delta is an ordered list of operation records, each setting exactly one
//! of `insert`, `retain` or `delete`, plus optional `attributes`:
//!
//! - `insert`: a string (text) or a single-key object (embed)
//! - `retain` / `delete`: a positive unit count
//! - `attributes`: name -> value, where `null` means "remove"
//!
//! ## Codecs
//!
//! - JSON text or values, accepting `[...]` and `{"ops": [...]}` on input
//! - CBOR bytes carrying the same record list

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod record;

pub use codec::{
    decode_ops, encode_ops, from_cbor, from_json, from_json_value, to_cbor, to_json,
    to_json_pretty, to_json_value,
};
pub use error::CodecError;
pub use record::OpRecord;
