//! Command implementations.
//!
//! Each command takes already-loaded deltas and returns the text to print,
//! keeping argument handling and I/O in `main`.

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use richdelta_core::{Delta, INFINITY};
use std::io::Read;
use std::path::Path;

/// Read a delta from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns error if the input cannot be read or decoded.
pub fn load_delta(path: &str) -> Result<Delta> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read {path}"))?
    };
    parse_delta(&text).with_context(|| format!("Failed to decode delta from {path}"))
}

/// Decode a delta from JSON text or base64url CBOR text.
///
/// # Errors
///
/// Returns error if the text is neither valid JSON nor valid base64url CBOR.
pub fn parse_delta(text: &str) -> Result<Delta> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(richdelta_proto::from_json(trimmed)?);
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .context("Input is neither JSON nor base64url CBOR")?;
    Ok(richdelta_proto::from_cbor(&bytes)?)
}

/// Render a delta in the configured output format.
///
/// # Errors
///
/// Returns error if encoding fails.
pub fn render(delta: &Delta, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => richdelta_proto::to_json(delta)?,
        OutputFormat::Pretty => richdelta_proto::to_json_pretty(delta)?,
        OutputFormat::Cbor => URL_SAFE_NO_PAD.encode(richdelta_proto::to_cbor(delta)?),
    };
    Ok(text)
}

/// Apply `b` after `a`.
#[must_use]
pub fn compose(a: &Delta, b: &Delta) -> Delta {
    a.compose(b)
}

/// Rebase `b` over the concurrent `a`.
#[must_use]
pub fn transform(a: &Delta, b: &Delta, priority: bool) -> Delta {
    a.transform(b, priority)
}

/// Move a cursor index through `delta`.
#[must_use]
pub fn transform_position(delta: &Delta, index: usize, priority: bool) -> usize {
    delta.transform_position(index, priority)
}

/// Build the delta that undoes `delta` on `base`.
#[must_use]
pub fn invert(delta: &Delta, base: &Delta) -> Delta {
    delta.invert(base)
}

/// Take units `start..end` of `delta`; `None` slices to the end.
#[must_use]
pub fn slice(delta: &Delta, start: usize, end: Option<usize>) -> Delta {
    delta.slice(start, end.unwrap_or(INFINITY))
}

/// Append `b` to `a`.
#[must_use]
pub fn concat(a: &Delta, b: &Delta) -> Delta {
    a.concat(b)
}

/// Canonical form of `delta`, without a trailing plain retain.
#[must_use]
pub fn normalize(delta: Delta) -> Delta {
    let mut delta = delta;
    delta.chop();
    delta
}

/// Parse a unit index argument.
///
/// # Errors
///
/// Returns error if `arg` is not a non-negative integer.
pub fn parse_index(arg: &str, name: &str) -> Result<usize> {
    arg.parse()
        .with_context(|| format!("Invalid {name} '{arg}': expected a non-negative integer"))
}
