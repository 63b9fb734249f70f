//! CLI configuration.

use anyhow::{bail, Context, Result};
use std::str::FromStr;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
    /// CBOR bytes as unpadded base64url text
    Cbor,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "cbor" => Ok(Self::Cbor),
            other => bail!("unknown output format '{other}' (expected json, pretty or cbor)"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Log filter directive
    pub log_filter: String,

    /// Output format for deltas
    pub output: OutputFormat,

    /// Priority used by `transform` when `--priority` is not given
    pub default_priority: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            output: OutputFormat::Json,
            default_priority: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RICHDELTA_LOG`: Log filter, falls back to `RUST_LOG`
    /// - `RICHDELTA_OUTPUT`: "json", "pretty" or "cbor"
    /// - `RICHDELTA_PRIORITY`: "true" or "false"
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(filter) = lookup("RICHDELTA_LOG").or_else(|| lookup("RUST_LOG")) {
            config.log_filter = filter;
        }

        if let Some(output) = lookup("RICHDELTA_OUTPUT") {
            config.output = output.parse().context("Invalid RICHDELTA_OUTPUT")?;
        }

        if let Some(priority) = lookup("RICHDELTA_PRIORITY") {
            config.default_priority = priority
                .trim()
                .parse()
                .context("Invalid RICHDELTA_PRIORITY")?;
        }

        Ok(config)
    }
}
