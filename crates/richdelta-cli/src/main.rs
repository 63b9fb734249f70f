//! # richdelta CLI
//!
//! Command-line tools for composing, transforming and inspecting deltas.

use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{load_delta, parse_index, render};
use config::CliConfig;

fn main() -> Result<()> {
    let config = CliConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let (positional, priority) = split_flags(&args[2..], config.default_priority);
    tracing::debug!(command = %args[1], priority, "Running command");

    match args[1].as_str() {
        "compose" => {
            let [a, b] = require::<2>(&positional, "compose <a> <b>");
            let result = commands::compose(&load_delta(a)?, &load_delta(b)?);
            println!("{}", render(&result, config.output)?);
        }
        "transform" => {
            let [a, b] = require::<2>(&positional, "transform <a> <b> [--priority]");
            let result = commands::transform(&load_delta(a)?, &load_delta(b)?, priority);
            println!("{}", render(&result, config.output)?);
        }
        "transform-position" => {
            let [delta, index] =
                require::<2>(&positional, "transform-position <delta> <index> [--priority]");
            let index = parse_index(index, "index")?;
            let moved = commands::transform_position(&load_delta(delta)?, index, priority);
            println!("{moved}");
        }
        "invert" => {
            let [delta, base] = require::<2>(&positional, "invert <delta> <base>");
            let result = commands::invert(&load_delta(delta)?, &load_delta(base)?);
            println!("{}", render(&result, config.output)?);
        }
        "slice" => {
            if positional.len() < 2 {
                usage("slice <delta> <start> [end]");
            }
            let start = parse_index(positional[1], "start")?;
            let end = positional
                .get(2)
                .map(|end| parse_index(end, "end"))
                .transpose()?;
            let result = commands::slice(&load_delta(positional[0])?, start, end);
            println!("{}", render(&result, config.output)?);
        }
        "concat" => {
            let [a, b] = require::<2>(&positional, "concat <a> <b>");
            let result = commands::concat(&load_delta(a)?, &load_delta(b)?);
            println!("{}", render(&result, config.output)?);
        }
        "normalize" => {
            let [delta] = require::<1>(&positional, "normalize <delta>");
            let result = commands::normalize(load_delta(delta)?);
            println!("{}", render(&result, config.output)?);
        }
        "length" => {
            let [delta] = require::<1>(&positional, "length <delta>");
            println!("{}", load_delta(delta)?.length());
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Separate positional arguments from `--priority` / `--no-priority`.
fn split_flags(args: &[String], default_priority: bool) -> (Vec<&str>, bool) {
    let mut priority = default_priority;
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--priority" => priority = true,
            "--no-priority" => priority = false,
            other => positional.push(other),
        }
    }
    (positional, priority)
}

/// Take exactly `N` positional arguments or exit with usage.
fn require<'a, const N: usize>(positional: &[&'a str], usage_line: &str) -> [&'a str; N] {
    match <[&'a str; N]>::try_from(positional) {
        Ok(args) => args,
        Err(_) => usage(usage_line),
    }
}

fn usage(line: &str) -> ! {
    eprintln!("Usage: richdelta {line}");
    std::process::exit(1);
}

fn print_help() {
    println!(
        r#"richdelta CLI

USAGE:
    richdelta <COMMAND> [OPTIONS]

COMMANDS:
    compose <a> <b>                        Apply b after a
    transform <a> <b> [--priority]         Rebase b over concurrent a
    transform-position <delta> <index>     Move a cursor index through delta
        [--priority]
    invert <delta> <base>                  Delta that undoes delta on base
    slice <delta> <start> [end]            Take units start..end
    concat <a> <b>                         Append b to a
    normalize <delta>                      Print the canonical form
    length <delta>                         Print the length in units
    help                                   Show this help message

Inputs are JSON files (a list of operations or {{"ops": [...]}}) or
base64url CBOR. Use - to read from stdin.

ENVIRONMENT:
    RICHDELTA_LOG        Log filter (falls back to RUST_LOG, default warn)
    RICHDELTA_OUTPUT     json, pretty or cbor
    RICHDELTA_PRIORITY   Default priority for transform commands

EXAMPLES:
    richdelta compose doc.json change.json
    richdelta transform mine.json theirs.json --priority
    RICHDELTA_OUTPUT=pretty richdelta invert change.json doc.json
"#
    );
}
