// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger Transaction Tool
//!
//! Entry point for the `ledger-txn` binary. Parses CLI arguments,
//! initializes logging, and runs one of:
//!
//! - `id`      — print a transaction's ID
//! - `encode`  — JSON transaction to canonical wire bytes (hex)
//! - `decode`  — wire bytes (hex) to JSON
//! - `group`   — compute or assign the group ID of a list of transactions
//! - `version` — print build version information
//!
//! Every command writes its result to stdout and nothing else; logs go to
//! stderr.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;

use ledger_txn::transaction::{assign_group_id, compute_group_id};
use ledger_txn::{SignedTxn, Transaction};

use cli::{Commands, InputArgs, InputFormat, LedgerTxnCli};

fn main() -> Result<()> {
    let cli = LedgerTxnCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let output = match cli.command {
        Commands::Id(args) => {
            let input = read_input(&args.input)?;
            tx_id(&input, args.format, args.raw)?
        }
        Commands::Encode(args) => {
            let input = read_input(&args.input)?;
            encode(&input, args.signable, args.signed)?
        }
        Commands::Decode(args) => {
            let input = read_input(&args.input)?;
            decode(&input, args.signed)?
        }
        Commands::Group(args) => {
            let input = read_input(&args.input)?;
            group(&input, args.assign)?
        }
        Commands::Version => version(),
    };

    println!("{}", output);
    Ok(())
}

/// Reads the whole input from the given file, or stdin for `None` / `-`.
fn read_input(args: &InputArgs) -> Result<String> {
    match args.input.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn parse_hex(input: &str) -> Result<Vec<u8>> {
    hex::decode(input.trim()).context("input is not valid hex")
}

fn parse_transaction(input: &str, format: InputFormat) -> Result<Transaction> {
    let tx = match format {
        InputFormat::Json => {
            serde_json::from_str(input).context("failed to parse transaction JSON")?
        }
        InputFormat::Hex => {
            Transaction::decode(&parse_hex(input)?).context("failed to decode transaction")?
        }
    };
    tracing::debug!(tx_type = %tx.tx_type(), "parsed transaction");
    Ok(tx)
}

/// `id`: base-32 ID, or hex of the raw bytes with `raw`.
fn tx_id(input: &str, format: InputFormat, raw: bool) -> Result<String> {
    let id = parse_transaction(input, format)?.id();
    Ok(if raw {
        hex::encode(id.as_bytes())
    } else {
        id.to_string()
    })
}

/// `encode`: canonical bytes as hex.
fn encode(input: &str, signable: bool, signed: bool) -> Result<String> {
    let bytes = if signed {
        let stx: SignedTxn =
            serde_json::from_str(input).context("failed to parse signed transaction JSON")?;
        stx.encode()
    } else {
        let tx = parse_transaction(input, InputFormat::Json)?;
        if signable {
            tx.signable_bytes()
        } else {
            tx.encode()
        }
    };
    Ok(hex::encode(bytes))
}

/// `decode`: hex wire bytes to pretty JSON.
fn decode(input: &str, signed: bool) -> Result<String> {
    let bytes = parse_hex(input)?;
    let json = if signed {
        let stx = SignedTxn::decode(&bytes).context("failed to decode signed transaction")?;
        serde_json::to_string_pretty(&stx)?
    } else {
        let tx = Transaction::decode(&bytes).context("failed to decode transaction")?;
        serde_json::to_string_pretty(&tx)?
    };
    Ok(json)
}

/// `group`: group ID as hex, or the grouped members as JSON with `assign`.
fn group(input: &str, assign: bool) -> Result<String> {
    let txns: Vec<Transaction> =
        serde_json::from_str(input).context("expected a JSON array of transactions")?;
    if assign {
        let grouped = assign_group_id(txns).context("failed to assign group ID")?;
        Ok(serde_json::to_string_pretty(&grouped)?)
    } else {
        let digest = compute_group_id(&txns).context("failed to compute group ID")?;
        Ok(digest.to_string())
    }
}

fn version() -> String {
    format!(
        "ledger-txn {}\nlibrary    {}",
        env!("CARGO_PKG_VERSION"),
        ledger_txn::config::LIBRARY_VERSION
    )
}
