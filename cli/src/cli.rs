//! # CLI Interface
//!
//! Defines the command-line argument structure for `ledger-txn` using
//! `clap` derive. Supports five subcommands: `id`, `encode`, `decode`,
//! `group`, and `version`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ledger transaction inspector.
///
/// Computes transaction IDs, converts between the JSON form and the
/// canonical wire encoding, and links transactions into atomic groups.
#[derive(Parser, Debug)]
#[command(
    name = "ledger-txn",
    about = "Ledger transaction encoder and ID calculator",
    version,
    propagate_version = true
)]
pub struct LedgerTxnCli {
    /// Log output format.
    #[arg(long, global = true, value_enum, env = "LEDGER_TXN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "LEDGER_TXN_LOG", default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ID of a transaction.
    Id(IdArgs),
    /// Print the canonical encoding of a JSON transaction as hex.
    Encode(EncodeArgs),
    /// Decode hex wire bytes into JSON.
    Decode(DecodeArgs),
    /// Compute the group ID of a JSON array of transactions.
    Group(GroupArgs),
    /// Print version information and exit.
    Version,
}

/// Where a command reads its input from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file. Reads stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Encoding of a transaction given on input.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// The JSON form.
    Json,
    /// Hex of the canonical wire bytes.
    Hex,
}

/// Arguments for the `id` subcommand.
#[derive(Parser, Debug)]
pub struct IdArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// How the transaction is encoded.
    #[arg(long, short = 'f', value_enum, default_value = "json")]
    pub format: InputFormat,

    /// Print the raw 32-byte ID as hex instead of base-32.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the `encode` subcommand.
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Prefix the output with the "TX" domain tag (the bytes a signer signs).
    #[arg(long)]
    pub signable: bool,

    /// Treat the input as a signed transaction envelope.
    #[arg(long, conflicts_with = "signable")]
    pub signed: bool,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Treat the input as a signed transaction envelope.
    #[arg(long)]
    pub signed: bool,
}

/// Arguments for the `group` subcommand.
#[derive(Parser, Debug)]
pub struct GroupArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the members with the group ID filled in, instead of the ID.
    #[arg(long)]
    pub assign: bool,
}

/// `--log-format` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
}
