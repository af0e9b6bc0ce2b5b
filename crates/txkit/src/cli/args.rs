//! # CLI Argument Definitions
//!
//! - `txkit keygen [--format hex|json]` - Generate a private key
//! - `txkit address [KEY]` - Derive the address of a private key
//! - `txkit sign [--key KEY] [--chain-id N] <TX_JSON>` - Sign a transaction
//! - `txkit serialize <TX_JSON>` - RLP-encode a transaction
//! - `txkit decode <RAW_HEX>` - Decode a raw transaction
//! - `txkit decode-call --abi FILE <DATA>` - Match call data to a function
//! - `txkit decode-log --abi FILE --topic T... <DATA>` - Match a log to an event
//! - `txkit addr-eq <A> <B>` - Compare two addresses
//! - `txkit config [show|path|init]` - Inspect or create the configuration
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level
//! - `-c, --config <PATH>` - Path to configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Build, sign, decode, and inspect legacy Ethereum transactions.
#[derive(Debug, Parser)]
#[command(name = "txkit")]
#[command(author, version, about = "Legacy Ethereum transaction toolkit")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    ///
    /// Defaults to `~/.txkit/config.toml`. A missing default file means
    /// built-in defaults; a missing explicit file is an error.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a random private key
    Keygen {
        /// Output format
        #[arg(short, long, default_value = "hex", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Print the address controlled by a private key
    ///
    /// The key may also be given through `TXKIT_PRIVATE_KEY`.
    Address {
        /// Private key hex (with or without 0x prefix)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },

    /// Sign a transaction given as JSON
    ///
    /// Numeric fields accept integers, decimal strings, or 0x hex strings.
    /// Use `-` to read the transaction from stdin.
    Sign {
        /// Private key hex; falls back to `TXKIT_PRIVATE_KEY`
        #[arg(short, long, value_name = "KEY")]
        key: Option<String>,

        /// Sign with EIP-155 replay protection for this chain
        ///
        /// Overrides `transaction.chain_id` from the configuration.
        #[arg(long, value_name = "ID")]
        chain_id: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "json", value_name = "FORMAT")]
        format: OutputFormat,

        /// Transaction JSON, or `-` for stdin
        #[arg(value_name = "TX_JSON")]
        transaction: String,
    },

    /// RLP-encode a transaction given as JSON without signing it
    Serialize {
        /// Transaction JSON, or `-` for stdin
        #[arg(value_name = "TX_JSON")]
        transaction: String,
    },

    /// Decode a raw transaction into its nine fields
    Decode {
        /// Raw transaction hex (with or without 0x prefix)
        #[arg(value_name = "RAW_HEX")]
        raw: String,
    },

    /// Match call data to a function in an ABI and decode its inputs
    ///
    /// Exits with status 1 if no function matches.
    DecodeCall {
        /// Path to a Solidity JSON ABI
        #[arg(long, value_name = "FILE")]
        abi: PathBuf,

        /// Call data hex
        #[arg(value_name = "DATA")]
        data: String,
    },

    /// Match a log to an event in an ABI and decode its inputs
    ///
    /// Exits with status 1 if no event matches.
    DecodeLog {
        /// Path to a Solidity JSON ABI
        #[arg(long, value_name = "FILE")]
        abi: PathBuf,

        /// Log topic, in order; repeat for each topic
        #[arg(short, long = "topic", value_name = "TOPIC")]
        topics: Vec<String>,

        /// Log data hex
        #[arg(value_name = "DATA", default_value = "0x")]
        data: String,
    },

    /// Compare two addresses ignoring case and prefix
    ///
    /// Exits with status 1 if they differ.
    AddrEq {
        /// First address
        a: String,
        /// Second address
        b: String,
    },

    /// Inspect or create the configuration file
    Config {
        /// Configuration action to perform (default: show)
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Configuration-related actions.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for commands that support several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bare hex
    #[default]
    Hex,
    /// Pretty-printed JSON
    Json,
}
