//! # CLI Command Handlers
//!
//! Each command is a small struct with an `execute` method that returns an
//! [`Outcome`] and a `run` method that prints it. Handlers never call
//! `std::process::exit`; `main` maps outcomes and [`CommandError`]s to exit
//! codes (see [`exit_codes`]).
//!
//! - [`keygen`] - Generate a private key
//! - [`address`] - Derive an address and compare addresses
//! - [`sign`] - Sign and serialize transactions
//! - [`decode`] - Decode raw transactions, call data, and logs
//! - [`config`] - Inspect or create the configuration

use std::io::{self, Read};

use txkit_core::error::{AbiError, ConfigError, SignError, TxError};
use txkit_core::types::Tx;
use txkit_crypto::SecretKey;

pub mod address;
pub mod config;
pub mod decode;
pub mod exit_codes;
pub mod keygen;
pub mod sign;

pub use address::{AddrEqCommand, AddressCommand};
pub use config::{load_effective_config, ConfigCommand};
pub use decode::{DecodeCallCommand, DecodeCommand, DecodeLogCommand};
pub use keygen::KeygenCommand;
pub use sign::{SerializeCommand, SignCommand, SignOutput};

use exit_codes::{EXIT_ERROR, EXIT_NO_MATCH, EXIT_SUCCESS};

/// Environment variable consulted when no key is passed on the command line.
pub const PRIVATE_KEY_ENV: &str = "TXKIT_PRIVATE_KEY";

/// Errors shared by all command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// No key on the command line and none in the environment.
    #[error("no private key given; pass one or set {PRIVATE_KEY_ENV}")]
    MissingKey,

    /// Input that is not valid hex, JSON, or a topic.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Refusing to overwrite an existing file.
    #[error("{0} already exists; use --force to overwrite")]
    AlreadyExists(String),

    /// Transaction encoding or decoding failed.
    #[error(transparent)]
    Tx(#[from] TxError),

    /// Key handling or signing failed.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// ABI parsing or decoding failed.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Configuration could not be loaded or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Printed to stdout; exit 0.
    Success(String),
    /// Printed to stdout; exit 1.
    NoMatch(String),
}

impl Outcome {
    /// The text to print.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::NoMatch(text) => text,
        }
    }

    /// The process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success(_) => EXIT_SUCCESS,
            Self::NoMatch(_) => EXIT_NO_MATCH,
        }
    }

    /// Prints the text and returns the exit code.
    #[must_use]
    pub fn print(&self) -> i32 {
        println!("{}", self.text());
        self.exit_code()
    }
}

/// Resolves the signing key from an explicit argument or [`PRIVATE_KEY_ENV`].
///
/// # Errors
///
/// Returns [`CommandError::MissingKey`] if neither is present and
/// [`CommandError::Sign`] if the key is invalid.
pub fn resolve_key(explicit: Option<&str>) -> Result<SecretKey, CommandError> {
    let (text, source) = match explicit {
        Some(key) => (key.trim().to_owned(), "argument"),
        None => match std::env::var(PRIVATE_KEY_ENV) {
            Ok(key) => (key.trim().to_owned(), "environment"),
            Err(_) => return Err(CommandError::MissingKey),
        },
    };
    tracing::debug!(source, "loading private key");
    Ok(SecretKey::from_hex(&text)?)
}

/// Reads a transaction from JSON text, or from stdin when `input` is `-`.
///
/// # Errors
///
/// Returns [`CommandError::InvalidInput`] if the JSON is not an object, has
/// a key that is not a transaction field, or has a malformed value.
pub fn read_tx_input(input: &str) -> Result<Tx, CommandError> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        input.to_owned()
    };
    let invalid =
        |e: serde_json::Error| CommandError::InvalidInput(format!("transaction JSON: {e}"));
    let value: serde_json::Value = serde_json::from_str(&text).map_err(invalid)?;
    if !value.is_object() {
        return Err(CommandError::InvalidInput("transaction JSON must be an object".into()));
    }
    serde_json::from_value(value).map_err(invalid)
}

/// Decodes hex with an optional `0x` prefix.
///
/// # Errors
///
/// Returns [`CommandError::InvalidInput`] naming `what` if the text is not
/// valid hex.
pub fn decode_hex_input(input: &str, what: &str) -> Result<Vec<u8>, CommandError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| CommandError::InvalidInput(format!("{what}: {e}")))
}
