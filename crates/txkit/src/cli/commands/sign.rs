//! # Sign and Serialize Commands
//!
//! ```text
//! txkit sign --key 0x... '{"nonce": 1, "gasPrice": 1000, "gasLimit": 2000}'
//! txkit sign --chain-id 1 --format hex - < tx.json
//! txkit serialize '{"nonce": 1}'
//! ```
//!
//! ## Output
//!
//! `sign --format json` (the default) prints:
//!
//! ```json
//! {
//!   "transaction": { "nonce": "0x01", "v": "0x1c", "r": "0x...", "s": "0x..." },
//!   "raw": "0xf8...",
//!   "hash": "0x...",
//!   "from": "0x..."
//! }
//! ```
//!
//! `sign --format hex` prints only `raw`.

use serde::Serialize;
use txkit_chain::signer::TxSigner;
use txkit_chain::transaction::{serialize_to_hex, transaction_hash};
use txkit_core::config::TxDefaults;
use txkit_core::types::Tx;

use super::{read_tx_input, resolve_key, CommandError, Outcome};
use crate::cli::args::OutputFormat;

/// JSON output of `txkit sign`.
#[derive(Debug, Clone, Serialize)]
pub struct SignOutput {
    /// The signed transaction; empty fields are omitted.
    pub transaction: Tx,
    /// The RLP wire encoding, `0x` hex.
    pub raw: String,
    /// Keccak-256 of `raw`.
    pub hash: String,
    /// The signer's address.
    pub from: String,
}

/// The `txkit sign` command handler.
#[derive(Debug, Clone)]
pub struct SignCommand {
    /// Private key hex; `None` reads the environment.
    pub key: Option<String>,
    /// Explicit chain id; overrides the configured one.
    pub chain_id: Option<u64>,
    /// Output format.
    pub format: OutputFormat,
    /// Transaction JSON or `-`.
    pub transaction: String,
}

impl SignCommand {
    /// Create a new `SignCommand`.
    #[must_use]
    pub fn new(
        key: Option<String>,
        chain_id: Option<u64>,
        format: OutputFormat,
        transaction: impl Into<String>,
    ) -> Self {
        Self {
            key,
            chain_id,
            format,
            transaction: transaction.into(),
        }
    }

    /// Signs the transaction.
    ///
    /// Uses EIP-155 when a chain id is given on the command line or in
    /// `defaults`, and a legacy signature otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or transaction is invalid.
    pub fn execute(&self, defaults: &TxDefaults) -> Result<Outcome, CommandError> {
        let key = resolve_key(self.key.as_deref())?;
        let tx = read_tx_input(&self.transaction)?;
        let signer = TxSigner::new(&key)?;

        let signed = match self.chain_id.or(defaults.chain_id) {
            Some(chain_id) => signer.sign_eip155(&tx, chain_id)?,
            None => signer.sign(&tx)?,
        };
        let raw = serialize_to_hex(&signed)?;
        tracing::info!(from = %signer.address(), "signed transaction");

        let text = match self.format {
            OutputFormat::Hex => raw,
            OutputFormat::Json => serde_json::to_string_pretty(&SignOutput {
                hash: transaction_hash(&signed)?.to_string(),
                from: format!("{:#x}", signer.address()),
                transaction: signed,
                raw,
            })?,
        };
        Ok(Outcome::Success(text))
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`SignCommand::execute`].
    pub fn run(&self, defaults: &TxDefaults) -> Result<i32, CommandError> {
        Ok(self.execute(defaults)?.print())
    }
}

/// The `txkit serialize` command handler.
#[derive(Debug, Clone)]
pub struct SerializeCommand {
    /// Transaction JSON or `-`.
    pub transaction: String,
}

impl SerializeCommand {
    /// Create a new `SerializeCommand`.
    #[must_use]
    pub fn new(transaction: impl Into<String>) -> Self {
        Self {
            transaction: transaction.into(),
        }
    }

    /// Encodes the transaction as given, signature fields included.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is invalid.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        let tx = read_tx_input(&self.transaction)?;
        Ok(Outcome::Success(serialize_to_hex(&tx)?))
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`SerializeCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }
}
