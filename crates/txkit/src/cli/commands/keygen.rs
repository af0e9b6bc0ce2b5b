//! # Keygen Command
//!
//! ```text
//! txkit keygen                # 0x-prefixed private key
//! txkit keygen --format json  # {"privateKey": ..., "address": ...}
//! ```

use serde::Serialize;
use txkit_chain::address::address_from_private_key;
use txkit_crypto::SecretKey;

use super::{CommandError, Outcome};
use crate::cli::args::OutputFormat;

/// JSON output of `txkit keygen`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeygenOutput {
    /// The new private key, `0x` hex.
    pub private_key: String,
    /// Its address, `0x` lowercase hex.
    pub address: String,
}

/// The `txkit keygen` command handler.
#[derive(Debug, Clone, Copy)]
pub struct KeygenCommand {
    /// Output format.
    pub format: OutputFormat,
}

impl KeygenCommand {
    /// Create a new `KeygenCommand`.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Generates a key from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON output cannot be produced.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        self.execute_with_key(&SecretKey::generate())
    }

    fn execute_with_key(&self, key: &SecretKey) -> Result<Outcome, CommandError> {
        let private_key = format!("0x{}", key.to_hex().as_str());
        let text = match self.format {
            OutputFormat::Hex => private_key,
            OutputFormat::Json => serde_json::to_string_pretty(&KeygenOutput {
                private_key,
                address: address_from_private_key(key)?,
            })?,
        };
        tracing::info!("generated private key");
        Ok(Outcome::Success(text))
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`KeygenCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }
}
