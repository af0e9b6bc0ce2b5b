//! # Decode Commands
//!
//! ```text
//! txkit decode 0xf863...                                # nine raw fields as JSON
//! txkit decode-call --abi erc20.json 0xa9059cbb...      # match a selector
//! txkit decode-log --abi erc20.json -t 0xddf2... -t ... 0x...   # match a topic
//! ```
//!
//! `decode-call` and `decode-log` exit with status 1 when no catalog entry
//! matches.

use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::{Bytes, LogData, B256};
use serde_json::json;
use txkit_chain::abi::{decode_function_call, decode_log, parse_abi_json, AbiEntry};
use txkit_chain::transaction::decode_raw;

use super::{decode_hex_input, CommandError, Outcome};

/// The `txkit decode` command handler.
#[derive(Debug, Clone)]
pub struct DecodeCommand {
    /// Raw transaction hex.
    pub raw: String,
}

impl DecodeCommand {
    /// Create a new `DecodeCommand`.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Decodes the transaction into all nine fields.
    ///
    /// Numeric fields print as decimal strings and the others as `0x` hex.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not hex or not a 9-item RLP list.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        let raw = decode_hex_input(&self.raw, "raw transaction")?;
        let tx = decode_raw(&raw)?;
        Ok(Outcome::Success(serde_json::to_string_pretty(&tx)?))
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`DecodeCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }
}

/// The `txkit decode-call` command handler.
#[derive(Debug, Clone)]
pub struct DecodeCallCommand {
    /// Path to the JSON ABI.
    pub abi: PathBuf,
    /// Call data hex.
    pub data: String,
}

impl DecodeCallCommand {
    /// Create a new `DecodeCallCommand`.
    #[must_use]
    pub fn new(abi: impl Into<PathBuf>, data: impl Into<String>) -> Self {
        Self {
            abi: abi.into(),
            data: data.into(),
        }
    }

    /// Matches the call data against the ABI.
    ///
    /// # Errors
    ///
    /// Returns an error if the ABI cannot be read or parsed, the data is not
    /// hex, or the matched function's inputs do not decode.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        let catalog = load_catalog(&self.abi)?;
        let data = decode_hex_input(&self.data, "call data")?;

        let outcome = match decode_function_call(&data, &catalog)? {
            Some(call) => Outcome::Success(serde_json::to_string_pretty(&json!({
                "name": call.name,
                "selector": call.selector.to_string(),
                "params": call.params.to_json(),
            }))?),
            None => Outcome::NoMatch("no matching function".to_string()),
        };
        Ok(outcome)
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`DecodeCallCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }
}

/// The `txkit decode-log` command handler.
#[derive(Debug, Clone)]
pub struct DecodeLogCommand {
    /// Path to the JSON ABI.
    pub abi: PathBuf,
    /// Topics in log order.
    pub topics: Vec<String>,
    /// Log data hex.
    pub data: String,
}

impl DecodeLogCommand {
    /// Create a new `DecodeLogCommand`.
    #[must_use]
    pub fn new(abi: impl Into<PathBuf>, topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            abi: abi.into(),
            topics,
            data: data.into(),
        }
    }

    /// Matches the log against the ABI.
    ///
    /// # Errors
    ///
    /// Returns an error if the ABI cannot be read or parsed, a topic is not
    /// 32 bytes of hex, there are more than four topics, or the matched
    /// event does not decode.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        let catalog = load_catalog(&self.abi)?;
        let topics = self
            .topics
            .iter()
            .map(|topic| {
                topic
                    .trim()
                    .parse::<B256>()
                    .map_err(|e| CommandError::InvalidInput(format!("topic {topic}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let data = Bytes::from(decode_hex_input(&self.data, "log data")?);
        let log = LogData::new(topics, data).ok_or_else(|| {
            CommandError::InvalidInput("a log has at most four topics".to_string())
        })?;

        let outcome = match decode_log(&log, &catalog)? {
            Some(decoded) => Outcome::Success(serde_json::to_string_pretty(&json!({
                "name": decoded.name,
                "topic": decoded.topic.to_string(),
                "params": decoded.params.to_json(),
            }))?),
            None => Outcome::NoMatch("no matching event".to_string()),
        };
        Ok(outcome)
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`DecodeLogCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }
}

fn load_catalog(path: &Path) -> Result<Vec<AbiEntry>, CommandError> {
    let text = fs::read_to_string(path)?;
    let catalog = parse_abi_json(&text)?;
    tracing::debug!(path = %path.display(), entries = catalog.len(), "loaded ABI");
    Ok(catalog)
}
