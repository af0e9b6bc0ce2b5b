//! # txkit-core
//!
//! Core types, configuration, and error definitions shared by the txkit crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`types`] - The transaction value model ([`Tx`], [`Quantity`], [`HexData`], [`TxField`])
//! - [`config`] - Configuration structures ([`Config`], [`TxDefaults`])
//! - [`config_loader`] - Reading and writing `~/.txkit/config.toml`
//!
//! ## Example
//!
//! ```rust
//! use txkit_core::{Config, Tx, TxField};
//!
//! let defaults = Config::default().transaction;
//! let tx = Tx::new()
//!     .with_nonce(0u64)
//!     .with_gas_price(defaults.gas_price.as_str())
//!     .with_gas_limit(defaults.gas_limit.as_str());
//!
//! assert!(tx.get(TxField::GasLimit).is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod config_loader;
pub mod error;
pub mod types;

pub use error::{
    AbiError, ConfigError, Result, RpcError, SignError, TxError, TxKitError, TxResult,
};

pub use config::{Config, ConfigBuilder, LoggingConfig, TxDefaults};

pub use config_loader::{expand_path, load_config, load_from_path, ConfigLoader};

pub use types::{FieldKind, FieldValue, HexData, Quantity, Tx, TxField};
