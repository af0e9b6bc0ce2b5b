//! Configuration types for txkit.
//!
//! Configuration is stored in TOML format at `~/.txkit/config.toml`. Every
//! field has a default, so an empty or missing file yields [`Config::default`].
//!
//! # Examples
//!
//! ```
//! use txkit_core::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.transaction.gas_price, "100000000000");
//! assert_eq!(config.transaction.gas_limit, "6000000");
//! assert_eq!(config.transaction.chain_id, None);
//! ```
//!
//! # Default TOML Output
//!
//! ```toml
//! [transaction]
//! gas_price = "100000000000"
//! gas_limit = "6000000"
//! # chain_id = 1
//!
//! [logging]
//! level = "warn"
//! format = "pretty"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Defaults applied when building transactions against a node.
    #[serde(default)]
    pub transaction: TxDefaults,

    /// Logging output settings for the command-line front end.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_gas_price() -> String {
    "100000000000".to_string()
}

fn default_gas_limit() -> String {
    "6000000".to_string()
}

/// Gas and chain defaults for transactions built by the orchestration layer.
///
/// Passed explicitly to `make_tx`, `send_tx` and `deploy_contract`. The
/// core codec and signer never read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxDefaults {
    /// Gas price in wei, as a decimal or `0x` hex string.
    #[serde(default = "default_gas_price")]
    pub gas_price: String,

    /// Gas limit, as a decimal or `0x` hex string.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: String,

    /// When set, transactions are signed with EIP-155 replay protection for
    /// this chain. Absent means legacy `v = 27/28` signatures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl Default for TxDefaults {
    fn default() -> Self {
        Self {
            gas_price: default_gas_price(),
            gas_limit: default_gas_limit(),
            chain_id: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One of `pretty`, `json`, `compact`.
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional log file; output is rotated daily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

fn is_quantity_text(value: &str) -> bool {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()),
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if:
    /// - `transaction.gas_price` or `transaction.gas_limit` is not a decimal
    ///   or `0x` hex integer
    /// - `transaction.chain_id` is zero
    /// - `logging.level` or `logging.format` is not a known value
    ///
    /// # Examples
    ///
    /// ```
    /// use txkit_core::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.transaction.gas_limit = "lots".to_string();
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_quantity_text(&self.transaction.gas_price) {
            return Err(ConfigError::invalid_value(
                "transaction.gas_price",
                &self.transaction.gas_price,
            ));
        }

        if !is_quantity_text(&self.transaction.gas_limit) {
            return Err(ConfigError::invalid_value(
                "transaction.gas_limit",
                &self.transaction.gas_limit,
            ));
        }

        if self.transaction.chain_id == Some(0) {
            return Err(ConfigError::invalid_value("transaction.chain_id", "0"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                &self.logging.level,
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.format",
                &self.logging.format,
            ));
        }

        Ok(())
    }

    /// Generates the default configuration as a commented TOML string.
    #[must_use]
    pub fn default_toml() -> String {
        r#"[transaction]
gas_price = "100000000000"
gas_limit = "6000000"
# chain_id = 1  # sign with EIP-155 replay protection

[logging]
level = "warn"
format = "pretty"
# file = "~/.txkit/txkit.log"
"#
        .to_string()
    }

    /// Creates a configuration builder for customizing values.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for creating customized [`Config`] instances.
///
/// # Examples
///
/// ```
/// use txkit_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .gas_price("1000")
///     .gas_limit("21000")
///     .chain_id(5)
///     .build();
///
/// assert_eq!(config.transaction.gas_price, "1000");
/// assert_eq!(config.transaction.chain_id, Some(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a builder seeded with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default gas price.
    #[must_use]
    pub fn gas_price(mut self, gas_price: impl Into<String>) -> Self {
        self.config.transaction.gas_price = gas_price.into();
        self
    }

    /// Sets the default gas limit.
    #[must_use]
    pub fn gas_limit(mut self, gas_limit: impl Into<String>) -> Self {
        self.config.transaction.gas_limit = gas_limit.into();
        self
    }

    /// Enables EIP-155 signing for `chain_id`.
    #[must_use]
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.transaction.chain_id = Some(chain_id);
        self
    }

    /// Sets the log level.
    #[must_use]
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Sets the log format.
    #[must_use]
    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
