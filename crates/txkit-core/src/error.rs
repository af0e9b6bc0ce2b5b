//! Error types for txkit.
//!
//! Errors are organized by domain:
//!
//! - [`TxError`] - Field normalization, RLP encoding and decoding failures
//! - [`SignError`] - Key and signing failures
//! - [`AbiError`] - Interface catalog and ABI parameter codec failures
//! - [`RpcError`] - Failures reported by a network collaborator
//! - [`ConfigError`] - Configuration failures
//! - [`TxKitError`] - Top-level error that wraps all of the above
//!
//! # Example
//!
//! ```rust
//! use txkit_core::error::{TxError, TxKitError};
//!
//! fn decode(data: &[u8]) -> Result<(), TxKitError> {
//!     if data.is_empty() {
//!         return Err(TxError::malformed_transaction("empty input").into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(decode(&[]).is_err());
//! ```

/// Top-level error type for txkit.
#[derive(Debug, thiserror::Error)]
pub enum TxKitError {
    /// A transaction could not be normalized, encoded, or decoded.
    #[error("transaction error: {0}")]
    Tx(#[from] TxError),

    /// Signing failed.
    #[error("signing error: {0}")]
    Sign(#[from] SignError),

    /// ABI matching or decoding failed.
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// The network collaborator reported a failure.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

// ============================================================================
// TxError
// ============================================================================

/// Errors raised while normalizing, encoding, or decoding a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    /// A numeric field is not an integer, decimal string, or `0x` hex string.
    #[error("invalid number: {value:?}")]
    InvalidNumber {
        /// The rejected input.
        value: String,
    },

    /// A hex field contains characters that are not hex digits.
    #[error("invalid hex in field {field}: {value:?}")]
    InvalidHex {
        /// The field name.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A field decoded to a byte length the transaction format does not allow.
    #[error("invalid length for field {field}: expected {expected}, got {actual} bytes")]
    InvalidFieldLength {
        /// The field name.
        field: String,
        /// Human readable description of the allowed length.
        expected: String,
        /// The observed length in bytes.
        actual: usize,
    },

    /// RLP decoding failed.
    #[error("RLP decoding failed: {context}")]
    InvalidRlp {
        /// Context about what was being decoded.
        context: String,
    },

    /// The wire structure is not a 9-item list of byte strings.
    #[error("malformed transaction: {context}")]
    MalformedTransaction {
        /// Context about what was malformed.
        context: String,
    },
}

impl TxError {
    /// Create an `InvalidNumber` error.
    #[must_use]
    pub fn invalid_number(value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            value: value.into(),
        }
    }

    /// Create an `InvalidHex` error.
    #[must_use]
    pub fn invalid_hex(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidHex {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an `InvalidFieldLength` error.
    #[must_use]
    pub fn invalid_field_length(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: usize,
    ) -> Self {
        Self::InvalidFieldLength {
            field: field.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create an `InvalidRlp` error with context.
    #[must_use]
    pub fn invalid_rlp(context: impl Into<String>) -> Self {
        Self::InvalidRlp {
            context: context.into(),
        }
    }

    /// Create a `MalformedTransaction` error with context.
    #[must_use]
    pub fn malformed_transaction(context: impl Into<String>) -> Self {
        Self::MalformedTransaction {
            context: context.into(),
        }
    }
}

// ============================================================================
// SignError
// ============================================================================

/// Errors that can occur during key handling and signing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// The private key is not a scalar in `(0, n)` or is not 32 bytes.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// The signing primitive failed.
    #[error("signature failed: {context}")]
    SignatureFailed {
        /// Context about why signing failed.
        context: String,
    },

    /// The signer could not be recovered from a signature.
    #[error("public key recovery failed: {context}")]
    RecoveryFailed {
        /// Context about why recovery failed.
        context: String,
    },

    /// The transaction could not be prepared for signing.
    #[error(transparent)]
    Tx(#[from] TxError),
}

impl SignError {
    /// Create a `SignatureFailed` error with context.
    #[must_use]
    pub fn signature_failed(context: impl Into<String>) -> Self {
        Self::SignatureFailed {
            context: context.into(),
        }
    }

    /// Create a `RecoveryFailed` error with context.
    #[must_use]
    pub fn recovery_failed(context: impl Into<String>) -> Self {
        Self::RecoveryFailed {
            context: context.into(),
        }
    }
}

// ============================================================================
// AbiError
// ============================================================================

/// Errors raised by the interface matcher.
///
/// A call or log that matches no catalog entry is not an error; the
/// matcher returns `Ok(None)` for that case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The JSON interface description could not be parsed.
    #[error("invalid ABI catalog: {context}")]
    InvalidCatalog {
        /// Context about the parsing failure.
        context: String,
    },

    /// A matched entry failed to decode its parameters.
    #[error("failed to decode {name}: {context}")]
    Decode {
        /// The function or event name.
        name: String,
        /// The underlying codec message.
        context: String,
    },

    /// Arguments could not be ABI encoded.
    #[error("failed to encode arguments: {context}")]
    Encode {
        /// The underlying codec message.
        context: String,
    },
}

impl AbiError {
    /// Create an `InvalidCatalog` error.
    #[must_use]
    pub fn invalid_catalog(context: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            context: context.into(),
        }
    }

    /// Create a `Decode` error.
    #[must_use]
    pub fn decode(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Decode {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Create an `Encode` error.
    #[must_use]
    pub fn encode(context: impl Into<String>) -> Self {
        Self::Encode {
            context: context.into(),
        }
    }
}

// ============================================================================
// RpcError
// ============================================================================

/// Errors raised while talking to a node.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The transport or the node rejected the request.
    #[error("transport failure: {context}")]
    Transport {
        /// Context reported by the client implementation.
        context: String,
    },

    /// A deployment receipt carried no contract address.
    #[error("receipt for {transaction_hash} has no contract address")]
    MissingContractAddress {
        /// The hash of the deployment transaction.
        transaction_hash: String,
    },

    /// Building the transaction failed before it was sent.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// Encoding constructor arguments failed.
    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl RpcError {
    /// Create a `Transport` error.
    #[must_use]
    pub fn transport(context: impl Into<String>) -> Self {
        Self::Transport {
            context: context.into(),
        }
    }
}

impl From<TxError> for RpcError {
    fn from(error: TxError) -> Self {
        Self::Sign(SignError::Tx(error))
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {context}")]
    ParseFailed {
        /// Context about the parsing failure.
        context: String,
    },

    /// A configuration value is invalid.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// The field name with the invalid value.
        field: String,
        /// The invalid value.
        value: String,
    },

    /// Reading or writing the configuration file failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    /// Create a `FileNotFound` error.
    #[must_use]
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a `ParseFailed` error.
    #[must_use]
    pub fn parse_failed(context: impl Into<String>) -> Self {
        Self::ParseFailed {
            context: context.into(),
        }
    }

    /// Create an `InvalidValue` error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an `Io` error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a `NoHomeDirectory` error.
    #[must_use]
    pub const fn no_home_directory() -> Self {
        Self::NoHomeDirectory
    }
}

// ============================================================================
// Result type aliases
// ============================================================================

/// A `Result` type alias using [`TxKitError`] as the error type.
pub type Result<T> = std::result::Result<T, TxKitError>;

/// A `Result` type alias for transaction codec operations.
pub type TxResult<T> = std::result::Result<T, TxError>;

/// A `Result` type alias for signing operations.
pub type SignResult<T> = std::result::Result<T, SignError>;

/// A `Result` type alias for ABI operations.
pub type AbiResult<T> = std::result::Result<T, AbiError>;

/// A `Result` type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// Unit Tests
// ============================================================================
