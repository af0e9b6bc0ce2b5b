//! # txkit-chain
//!
//! Legacy Ethereum transaction encoding, signing, and ABI matching.
//!
//! A transaction is built as a [`Tx`](txkit_core::Tx), normalized field by
//! field by [`codec`], laid out as a 9-item RLP list by [`transaction`], and
//! signed by [`signer`]. Decoding runs the other way and hands back the raw
//! field values without re-normalizing them.
//!
//! ```rust
//! use txkit_chain::{decode, serialize_to_hex, sign};
//! use txkit_core::Tx;
//! use txkit_crypto::SecretKey;
//!
//! let key = SecretKey::from_hex(
//!     "ae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f",
//! ).unwrap();
//!
//! let tx = Tx::new()
//!     .with_nonce(1u64)
//!     .with_gas_price(1000u64)
//!     .with_gas_limit(2000u64)
//!     .with_to("0xf17f52151ebef6c7334fad080c5704d77216b732")
//!     .with_value(1027u64);
//!
//! let wire = serialize_to_hex(&sign(&key, &tx).unwrap()).unwrap();
//! let decoded = decode(&wire).unwrap();
//! assert_eq!(decoded.value.unwrap().to_string(), "1027");
//! assert_eq!(decoded.v.unwrap().as_str(), "0x1c");
//! ```
//!
//! ## Modules
//!
//! - [`codec`] - Field normalization and the raw-bytes formatters
//! - [`rlp`] - RLP helpers for flat lists of byte strings
//! - [`transaction`] - [`TxRecord`] and the wire encoding
//! - [`signer`] - secp256k1 signing and sender recovery
//! - [`abi`] - Selector and topic matching against an ABI catalog
//! - [`address`] - Address comparison and derivation
//! - [`client`] - [`RpcClient`] and the build/send/deploy helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod abi;
pub mod address;
pub mod client;
pub mod codec;
pub mod rlp;
pub mod signer;
pub mod transaction;

pub use abi::{
    decode_function_call, decode_log, encode_constructor_args, event_topic, function_selector,
    parse_abi_json, AbiEntry, DecodedCall, DecodedLog, DecodedParams,
};

pub use address::{address_from_private_key, addresses_equal};

pub use client::{deploy_contract, make_tx, send_tx, RpcClient, TxReceipt};

pub use codec::{
    bytes_to_decimal_string, bytes_to_hex_string, compact_tx, field_set_to_tx,
    hex_field_bytes, normalize_hex_field, normalize_numeric, numeric_bytes,
};

pub use signer::{
    hash_for_signing, hash_for_signing_eip155, recover_signer, sign, sign_eip155, TxSigner,
};

pub use transaction::{decode, decode_raw, encode, serialize_to_hex, transaction_hash, TxRecord};

pub use alloy_primitives::{Address, LogData, B256};
