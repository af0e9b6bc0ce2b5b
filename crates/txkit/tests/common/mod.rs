//! # Test Utilities for `txkit`
//!
//! - [`temp_data_dir`] - Create an isolated temporary directory
//! - [`write_abi`] - Write an ABI catalog into a directory
//!
//! ## Proptest Strategies
//!
//! - [`ethereum_address`] - Generate lowercase `0x` addresses
//! - [`hex_bytes`] - Generate `0x` hex byte strings
//! - [`wei_amount`] - Generate decimal wei amounts
//! - [`unsigned_tx`] - Generate unsigned legacy transactions

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;
use txkit_core::types::Tx;

/// Private key with a well known address.
pub const TEST_KEY: &str = "0xae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f";

/// Address of [`TEST_KEY`].
pub const TEST_ADDRESS: &str = "0xf17f52151ebef6c7334fad080c5704d77216b732";

/// ERC-20 `transfer` and `Transfer` entries.
pub const ERC20_ABI: &str = r#"[
    {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
     "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
     "outputs": [{"name": "", "type": "bool"}]},
    {"type": "function", "name": "approve", "stateMutability": "nonpayable",
     "inputs": [{"name": "spender", "type": "address"}, {"name": "amount", "type": "uint256"}],
     "outputs": [{"name": "", "type": "bool"}]},
    {"type": "event", "name": "Transfer", "anonymous": false,
     "inputs": [{"name": "from", "type": "address", "indexed": true},
                {"name": "to", "type": "address", "indexed": true},
                {"name": "value", "type": "uint256", "indexed": false}]}
]"#;

/// Create a temporary directory for test data.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn temp_data_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("txkit-test-")
        .tempdir()
        .expect("Failed to create temporary directory for test")
}

/// Writes [`ERC20_ABI`] to `dir/erc20.json` and returns the path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_abi(dir: &Path) -> PathBuf {
    let path = dir.join("erc20.json");
    std::fs::write(&path, ERC20_ABI).expect("Failed to write ABI fixture");
    path
}

/// Left-pads `hex_digits` to one 32-byte ABI word.
#[must_use]
pub fn abi_word(hex_digits: &str) -> String {
    format!("{hex_digits:0>64}")
}

// =============================================================================
// Proptest Strategies
// =============================================================================

/// Generate a lowercase Ethereum address with a `0x` prefix.
pub fn ethereum_address() -> impl Strategy<Value = String> {
    prop::array::uniform20(any::<u8>()).prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
}

/// Generate `0x` hex for between `min` and `max` bytes.
pub fn hex_bytes(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), min..=max)
        .prop_map(|bytes| format!("0x{}", hex::encode(bytes)))
}

/// Generate a wei amount up to `u128::MAX` as a decimal string.
pub fn wei_amount() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|amount| amount.to_string())
}

/// Generate an unsigned legacy transaction with every payload field set.
pub fn unsigned_tx() -> impl Strategy<Value = Tx> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        ethereum_address(),
        wei_amount(),
        hex_bytes(0, 64),
    )
        .prop_map(|(nonce, gas_price, gas_limit, to, value, data)| {
            Tx::new()
                .with_nonce(nonce)
                .with_gas_price(gas_price)
                .with_gas_limit(gas_limit)
                .with_to(to)
                .with_value(value)
                .with_data(data)
        })
}
