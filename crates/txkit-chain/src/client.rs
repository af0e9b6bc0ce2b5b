//! Building, sending, and deploying transactions through an RPC node.
//!
//! The node is abstracted by [`RpcClient`]; txkit ships no transport of its
//! own. The functions here only sign locally and await the client.
//!
//! # Example
//!
//! ```
//! use std::future::Future;
//! use txkit_chain::client::{make_tx, RpcClient, TxReceipt};
//! use txkit_core::{RpcError, TxDefaults};
//! use txkit_crypto::SecretKey;
//!
//! struct Offline;
//!
//! impl RpcClient for Offline {
//!     fn transaction_count(
//!         &self,
//!         _address: &str,
//!     ) -> impl Future<Output = Result<u64, RpcError>> + Send {
//!         async { Ok(7) }
//!     }
//!
//!     fn send_raw_transaction(
//!         &self,
//!         _raw: &str,
//!     ) -> impl Future<Output = Result<TxReceipt, RpcError>> + Send {
//!         async { Err(RpcError::transport("offline")) }
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let key = SecretKey::generate();
//! let tx = make_tx(&Offline, &key, None, 0u64, Some("0x6001"), &TxDefaults::default())
//!     .await
//!     .unwrap();
//! assert_eq!(tx.nonce.unwrap().to_string(), "0x07");
//! # });
//! # fn tokio_test_block_on<F: Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};
use txkit_core::config::TxDefaults;
use txkit_core::error::RpcError;
use txkit_core::types::{HexData, Quantity, Tx};
use txkit_crypto::SecretKey;

use crate::abi::encode_constructor_args;
use crate::address::address_from_private_key;
use crate::signer::TxSigner;
use crate::transaction::serialize_to_hex;

/// The result of submitting a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// Hash of the submitted transaction.
    pub transaction_hash: String,

    /// Address of the created contract, for deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

/// The node operations txkit needs.
pub trait RpcClient {
    /// Number of transactions sent from `address`, used as the next nonce.
    fn transaction_count(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<u64, RpcError>> + Send;

    /// Submits a signed, `0x`-prefixed raw transaction and waits for its
    /// receipt.
    fn send_raw_transaction(
        &self,
        raw: &str,
    ) -> impl Future<Output = Result<TxReceipt, RpcError>> + Send;
}

/// Builds and signs a transaction from `key`.
///
/// The nonce is the sender's transaction count; gas price and limit come
/// from `defaults`. Signing is legacy unless `defaults.chain_id` is set.
///
/// # Errors
///
/// Returns [`RpcError::Transport`] if the nonce lookup fails and a signing
/// error if any field is invalid.
pub async fn make_tx<C: RpcClient>(
    client: &C,
    key: &SecretKey,
    to: Option<&str>,
    value: impl Into<Quantity>,
    data: Option<&str>,
    defaults: &TxDefaults,
) -> Result<Tx, RpcError> {
    let signer = TxSigner::new(key)?;
    let from = address_from_private_key(key)?;
    let nonce = client.transaction_count(&from).await?;

    let tx = Tx {
        nonce: Some(Quantity::from(nonce)),
        gas_price: Some(Quantity::from(defaults.gas_price.as_str())),
        gas_limit: Some(Quantity::from(defaults.gas_limit.as_str())),
        to: to.map(HexData::from),
        value: Some(value.into()),
        data: data.map(HexData::from),
        ..Tx::default()
    };

    let signed = match defaults.chain_id {
        Some(chain_id) => signer.sign_eip155(&tx, chain_id)?,
        None => signer.sign(&tx)?,
    };
    tracing::debug!(%from, nonce, chain_id = ?defaults.chain_id, "built transaction");
    Ok(signed)
}

/// Builds, signs, and submits a transaction from `key`.
///
/// # Errors
///
/// See [`make_tx`]; also returns any error from the submission.
pub async fn send_tx<C: RpcClient>(
    client: &C,
    key: &SecretKey,
    to: Option<&str>,
    value: impl Into<Quantity>,
    data: Option<&str>,
    defaults: &TxDefaults,
) -> Result<TxReceipt, RpcError> {
    let signed = make_tx(client, key, to, value, data, defaults).await?;
    let raw = serialize_to_hex(&signed)?;
    let receipt = client.send_raw_transaction(&raw).await?;
    tracing::info!(transaction_hash = %receipt.transaction_hash, "transaction sent");
    Ok(receipt)
}

/// Deploys a contract from `key` and returns its address.
///
/// The call data is `bytecode` followed by the ABI encoding of `args`
/// according to `constructor` (for example `constructor(uint256,string)`).
///
/// # Errors
///
/// Returns [`RpcError::MissingContractAddress`] if the receipt names no
/// contract, an ABI error if the arguments do not encode, and anything
/// [`send_tx`] returns.
pub async fn deploy_contract<C: RpcClient, S: AsRef<str>>(
    client: &C,
    key: &SecretKey,
    bytecode: &str,
    constructor: &str,
    args: &[S],
    defaults: &TxDefaults,
) -> Result<String, RpcError> {
    let encoded_args = encode_constructor_args(constructor, args)?;
    let bytecode = bytecode
        .strip_prefix("0x")
        .or_else(|| bytecode.strip_prefix("0X"))
        .unwrap_or(bytecode);
    let data = format!("0x{bytecode}{}", hex::encode(encoded_args));

    let receipt = send_tx(client, key, None, 0u64, Some(&data), defaults).await?;
    let address = receipt
        .contract_address
        .ok_or(RpcError::MissingContractAddress {
            transaction_hash: receipt.transaction_hash,
        })?;
    tracing::info!(contract_address = %address, "contract deployed");
    Ok(address)
}
