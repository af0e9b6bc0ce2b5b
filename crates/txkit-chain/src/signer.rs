//! Signing legacy transactions and recovering their sender.
//!
//! The legacy signing payload is the RLP list of the six unsigned fields.
//! Signatures are RFC 6979 deterministic and low-S, with `v = 27 + recId`.
//! EIP-155 replay protection is available through [`sign_eip155`], which
//! signs over `[six fields, chainId, 0, 0]` and sets
//! `v = recId + 35 + 2 * chainId`.
//!
//! # Example
//!
//! ```
//! use txkit_chain::signer::{recover_signer, sign};
//! use txkit_core::Tx;
//! use txkit_crypto::SecretKey;
//!
//! let key = SecretKey::from_hex(
//!     "ae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f",
//! ).unwrap();
//! let signed = sign(&key, &Tx::new()).unwrap();
//!
//! // Empty fields are omitted; only the signature remains.
//! assert!(signed.nonce.is_none());
//! assert_eq!(signed.v.as_ref().unwrap().as_str(), "0x1c");
//!
//! let sender = recover_signer(&signed).unwrap();
//! assert_eq!(format!("{sender:x}"), "f17f52151ebef6c7334fad080c5704d77216b732");
//! ```

use alloy_primitives::{keccak256, Address, B256};
use txkit_core::error::{SignError, TxResult};
use txkit_core::types::{Tx, TxField};
use txkit_crypto::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature, SecretKey};

use crate::codec::strip_leading_zeros;
use crate::transaction::TxRecord;

/// `v` offset for legacy signatures.
pub const LEGACY_V_OFFSET: u64 = 27;

/// `v` offset for EIP-155 signatures, before adding `2 * chainId`.
pub const EIP155_V_OFFSET: u64 = 35;

/// Keccak-256 of the legacy signing payload of `tx`.
///
/// Only the six unsigned fields contribute; any `v`, `r` or `s` on `tx` is
/// ignored.
///
/// # Errors
///
/// Returns a field error if `tx` does not normalize.
pub fn hash_for_signing(tx: &Tx) -> TxResult<B256> {
    Ok(keccak256(TxRecord::from_tx(tx)?.encode_unsigned()))
}

/// Keccak-256 of the EIP-155 signing payload of `tx` for `chain_id`.
///
/// # Errors
///
/// Returns a field error if `tx` does not normalize.
pub fn hash_for_signing_eip155(tx: &Tx, chain_id: u64) -> TxResult<B256> {
    Ok(keccak256(
        TxRecord::from_tx(tx)?.encode_eip155_payload(chain_id),
    ))
}

/// Signs transactions with one secp256k1 key.
///
/// Signing never mutates its input. The returned [`Tx`] carries every
/// non-empty field as `0x` hex of its wire bytes; `v`, `r` and `s` are
/// always present.
#[derive(Debug)]
pub struct TxSigner {
    keypair: Secp256k1KeyPair,
}

impl TxSigner {
    /// Creates a signer for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`] if the key is rejected.
    pub fn new(key: &SecretKey) -> Result<Self, SignError> {
        Ok(Self {
            keypair: Secp256k1KeyPair::from_secret_key(key)?,
        })
    }

    /// The sender address for transactions signed by this key.
    #[must_use]
    pub fn address(&self) -> Address {
        Address::from(self.keypair.address())
    }

    /// Signs `tx` with a legacy (`v = 27/28`) signature.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Tx`] if `tx` does not normalize and
    /// [`SignError::SignatureFailed`] if the primitive fails.
    pub fn sign(&self, tx: &Tx) -> Result<Tx, SignError> {
        let record = TxRecord::from_tx(tx)?;
        let hash = keccak256(record.encode_unsigned());
        let signature = self.keypair.sign_prehash(&hash.0)?;

        let v = LEGACY_V_OFFSET + u64::from(signature.recovery_id());
        tracing::debug!(signing_hash = %hash, v, "signed legacy transaction");

        Ok(attach_signature(record, u128::from(v), &signature).to_compact_tx())
    }

    /// Signs `tx` with EIP-155 replay protection for `chain_id`.
    ///
    /// # Errors
    ///
    /// Same as [`TxSigner::sign`].
    pub fn sign_eip155(&self, tx: &Tx, chain_id: u64) -> Result<Tx, SignError> {
        let record = TxRecord::from_tx(tx)?;
        let hash = keccak256(record.encode_eip155_payload(chain_id));
        let signature = self.keypair.sign_prehash(&hash.0)?;

        let v = u128::from(EIP155_V_OFFSET)
            + u128::from(signature.recovery_id())
            + 2 * u128::from(chain_id);
        tracing::debug!(signing_hash = %hash, chain_id, v, "signed EIP-155 transaction");

        Ok(attach_signature(record, v, &signature).to_compact_tx())
    }
}

fn attach_signature(record: TxRecord, v: u128, signature: &Secp256k1Signature) -> TxRecord {
    let v = v.to_be_bytes();
    record.with_signature(
        strip_leading_zeros(&v).to_vec(),
        strip_leading_zeros(signature.r()).to_vec(),
        strip_leading_zeros(signature.s()).to_vec(),
    )
}

/// Signs `tx` with `key` using a legacy signature.
///
/// # Errors
///
/// See [`TxSigner::sign`].
pub fn sign(key: &SecretKey, tx: &Tx) -> Result<Tx, SignError> {
    TxSigner::new(key)?.sign(tx)
}

/// Signs `tx` with `key` using EIP-155 replay protection.
///
/// # Errors
///
/// See [`TxSigner::sign`].
pub fn sign_eip155(key: &SecretKey, tx: &Tx, chain_id: u64) -> Result<Tx, SignError> {
    TxSigner::new(key)?.sign_eip155(tx, chain_id)
}

/// Recovers the sender of a signed transaction.
///
/// Accepts legacy (`v` of 27 or 28) and EIP-155 (`v >= 35`) signatures.
///
/// # Errors
///
/// Returns [`SignError::RecoveryFailed`] if `v` is not a recognized value,
/// `r` or `s` is missing or out of range, or no key matches.
pub fn recover_signer(tx: &Tx) -> Result<Address, SignError> {
    let record = TxRecord::from_tx(tx)?;

    let v = record.field(TxField::V);
    if v.is_empty() || v.len() > 16 {
        return Err(SignError::recovery_failed(format!(
            "unsupported v of {} bytes",
            v.len()
        )));
    }
    let v = v.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b));

    let (hash, recovery_id) = match v {
        27 | 28 => (keccak256(record.encode_unsigned()), v - 27),
        v if v >= 35 => {
            let chain_id = u64::try_from((v - 35) / 2).map_err(|_| {
                SignError::recovery_failed(format!("chain id in v={v} exceeds 64 bits"))
            })?;
            (
                keccak256(record.encode_eip155_payload(chain_id)),
                (v - 35) % 2,
            )
        }
        v => return Err(SignError::recovery_failed(format!("unsupported v={v}"))),
    };

    let signature = Secp256k1Signature::new(
        left_pad_32(record.field(TxField::R))?,
        left_pad_32(record.field(TxField::S))?,
        u8::try_from(recovery_id).map_err(|_| SignError::recovery_failed("recovery id"))?,
    );
    let public_key = Secp256k1PublicKey::recover(&hash.0, &signature)?;
    Ok(Address::from(public_key.ethereum_address()))
}

fn left_pad_32(bytes: &[u8]) -> Result<[u8; 32], SignError> {
    if bytes.len() > 32 {
        return Err(SignError::recovery_failed("signature scalar exceeds 32 bytes"));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use crate::transaction::{decode, serialize_to_hex};
    use txkit_crypto::HALF_ORDER;

    const KEY: &str = "ae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f";
    const ADDRESS: &str = "0xf17f52151ebef6c7334fad080c5704d77216b732";

    fn key() -> SecretKey {
        SecretKey::from_hex(KEY).unwrap()
    }

    fn base() -> Tx {
        Tx::new()
            .with_nonce(1u64)
            .with_gas_price(1000u64)
            .with_gas_limit(2000u64)
    }

    #[test]
    fn test_sign_transfer_matches_reference_wire_bytes() {
        let tx = base().with_to(ADDRESS).with_value(1027u64);

        assert_eq!(
            hash_for_signing(&tx).unwrap().to_string(),
            "0x51f0b0e44f72a098df5af3e306a2ad780015ec52e45401a4080aa66b821aed32"
        );

        let signed = sign(&key(), &tx).unwrap();
        assert_eq!(
            serialize_to_hex(&signed).unwrap(),
            "0xf863018203e88207d094f17f52151ebef6c7334fad080c5704d77216b732820403801ca0cb4d233f6d6198775e0654975d52ba6762c31377498fabd1f4627640830fa4d6a030da033a6054561bd69c0005006f00a60b38883b9c67af3c618bf07c72703e49"
        );
    }

    #[test]
    fn test_sign_deploy_matches_reference_wire_bytes() {
        let tx = base().with_data("aaa");
        let signed = sign(&key(), &tx).unwrap();

        assert!(signed.to.is_none());
        assert_eq!(signed.data.as_ref().unwrap().as_str(), "0x0aaa");
        assert_eq!(
            serialize_to_hex(&signed).unwrap(),
            "0xf84f018203e88207d08080820aaa1ba08430b2f4e808ff3bdf0168cd202ed811657e69f9587e9442b0fdafa49c1b9c26a02dd38f96766ab2aad062f9595aceee18a66289c6be4803d69f1c857529fd18b0"
        );
    }

    #[test]
    fn test_sign_contract_call_matches_reference_wire_bytes() {
        let tx = base().with_to(ADDRESS).with_data("aaa");
        let signed = sign(&key(), &tx).unwrap();

        assert_eq!(
            serialize_to_hex(&signed).unwrap(),
            "0xf863018203e88207d094f17f52151ebef6c7334fad080c5704d77216b73280820aaa1ca0d1ec5194b26e0426b8f864a38e1bd4d6d7b6a8f2a6f03c0152b435f787994491a00edd099eec9f0d7199868ba947ff8b5938ed347303a6fc7c153fa0a104e98029"
        );
    }

    #[test]
    fn test_sign_empty_tx_keeps_only_signature() {
        let signed = sign(&key(), &Tx::new()).unwrap();

        let json = serde_json::to_value(&signed).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["v", "r", "s"]);
        assert_eq!(json["v"], "0x1c");
        assert_eq!(
            serialize_to_hex(&signed).unwrap(),
            "0xf8498080808080801ca0d4c96aab7fd31dcb47425abcbec9a52e8248c6ca490181190424a5ca7d0e9cc1a02bea51777e53e0753479c2f8aad66f4aff7e3e06afd23b5459ef29ce7d4309c7"
        );
    }

    #[test]
    fn test_sign_gas_limit_only() {
        let signed = sign(&key(), &Tx::new().with_gas_limit(255u64)).unwrap();
        assert_eq!(signed.gas_limit.as_ref().unwrap().to_string(), "0xff");
        assert_eq!(
            serialize_to_hex(&signed).unwrap(),
            "0xf84a808081ff8080801ca06cea98b5308e1e7dc85f4c14bd186241e4a32f38744c22192a1570e24cdc4268a007229083f473933d5d1fb3dcc33fcae4b0b5b2614b320c9381ace2e759388850"
        );
    }

    #[test]
    fn test_signing_ignores_existing_signature_and_is_deterministic() {
        let tx = base().with_to(ADDRESS).with_value(1027u64);
        let first = sign(&key(), &tx).unwrap();
        let again = sign(&key(), &first).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_sign_does_not_mutate_input() {
        let tx = base();
        let before = tx.clone();
        let _ = sign(&key(), &tx).unwrap();
        assert_eq!(tx, before);
    }

    #[test]
    fn test_sign_eip155_matches_reference_wire_bytes() {
        let tx = base().with_to(ADDRESS).with_value(1027u64);
        let signed = sign_eip155(&key(), &tx, 1).unwrap();

        assert_eq!(signed.v.as_ref().unwrap().as_str(), "0x26");
        assert_eq!(
            serialize_to_hex(&signed).unwrap(),
            "0xf863018203e88207d094f17f52151ebef6c7334fad080c5704d77216b7328204038026a0434ca39b55cb5a1e5757a4eeef4c63c4985296cc08e475c5924274e286e66f99a0392380876e181947da13d659898d4cd39d0b84fd2c48b358cb4e3265ac99e8f0"
        );
    }

    #[test]
    fn test_sign_eip155_large_chain_id_encodes_wide_v() {
        let chain_id = u64::MAX;
        let signed = sign_eip155(&key(), &base(), chain_id).unwrap();
        let v = signed.v.as_ref().unwrap().as_str();
        // 2 * (2^64 - 1) + 35 needs 9 bytes.
        assert_eq!(v.len(), 2 + 18);
        assert_eq!(
            recover_signer(&signed).unwrap(),
            ADDRESS.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_recover_signer_legacy_and_eip155() {
        let tx = base().with_to(ADDRESS).with_value(1027u64);
        let expected: Address = ADDRESS.parse().unwrap();

        assert_eq!(recover_signer(&sign(&key(), &tx).unwrap()).unwrap(), expected);
        assert_eq!(
            recover_signer(&sign_eip155(&key(), &tx, 5).unwrap()).unwrap(),
            expected
        );
    }

    #[test]
    fn test_recover_signer_from_decoded_wire() {
        let wire = serialize_to_hex(&sign(&key(), &base().with_data("0x1234")).unwrap()).unwrap();
        let decoded = decode(&wire).unwrap();
        assert_eq!(
            recover_signer(&decoded).unwrap(),
            ADDRESS.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_recover_signer_rejects_bad_v() {
        assert!(matches!(
            recover_signer(&base()),
            Err(SignError::RecoveryFailed { .. })
        ));

        let mut tx = sign(&key(), &base()).unwrap();
        tx.v = Some("0x1d".into());
        assert!(matches!(
            recover_signer(&tx),
            Err(SignError::RecoveryFailed { .. })
        ));
    }

    #[test]
    fn test_signatures_are_low_s() {
        for nonce in 0u64..50 {
            let signed = sign(&key(), &base().with_nonce(nonce)).unwrap();
            let s = hex::decode(&signed.s.unwrap().as_str()[2..]).unwrap();
            let s = left_pad_32(&s).unwrap();
            assert!(s <= HALF_ORDER, "high s for nonce {nonce}");
        }
    }

    #[test]
    fn test_invalid_field_is_sign_error() {
        assert!(matches!(
            sign(&key(), &Tx::new().with_nonce("abc")),
            Err(SignError::Tx(_))
        ));
    }

    #[test]
    fn test_signer_address() {
        let signer = TxSigner::new(&key()).unwrap();
        assert_eq!(signer.address(), ADDRESS.parse::<Address>().unwrap());
    }
}
