//! The 9-field legacy transaction record and its wire encoding.
//!
//! A [`TxRecord`] holds the normalized byte form of every field in wire
//! order `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`. It is
//! built from a caller's [`Tx`] with [`TxRecord::from_tx`] and encoded as a
//! single RLP list.
//!
//! # Example
//!
//! ```
//! use txkit_chain::transaction::{decode, serialize_to_hex};
//! use txkit_core::Tx;
//!
//! let tx = Tx::new().with_nonce(1u64).with_gas_limit("0xff");
//! let wire = serialize_to_hex(&tx).unwrap();
//! assert_eq!(wire, "0xca018081ff8080801c8080");
//!
//! let decoded = decode(&wire).unwrap();
//! assert_eq!(decoded.nonce.unwrap().to_string(), "1");
//! assert_eq!(decoded.gas_limit.unwrap().to_string(), "255");
//! assert_eq!(decoded.to.unwrap().as_str(), "0x");
//! ```

use alloy_primitives::{keccak256, B256};
use txkit_core::error::{TxError, TxResult};
use txkit_core::types::{Tx, TxField};

use crate::codec::{compact_tx, field_bytes, field_set_to_tx, strip_leading_zeros};
use crate::rlp::{decode_list, decode_string, encode_list};

/// Number of items in a signed legacy transaction.
pub const FIELD_COUNT: usize = 9;

/// The `v` byte encoded when a transaction carries no `v` at all.
pub const DEFAULT_V: u8 = 0x1c;

/// The normalized bytes of all nine fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxRecord {
    fields: [Vec<u8>; FIELD_COUNT],
}

impl TxRecord {
    /// Normalizes every field of `tx` into its wire bytes.
    ///
    /// Numeric fields go through the numeric path and hex fields through
    /// the hex path. Absent fields become the empty byte string, except an
    /// absent `v`, which becomes [`DEFAULT_V`]. An explicit empty `v`
    /// (`"0x"`) stays empty.
    ///
    /// # Errors
    ///
    /// Returns the first field error: [`TxError::InvalidNumber`],
    /// [`TxError::InvalidHex`], or [`TxError::InvalidFieldLength`].
    pub fn from_tx(tx: &Tx) -> TxResult<Self> {
        let mut fields: [Vec<u8>; FIELD_COUNT] = Default::default();
        for (slot, field) in fields.iter_mut().zip(TxField::ALL) {
            *slot = field_bytes(field, tx.get(field))?;
        }
        if tx.v.is_none() {
            fields[TxField::V as usize] = vec![DEFAULT_V];
        }
        Ok(Self { fields })
    }

    /// Builds a record from raw field bytes without normalizing them.
    #[must_use]
    pub const fn from_fields(fields: [Vec<u8>; FIELD_COUNT]) -> Self {
        Self { fields }
    }

    /// Parses a wire-encoded transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TxError::MalformedTransaction`] unless `raw` is exactly one
    /// RLP list of nine byte strings, and [`TxError::InvalidRlp`] for
    /// undecodable RLP.
    pub fn decode(raw: &[u8]) -> TxResult<Self> {
        let items = decode_list(raw)?;
        if items.len() != FIELD_COUNT {
            return Err(TxError::malformed_transaction(format!(
                "expected {FIELD_COUNT} items, got {}",
                items.len()
            )));
        }

        let mut fields: [Vec<u8>; FIELD_COUNT] = Default::default();
        for (slot, item) in fields.iter_mut().zip(items) {
            *slot = decode_string(item)?.to_vec();
        }
        Ok(Self { fields })
    }

    /// Bytes of one field.
    #[must_use]
    pub fn field(&self, field: TxField) -> &[u8] {
        &self.fields[field as usize]
    }

    /// All nine fields in wire order.
    #[must_use]
    pub const fn fields(&self) -> &[Vec<u8>; FIELD_COUNT] {
        &self.fields
    }

    /// Replaces `v`, `r` and `s`.
    #[must_use]
    pub fn with_signature(mut self, v: Vec<u8>, r: Vec<u8>, s: Vec<u8>) -> Self {
        self.fields[TxField::V as usize] = v;
        self.fields[TxField::R as usize] = r;
        self.fields[TxField::S as usize] = s;
        self
    }

    /// RLP list of all nine fields.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode_list(&self.fields)
    }

    /// RLP list of the six unsigned fields: the legacy signing payload.
    #[must_use]
    pub fn encode_unsigned(&self) -> Vec<u8> {
        encode_list(&self.fields[..TxField::UNSIGNED.len()])
    }

    /// RLP list of the six unsigned fields followed by `chain_id, 0, 0`.
    #[must_use]
    pub fn encode_eip155_payload(&self, chain_id: u64) -> Vec<u8> {
        let chain_id = chain_id.to_be_bytes();
        let chain_id = strip_leading_zeros(&chain_id);

        let mut items: Vec<&[u8]> = self.fields[..TxField::UNSIGNED.len()]
            .iter()
            .map(Vec::as_slice)
            .collect();
        let empty: &[u8] = &[];
        items.extend([chain_id, empty, empty]);
        encode_list(&items)
    }

    /// The caller-facing view: numeric fields as decimal strings, hex fields
    /// as `0x` hex, every field present.
    #[must_use]
    pub fn to_tx(&self) -> Tx {
        field_set_to_tx(&self.fields)
    }

    /// Every non-empty field as `0x` hex of its bytes.
    #[must_use]
    pub fn to_compact_tx(&self) -> Tx {
        compact_tx(&self.fields)
    }

    /// Keccak-256 of [`TxRecord::encode`].
    #[must_use]
    pub fn hash(&self) -> B256 {
        keccak256(self.encode())
    }
}

/// Normalizes `tx` and returns its RLP encoding.
///
/// # Errors
///
/// See [`TxRecord::from_tx`].
pub fn encode(tx: &Tx) -> TxResult<Vec<u8>> {
    Ok(TxRecord::from_tx(tx)?.encode())
}

/// Normalizes `tx` and returns `0x` plus lowercase hex of its encoding.
///
/// # Errors
///
/// See [`TxRecord::from_tx`].
pub fn serialize_to_hex(tx: &Tx) -> TxResult<String> {
    Ok(format!("0x{}", hex::encode(encode(tx)?)))
}

/// Keccak-256 of the encoded transaction.
///
/// # Errors
///
/// See [`TxRecord::from_tx`].
pub fn transaction_hash(tx: &Tx) -> TxResult<B256> {
    Ok(TxRecord::from_tx(tx)?.hash())
}

/// Decodes wire bytes given as hex, with or without `0x`.
///
/// # Errors
///
/// Returns [`TxError::InvalidHex`] if `wire_hex` is not hex, otherwise the
/// errors of [`decode_raw`].
pub fn decode(wire_hex: &str) -> TxResult<Tx> {
    let digits = wire_hex
        .strip_prefix("0x")
        .or_else(|| wire_hex.strip_prefix("0X"))
        .unwrap_or(wire_hex);
    let raw = hex::decode(digits).map_err(|_| TxError::invalid_hex("transaction", wire_hex))?;
    decode_raw(&raw)
}

/// Decodes wire bytes into a [`Tx`] with every field present.
///
/// # Errors
///
/// See [`TxRecord::decode`].
pub fn decode_raw(raw: &[u8]) -> TxResult<Tx> {
    let record = TxRecord::decode(raw)?;
    tracing::trace!(len = raw.len(), "decoded legacy transaction");
    Ok(record.to_tx())
}
