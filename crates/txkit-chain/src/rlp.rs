//! RLP helpers for flat lists of byte strings.
//!
//! Legacy transactions are a single RLP list whose items are all byte
//! strings. These helpers wrap `alloy-rlp` for exactly that shape and map
//! failures onto [`TxError`].
//!
//! # Example
//!
//! ```
//! use txkit_chain::rlp::{decode_list, decode_string, encode_list};
//!
//! let encoded = encode_list(&[&[0x01u8][..], &[][..], &[0x04, 0x03][..]]);
//! assert_eq!(encoded, [0xc5, 0x01, 0x80, 0x82, 0x04, 0x03]);
//!
//! let items = decode_list(&encoded).unwrap();
//! assert_eq!(items.len(), 3);
//! assert_eq!(decode_string(items[2]).unwrap(), &[0x04, 0x03]);
//! ```

use alloy_rlp::{Encodable, Header, PayloadView};
use txkit_core::error::{TxError, TxResult};

/// Returns `true` if `data` starts with an RLP list prefix (`0xc0..=0xff`).
#[must_use]
pub fn is_list(data: &[u8]) -> bool {
    data.first().is_some_and(|&b| b >= 0xc0)
}

/// Encodes `items` as an RLP list of byte strings.
///
/// A single byte below `0x80` encodes as itself, strings up to 55 bytes get a
/// `0x80 + len` prefix, and longer strings use the long-form length prefix.
#[must_use]
pub fn encode_list<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let payload_length: usize = items.iter().map(|item| item.as_ref().length()).sum();
    let header = Header {
        list: true,
        payload_length,
    };

    let mut out = Vec::with_capacity(header.length() + payload_length);
    header.encode(&mut out);
    for item in items {
        item.as_ref().encode(&mut out);
    }
    out
}

/// Splits an RLP list into its raw, still-encoded items.
///
/// The input must be exactly one list with nothing after it.
///
/// # Errors
///
/// Returns [`TxError::InvalidRlp`] if the header is malformed or the payload
/// is truncated, and [`TxError::MalformedTransaction`] if the input is a
/// string or has trailing bytes.
///
/// # Example
///
/// ```
/// use txkit_chain::rlp::decode_list;
///
/// assert_eq!(decode_list(&[0xc0]).unwrap().len(), 0);
///
/// let items = decode_list(&[0xc2, 0x01, 0x02]).unwrap();
/// assert_eq!(items, vec![&[0x01][..], &[0x02][..]]);
///
/// assert!(decode_list(&[0xc1, 0x01, 0xff]).is_err());
/// ```
pub fn decode_list(data: &[u8]) -> TxResult<Vec<&[u8]>> {
    let mut buf = data;
    let payload = Header::decode_raw(&mut buf)
        .map_err(|e| TxError::invalid_rlp(format!("failed to decode list: {e}")))?;

    let items = match payload {
        PayloadView::List(items) => items,
        PayloadView::String(_) => {
            return Err(TxError::malformed_transaction("expected list, found string"))
        }
    };

    if !buf.is_empty() {
        return Err(TxError::malformed_transaction(format!(
            "{} trailing bytes after list",
            buf.len()
        )));
    }

    Ok(items)
}

/// Decodes one encoded item as a byte string.
///
/// # Errors
///
/// Returns [`TxError::MalformedTransaction`] if the item is a nested list and
/// [`TxError::InvalidRlp`] if it is not canonical RLP.
pub fn decode_string(item: &[u8]) -> TxResult<&[u8]> {
    if is_list(item) {
        return Err(TxError::malformed_transaction(
            "expected byte string, found nested list",
        ));
    }

    let mut buf = item;
    let bytes = Header::decode_bytes(&mut buf, false)
        .map_err(|e| TxError::invalid_rlp(format!("failed to decode bytes: {e}")))?;

    if !buf.is_empty() {
        return Err(TxError::invalid_rlp("trailing bytes after string item"));
    }

    Ok(bytes)
}
