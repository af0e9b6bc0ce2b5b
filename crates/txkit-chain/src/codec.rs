//! Field normalization between caller-facing values and wire bytes.
//!
//! Encoding direction:
//!
//! - Numeric fields (`nonce`, `gasPrice`, `gasLimit`, `value`) accept an
//!   integer, a decimal string, or a `0x` hex string and become minimal
//!   big-endian bytes. Zero is the empty byte string.
//! - Hex fields (`to`, `data`, `v`, `r`, `s`) are lower-cased, stripped of
//!   `0x`, left-padded to an even number of digits, and decoded.
//!
//! Decoding direction turns raw bytes back into a [`Tx`]. Decoded numeric
//! fields are decimal strings; they are not re-normalized to hex.
//!
//! # Example
//!
//! ```
//! use txkit_chain::codec::{normalize_hex_field, normalize_numeric};
//! use txkit_core::{HexData, Quantity};
//!
//! assert_eq!(normalize_numeric(&Quantity::from(255u64)).unwrap(), "0xff");
//! assert_eq!(normalize_numeric(&Quantity::from("0x00FF")).unwrap(), "0xff");
//! assert_eq!(normalize_numeric(&Quantity::from("0")).unwrap(), "0x0");
//! assert!(normalize_numeric(&Quantity::from("-1")).is_err());
//!
//! assert_eq!(normalize_hex_field(&HexData::from("0XABcd")), "0xabcd");
//! ```

use num_bigint::BigUint;
use txkit_core::error::{TxError, TxResult};
use txkit_core::types::{FieldValue, HexData, Quantity, Tx, TxField};

/// Maximum byte length of a numeric field or signature scalar.
pub const MAX_SCALAR_LEN: usize = 32;

/// Length of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

fn strip_hex_prefix(value: &str) -> Option<&str> {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
}

/// Parses a quantity as an arbitrary-precision unsigned integer.
///
/// Accepted forms are a non-empty run of ASCII digits, or `0x`/`0X`
/// followed by a non-empty run of hex digits.
///
/// # Errors
///
/// Returns [`TxError::InvalidNumber`] for anything else, including signs,
/// fractions, exponents such as `1e3`, whitespace, and a bare `0x`.
pub fn parse_quantity(value: &Quantity) -> TxResult<BigUint> {
    let text = match value {
        Quantity::Number(n) => return Ok(BigUint::from(*n)),
        Quantity::Text(text) => text.as_str(),
    };

    let parsed = match strip_hex_prefix(text) {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
            BigUint::parse_bytes(digits.as_bytes(), 16)
        }
        Some(_) => None,
        None if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            BigUint::parse_bytes(text.as_bytes(), 10)
        }
        None => None,
    };

    parsed.ok_or_else(|| TxError::invalid_number(text))
}

/// Canonical lowercase `0x` hex of a numeric value, without leading zero
/// nibbles. Zero is `0x0`.
///
/// # Errors
///
/// Returns [`TxError::InvalidNumber`] if `value` does not parse.
pub fn normalize_numeric(value: &Quantity) -> TxResult<String> {
    Ok(format!("0x{}", parse_quantity(value)?.to_str_radix(16)))
}

/// Lowercase `0x`-prefixed form of a hex field.
///
/// Digits are not validated here; malformed input fails at encode time.
#[must_use]
pub fn normalize_hex_field(value: &HexData) -> String {
    let text = value.as_str();
    let digits = strip_hex_prefix(text).unwrap_or(text);
    format!("0x{}", digits.to_ascii_lowercase())
}

/// Minimal big-endian bytes of a numeric field.
///
/// # Errors
///
/// Returns [`TxError::InvalidNumber`] if the value does not parse and
/// [`TxError::InvalidFieldLength`] if it needs more than 32 bytes.
pub fn numeric_bytes(field: TxField, value: &Quantity) -> TxResult<Vec<u8>> {
    let n = parse_quantity(value)?;
    let bytes = if n.bits() == 0 {
        Vec::new()
    } else {
        n.to_bytes_be()
    };

    if bytes.len() > MAX_SCALAR_LEN {
        return Err(TxError::invalid_field_length(
            field.name(),
            "at most 32 bytes",
            bytes.len(),
        ));
    }
    Ok(bytes)
}

/// Bytes of a hex field, with the per-field length rules applied.
///
/// - `to` must be exactly 20 bytes or empty.
/// - `r` and `s` have leading zero bytes stripped and must then fit in 32 bytes.
/// - `data` and `v` are taken as given.
///
/// # Errors
///
/// Returns [`TxError::InvalidHex`] for non-hex digits and
/// [`TxError::InvalidFieldLength`] when a length rule is violated.
pub fn hex_field_bytes(field: TxField, value: &HexData) -> TxResult<Vec<u8>> {
    let normalized = normalize_hex_field(value);
    let digits = &normalized[2..];

    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    }
    .map_err(|_| TxError::invalid_hex(field.name(), value.as_str()))?;

    match field {
        TxField::To if !decoded.is_empty() && decoded.len() != ADDRESS_LEN => Err(
            TxError::invalid_field_length(field.name(), "20 bytes or empty", decoded.len()),
        ),
        TxField::R | TxField::S => {
            let stripped = strip_leading_zeros(&decoded);
            if stripped.len() > MAX_SCALAR_LEN {
                return Err(TxError::invalid_field_length(
                    field.name(),
                    "at most 32 bytes",
                    stripped.len(),
                ));
            }
            Ok(stripped.to_vec())
        }
        _ => Ok(decoded),
    }
}

/// Wire bytes of one field, dispatching on its kind. Absent is empty.
///
/// # Errors
///
/// See [`numeric_bytes`] and [`hex_field_bytes`].
pub fn field_bytes(field: TxField, value: Option<FieldValue<'_>>) -> TxResult<Vec<u8>> {
    match value {
        None => Ok(Vec::new()),
        Some(FieldValue::Numeric(quantity)) => numeric_bytes(field, quantity),
        Some(FieldValue::Hex(data)) => hex_field_bytes(field, data),
    }
}

/// `bytes` without leading zero bytes.
#[must_use]
pub fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Unsigned big-endian decimal string. Empty input is `"0"`.
#[must_use]
pub fn bytes_to_decimal_string(bytes: &[u8]) -> String {
    BigUint::from_bytes_be(bytes).to_str_radix(10)
}

/// `0x` followed by lowercase hex. Empty input is `"0x"`.
#[must_use]
pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Builds a [`Tx`] from the nine raw wire fields.
///
/// Every field is set: numeric fields as decimal strings, hex fields as
/// `0x` hex. Fields past the ninth are ignored.
#[must_use]
pub fn field_set_to_tx<T: AsRef<[u8]>>(raw: &[T]) -> Tx {
    let mut tx = Tx::new();
    for (field, bytes) in TxField::ALL.into_iter().zip(raw) {
        let bytes = bytes.as_ref();
        let text = if field.is_numeric() {
            bytes_to_decimal_string(bytes)
        } else {
            bytes_to_hex_string(bytes)
        };
        tx.set_text(field, text);
    }
    tx
}

/// Builds a [`Tx`] with each non-empty raw field rendered as `0x` hex of
/// its bytes. Empty fields are omitted.
#[must_use]
pub fn compact_tx<T: AsRef<[u8]>>(raw: &[T]) -> Tx {
    let mut tx = Tx::new();
    for (field, bytes) in TxField::ALL.into_iter().zip(raw) {
        let bytes = bytes.as_ref();
        if !bytes.is_empty() {
            tx.set_text(field, bytes_to_hex_string(bytes));
        }
    }
    tx
}
