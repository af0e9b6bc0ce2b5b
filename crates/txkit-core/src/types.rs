//! Transaction value model.
//!
//! - [`Tx`] - The nine optional fields of a legacy transaction
//! - [`Quantity`] - A numeric field value as supplied by a caller
//! - [`HexData`] - A raw hex-string field value
//! - [`TxField`] - Field names in wire order, with their kind
//! - [`FieldValue`] - Tagged view of one field, used for codec dispatch
//!
//! # Examples
//!
//! ```
//! use txkit_core::types::{FieldValue, Tx, TxField};
//!
//! let tx = Tx::new()
//!     .with_nonce(1u64)
//!     .with_gas_price("1000")
//!     .with_to("0xf17f52151EbEF6C7334FAD080c5704D77216b732");
//!
//! assert!(matches!(tx.get(TxField::Nonce), Some(FieldValue::Numeric(_))));
//! assert!(matches!(tx.get(TxField::To), Some(FieldValue::Hex(_))));
//! assert!(tx.get(TxField::Value).is_none());
//! assert!(!tx.is_signed());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Quantity
// ============================================================================

/// A numeric transaction field as supplied by a caller.
///
/// Accepts a JSON integer, a decimal string, or a `0x`-prefixed hex string.
/// Validation happens at encode time, not at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// An integer value.
    Number(u64),
    /// A decimal or `0x`-prefixed hex string.
    Text(String),
}

impl Quantity {
    /// Returns the textual form that the codec parses.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

impl From<u128> for Quantity {
    fn from(value: u128) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Quantity {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ============================================================================
// HexData
// ============================================================================

/// A raw hex-string field (`to`, `data`, `v`, `r`, `s`).
///
/// The `0x` prefix is optional and case is not significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexData(String);

impl HexData {
    /// Wraps a hex string without validating it.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the string as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, returning the string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for HexData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HexData {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HexData {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for HexData {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// TxField / FieldValue
// ============================================================================

/// How a field is normalized before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Parsed as an unsigned integer, encoded as minimal big-endian bytes.
    Numeric,
    /// Taken as raw hex bytes.
    Hex,
}

/// The nine legacy transaction fields, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TxField {
    /// Sender account nonce.
    Nonce,
    /// Price per unit of gas, in wei.
    GasPrice,
    /// Maximum gas the transaction may consume.
    GasLimit,
    /// Recipient address; empty for contract creation.
    To,
    /// Amount transferred, in wei.
    Value,
    /// Call data or init code.
    Data,
    /// Signature recovery value.
    V,
    /// Signature `r` component.
    R,
    /// Signature `s` component.
    S,
}

impl TxField {
    /// All fields in wire order.
    pub const ALL: [Self; 9] = [
        Self::Nonce,
        Self::GasPrice,
        Self::GasLimit,
        Self::To,
        Self::Value,
        Self::Data,
        Self::V,
        Self::R,
        Self::S,
    ];

    /// The six fields covered by a legacy signature.
    pub const UNSIGNED: [Self; 6] = [
        Self::Nonce,
        Self::GasPrice,
        Self::GasLimit,
        Self::To,
        Self::Value,
        Self::Data,
    ];

    /// The camelCase name used in JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nonce => "nonce",
            Self::GasPrice => "gasPrice",
            Self::GasLimit => "gasLimit",
            Self::To => "to",
            Self::Value => "value",
            Self::Data => "data",
            Self::V => "v",
            Self::R => "r",
            Self::S => "s",
        }
    }

    /// The normalization applied to this field.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Nonce | Self::GasPrice | Self::GasLimit | Self::Value => FieldKind::Numeric,
            Self::To | Self::Data | Self::V | Self::R | Self::S => FieldKind::Hex,
        }
    }

    /// Returns `true` for `nonce`, `gasPrice`, `gasLimit` and `value`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self.kind(), FieldKind::Numeric)
    }
}

impl fmt::Display for TxField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed field value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// A numeric field.
    Numeric(&'a Quantity),
    /// A hex field.
    Hex(&'a HexData),
}

// ============================================================================
// Tx
// ============================================================================

/// A legacy transaction with every field optional.
///
/// Absent fields encode as the empty byte string, except `v`, which
/// encodes as `0x1c` when absent. Serializes to a camelCase JSON object that
/// omits absent fields; unknown keys are rejected on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Tx {
    /// Sender account nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Quantity>,
    /// Gas price in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    /// Gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<Quantity>,
    /// Recipient address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<HexData>,
    /// Value in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    /// Call data or init code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<HexData>,
    /// Recovery value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<HexData>,
    /// Signature `r`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<HexData>,
    /// Signature `s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<HexData>,
}

impl Tx {
    /// Creates a transaction with every field absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<Quantity>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Sets the gas price.
    #[must_use]
    pub fn with_gas_price(mut self, gas_price: impl Into<Quantity>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    /// Sets the gas limit.
    #[must_use]
    pub fn with_gas_limit(mut self, gas_limit: impl Into<Quantity>) -> Self {
        self.gas_limit = Some(gas_limit.into());
        self
    }

    /// Sets the recipient.
    #[must_use]
    pub fn with_to(mut self, to: impl Into<HexData>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Quantity>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the call data.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<HexData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Returns the value of `field`, tagged with its kind.
    #[must_use]
    pub fn get(&self, field: TxField) -> Option<FieldValue<'_>> {
        match field {
            TxField::Nonce => self.nonce.as_ref().map(FieldValue::Numeric),
            TxField::GasPrice => self.gas_price.as_ref().map(FieldValue::Numeric),
            TxField::GasLimit => self.gas_limit.as_ref().map(FieldValue::Numeric),
            TxField::Value => self.value.as_ref().map(FieldValue::Numeric),
            TxField::To => self.to.as_ref().map(FieldValue::Hex),
            TxField::Data => self.data.as_ref().map(FieldValue::Hex),
            TxField::V => self.v.as_ref().map(FieldValue::Hex),
            TxField::R => self.r.as_ref().map(FieldValue::Hex),
            TxField::S => self.s.as_ref().map(FieldValue::Hex),
        }
    }

    /// Sets `field` from its textual form.
    ///
    /// Numeric fields store the text as a [`Quantity::Text`], hex fields as
    /// [`HexData`].
    pub fn set_text(&mut self, field: TxField, text: impl Into<String>) {
        let text = text.into();
        match field {
            TxField::Nonce => self.nonce = Some(Quantity::Text(text)),
            TxField::GasPrice => self.gas_price = Some(Quantity::Text(text)),
            TxField::GasLimit => self.gas_limit = Some(Quantity::Text(text)),
            TxField::Value => self.value = Some(Quantity::Text(text)),
            TxField::To => self.to = Some(HexData(text)),
            TxField::Data => self.data = Some(HexData(text)),
            TxField::V => self.v = Some(HexData(text)),
            TxField::R => self.r = Some(HexData(text)),
            TxField::S => self.s = Some(HexData(text)),
        }
    }

    /// Returns `true` when `v`, `r` and `s` are all present.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.v.is_some() && self.r.is_some() && self.s.is_some()
    }

    /// Returns a copy with `v`, `r` and `s` cleared.
    #[must_use]
    pub fn unsigned(&self) -> Self {
        Self {
            v: None,
            r: None,
            s: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_tx_json_omits_absent_fields() {
        let tx = Tx::new().with_nonce(1u64).with_to("0xabc");
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(json, r#"{"nonce":1,"to":"0xabc"}"#);
    }

    #[test]
    fn test_tx_json_uses_camel_case() {
        let tx = Tx::new().with_gas_price("1000").with_gas_limit(2000u64);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["gasPrice"], "1000");
        assert_eq!(json["gasLimit"], 2000);
    }

    #[test]
    fn test_tx_from_json_accepts_numbers_and_strings() {
        let tx: Tx = serde_json::from_str(
            r#"{"nonce": 1, "gasPrice": "0x3e8", "value": "1027", "data": "aaa"}"#,
        )
        .unwrap();

        assert_eq!(tx.nonce, Some(Quantity::Number(1)));
        assert_eq!(tx.gas_price, Some(Quantity::Text("0x3e8".into())));
        assert_eq!(tx.value, Some(Quantity::Text("1027".into())));
        assert_eq!(tx.data, Some(HexData::new("aaa")));
        assert!(tx.to.is_none());
    }

    #[test]
    fn test_tx_from_json_rejects_unknown_keys() {
        let err = serde_json::from_str::<Tx>(r#"{"nonce": 1, "gasprice": 1000}"#).unwrap_err();
        assert!(err.to_string().contains("gasprice"));
    }

    #[test]
    fn test_empty_object_is_empty_tx() {
        let tx: Tx = serde_json::from_str("{}").unwrap();
        assert_eq!(tx, Tx::new());
    }

    #[test]
    fn test_field_order_and_names() {
        let names: Vec<_> = TxField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            ["nonce", "gasPrice", "gasLimit", "to", "value", "data", "v", "r", "s"]
        );
        assert_eq!(&TxField::ALL[..6], &TxField::UNSIGNED);
    }

    #[test]
    fn test_field_kinds() {
        let numeric: Vec<_> = TxField::ALL.into_iter().filter(|f| f.is_numeric()).collect();
        assert_eq!(
            numeric,
            [TxField::Nonce, TxField::GasPrice, TxField::GasLimit, TxField::Value]
        );
        assert_eq!(TxField::V.kind(), FieldKind::Hex);
    }

    #[test]
    fn test_set_text_matches_field_kind() {
        let mut tx = Tx::new();
        for field in TxField::ALL {
            tx.set_text(field, "0x01");
        }

        for field in TxField::ALL {
            match tx.get(field) {
                Some(FieldValue::Numeric(q)) => {
                    assert!(field.is_numeric());
                    assert_eq!(q, &Quantity::Text("0x01".into()));
                }
                Some(FieldValue::Hex(h)) => {
                    assert!(!field.is_numeric());
                    assert_eq!(h.as_str(), "0x01");
                }
                None => panic!("{field} missing"),
            }
        }
        assert!(tx.is_signed());
        assert!(!tx.unsigned().is_signed());
    }

    #[test]
    fn test_quantity_from_large_u128_falls_back_to_text() {
        assert_eq!(Quantity::from(5u128), Quantity::Number(5));
        let big = u128::from(u64::MAX) + 1;
        assert_eq!(Quantity::from(big), Quantity::Text(big.to_string()));
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::from(42u64).to_string(), "42");
        assert_eq!(Quantity::from("0x2a").to_text(), "0x2a");
    }
}
