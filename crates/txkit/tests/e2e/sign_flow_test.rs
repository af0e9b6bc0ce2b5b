//! Sign, serialize, and decode flows.
//!
//! A signed transaction must survive the trip to wire bytes and back: the
//! decoded fields re-encode to the same bytes and still recover the signer.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use proptest::prelude::*;
use txkit::cli::OutputFormat;
use txkit::cli::commands::{AddressCommand, DecodeCommand, KeygenCommand, SignCommand};
use txkit_chain::signer::{recover_signer, sign, sign_eip155, TxSigner};
use txkit_chain::transaction::{decode, serialize_to_hex, transaction_hash};
use txkit_core::config::TxDefaults;
use txkit_core::types::{HexData, Quantity, Tx};
use txkit_crypto::{keccak256, SecretKey};

use crate::common::{unsigned_tx, TEST_ADDRESS, TEST_KEY};

fn test_key() -> SecretKey {
    SecretKey::from_hex(TEST_KEY).unwrap()
}

fn transfer() -> Tx {
    Tx::new()
        .with_nonce(1u64)
        .with_gas_price(1000u64)
        .with_gas_limit(2000u64)
        .with_to(TEST_ADDRESS)
        .with_value("1027")
}

fn decimal(q: Option<&Quantity>) -> String {
    q.map(Quantity::to_text).unwrap_or_default()
}

#[test]
fn test_signed_transfer_decodes_to_wire_fields() {
    let signed = sign(&test_key(), &transfer()).unwrap();
    let raw = serialize_to_hex(&signed).unwrap();
    let decoded = decode(&raw).unwrap();

    assert_eq!(decoded.nonce, Some(Quantity::Text("1".into())));
    assert_eq!(decoded.gas_price, Some(Quantity::Text("1000".into())));
    assert_eq!(decoded.gas_limit, Some(Quantity::Text("2000".into())));
    assert_eq!(decoded.value, Some(Quantity::Text("1027".into())));
    assert_eq!(decoded.to, Some(HexData::new(TEST_ADDRESS)));
    assert_eq!(decoded.data, Some(HexData::new("0x")));
    assert_eq!(decoded.v, Some(HexData::new("0x1c")));
    assert!(decoded.is_signed());

    assert_eq!(serialize_to_hex(&decoded).unwrap(), raw);
    assert_eq!(format!("{:#x}", recover_signer(&decoded).unwrap()), TEST_ADDRESS);
}

#[test]
fn test_transaction_hash_is_keccak_of_wire_bytes() {
    let signed = sign(&test_key(), &transfer()).unwrap();
    let raw = serialize_to_hex(&signed).unwrap();
    let bytes = hex::decode(raw.trim_start_matches("0x")).unwrap();

    assert_eq!(transaction_hash(&signed).unwrap().0, keccak256(bytes));
}

#[test]
fn test_contract_creation_has_empty_to() {
    let create = Tx::new()
        .with_nonce(0u64)
        .with_gas_limit(6_000_000u64)
        .with_data("0x6080604052");
    let signed = sign(&test_key(), &create).unwrap();
    let decoded = decode(&serialize_to_hex(&signed).unwrap()).unwrap();

    assert_eq!(decoded.nonce, Some(Quantity::Text("0".into())));
    assert_eq!(decoded.to, Some(HexData::new("0x")));
    assert_eq!(decoded.data, Some(HexData::new("0x6080604052")));
    assert_eq!(format!("{:#x}", recover_signer(&decoded).unwrap()), TEST_ADDRESS);
}

#[test]
fn test_sign_command_output_decodes() {
    let signed = SignCommand::new(
        Some(TEST_KEY.into()),
        None,
        OutputFormat::Json,
        serde_json::to_string(&transfer()).unwrap(),
    )
    .execute(&TxDefaults::default())
    .unwrap();
    let signed: serde_json::Value = serde_json::from_str(signed.text()).unwrap();
    assert_eq!(signed["from"], TEST_ADDRESS);

    let raw = signed["raw"].as_str().unwrap();
    let decoded = DecodeCommand::new(raw).execute().unwrap();
    let decoded: serde_json::Value = serde_json::from_str(decoded.text()).unwrap();

    assert_eq!(decoded["value"], "1027");
    assert_eq!(decoded["v"], signed["transaction"]["v"]);
    assert_eq!(decoded["r"], signed["transaction"]["r"]);
    assert_eq!(decoded["s"], signed["transaction"]["s"]);
}

#[test]
fn test_keygen_then_address_then_sign() {
    let generated = KeygenCommand::new(OutputFormat::Json).execute().unwrap();
    let generated: serde_json::Value = serde_json::from_str(generated.text()).unwrap();
    let key = generated["privateKey"].as_str().unwrap().to_string();
    let address = generated["address"].as_str().unwrap().to_string();

    let derived = AddressCommand::new(Some(key.clone())).execute().unwrap();
    assert_eq!(derived.text(), address);

    let signer = TxSigner::new(&SecretKey::from_hex(&key).unwrap()).unwrap();
    let signed = signer.sign(&transfer()).unwrap();
    assert_eq!(format!("{:#x}", recover_signer(&signed).unwrap()), address);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_signed_tx_recovers_after_decode(tx in unsigned_tx()) {
        let signed = sign(&test_key(), &tx).unwrap();
        let raw = serialize_to_hex(&signed).unwrap();
        let decoded = decode(&raw).unwrap();

        prop_assert_eq!(format!("{:#x}", recover_signer(&decoded).unwrap()), TEST_ADDRESS);
        prop_assert_eq!(serialize_to_hex(&decoded).unwrap(), raw);
    }

    #[test]
    fn prop_decode_preserves_payload_fields(tx in unsigned_tx()) {
        let decoded = decode(&serialize_to_hex(&tx).unwrap()).unwrap();

        prop_assert_eq!(decimal(decoded.nonce.as_ref()), decimal(tx.nonce.as_ref()));
        prop_assert_eq!(decimal(decoded.gas_price.as_ref()), decimal(tx.gas_price.as_ref()));
        prop_assert_eq!(decimal(decoded.gas_limit.as_ref()), decimal(tx.gas_limit.as_ref()));
        prop_assert_eq!(decimal(decoded.value.as_ref()), decimal(tx.value.as_ref()));
        prop_assert_eq!(decoded.to, tx.to);
        prop_assert_eq!(decoded.data, tx.data);
        prop_assert_eq!(decoded.v, Some(HexData::new("0x1c")));
    }

    #[test]
    fn prop_eip155_signature_recovers(tx in unsigned_tx(), chain_id in 1u64..=u64::from(u32::MAX)) {
        let signed = sign_eip155(&test_key(), &tx, chain_id).unwrap();
        let decoded = decode(&serialize_to_hex(&signed).unwrap()).unwrap();

        prop_assert_eq!(format!("{:#x}", recover_signer(&decoded).unwrap()), TEST_ADDRESS);
    }
}
