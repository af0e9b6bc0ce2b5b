//! Call data and log matching through the command handlers.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]

use alloy_primitives::Address;
use proptest::prelude::*;
use txkit::cli::commands::{AddrEqCommand, DecodeCallCommand, DecodeLogCommand, Outcome};
use txkit_chain::abi::encode_constructor_args;
use txkit_chain::address::addresses_equal;

use crate::common::{abi_word, ethereum_address, temp_data_dir, write_abi, TEST_ADDRESS};

const TRANSFER_SELECTOR: &str = "a9059cbb";
const TRANSFER_TOPIC: &str = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

fn transfer_call(to: &str, amount: &str) -> String {
    let args = encode_constructor_args("constructor(address,uint256)", &[to, amount]).unwrap();
    format!("0x{TRANSFER_SELECTOR}{}", hex::encode(args))
}

fn decode_call_json(data: &str) -> serde_json::Value {
    let dir = temp_data_dir();
    let outcome = DecodeCallCommand::new(write_abi(dir.path()), data)
        .execute()
        .unwrap();
    assert_eq!(outcome.exit_code(), 0);
    serde_json::from_str(outcome.text()).unwrap()
}

#[test]
fn test_transfer_call_matches_catalog() {
    let json = decode_call_json(&transfer_call(TEST_ADDRESS, "1027"));

    assert_eq!(json["name"], "transfer");
    assert_eq!(json["params"]["amount"], "1027");
    assert!(addresses_equal(
        json["params"]["to"].as_str().unwrap(),
        TEST_ADDRESS
    ));
}

#[test]
fn test_unknown_selector_exits_with_no_match() {
    let dir = temp_data_dir();
    let data = format!("0x70a08231{}", abi_word("01"));
    let outcome = DecodeCallCommand::new(write_abi(dir.path()), data)
        .execute()
        .unwrap();

    assert_eq!(outcome, Outcome::NoMatch("no matching function".into()));
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn test_transfer_log_interleaves_indexed_params() {
    let dir = temp_data_dir();
    let from = abi_word(TEST_ADDRESS.trim_start_matches("0x"));
    let to = abi_word("00000000000000000000000000000000000000ff");
    let cmd = DecodeLogCommand::new(
        write_abi(dir.path()),
        vec![TRANSFER_TOPIC.into(), from, to],
        format!("0x{}", abi_word("3e8")),
    );

    let outcome = cmd.execute().unwrap();
    let json: serde_json::Value = serde_json::from_str(outcome.text()).unwrap();
    let params = json["params"].as_object().unwrap();

    assert_eq!(
        params.keys().map(String::as_str).collect::<Vec<_>>(),
        ["from", "to", "value"]
    );
    assert!(addresses_equal(params["from"].as_str().unwrap(), TEST_ADDRESS));
    assert_eq!(params["value"], "1000");
}

#[test]
fn test_addr_eq_command_exit_codes() {
    let same = AddrEqCommand::new(TEST_ADDRESS, TEST_ADDRESS.to_uppercase());
    assert_eq!(same.execute(), Outcome::Success("true".into()));

    let different = AddrEqCommand::new(TEST_ADDRESS, "0x0000000000000000000000000000000000000000");
    assert_eq!(different.execute().exit_code(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_transfer_call_decodes(to in ethereum_address(), amount in any::<u128>()) {
        let json = decode_call_json(&transfer_call(&to, &amount.to_string()));

        prop_assert_eq!(json["params"]["amount"].as_str().unwrap(), amount.to_string());
        prop_assert!(addresses_equal(json["params"]["to"].as_str().unwrap(), &to));
    }

    #[test]
    fn prop_checksummed_address_equals_lowercase(to in ethereum_address()) {
        let checksummed = to.parse::<Address>().unwrap().to_checksum(None);

        prop_assert!(addresses_equal(&to, &checksummed));
        prop_assert!(addresses_equal(to.trim_start_matches("0x"), &checksummed));
    }

    #[test]
    fn prop_different_addresses_are_not_equal(a in ethereum_address(), b in ethereum_address()) {
        prop_assume!(a != b);
        prop_assert!(!addresses_equal(&a, &b));
    }
}
