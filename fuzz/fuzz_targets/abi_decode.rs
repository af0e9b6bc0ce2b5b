//! Fuzz target for call data matching against a fixed ERC-20 catalog.
//!
//! ```bash
//! cargo +nightly fuzz run abi_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use txkit_chain::abi::{decode_function_call, parse_abi_json};

const ERC20_ABI: &str = r#"[
    {"type": "function", "name": "transfer",
     "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}]},
    {"type": "function", "name": "approve",
     "inputs": [{"name": "spender", "type": "address"}, {"name": "amount", "type": "uint256"}]},
    {"type": "function", "name": "setName", "inputs": [{"name": "name", "type": "string"}]}
]"#;

fuzz_target!(|data: &[u8]| {
    if let Ok(catalog) = parse_abi_json(ERC20_ABI) {
        let _ = decode_function_call(data, &catalog);
    }
});
