//! Fuzz target for legacy transaction decoding.
//!
//! ```bash
//! cargo +nightly fuzz run tx_decode
//! ```
//!
//! Encoding normalizes fields (leading zeros are stripped), so a decoded
//! transaction may not reproduce its input bytes. Once encoded, though, the
//! bytes must be a fixed point of decode-then-encode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use txkit_chain::transaction::{decode_raw, encode};

fuzz_target!(|data: &[u8]| {
    let Ok(tx) = decode_raw(data) else {
        return;
    };
    let Ok(reencoded) = encode(&tx) else {
        return;
    };
    let again = decode_raw(&reencoded).expect("encoder output must decode");
    let stable = encode(&again).expect("decoded encoder output must encode");
    assert_eq!(stable, reencoded);
});
