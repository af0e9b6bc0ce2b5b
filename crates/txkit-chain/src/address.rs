//! Address comparison and derivation.

use txkit_crypto::{Secp256k1KeyPair, SecretKey};
use txkit_core::error::SignError;

/// Number of hex characters in an address.
const ADDRESS_HEX_LEN: usize = 40;

/// Compares two addresses by their last 40 characters, ignoring case.
///
/// Prefixes and checksums are therefore irrelevant. Inputs shorter than
/// 40 characters are compared whole.
///
/// # Example
///
/// ```
/// use txkit_chain::address::addresses_equal;
///
/// assert!(addresses_equal(
///     "0xf17f52151EbEF6C7334FAD080c5704D77216b732",
///     "f17f52151ebef6c7334fad080c5704d77216b732",
/// ));
/// assert!(!addresses_equal("0xabc", "0xabd"));
/// ```
#[must_use]
pub fn addresses_equal(a: &str, b: &str) -> bool {
    tail(a).eq_ignore_ascii_case(tail(b))
}

fn tail(s: &str) -> &str {
    let bytes = s.as_bytes();
    let start = bytes.len().saturating_sub(ADDRESS_HEX_LEN);
    // Slice on bytes so non-ASCII input cannot split a char boundary.
    std::str::from_utf8(&bytes[start..]).unwrap_or(s)
}

/// Derives the `0x`-prefixed lowercase address controlled by `key`.
///
/// # Errors
///
/// Returns [`SignError::InvalidPrivateKey`] if the key is rejected.
pub fn address_from_private_key(key: &SecretKey) -> Result<String, SignError> {
    let keypair = Secp256k1KeyPair::from_secret_key(key)?;
    Ok(format!("0x{}", hex::encode(keypair.address())))
}
