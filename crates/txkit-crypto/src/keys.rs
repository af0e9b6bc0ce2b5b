//! Private key material and key generation.
//!
//! - [`SecretKey`] zeroizes on drop, redacts its `Debug` output, and compares
//!   in constant time. It does not implement `Clone`.
//! - [`generate_private_key`] draws keys from the OS CSPRNG, rejecting draws
//!   that are not valid secp256k1 scalars.

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use txkit_core::error::SignError;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The length of a secret key in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// A 32-byte secp256k1 private key, always in the range `(0, n)`.
///
/// # Example
///
/// ```
/// use txkit_crypto::keys::SecretKey;
///
/// let key = SecretKey::from_hex(
///     "0xae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f",
/// ).expect("valid key");
/// assert_eq!(key.as_bytes()[0], 0xae);
/// assert!(SecretKey::from_bytes([0u8; 32]).is_err());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; SECRET_KEY_LEN],
}

impl SecretKey {
    /// Wraps `bytes` after checking they form a valid secp256k1 scalar.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`] if the value is zero or not
    /// below the curve order.
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LEN]) -> Result<Self, SignError> {
        if is_valid_private_key(&bytes) {
            Ok(Self { bytes })
        } else {
            Err(SignError::InvalidPrivateKey)
        }
    }

    /// Wraps a 32-byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`] if `slice` is not 32 bytes or
    /// is not a valid scalar.
    pub fn from_slice(slice: &[u8]) -> Result<Self, SignError> {
        let mut bytes: [u8; SECRET_KEY_LEN] = slice
            .try_into()
            .map_err(|_| SignError::InvalidPrivateKey)?;
        let key = Self::from_bytes(bytes);
        bytes.zeroize();
        key
    }

    /// Parses 64 hex digits, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`] for malformed hex, wrong
    /// length, or an out-of-range scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, SignError> {
        let digits = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);
        let decoded =
            Zeroizing::new(hex::decode(digits).map_err(|_| SignError::InvalidPrivateKey)?);
        Self::from_slice(&decoded)
    }

    /// Generates a key from the operating system's CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rngs::OsRng)
    }

    /// Generates a key from `rng`.
    ///
    /// Draws 32 bytes at a time and discards draws that are zero or not
    /// below the curve order. The loop has no bound; the rejection
    /// probability per draw is below 2^-127.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        loop {
            rng.fill_bytes(&mut bytes);
            if is_valid_private_key(&bytes) {
                let key = Self { bytes };
                bytes.zeroize();
                return key;
            }
        }
    }

    /// The raw scalar bytes, big-endian.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.bytes
    }

    /// Lowercase hex without a prefix, zeroized when dropped.
    #[must_use]
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    /// Converts into a `k256` secret key.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`]; unreachable for keys built
    /// through this type's constructors.
    pub fn to_k256(&self) -> Result<k256::SecretKey, SignError> {
        k256::SecretKey::from_bytes((&self.bytes).into()).map_err(|_| SignError::InvalidPrivateKey)
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SecretKey {}

impl TryFrom<[u8; SECRET_KEY_LEN]> for SecretKey {
    type Error = SignError;

    fn try_from(bytes: [u8; SECRET_KEY_LEN]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

/// Returns `true` if `bytes` is a scalar in `(0, n)`.
#[must_use]
pub fn is_valid_private_key(bytes: &[u8; SECRET_KEY_LEN]) -> bool {
    k256::SecretKey::from_bytes(bytes.into()).is_ok()
}

/// Generates a fresh private key from the OS CSPRNG.
///
/// # Example
///
/// ```
/// use txkit_crypto::keys::{generate_private_key, is_valid_private_key};
///
/// let key = generate_private_key();
/// assert!(is_valid_private_key(key.as_bytes()));
/// ```
#[must_use]
pub fn generate_private_key() -> SecretKey {
    SecretKey::generate()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::unwrap_used)]

    use super::*;
    use proptest::prelude::*;

    /// secp256k1 group order.
    const CURVE_ORDER: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
        0x41, 0x41,
    ];

    /// Replays fixed 32-byte blocks, then repeats the last one.
    struct ScriptedRng {
        blocks: Vec<[u8; 32]>,
        next: usize,
        draws: usize,
    }

    impl ScriptedRng {
        fn new(blocks: Vec<[u8; 32]>) -> Self {
            Self {
                blocks,
                next: 0,
                draws: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!("only fill_bytes is used")
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!("only fill_bytes is used")
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let block = self.blocks[self.next.min(self.blocks.len() - 1)];
            dest.copy_from_slice(&block);
            self.next += 1;
            self.draws += 1;
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ScriptedRng {}

    #[test]
    fn test_generate_skips_zero_and_out_of_range_draws() {
        let mut above_order = CURVE_ORDER;
        above_order[31] += 1;
        let valid = [0x11u8; 32];

        let mut rng =
            ScriptedRng::new(vec![[0u8; 32], CURVE_ORDER, above_order, [0xffu8; 32], valid]);
        let key = SecretKey::generate_with(&mut rng);

        assert_eq!(key.as_bytes(), &valid);
        assert_eq!(rng.draws, 5);
    }

    #[test]
    fn test_generate_accepts_first_valid_draw() {
        let mut rng = ScriptedRng::new(vec![[0x01u8; 32], [0x02u8; 32]]);
        let key = SecretKey::generate_with(&mut rng);
        assert_eq!(key.as_bytes(), &[0x01u8; 32]);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn test_order_minus_one_is_valid() {
        let mut max = CURVE_ORDER;
        max[31] -= 1;
        assert!(is_valid_private_key(&max));
        assert!(!is_valid_private_key(&CURVE_ORDER));
        assert!(!is_valid_private_key(&[0u8; 32]));
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = generate_private_key();
        let b = generate_private_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_hex_with_and_without_prefix() {
        let hex = "ae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f";
        let a = SecretKey::from_hex(hex).unwrap();
        let b = SecretKey::from_hex(&format!("0x{hex}")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex().as_str(), hex);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert_eq!(
            SecretKey::from_hex("0x1234"),
            Err(SignError::InvalidPrivateKey)
        );
        assert_eq!(
            SecretKey::from_hex(&"zz".repeat(32)),
            Err(SignError::InvalidPrivateKey)
        );
        assert_eq!(
            SecretKey::from_hex(&hex::encode(CURVE_ORDER)),
            Err(SignError::InvalidPrivateKey)
        );
    }

    #[test]
    fn test_debug_does_not_expose_key_material() {
        let key = SecretKey::from_bytes([0xABu8; SECRET_KEY_LEN]).unwrap();
        let debug_output = format!("{key:?}");
        assert_eq!(debug_output, "SecretKey([REDACTED])");
        assert!(!debug_output.to_lowercase().contains("ab"));
    }

    #[test]
    fn test_to_k256_roundtrip() {
        let key = SecretKey::from_bytes([0x42u8; SECRET_KEY_LEN]).unwrap();
        let k = key.to_k256().unwrap();
        assert_eq!(k.to_bytes().as_slice(), key.as_bytes());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SecretKey>();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_generated_key_is_in_range(_seed in any::<u8>()) {
            let key = generate_private_key();
            prop_assert!(is_valid_private_key(key.as_bytes()));
            prop_assert_ne!(key.as_bytes(), &[0u8; 32]);
        }
    }
}
