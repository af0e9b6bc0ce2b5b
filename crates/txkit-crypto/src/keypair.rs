//! secp256k1 key pairs, recoverable signatures, and address derivation.
//!
//! # Example
//!
//! ```rust
//! use txkit_crypto::keypair::{Secp256k1KeyPair, Secp256k1PublicKey};
//!
//! let keypair = Secp256k1KeyPair::generate();
//! let hash = [7u8; 32];
//! let signature = keypair.sign_prehash(&hash).expect("signing failed");
//!
//! assert!(keypair.verify(&hash, &signature));
//! assert!(signature.is_low_s());
//!
//! let recovered = Secp256k1PublicKey::recover(&hash, &signature).expect("recovery failed");
//! assert_eq!(recovered.ethereum_address(), keypair.address());
//! ```

use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use txkit_core::error::SignError;

use crate::keys::SecretKey;

/// Half the secp256k1 group order, `n / 2`. Low-S signatures have `s <= HALF_ORDER`.
pub const HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(data.as_ref()).into()
}

// ============================================================================
// Secp256k1 Public Key
// ============================================================================

/// A secp256k1 public key in compressed and uncompressed SEC1 form.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey {
    compressed: [u8; 33],
    uncompressed: [u8; 65],
}

impl Secp256k1PublicKey {
    fn from_verifying_key(verifying: &VerifyingKey) -> Self {
        let mut uncompressed = [0u8; 65];
        uncompressed.copy_from_slice(verifying.to_encoded_point(false).as_bytes());

        let mut compressed = [0u8; 33];
        compressed.copy_from_slice(verifying.to_encoded_point(true).as_bytes());

        Self {
            compressed,
            uncompressed,
        }
    }

    /// Recovers the public key that produced `signature` over `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::RecoveryFailed`] if the signature components or
    /// the recovery id are invalid, or no point matches.
    pub fn recover(hash: &[u8; 32], signature: &Secp256k1Signature) -> Result<Self, SignError> {
        let k256_sig = K256Signature::from_scalars(signature.r, signature.s)
            .map_err(|e| SignError::recovery_failed(format!("invalid signature scalars: {e}")))?;
        let recovery_id = RecoveryId::from_byte(signature.recovery_id).ok_or_else(|| {
            SignError::recovery_failed(format!(
                "invalid recovery id {}",
                signature.recovery_id
            ))
        })?;

        let verifying = VerifyingKey::recover_from_prehash(hash, &k256_sig, recovery_id)
            .map_err(|e| SignError::recovery_failed(e.to_string()))?;

        Ok(Self::from_verifying_key(&verifying))
    }

    /// 33-byte compressed form.
    #[must_use]
    pub const fn compressed(&self) -> &[u8; 33] {
        &self.compressed
    }

    /// 65-byte uncompressed form, starting with `0x04`.
    #[must_use]
    pub const fn uncompressed(&self) -> &[u8; 65] {
        &self.uncompressed
    }

    /// The last 20 bytes of keccak-256 over the 64-byte point without prefix.
    #[must_use]
    pub fn ethereum_address(&self) -> [u8; 20] {
        let hash = keccak256(&self.uncompressed[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        address
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PublicKey({})", hex::encode(self.compressed))
    }
}

// ============================================================================
// Secp256k1 Signature
// ============================================================================

/// A recoverable ECDSA signature: `r`, `s` and a recovery id of 0 or 1.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1Signature {
    r: [u8; 32],
    s: [u8; 32],
    recovery_id: u8,
}

impl Secp256k1Signature {
    /// Builds a signature from its parts without validating them.
    #[must_use]
    pub const fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Self {
        Self { r, s, recovery_id }
    }

    /// The `r` component, big-endian.
    #[must_use]
    pub const fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The `s` component, big-endian.
    #[must_use]
    pub const fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Recovery id, 0 or 1 for signatures produced here.
    #[must_use]
    pub const fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Returns `true` if `s <= n/2`.
    #[must_use]
    pub fn is_low_s(&self) -> bool {
        self.s <= HALF_ORDER
    }

    /// `r || s || recovery_id`.
    #[must_use]
    pub fn to_recoverable_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.recovery_id;
        out
    }
}

impl std::fmt::Debug for Secp256k1Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Secp256k1Signature(r={}, s={}, v={})",
            hex::encode(self.r),
            hex::encode(self.s),
            self.recovery_id
        )
    }
}

// ============================================================================
// Secp256k1 Key Pair
// ============================================================================

/// A secp256k1 signing key with its cached public key.
#[allow(clippy::struct_field_names)]
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    public_key: Secp256k1PublicKey,
}

impl Secp256k1KeyPair {
    /// Generates a key pair from a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        // SecretKey::generate only returns scalars in (0, n).
        Self::from_secret_key(&SecretKey::generate())
            .unwrap_or_else(|_| unreachable!("generated an invalid secp256k1 scalar"))
    }

    /// Builds the key pair for `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`] if the scalar is rejected.
    pub fn from_secret_key(secret: &SecretKey) -> Result<Self, SignError> {
        let signing_key = SigningKey::from(secret.to_k256()?);
        let verifying_key = *signing_key.verifying_key();
        let public_key = Secp256k1PublicKey::from_verifying_key(&verifying_key);

        Ok(Self {
            signing_key,
            verifying_key,
            public_key,
        })
    }

    /// Builds the key pair for raw scalar bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidPrivateKey`] if `bytes` is not in `(0, n)`.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, SignError> {
        Self::from_secret_key(&SecretKey::from_bytes(bytes)?)
    }

    /// The public key.
    #[must_use]
    pub const fn public_key(&self) -> &Secp256k1PublicKey {
        &self.public_key
    }

    /// The 20-byte Ethereum address of this key.
    #[must_use]
    pub fn address(&self) -> [u8; 20] {
        self.public_key.ethereum_address()
    }

    /// Signs a 32-byte digest with RFC 6979 deterministic nonces.
    ///
    /// The result is low-S: if `s > n/2` it is replaced by `n - s` and the
    /// recovery id is flipped.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::SignatureFailed`] if the primitive fails.
    pub fn sign_prehash(&self, hash: &[u8; 32]) -> Result<Secp256k1Signature, SignError> {
        let (signature, recovery_id): (K256Signature, RecoveryId) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| SignError::signature_failed(format!("secp256k1 signing failed: {e}")))?;

        let normalized = signature.normalize_s();
        let recovery_id = if normalized.is_some() {
            recovery_id.to_byte() ^ 1
        } else {
            recovery_id.to_byte()
        };

        let (r, s) = normalized.unwrap_or(signature).split_bytes();
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&r);
        s_bytes.copy_from_slice(&s);

        Ok(Secp256k1Signature::new(r_bytes, s_bytes, recovery_id))
    }

    /// Verifies `signature` over `hash` against this key.
    #[must_use]
    pub fn verify(&self, hash: &[u8; 32], signature: &Secp256k1Signature) -> bool {
        use k256::ecdsa::signature::hazmat::PrehashVerifier;

        let Ok(k256_sig) = K256Signature::from_scalars(signature.r, signature.s) else {
            return false;
        };

        self.verifying_key.verify_prehash(hash, &k256_sig).is_ok()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
