//! # txkit-crypto
//!
//! secp256k1 key material and signing for txkit.
//!
//! ## Modules
//!
//! - [`keys`] - [`SecretKey`] and rejection-sampling key generation
//! - [`keypair`] - Key pairs, recoverable low-S signatures, and address derivation
//!
//! ## Security
//!
//! - No unsafe code
//! - Secret keys are zeroized on drop and never printed
//! - Secret key comparison is constant time

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod keypair;
pub mod keys;

pub use keys::{generate_private_key, is_valid_private_key, SecretKey, SECRET_KEY_LEN};

pub use keypair::{keccak256, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature, HALF_ORDER};
