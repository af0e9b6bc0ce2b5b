//! End-to-end flows across signing, encoding, and decoding.

pub mod abi_flow_test;
pub mod sign_flow_test;
