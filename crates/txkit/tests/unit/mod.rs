//! Focused tests of the binary crate's error and exit-code handling.

pub mod error_handling_test;
