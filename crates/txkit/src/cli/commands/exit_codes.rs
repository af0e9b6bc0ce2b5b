//! Exit code constants for CLI commands.

/// Successful operation.
pub const EXIT_SUCCESS: i32 = 0;

/// The input was valid but nothing matched: no ABI entry for the call data
/// or log, or two addresses that differ.
pub const EXIT_NO_MATCH: i32 = 1;

/// General error (configuration, I/O, invalid input, etc.).
pub const EXIT_ERROR: i32 = 2;
