//! # Address Commands
//!
//! ```text
//! txkit address 0xae6a...162f        # derive the address of a key
//! txkit addr-eq 0xF17F... f17f...    # compare two addresses
//! ```

use txkit_chain::address::{address_from_private_key, addresses_equal};

use super::{resolve_key, CommandError, Outcome};

/// The `txkit address` command handler.
#[derive(Debug, Clone, Default)]
pub struct AddressCommand {
    /// Private key hex; `None` reads the environment.
    pub key: Option<String>,
}

impl AddressCommand {
    /// Create a new `AddressCommand`.
    #[must_use]
    pub const fn new(key: Option<String>) -> Self {
        Self { key }
    }

    /// Derives the address of the key.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is available or the key is invalid.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        let key = resolve_key(self.key.as_deref())?;
        Ok(Outcome::Success(address_from_private_key(&key)?))
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`AddressCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }
}

/// The `txkit addr-eq` command handler.
#[derive(Debug, Clone)]
pub struct AddrEqCommand {
    /// First address.
    pub a: String,
    /// Second address.
    pub b: String,
}

impl AddrEqCommand {
    /// Create a new `AddrEqCommand`.
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Prints `true` for equal addresses and `false` (a no-match) otherwise.
    #[must_use]
    pub fn execute(&self) -> Outcome {
        if addresses_equal(&self.a, &self.b) {
            Outcome::Success("true".to_string())
        } else {
            Outcome::NoMatch("false".to_string())
        }
    }

    /// Run the command and print its output.
    #[must_use]
    pub fn run(&self) -> i32 {
        self.execute().print()
    }
}
