//! # txkit
//!
//! Command-line front end for building, signing, decoding, and inspecting
//! legacy Ethereum transactions. The transaction logic lives in
//! `txkit-chain`; this crate adds argument parsing, configuration loading,
//! and logging.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions and handlers
//! - [`logging`] - Subscriber setup and verbosity mapping
//!
//! ```no_run
//! use clap::Parser;
//! use txkit::cli::Cli;
//!
//! let cli = Cli::parse();
//! println!("Verbose level: {}", cli.verbose);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod logging;

pub use logging::{
    init_logging, verbosity_to_level, LogConfig, LogError, LogFormat, LogGuard, LogLevel,
};
