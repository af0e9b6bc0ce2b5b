//! # CLI Module
//!
//! - [`args`] - Argument parsing and CLI structure definitions
//! - [`commands`] - Command handler implementations
//!
//! ```no_run
//! use clap::Parser;
//! use txkit::cli::{Cli, Commands};
//!
//! let cli = Cli::parse();
//! if let Commands::AddrEq { a, b } = cli.command {
//!     println!("{a} vs {b}");
//! }
//! ```

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction, OutputFormat};
