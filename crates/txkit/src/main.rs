//! # txkit
//!
//! Legacy Ethereum transaction toolkit.
//!
//! ```bash
//! # Generate a key and show its address
//! txkit keygen --format json
//!
//! # Sign a transaction
//! txkit sign --key 0x... '{"nonce": 1, "gasPrice": 1000, "gasLimit": 21000, "to": "0x..."}'
//!
//! # Decode a raw transaction
//! txkit decode 0xf86c...
//!
//! # Match call data against an ABI
//! txkit decode-call --abi erc20.json 0xa9059cbb...
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use clap::Parser;
use txkit::cli::commands::exit_codes::EXIT_ERROR;
use txkit::cli::commands::{
    load_effective_config, AddrEqCommand, AddressCommand, CommandError, ConfigCommand,
    DecodeCallCommand, DecodeCommand, DecodeLogCommand, KeygenCommand, SerializeCommand,
    SignCommand,
};
use txkit::cli::{Cli, Commands};
use txkit::logging::{init_logging, LogConfig, LogError, LogGuard};
use txkit_core::config::{Config, LoggingConfig};
use txkit_core::ConfigError;

/// Set up logging from the `[logging]` section and `-v` count.
fn setup_logging(settings: &LoggingConfig, verbose: u8) -> Result<LogGuard, LogError> {
    let config = LogConfig::from_settings(settings, verbose)?;
    init_logging(&config)
}

fn main() {
    let cli = Cli::parse();

    // A broken config file must not stop `config init --force` from fixing it.
    let config = load_effective_config(cli.config.as_deref());
    let settings = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    let guard = match setup_logging(&settings, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            std::process::exit(EXIT_ERROR);
        }
    };

    if let Err(e) = &config {
        tracing::debug!(error = %e, "configuration not loaded");
    }

    let code = match dispatch(cli, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    // Flush the file appender before exiting.
    drop(guard);
    std::process::exit(code);
}

/// Run the selected command and return its exit code.
fn dispatch(cli: Cli, config: Result<Config, ConfigError>) -> Result<i32, CommandError> {
    match cli.command {
        Commands::Keygen { format } => KeygenCommand::new(format).run(),
        Commands::Address { key } => AddressCommand::new(key).run(),
        Commands::Sign {
            key,
            chain_id,
            format,
            transaction,
        } => {
            let config = config?;
            SignCommand::new(key, chain_id, format, transaction).run(&config.transaction)
        }
        Commands::Serialize { transaction } => SerializeCommand::new(transaction).run(),
        Commands::Decode { raw } => DecodeCommand::new(raw).run(),
        Commands::DecodeCall { abi, data } => DecodeCallCommand::new(abi, data).run(),
        Commands::DecodeLog { abi, topics, data } => {
            DecodeLogCommand::new(abi, topics, data).run()
        }
        Commands::AddrEq { a, b } => Ok(AddrEqCommand::new(a, b).run()),
        Commands::Config { action } => ConfigCommand::new(action, cli.config).run(),
    }
}
