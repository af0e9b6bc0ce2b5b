//! Error display, sources, and exit codes.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::io_other_error)]

use std::error::Error;

use txkit::cli::commands::exit_codes::{EXIT_ERROR, EXIT_NO_MATCH, EXIT_SUCCESS};
use txkit::cli::commands::{CommandError, Outcome, SignCommand, PRIVATE_KEY_ENV};
use txkit::cli::OutputFormat;
use txkit::logging::LogError;
use txkit_core::config::TxDefaults;
use txkit_core::error::{AbiError, ConfigError, SignError, TxError};

#[test]
fn test_exit_codes_are_distinct() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_NO_MATCH, 1);
    assert_eq!(EXIT_ERROR, 2);
}

#[test]
fn test_every_command_error_exits_with_error_code() {
    let errors = [
        CommandError::MissingKey,
        CommandError::InvalidInput("bad".into()),
        CommandError::AlreadyExists("/tmp/x".into()),
        CommandError::from(TxError::invalid_number("-1")),
        CommandError::from(SignError::InvalidPrivateKey),
        CommandError::from(AbiError::invalid_catalog("not an array")),
        CommandError::from(ConfigError::file_not_found("/missing")),
        CommandError::from(std::io::Error::new(std::io::ErrorKind::Other, "io")),
    ];
    for error in errors {
        assert_eq!(error.exit_code(), EXIT_ERROR, "{error}");
    }
}

#[test]
fn test_outcome_exit_codes() {
    assert_eq!(Outcome::Success(String::new()).exit_code(), EXIT_SUCCESS);
    assert_eq!(Outcome::NoMatch(String::new()).exit_code(), EXIT_NO_MATCH);
}

#[test]
fn test_error_display_messages() {
    assert!(CommandError::MissingKey.to_string().contains(PRIVATE_KEY_ENV));
    assert_eq!(
        CommandError::AlreadyExists("config.toml".into()).to_string(),
        "config.toml already exists; use --force to overwrite"
    );
    assert_eq!(
        CommandError::from(TxError::invalid_number("abc")).to_string(),
        "invalid number: \"abc\""
    );
    assert_eq!(
        CommandError::from(SignError::from(TxError::malformed_transaction("8 items"))).to_string(),
        "malformed transaction: 8 items"
    );
    assert_eq!(
        LogError::InvalidConfig("level".into()).to_string(),
        "invalid log configuration: level"
    );
}

#[test]
fn test_error_sources() {
    let io = CommandError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(io.source().is_some());

    let config = CommandError::from(ConfigError::io(
        "failed to write config.toml",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    ));
    assert!(config.source().is_some());

    assert!(CommandError::MissingKey.source().is_none());
    assert!(LogError::FileCreation("x".into()).source().is_none());
}

#[test]
fn test_invalid_transaction_json_is_invalid_input() {
    let cmd = SignCommand::new(
        Some("0xae6ae8e5ccbfb04590405997ee2d52d2b330726137b875053c36d94e974d162f".into()),
        None,
        OutputFormat::Hex,
        "{not json",
    );
    assert!(matches!(
        cmd.execute(&TxDefaults::default()),
        Err(CommandError::InvalidInput(_))
    ));
}

#[test]
fn test_invalid_key_is_sign_error() {
    let cmd = SignCommand::new(Some("0x00".into()), None, OutputFormat::Hex, "{}");
    assert!(matches!(
        cmd.execute(&TxDefaults::default()),
        Err(CommandError::Sign(SignError::InvalidPrivateKey))
    ));
}
