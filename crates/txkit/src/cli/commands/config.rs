//! # Config Command
//!
//! ```text
//! txkit config              # print the effective configuration
//! txkit config path         # print the configuration file path
//! txkit config init         # write the default configuration
//! txkit -c ./txkit.toml config init --force
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use txkit_core::config::Config;
use txkit_core::config_loader::{load_from_path, ConfigLoader};
use txkit_core::error::ConfigError;

use super::{CommandError, Outcome};
use crate::cli::args::ConfigAction;

/// Loads the configuration `main` runs with.
///
/// An explicit path must exist. Without one, `~/.txkit/config.toml` is used
/// and a missing file yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or validated.
pub fn load_effective_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_from_path(path),
        None => ConfigLoader::new()?.load(),
    }
}

/// The `txkit config` command handler.
#[derive(Debug, Clone)]
pub struct ConfigCommand {
    /// The action to perform (`None` = show).
    pub action: Option<ConfigAction>,
    /// Explicit configuration path from `--config`.
    pub path: Option<PathBuf>,
}

impl ConfigCommand {
    /// Create a new `ConfigCommand`.
    #[must_use]
    pub const fn new(action: Option<ConfigAction>, path: Option<PathBuf>) -> Self {
        Self { action, path }
    }

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or written, or
    /// if `init` would overwrite a file without `--force`.
    pub fn execute(&self) -> Result<Outcome, CommandError> {
        match &self.action {
            None | Some(ConfigAction::Show) => self.show(),
            Some(ConfigAction::Path) => Ok(Outcome::Success(
                self.config_path()?.display().to_string(),
            )),
            Some(ConfigAction::Init { force }) => self.init(*force),
        }
    }

    /// Run the command and print its output.
    ///
    /// # Errors
    ///
    /// See [`ConfigCommand::execute`].
    pub fn run(&self) -> Result<i32, CommandError> {
        Ok(self.execute()?.print())
    }

    fn config_path(&self) -> Result<PathBuf, CommandError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(ConfigLoader::new()?.config_path()),
        }
    }

    fn show(&self) -> Result<Outcome, CommandError> {
        let config = load_effective_config(self.path.as_deref())?;
        let text = toml::to_string_pretty(&config).map_err(|e| {
            ConfigError::parse_failed(format!("failed to serialize configuration: {e}"))
        })?;
        Ok(Outcome::Success(text.trim_end().to_string()))
    }

    fn init(&self, force: bool) -> Result<Outcome, CommandError> {
        let path = self.config_path()?;
        if path.exists() && !force {
            return Err(CommandError::AlreadyExists(path.display().to_string()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::io(format!("failed to create {}", parent.display()), e))?;
        }
        fs::write(&path, Config::default_toml())
            .map_err(|e| ConfigError::io(format!("failed to write {}", path.display()), e))?;

        tracing::info!(path = %path.display(), "wrote default configuration");
        Ok(Outcome::Success(format!("wrote {}", path.display())))
    }
}
