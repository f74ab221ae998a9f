//! Configuration management module for draftstyle.
//!
//! This module provides centralized configuration management with support for:
//! - CLI argument parsing
//! - Environment variable overrides for file locations
//! - Configuration validation
//! - Logging initialization

pub mod app_config;
pub mod cli;

pub use app_config::{AppConfig, LogLevel};
pub use cli::{CliConfig, StyleCommand};

use anyhow::Result;
use clap::ArgMatches;

/// Main configuration manager that combines all configuration sources
#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub cli: CliConfig,
    pub app: AppConfig,
}

impl ConfigManager {
    /// Creates a new configuration manager from CLI arguments and environment
    pub fn from_cli_and_env() -> Result<Self> {
        let cli_config = CliConfig::from_args()?;
        let app_config = AppConfig::from_cli(&cli_config)?;

        Ok(Self {
            cli: cli_config,
            app: app_config,
        })
    }

    /// Creates a configuration manager from pre-parsed matches and the process environment
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let cli_config = CliConfig::from_matches(matches)?;
        let app_config = AppConfig::from_cli(&cli_config)?;

        Ok(Self {
            cli: cli_config,
            app: app_config,
        })
    }

    /// Validates the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.cli.validate()?;
        self.app.validate()?;
        Ok(())
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> Result<()> {
        self.app.init_logging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_manager_validation() {
        let cli_config = CliConfig {
            verbose: false,
            presets_path: Some("/tmp/draftstyle-test/StylePresets.json".to_string()),
            params_path: Some("/tmp/draftstyle-test/parameters.json".to_string()),
            command: StyleCommand::List,
        };

        let app_config = AppConfig::from_cli(&cli_config).unwrap();
        assert_eq!(
            app_config.presets_path,
            PathBuf::from("/tmp/draftstyle-test/StylePresets.json")
        );

        let config_manager = ConfigManager {
            cli: cli_config,
            app: app_config,
        };

        assert!(config_manager.validate().is_ok());
    }

    #[test]
    fn test_config_manager_from_matches() {
        let matches = CliConfig::build_cli()
            .try_get_matches_from([
                "draftstyle",
                "--presets",
                "/tmp/a.json",
                "--params",
                "/tmp/b.json",
                "delete",
                "Old",
            ])
            .unwrap();

        let config_manager = ConfigManager::from_matches(&matches).unwrap();
        assert_eq!(
            config_manager.cli.command,
            StyleCommand::Delete {
                name: "Old".to_string()
            }
        );
        assert_eq!(config_manager.app.params_path, PathBuf::from("/tmp/b.json"));
        assert!(config_manager.validate().is_ok());
    }
}
