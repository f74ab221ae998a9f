//! Application configuration management for draftstyle.
//!
//! This module resolves the logging level and the locations of the preset
//! and parameter files. Each path is taken from the command line first, then
//! from the environment, then from the platform data directory.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use draftstyle_shared::store::{APP_DIR, PresetStore};

use super::cli::CliConfig;

/// Environment variable overriding the preset file location
pub const PRESETS_ENV: &str = "DRAFTSTYLE_PRESETS";
/// Environment variable overriding the parameter file location
pub const PARAMS_ENV: &str = "DRAFTSTYLE_PARAMS";
/// Parameter file name inside the application data directory
pub const PARAMS_FILE: &str = "parameters.json";

/// Log level enumeration
#[derive(Debug, Clone, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing level filter string
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub presets_path: PathBuf,
    pub params_path: PathBuf,
}

impl AppConfig {
    /// Create application configuration from CLI config and the process environment
    pub fn from_cli(cli_config: &CliConfig) -> Result<Self> {
        Self::from_cli_with_env(cli_config, |key| env::var(key).ok())
    }

    /// Create application configuration with an explicit environment lookup
    pub fn from_cli_with_env<F>(cli_config: &CliConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = if cli_config.verbose {
            LogLevel::Debug
        } else {
            match lookup("RUST_LOG") {
                Some(level_str) => Self::parse_log_level(&level_str),
                // Quiet by default so command output is not interleaved with logs
                None => LogLevel::Warn,
            }
        };

        let presets_path = cli_config
            .presets_path
            .clone()
            .or_else(|| lookup(PRESETS_ENV).filter(|v| !v.is_empty()))
            .map(PathBuf::from)
            .or_else(PresetStore::default_path)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory for presets"))?;

        let params_path = cli_config
            .params_path
            .clone()
            .or_else(|| lookup(PARAMS_ENV).filter(|v| !v.is_empty()))
            .map(PathBuf::from)
            .or_else(Self::default_params_path)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory for parameters"))?;

        Ok(Self {
            log_level,
            presets_path,
            params_path,
        })
    }

    /// Default parameter file: `<data dir>/draftstyle/parameters.json`
    pub fn default_params_path() -> Option<PathBuf> {
        dirs::data_dir().map(|data| data.join(APP_DIR).join(PARAMS_FILE))
    }

    /// Parse log level from string
    fn parse_log_level(level_str: &str) -> LogLevel {
        // Extract the main level from a RUST_LOG directive list
        let main_level = level_str
            .split(',')
            .next()
            .unwrap_or(level_str)
            .split('=')
            .next()
            .unwrap_or(level_str)
            .to_lowercase();

        match main_level.as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> Result<()> {
        // Logs go to stderr; stdout carries command output
        tracing_subscriber::fmt()
            .with_max_level(self.log_level.to_tracing_level())
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
            .event_format(
                tracing_subscriber::fmt::format()
                    .with_target(false)
                    .compact(),
            )
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

        tracing::debug!(
            "Logging initialized with level: {}",
            self.log_level.to_filter_string()
        );
        Ok(())
    }

    /// Validate application configuration
    pub fn validate(&self) -> Result<()> {
        if self.presets_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Preset file path cannot be empty"));
        }

        if self.params_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Parameter file path cannot be empty"));
        }

        if self.presets_path == self.params_path {
            return Err(anyhow::anyhow!(
                "Preset file and parameter file must be different: {}",
                self.presets_path.display()
            ));
        }

        if self.presets_path.is_dir() {
            return Err(anyhow::anyhow!(
                "Preset file path is a directory: {}",
                self.presets_path.display()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::StyleCommand;
    use std::collections::HashMap;

    fn cli(verbose: bool, presets: Option<&str>, params: Option<&str>) -> CliConfig {
        CliConfig {
            verbose,
            presets_path: presets.map(str::to_string),
            params_path: params.map(str::to_string),
            command: StyleCommand::List,
        }
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(AppConfig::parse_log_level("info"), LogLevel::Info);
        assert_eq!(AppConfig::parse_log_level("debug"), LogLevel::Debug);
        assert_eq!(AppConfig::parse_log_level("warn"), LogLevel::Warn);
        assert_eq!(AppConfig::parse_log_level("error"), LogLevel::Error);
        assert_eq!(AppConfig::parse_log_level("trace"), LogLevel::Trace);
        assert_eq!(AppConfig::parse_log_level("invalid"), LogLevel::Warn);
    }

    #[test]
    fn test_log_level_complex_parsing() {
        assert_eq!(
            AppConfig::parse_log_level("info,draftstyle_shared=debug"),
            LogLevel::Info
        );
        assert_eq!(
            AppConfig::parse_log_level("DEBUG,some_crate=info"),
            LogLevel::Debug
        );
    }

    #[test]
    fn test_verbose_wins_over_rust_log() {
        let config = AppConfig::from_cli_with_env(
            &cli(true, Some("/a.json"), Some("/b.json")),
            env_of(&[("RUST_LOG", "error")]),
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_default_log_level_is_warn() {
        let config =
            AppConfig::from_cli_with_env(&cli(false, Some("/a.json"), Some("/b.json")), env_of(&[]))
                .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_cli_path_wins_over_environment() {
        let config = AppConfig::from_cli_with_env(
            &cli(false, Some("/cli/presets.json"), None),
            env_of(&[
                (PRESETS_ENV, "/env/presets.json"),
                (PARAMS_ENV, "/env/params.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.presets_path, PathBuf::from("/cli/presets.json"));
        assert_eq!(config.params_path, PathBuf::from("/env/params.json"));
    }

    #[test]
    fn test_empty_environment_value_is_ignored() {
        let config = AppConfig::from_cli_with_env(
            &cli(false, None, Some("/b.json")),
            env_of(&[(PRESETS_ENV, "")]),
        );

        // Falls through to the platform default when one exists
        if let Ok(config) = config {
            assert!(config.presets_path.ends_with("draftstyle/StylePresets.json"));
        }
    }

    #[test]
    fn test_default_params_path() {
        if let Some(path) = AppConfig::default_params_path() {
            assert!(path.ends_with("draftstyle/parameters.json"));
        }
    }

    #[test]
    fn test_validation_rejects_shared_path() {
        let config = AppConfig {
            log_level: LogLevel::Info,
            presets_path: PathBuf::from("/same.json"),
            params_path: PathBuf::from("/same.json"),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig {
            log_level: LogLevel::Info,
            presets_path: temp_dir.path().to_path_buf(),
            params_path: temp_dir.path().join("params.json"),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_success() {
        let config = AppConfig {
            log_level: LogLevel::Info,
            presets_path: PathBuf::from("/data/StylePresets.json"),
            params_path: PathBuf::from("/data/parameters.json"),
        };
        assert!(config.validate().is_ok());
    }
}
