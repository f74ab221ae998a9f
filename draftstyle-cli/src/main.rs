use anyhow::Result;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error};

use draftstyle_cli::{ConfigManager, execute};

fn main() -> ExitCode {
    // Load configuration from CLI and environment
    let config_manager = match ConfigManager::from_cli_and_env() {
        Ok(config_manager) => config_manager,
        Err(e) => {
            // Logging is not up yet
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = config_manager.init_logging() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&config_manager) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_manager: &ConfigManager) -> Result<()> {
    config_manager.validate()?;

    debug!(
        "Using presets at {} and parameters at {}",
        config_manager.app.presets_path.display(),
        config_manager.app.params_path.display()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&config_manager.cli.command, &config_manager.app, &mut out)?;
    out.flush()?;

    Ok(())
}
