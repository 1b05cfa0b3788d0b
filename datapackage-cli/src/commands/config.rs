//! Configuration CLI commands.

use clap::Subcommand;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// List the effective settings (config file plus CLI overrides)
    List,

    /// Write the effective settings to the configuration file
    Save,
}

/// Run a config subcommand.
pub fn run(runner: &CliRunner, command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            let path = require_path(runner)?;
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::List => {
            let config = runner.config();
            println!("loader.default_filename = {}", config.loader.default_filename);
            println!(
                "loader.local            = {}",
                config
                    .loader
                    .local
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "(inspect)".to_string())
            );
            println!("http.timeout_secs       = {}", config.http.timeout_secs);
            println!("http.user_agent         = {}", config.http.user_agent);
            Ok(())
        }
        ConfigCommands::Save => {
            let path = require_path(runner)?;
            runner.config().save_to(path)?;
            println!("Configuration written to {}", path.display());
            Ok(())
        }
    }
}

fn require_path(runner: &CliRunner) -> Result<&std::path::PathBuf, CliError> {
    runner.config_path().ok_or_else(|| {
        CliError::Config(
            "could not determine the configuration file path; use --config".to_string(),
        )
    })
}
