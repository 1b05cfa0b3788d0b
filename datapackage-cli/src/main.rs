//! datapackage CLI - inspect, validate and read Data Packages.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommands;
use commands::validate::ValidateArgs;
use error::CliError;
use runner::{CliRunner, GlobalArgs};

#[derive(Debug, Parser)]
#[command(name = "datapackage", version, about = "Inspect, validate and read Data Packages")]
struct Cli {
    /// Configuration file (defaults to ~/.datapackage/config.ini)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Descriptor filename looked up in directories and URL prefixes
    #[arg(long, global = true, value_name = "NAME")]
    default_filename: Option<String>,

    /// Treat every resource as local
    #[arg(long, global = true, conflicts_with = "remote")]
    local: bool,

    /// Treat every resource as remote
    #[arg(long, global = true)]
    remote: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show a package summary
    Info {
        /// Path, directory, URL, or - for stdin
        reference: String,
    },

    /// List resolved resources
    Resources {
        /// Path, directory, URL, or - for stdin
        reference: String,
    },

    /// Print a descriptor property as JSON
    Property {
        /// Path, directory, URL, or - for stdin
        reference: String,
        /// Property name
        name: String,
    },

    /// Print the data of one resource
    Data {
        /// Path, directory, URL, or - for stdin
        reference: String,
        /// Resource name or zero-based index
        resource: String,
    },

    /// Validate a package against the base schema or a custom one
    Validate {
        /// Path, directory, URL, or - for stdin
        reference: String,
        /// JSON Schema file to validate against instead of the base schema
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    fn global_args(&self) -> GlobalArgs {
        let local = match (self.local, self.remote) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        GlobalArgs {
            config: self.config.clone(),
            default_filename: self.default_filename.clone(),
            local,
            timeout: self.timeout,
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `-v` flags.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let runner = CliRunner::new(&cli.global_args())?;

    match cli.command {
        Commands::Info { reference } => commands::info::run(&runner, &reference),
        Commands::Resources { reference } => commands::resources::run(&runner, &reference),
        Commands::Property { reference, name } => {
            commands::property::run(&runner, &reference, &name)
        }
        Commands::Data {
            reference,
            resource,
        } => commands::data::run(&runner, &reference, &resource),
        Commands::Validate {
            reference,
            schema,
            strict,
        } => commands::validate::run(
            &runner,
            ValidateArgs {
                reference,
                schema,
                strict,
            },
        ),
        Commands::Config { command } => commands::config::run(&runner, command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_local_and_remote_flags() {
        let cli = Cli::parse_from(["datapackage", "--remote", "info", "pkg"]);
        assert_eq!(cli.global_args().local, Some(false));

        let cli = Cli::parse_from(["datapackage", "info", "pkg", "--local"]);
        assert_eq!(cli.global_args().local, Some(true));

        let cli = Cli::parse_from(["datapackage", "info", "pkg"]);
        assert_eq!(cli.global_args().local, None);
    }

    #[test]
    fn test_local_conflicts_with_remote() {
        let result = Cli::try_parse_from(["datapackage", "--local", "--remote", "info", "pkg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_arguments() {
        let cli = Cli::parse_from([
            "datapackage",
            "-vv",
            "validate",
            "pkg",
            "--schema",
            "schema.json",
            "--strict",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate { schema, strict, .. } => {
                assert_eq!(schema, Some(PathBuf::from("schema.json")));
                assert!(strict);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
