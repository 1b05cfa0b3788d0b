//! CLI error types.

use std::fmt;

use datapackage::config::ConfigError;
use datapackage::{FetchError, PackageError};

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Loading or reading a package failed.
    Package(PackageError),

    /// Configuration error.
    Config(String),

    /// Failed to create the HTTP client.
    Http(FetchError),

    /// A command argument was out of range or malformed.
    InvalidArgument(String),

    /// Validation finished with errors (or warnings in strict mode).
    ValidationFailed { errors: usize, warnings: usize },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Package(e) => write!(f, "{}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Http(e) => write!(f, "HTTP client error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::ValidationFailed { errors, warnings } => write!(
                f,
                "Validation failed with {} error(s) and {} warning(s)",
                errors, warnings
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Package(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::Config(_) | CliError::InvalidArgument(_) | CliError::ValidationFailed { .. } => {
                None
            }
        }
    }
}

impl From<PackageError> for CliError {
    fn from(e: PackageError) -> Self {
        CliError::Package(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Http(e)
    }
}
