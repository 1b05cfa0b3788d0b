//! Shared setup for commands: configuration, HTTP client and loader.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use datapackage::config::{config_file_path, ConfigFile};
use datapackage::descriptor::parse_descriptor;
use datapackage::{HttpClient, Package, PackageLoader};

use crate::error::CliError;

/// Reference value meaning "read the descriptor from standard input".
pub const STDIN_REFERENCE: &str = "-";

/// Settings given on the command line; each overrides the config file.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub default_filename: Option<String>,
    pub local: Option<bool>,
    pub timeout: Option<u64>,
}

/// Resolved configuration plus a ready-to-use loader.
pub struct CliRunner {
    config: ConfigFile,
    config_path: Option<PathBuf>,
    loader: PackageLoader,
}

impl CliRunner {
    /// Load configuration, apply CLI overrides and build the loader.
    pub fn new(args: &GlobalArgs) -> Result<Self, CliError> {
        let config_path = match &args.config {
            Some(path) => Some(path.clone()),
            None => config_file_path().ok(),
        };
        let mut config = match &config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::default(),
        };

        // CLI takes precedence over the config file
        if let Some(filename) = &args.default_filename {
            config.loader.default_filename = filename.clone();
        }
        if args.local.is_some() {
            config.loader.local = args.local;
        }
        if let Some(timeout) = args.timeout {
            config.http.timeout_secs = timeout;
        }

        let http = config.http_client()?;
        let loader = PackageLoader::with_http_client(config.package_options(), Arc::new(http));

        tracing::debug!(
            default_filename = %config.loader.default_filename,
            local = ?config.loader.local,
            timeout = ?Duration::from_secs(config.http.timeout_secs),
            "CLI configuration resolved"
        );

        Ok(Self {
            config,
            config_path,
            loader,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub fn http(&self) -> &dyn HttpClient {
        self.loader.http_client()
    }

    /// Load a package from a path, URL, or `-` for standard input.
    pub fn load(&self, reference: &str) -> Result<Package, CliError> {
        if reference == STDIN_REFERENCE {
            let mut text = Vec::new();
            io::stdin()
                .read_to_end(&mut text)
                .map_err(|e| CliError::InvalidArgument(format!("failed to read stdin: {}", e)))?;
            let descriptor = parse_descriptor(&text, "<stdin>")?;
            return Ok(self.loader.load(descriptor)?);
        }

        Ok(self.loader.load(reference)?)
    }
}
