//! Configuration file support.
//!
//! Settings live in `~/.datapackage/config.ini`:
//!
//! ```ini
//! [loader]
//! default_filename = datapackage.json
//! ; local = true
//!
//! [http]
//! timeout_secs = 30
//! user_agent = datapackage/0.1.0
//! ```
//!
//! A missing file yields defaults. Unset keys keep their defaults.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::fetch::{FetchError, ReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::package::{PackageOptions, DEFAULT_FILENAME};

const LOADER_SECTION: &str = "loader";
const HTTP_SECTION: &str = "http";

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to read config {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The file could not be written.
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A key holds a value of the wrong type.
    #[error("invalid value for {section}.{key}: '{value}'")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },

    /// The home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,
}

/// `[loader]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    pub default_filename: String,
    pub local: Option<bool>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            default_filename: DEFAULT_FILENAME.to_string(),
            local: None,
        }
    }
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub loader: LoaderSettings,
    pub http: HttpSettings,
}

/// Default location of the configuration file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".datapackage").join("config.ini"))
        .ok_or(ConfigError::NoHomeDir)
}

impl ConfigFile {
    /// Load from the default location, or defaults if the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some(LOADER_SECTION)) {
            if let Some(filename) = section.get("default_filename") {
                config.loader.default_filename = filename.trim().to_string();
            }
            if let Some(local) = section.get("local") {
                config.loader.local = Some(parse_bool(LOADER_SECTION, "local", local)?);
            }
        }

        if let Some(section) = ini.section(Some(HTTP_SECTION)) {
            if let Some(timeout) = section.get("timeout_secs") {
                config.http.timeout_secs =
                    timeout
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue {
                            section: HTTP_SECTION,
                            key: "timeout_secs",
                            value: timeout.to_string(),
                        })?;
            }
            if let Some(agent) = section.get("user_agent") {
                config.http.user_agent = agent.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some(LOADER_SECTION))
            .set("default_filename", self.loader.default_filename.as_str());
        if let Some(local) = self.loader.local {
            ini.with_section(Some(LOADER_SECTION))
                .set("local", local.to_string());
        }
        ini.with_section(Some(HTTP_SECTION))
            .set("timeout_secs", self.http.timeout_secs.to_string())
            .set("user_agent", self.http.user_agent.as_str());

        ini.write_to_file(path).map_err(write_err)
    }

    /// Loader options described by this configuration.
    pub fn package_options(&self) -> PackageOptions {
        PackageOptions::new()
            .with_local(self.loader.local)
            .with_default_filename(self.loader.default_filename.clone())
    }

    /// HTTP client configured with these settings.
    pub fn http_client(&self) -> Result<ReqwestClient, FetchError> {
        ReqwestClient::with_settings(
            Duration::from_secs(self.http.timeout_secs),
            &self.http.user_agent,
        )
    }
}

fn parse_bool(section: &'static str, key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            section,
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("config.ini")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.loader.default_filename, "datapackage.json");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_load_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(
            &path,
            "[loader]\ndefault_filename = package.json\nlocal = false\n\n[http]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.loader.default_filename, "package.json");
        assert_eq!(config.loader.local, Some(false));
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);

        let options = config.package_options();
        assert_eq!(options.default_filename, "package.json");
        assert_eq!(options.local, Some(false));
    }

    #[test]
    fn test_invalid_timeout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[http]\ntimeout_secs = soon\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "timeout_secs", .. }));
    }

    #[test]
    fn test_invalid_local_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        fs::write(&path, "[loader]\nlocal = maybe\n").unwrap();

        assert!(ConfigFile::load_from(&path).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.loader.default_filename = "valid-datapackage.json".to_string();
        config.loader.local = Some(true);
        config.http.timeout_secs = 90;
        config.save_to(&path).unwrap();

        assert_eq!(ConfigFile::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_http_client_from_settings() {
        assert!(ConfigFile::default().http_client().is_ok());
    }
}
