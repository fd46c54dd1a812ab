//! Startup configuration.
//!
//! Values come from, in order of precedence:
//! 1. command-line flags (or their environment variables)
//! 2. an optional TOML config file
//! 3. built-in defaults
//!
//! ```toml
//! host = "db.example.com"
//! port = 8086
//! username = "admin"
//! password = "secret"
//! database = "telegraf"
//! retention_policy = "autogen"
//! precision = "s"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::CliError;
use crate::session::Session;

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8086;

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Server host.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Username for basic auth.
    pub username: Option<String>,
    /// Password for basic auth.
    pub password: Option<String>,
    /// Initial database.
    pub database: Option<String>,
    /// Initial retention policy.
    pub retention_policy: Option<String>,
    /// Initial timestamp precision.
    pub precision: Option<String>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CliError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        toml::from_str(content).map_err(|e| CliError::Config(format!("invalid TOML: {e}")))
    }
}

/// Fully resolved startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Session the shell starts with.
    pub session: Session,
}

impl Settings {
    /// Merge command-line arguments over the config file named by `--config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the host is
    /// empty.
    pub fn resolve(cli: &Cli) -> Result<Self, CliError> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Merge command-line arguments over an already loaded config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved host is empty.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self, CliError> {
        let host = cli
            .host
            .clone()
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.trim().is_empty() {
            return Err(CliError::Config("host cannot be empty".into()));
        }

        let port = cli.port.or(file.port).unwrap_or(DEFAULT_PORT);

        let mut session = Session::new();
        if let Some(username) = cli.username.clone().or(file.username) {
            session.set_username(username);
        }
        if let Some(password) = cli.password.clone().or(file.password) {
            session.set_password(password);
        }
        if let Some(database) = file.database {
            session.set_database(database);
        }
        if let Some(policy) = file.retention_policy {
            session.set_retention_policy(policy);
        }
        if let Some(precision) = file.precision {
            session.set_precision(precision);
        }

        Ok(Self {
            host,
            port,
            session,
        })
    }
}
