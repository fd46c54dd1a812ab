//! Command-line argument parsing with clap.
//!
//! Flags left unset fall back to the config file, then to built-in defaults;
//! see [`crate::config::Settings`].

use std::path::PathBuf;

use clap::Parser;

/// Interactive shell for an HTTP time-series database.
#[derive(Parser, Debug, Clone)]
#[command(name = "tsdb-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server host [default: localhost].
    #[arg(short = 'H', long, env = "TSDB_HOST")]
    pub host: Option<String>,

    /// Server HTTP port [default: 8086].
    #[arg(short, long, env = "TSDB_PORT")]
    pub port: Option<u16>,

    /// Username for basic auth.
    #[arg(short, long, env = "TSDB_USERNAME")]
    pub username: Option<String>,

    /// Password for basic auth.
    #[arg(short = 'P', long, env = "TSDB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Path to a TOML config file.
    #[arg(short, long, env = "TSDB_CLI_CONFIG")]
    pub config: Option<PathBuf>,
}
