//! CLI error types.

use thiserror::Error;

/// Errors surfaced by the shell.
///
/// Everything except [`CliError::Config`] is recoverable: the dispatcher
/// prints it and keeps reading input.
#[derive(Debug, Error)]
pub enum CliError {
    /// A command was given the wrong number of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The first token of the line is not a known command.
    #[error("unsupported command: {0}")]
    UnsupportedCommand(String),

    /// Connection, timeout or DNS failure talking to the server.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body is not a valid query result.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading from the terminal failed.
    #[error("prompt error: {0}")]
    Prompt(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(error_chain(&err))
    }
}

/// Flattens an error and its sources into one line.
///
/// reqwest reports "error sending request for url (...)" at the top level and
/// keeps the actual cause (refused, timed out, ...) further down the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
