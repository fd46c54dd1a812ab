//! Interactive credential entry for the `auth` command.

use std::io::{self, BufRead, Write};

use crate::error::CliError;

/// Source of credentials typed by the user.
pub trait CredentialPrompt {
    /// Read a username. Input is echoed.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Prompt`] if the terminal cannot be read.
    fn username(&mut self) -> Result<String, CliError>;

    /// Read a password. Input is not echoed.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Prompt`] if the terminal cannot be read.
    fn password(&mut self) -> Result<String, CliError>;
}

/// Prompts on stdout and reads from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn username(&mut self) -> Result<String, CliError> {
        print!("username: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| CliError::Prompt(format!("failed to read username: {e}")))?;
        Ok(input.trim().to_string())
    }

    fn password(&mut self) -> Result<String, CliError> {
        rpassword::prompt_password("password: ")
            .map_err(|e| CliError::Prompt(format!("failed to read password: {e}")))
    }
}

/// Replays fixed answers; used by tests and scripted sessions.
#[derive(Debug, Clone, Default)]
pub struct StaticPrompt {
    username: String,
    password: String,
}

impl StaticPrompt {
    /// Create a prompt that always answers with the given credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialPrompt for StaticPrompt {
    fn username(&mut self) -> Result<String, CliError> {
        Ok(self.username.clone())
    }

    fn password(&mut self) -> Result<String, CliError> {
        Ok(self.password.clone())
    }
}
