//! Interactive prompt loop.
//!
//! rustyline owns the terminal: line editing, in-memory history, and raw-mode
//! restoration when the editor is dropped. Ctrl-C and Ctrl-D end the session
//! the same way `exit` does.

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::client::Transport;
use crate::dispatcher::{Dispatcher, Outcome};
use crate::error::CliError;
use crate::prompt::CredentialPrompt;

/// Prompt shown before each line.
pub const PROMPT: &str = "> ";

/// Read lines until an exit command, interrupt or end of input.
///
/// # Errors
///
/// Returns [`CliError::Prompt`] if the terminal cannot be set up or read.
/// Command failures are printed and do not end the loop.
pub async fn run_interactive<T, P>(dispatcher: &mut Dispatcher<T, P>) -> Result<(), CliError>
where
    T: Transport,
    P: CredentialPrompt,
{
    let mut editor = DefaultEditor::new().map_err(|e| CliError::Prompt(e.to_string()))?;
    let mut stdout = io::stdout();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line) {
                    debug!(error = %e, "Failed to record history");
                }
                if dispatcher.handle_line(&mut stdout, line).await == Outcome::Exit {
                    break;
                }
                stdout.flush()?;
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(CliError::Prompt(e.to_string())),
        }
    }

    shutdown(&mut stdout)
}

/// Runs once when the session ends, whatever ended it.
fn shutdown<W: Write>(writer: &mut W) -> Result<(), CliError> {
    debug!("Session closed");
    writer.flush()?;
    Ok(())
}
