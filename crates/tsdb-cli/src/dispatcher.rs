//! Command dispatch.
//!
//! One input line in, exactly one handler run. Handler errors are printed by
//! [`Dispatcher::handle_line`] and never end the session; only an exit
//! command does.

use std::io::Write;

use tracing::{debug, warn};

use crate::client::{QueryRequest, Transport, WriteRequest};
use crate::command::{first_argument, Command};
use crate::error::CliError;
use crate::output;
use crate::prompt::CredentialPrompt;
use crate::session::Session;

/// Usage text printed by `help`.
pub const HELP_TEXT: &str = "\
Usage:
    auth                    prompts for username and password
    use <db name>           sets current database
    rp <retention policy>   sets current retention policy
    precision <format>      specifies the format of the timestamp: rfc3339, h, m, s, ms, u or ns
    insert <line protocol>  writes points in line protocol to the current database
    exit/quit/ctrl+d        quits the shell

    show databases          show database names
    show series             show series information
    show measurements       show measurement information
    show tag keys           show tag key information
    show field keys         show field key information

    create, drop, explain, kill, grant, alter, revoke and set statements
    are sent to the server as typed.";

/// Characters in `"insert "`; everything after them is the line protocol payload.
const INSERT_PREFIX_CHARS: usize = 7;

/// What the input loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Read the next line.
    Continue,
    /// End the session.
    Exit,
}

/// Routes input lines to handlers, owning the session and transport.
#[derive(Debug)]
pub struct Dispatcher<T, P> {
    session: Session,
    transport: T,
    prompt: P,
}

impl<T: Transport, P: CredentialPrompt> Dispatcher<T, P> {
    /// Create a dispatcher with an empty session.
    pub fn new(transport: T, prompt: P) -> Self {
        Self {
            session: Session::new(),
            transport,
            prompt,
        }
    }

    /// Start from a pre-populated session.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one line, printing any error instead of returning it.
    ///
    /// Blank lines are ignored.
    pub async fn handle_line<W: Write>(&mut self, writer: &mut W, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Continue;
        }

        match self.dispatch(writer, line).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "Command failed");
                if let Err(write_err) = writeln!(writer, "{e}") {
                    warn!(error = %write_err, "Failed to report command error");
                }
                Outcome::Continue
            }
        }
    }

    /// Run one trimmed, non-empty line.
    ///
    /// # Errors
    ///
    /// Returns the handler's error: [`CliError::InvalidArgument`],
    /// [`CliError::UnsupportedCommand`], [`CliError::Transport`] or
    /// [`CliError::Decode`].
    pub async fn dispatch<W: Write>(
        &mut self,
        writer: &mut W,
        line: &str,
    ) -> Result<Outcome, CliError> {
        let command = Command::parse(line);
        debug!(?command, "Dispatching");

        match command {
            Command::Exit => return Ok(Outcome::Exit),
            Command::Help => writeln!(writer, "{HELP_TEXT}")?,
            Command::Use => {
                let database = required_argument(line, "use <db name>")?;
                self.session.set_database(database);
            }
            Command::RetentionPolicy => {
                let policy = required_argument(line, "rp <retention policy>")?;
                self.session.set_retention_policy(policy);
            }
            Command::Precision => {
                let precision = required_argument(line, "precision <rfc3339|h|m|s|ms|u|ns>")?;
                self.session.set_precision(precision);
            }
            Command::Auth => self.auth(writer)?,
            Command::Insert => self.insert(line).await?,
            Command::Query => self.query(writer, line).await?,
            Command::Unsupported(token) => return Err(CliError::UnsupportedCommand(token)),
        }

        Ok(Outcome::Continue)
    }

    fn auth<W: Write>(&mut self, writer: &mut W) -> Result<(), CliError> {
        // Pending output must land before the prompt takes over the terminal.
        writer.flush()?;
        let username = self.prompt.username()?;
        let password = self.prompt.password()?;
        self.session.set_credentials(username, password);
        debug!(username = %self.session.username(), "Credentials updated");
        Ok(())
    }

    async fn insert(&mut self, line: &str) -> Result<(), CliError> {
        let payload = line
            .char_indices()
            .nth(INSERT_PREFIX_CHARS)
            .map(|(start, _)| &line[start..])
            .ok_or_else(|| CliError::InvalidArgument("insert <line protocol>".into()))?;

        let request = WriteRequest::new(
            self.session.database(),
            self.session.retention_policy(),
            payload,
        )
        .with_auth(self.session.credentials());

        self.transport.write(&request).await
    }

    async fn query<W: Write>(&mut self, writer: &mut W, line: &str) -> Result<(), CliError> {
        let request = QueryRequest::new(
            self.session.database(),
            self.session.retention_policy(),
            line,
            self.session.precision(),
        )
        .with_auth(self.session.credentials());

        let body = self.transport.query(&request).await?;
        output::render_response(writer, &body)
    }
}

fn required_argument<'a>(line: &'a str, usage: &str) -> Result<&'a str, CliError> {
    first_argument(line).ok_or_else(|| CliError::InvalidArgument(usage.to_string()))
}
