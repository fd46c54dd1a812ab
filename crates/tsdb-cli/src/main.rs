//! tsdb-cli binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tsdb_cli::config::Settings;
use tsdb_cli::prompt::TerminalPrompt;
use tsdb_cli::{repl, Cli, CliError, Dispatcher, HttpClient};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Single-threaded: one line, one request, at a time.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = Settings::resolve(cli)?;
    let client = HttpClient::new(&settings.host, settings.port)?;
    info!(server = %client.base_url(), "Starting shell");

    let mut dispatcher = Dispatcher::new(client, TerminalPrompt).with_session(settings.session);
    repl::run_interactive(&mut dispatcher).await
}
