//! # tsdb-cli
//!
//! Interactive command-line client for time-series databases that speak the
//! HTTP `/query` + `/write` protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐ line ┌────────────┐ form/line protocol ┌────────────┐
//! │   repl   │─────►│ dispatcher │───────────────────►│   server   │
//! └──────────┘      └────────────┘◄───────────────────└────────────┘
//!                      │  ▲   │        JSON body
//!               session│  │   ▼
//!                   ┌─────────┐   ┌────────┐
//!                   │ Session │   │ output │──► stdout tables
//!                   └─────────┘   └────────┘
//! ```
//!
//! The [`dispatcher::Dispatcher`] owns the [`session::Session`] and a
//! [`client::Transport`]. It classifies each line with
//! [`command::Command::parse`], and either updates the session or sends the
//! line to the server and renders the response through [`output`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod output;
pub mod prompt;
pub mod repl;
pub mod session;

pub use cli::Cli;
pub use client::{HttpClient, Transport};
pub use dispatcher::{Dispatcher, Outcome};
pub use error::CliError;
pub use session::Session;
