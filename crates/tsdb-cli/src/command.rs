//! Input line classification.
//!
//! Only the first whitespace-delimited token decides the command. Arguments
//! are left on the raw line for the handler to pick apart.

/// Verbs forwarded verbatim to `/query`.
pub const QUERY_VERBS: &[&str] = &[
    "show", "drop", "create", "explain", "kill", "grant", "alter", "revoke", "set",
];

/// Parsed command kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `help`
    Help,
    /// `use <db>`
    Use,
    /// `rp <policy>`
    RetentionPolicy,
    /// `precision <format>`
    Precision,
    /// `auth`
    Auth,
    /// `insert <line protocol>`
    Insert,
    /// One of [`QUERY_VERBS`].
    Query,
    /// `exit`, `quit` or `\q`
    Exit,
    /// Anything else, carrying the offending token.
    Unsupported(String),
}

impl Command {
    /// Classify a trimmed input line.
    ///
    /// Matching is case-sensitive. An empty line is `Unsupported("")`.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let token = line.split_whitespace().next().unwrap_or_default();
        match token {
            "help" => Self::Help,
            "use" => Self::Use,
            "rp" => Self::RetentionPolicy,
            "precision" => Self::Precision,
            "auth" => Self::Auth,
            "insert" => Self::Insert,
            "exit" | "quit" | "\\q" => Self::Exit,
            verb if QUERY_VERBS.contains(&verb) => Self::Query,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

/// The second whitespace-delimited token of `line`, if any.
#[must_use]
pub fn first_argument(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}
