//! Per-process session context.
//!
//! Holds what the user has selected so far (`use`, `rp`, `precision`, `auth`).
//! Setters never validate; a bad database name is the server's problem.

use crate::client::BasicAuth;

/// Mutable shell context, shared by every command in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    database: String,
    retention_policy: String,
    precision: String,
    username: String,
    password: String,
}

impl Session {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected database.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Select the database used by subsequent commands.
    pub fn set_database(&mut self, database: impl Into<String>) {
        self.database = database.into();
    }

    /// Selected retention policy.
    #[must_use]
    pub fn retention_policy(&self) -> &str {
        &self.retention_policy
    }

    /// Select the retention policy used by subsequent commands.
    pub fn set_retention_policy(&mut self, retention_policy: impl Into<String>) {
        self.retention_policy = retention_policy.into();
    }

    /// Timestamp precision requested for query results.
    #[must_use]
    pub fn precision(&self) -> &str {
        &self.precision
    }

    /// Set the timestamp precision (`rfc3339`, `h`, `m`, `s`, `ms`, `u`, `ns`).
    pub fn set_precision(&mut self, precision: impl Into<String>) {
        self.precision = precision.into();
    }

    /// Username, empty if not authenticated.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Set the username.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Password, empty if not authenticated.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Set the password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Replace both credentials at once.
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.username = username.into();
        self.password = password.into();
    }

    /// Credentials to attach to requests, if a username has been set.
    #[must_use]
    pub fn credentials(&self) -> Option<BasicAuth> {
        if self.username.is_empty() {
            return None;
        }
        Some(BasicAuth::new(&self.username, &self.password))
    }
}
