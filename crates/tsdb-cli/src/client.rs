//! HTTP client for the query and write endpoints.
//!
//! Both endpoints take a `POST`:
//!
//! ```text
//! POST /query                 form body: db, rp, q, epoch
//! POST /write?db=<db>&rp=<rp> body: line protocol
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use tsdb_cli::client::{HttpClient, QueryRequest, Transport};
//!
//! # async fn example() -> Result<(), tsdb_cli::CliError> {
//! let client = HttpClient::new("localhost", 8086)?;
//! let body = client
//!     .query(&QueryRequest::new("mydb", "", "show measurements", "s"))
//!     .await?;
//! println!("{}", String::from_utf8_lossy(&body));
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, trace};

use crate::error::CliError;

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default overall request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    token: String,
}

impl BasicAuth {
    /// Encode `username:password`.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        let token =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        Self { token }
    }

    /// The bare Base64 token, without any scheme prefix.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Basic {}", self.token)
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth").finish_non_exhaustive()
    }
}

/// A statement to run against `/query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    /// Target database.
    pub database: String,
    /// Target retention policy.
    pub retention_policy: String,
    /// Statement text, sent verbatim.
    pub command: String,
    /// Timestamp precision, mapped to the `epoch` parameter.
    pub precision: String,
    /// Credentials, if any.
    pub auth: Option<BasicAuth>,
}

impl QueryRequest {
    /// Create an unauthenticated query request.
    #[must_use]
    pub fn new(
        database: impl Into<String>,
        retention_policy: impl Into<String>,
        command: impl Into<String>,
        precision: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            retention_policy: retention_policy.into(),
            command: command.into(),
            precision: precision.into(),
            auth: None,
        }
    }

    /// Attach credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Option<BasicAuth>) -> Self {
        self.auth = auth;
        self
    }

    /// The `epoch` form value for this request's precision.
    ///
    /// RFC3339 is the server's default output, requested by leaving `epoch`
    /// empty. Everything else passes through unchanged.
    #[must_use]
    pub fn epoch(&self) -> &str {
        if self.precision.eq_ignore_ascii_case("rfc3339") {
            ""
        } else {
            &self.precision
        }
    }

    fn form(&self) -> [(&'static str, &str); 4] {
        [
            ("db", self.database.as_str()),
            ("rp", self.retention_policy.as_str()),
            ("q", self.command.as_str()),
            ("epoch", self.epoch()),
        ]
    }
}

/// A line-protocol payload for `/write`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteRequest {
    /// Target database.
    pub database: String,
    /// Target retention policy.
    pub retention_policy: String,
    /// Line protocol body.
    pub line_protocol: String,
    /// Credentials, if any.
    pub auth: Option<BasicAuth>,
}

impl WriteRequest {
    /// Create an unauthenticated write request.
    #[must_use]
    pub fn new(
        database: impl Into<String>,
        retention_policy: impl Into<String>,
        line_protocol: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            retention_policy: retention_policy.into(),
            line_protocol: line_protocol.into(),
            auth: None,
        }
    }

    /// Attach credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Option<BasicAuth>) -> Self {
        self.auth = auth;
        self
    }
}

/// Query/write transport.
///
/// This trait allows for testing with fake implementations.
pub trait Transport {
    /// Run a statement and return the raw response body.
    ///
    /// The HTTP status is not inspected; server errors arrive in the body.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Transport`] on connection failure or timeout.
    fn query(
        &self,
        request: &QueryRequest,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, CliError>>;

    /// Submit line protocol.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Transport`] on connection failure, timeout, or a
    /// non-success status.
    fn write(
        &self,
        request: &WriteRequest,
    ) -> impl std::future::Future<Output = Result<(), CliError>>;
}

/// reqwest-backed transport bound to one server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpClient {
    /// Create a client for `http://<host>:<port>` with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(host: &str, port: u16) -> Result<Self, CliError> {
        Self::with_timeouts(host, port, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with custom timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeouts(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| CliError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: format!("http://{host}:{port}"),
            http,
        })
    }

    /// Server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str, auth: Option<&BasicAuth>) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .post(format!("{}{path}", self.base_url))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        match auth {
            Some(auth) => builder.header(AUTHORIZATION, auth.header_value()),
            None => builder,
        }
    }
}

impl Transport for HttpClient {
    async fn query(&self, request: &QueryRequest) -> Result<Vec<u8>, CliError> {
        debug!(
            db = %request.database,
            rp = %request.retention_policy,
            epoch = %request.epoch(),
            "Sending query"
        );

        let response = self
            .post("/query", request.auth.as_ref())
            .form(&request.form())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        trace!(%status, bytes = body.len(), "Received query response");
        Ok(body.to_vec())
    }

    async fn write(&self, request: &WriteRequest) -> Result<(), CliError> {
        debug!(
            db = %request.database,
            rp = %request.retention_policy,
            bytes = request.line_protocol.len(),
            "Sending write"
        );

        let response = self
            .post("/write", request.auth.as_ref())
            .query(&[
                ("db", request.database.as_str()),
                ("rp", request.retention_policy.as_str()),
            ])
            .body(request.line_protocol.clone())
            .send()
            .await?;

        let response = response.error_for_status()?;
        trace!(status = %response.status(), "Write accepted");
        Ok(())
    }
}
