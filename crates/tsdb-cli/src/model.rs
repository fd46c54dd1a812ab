//! Query response envelope.
//!
//! Mirrors the JSON returned by `POST /query`:
//!
//! ```json
//! {"results": [{"series": [{"name": "cpu", "tags": {"host": "a"},
//!   "columns": ["time", "value"], "values": [[1000, 42]]}]}]}
//! ```
//!
//! Every field is optional on the wire; anything missing or `null` decodes to
//! its default so a partially populated response still renders.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::CliError;

/// Top-level query response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryResult {
    /// One entry per statement.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<SeriesResult>,
    /// Request-level error reported by the server.
    pub error: Option<String>,
}

impl QueryResult {
    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Decode`] if the body is not a JSON object of the
    /// expected shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, CliError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// All server-reported errors, request-level first.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.error
            .as_deref()
            .into_iter()
            .chain(self.results.iter().filter_map(|r| r.error.as_deref()))
    }
}

/// Result of a single statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesResult {
    /// Series produced by the statement.
    #[serde(deserialize_with = "null_as_default")]
    pub series: Vec<Series>,
    /// Statement-level error.
    pub error: Option<String>,
}

/// One table of rows sharing a measurement name and tag set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Series {
    /// Measurement name.
    pub name: Option<String>,
    /// Tag key/value pairs identifying the series.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: HashMap<String, String>,
    /// Column headers.
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<String>,
    /// Rows, one value per column.
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<Vec<Value>>,
}

/// Decodes an explicit JSON `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Series {
    /// Tags as `key=value` strings in alphabetical order.
    #[must_use]
    pub fn sorted_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .tags
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        tags.sort();
        tags
    }
}

/// A single cell.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    /// JSON `null` or a missing cell.
    #[default]
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept in its original textual precision.
    Number(serde_json::Number),
    /// JSON string.
    String(String),
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            // Not a scalar; keep the compact JSON text rather than failing the response.
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::String(other.to_string())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}
