//! GitHub API error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub authentication failed: {0}")]
    Auth(String),

    #[error("GitHub API error: {message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("GitHub API request timed out")]
    Timeout,

    #[error("No response has been recorded yet")]
    NoResponse,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP transport error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Failed to decode GitHub response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl GitHubError {
    /// HTTP status attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Build a human-readable message from a GitHub error body.
///
/// GitHub answers errors with `{"message": "...", "errors": [{"field", "code"}]}`.
/// Falls back to the raw body text, then to a generic status description.
pub(crate) fn format_error_body(status: u16, body: &serde_json::Value) -> String {
    let base = match body {
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
    .unwrap_or_else(|| format!("unexpected status {status}"));

    let details = body
        .get("errors")
        .and_then(|v| v.as_array())
        .map(|errors| format_error_details(errors))
        .unwrap_or_default();

    format!("{base}{details}")
}

/// Format error details from GitHub API errors array.
/// Returns a formatted string like "[field1 is code1, field2 is code2]" or empty string.
fn format_error_details(errors: &[serde_json::Value]) -> String {
    let error_details: Vec<String> = errors
        .iter()
        .filter_map(|e| {
            let field = e.get("field").and_then(|v| v.as_str());
            let code = e.get("code").and_then(|v| v.as_str());
            match (field, code) {
                (Some(f), Some(c)) => Some(format!("{f} is {c}")),
                (Some(f), None) => Some(f.to_string()),
                (None, Some(c)) => Some(c.to_string()),
                (None, None) => None,
            }
        })
        .collect();

    if error_details.is_empty() {
        String::new()
    } else {
        format!(" [{}]", error_details.join(", "))
    }
}
