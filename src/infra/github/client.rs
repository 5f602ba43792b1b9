//! GitHub REST client with an explicit authentication session.
//!
//! `RepositoryClient` owns a single `reqwest::Client`, the session state and
//! the last HTTP response it received. Every request goes through
//! [`RepositoryClient::send`], which attaches the bearer token and records the
//! response before the caller inspects it.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};

use super::error::{GitHubError, Result, format_error_body};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Transport settings for [`RepositoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API root, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Authentication state of a client.
///
/// There is no transition back to `Unauthenticated`; calling
/// `authenticate` again replaces the credential.
#[derive(Clone, PartialEq, Eq)]
pub enum Session {
    Unauthenticated,
    Authenticated {
        token: String,
        /// Login resolved by the "who am I" lookup, cached per credential.
        login: Option<String>,
    },
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("Unauthenticated"),
            Self::Authenticated { login, .. } => f
                .debug_struct("Authenticated")
                .field("login", login)
                .finish_non_exhaustive(),
        }
    }
}

/// Status code and decoded body of the most recent HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct LastResponse {
    pub status_code: u16,
    /// JSON body; `Null` when empty, a JSON string when the body was not JSON.
    pub body: serde_json::Value,
}

/// A response that has already been recorded as the last response.
#[derive(Debug)]
pub(crate) struct RecordedResponse {
    pub status: u16,
    pub body: serde_json::Value,
    /// Target of the `rel="next"` entry of the `Link` header, if any.
    pub next_page: Option<String>,
    /// URL the request was sent to.
    pub url: reqwest::Url,
}

/// GitHub client for repository lifecycle operations.
pub struct RepositoryClient {
    http: reqwest::Client,
    base_url: String,
    /// Parsed `base_url`; absolute targets must share its origin.
    base: reqwest::Url,
    session: Session,
    last_response: Option<LastResponse>,
}

impl std::fmt::Debug for RepositoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("last_response", &self.last_response)
            .finish_non_exhaustive()
    }
}

impl RepositoryClient {
    /// Create an unauthenticated client.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-scenarios/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(GitHubError::Http)?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = reqwest::Url::parse(&base_url).map_err(|e| {
            GitHubError::InvalidInput(format!("invalid API base URL '{}': {e}", config.base_url))
        })?;

        Ok(Self {
            http,
            base_url,
            base,
            session: Session::Unauthenticated,
            last_response: None,
        })
    }

    /// Attach an access token to this client.
    ///
    /// The token is not validated here; GitHub rejects a bad token on first
    /// use, which surfaces as [`GitHubError::Auth`].
    pub fn authenticate(&mut self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(GitHubError::Auth("access token is empty".to_string()));
        }
        if HeaderValue::from_str(&format!("Bearer {token}")).is_err() {
            return Err(GitHubError::Auth(
                "access token contains invalid characters".to_string(),
            ));
        }

        tracing::debug!("session authenticated");
        self.session = Session::Authenticated {
            token: token.to_string(),
            login: None,
        };
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Status code of the most recent response.
    pub fn last_status_code(&self) -> Result<u16> {
        self.last_response
            .as_ref()
            .map(|r| r.status_code)
            .ok_or(GitHubError::NoResponse)
    }

    pub fn last_response(&self) -> Option<&LastResponse> {
        self.last_response.as_ref()
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn cached_login(&self) -> Option<&str> {
        match &self.session {
            Session::Authenticated { login, .. } => login.as_deref(),
            Session::Unauthenticated => None,
        }
    }

    pub(crate) fn cache_login(&mut self, resolved: &str) {
        if let Session::Authenticated { login, .. } = &mut self.session {
            *login = Some(resolved.to_string());
        }
    }

    fn token(&self) -> Result<&str> {
        match &self.session {
            Session::Authenticated { token, .. } => Ok(token),
            Session::Unauthenticated => Err(GitHubError::Auth(
                "client is not authenticated; call authenticate first".to_string(),
            )),
        }
    }

    /// Issue an authenticated request and record its response.
    ///
    /// `target` is either an API path (`/user/repos`) or an absolute URL taken
    /// from a `Link` header. Fails with [`GitHubError::Auth`] before any I/O
    /// when the session is unauthenticated. Status codes are not checked here;
    /// use [`RepositoryClient::expect_status`].
    pub(crate) async fn send(
        &mut self,
        method: Method,
        target: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<RecordedResponse> {
        let bearer = format!("Bearer {}", self.token()?);
        let url = self.resolve(target)?;

        tracing::debug!(%method, %url, "sending GitHub request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, bearer);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let next_page = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(super::repo::next_page_link);
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        tracing::debug!(%method, %url, status, "received GitHub response");

        self.last_response = Some(LastResponse {
            status_code: status,
            body: body.clone(),
        });

        Ok(RecordedResponse {
            status,
            body,
            next_page,
            url,
        })
    }

    /// Turn a request target into the URL to send it to.
    ///
    /// Absolute URLs come from response headers, so they are only followed
    /// when they point at the configured API origin; the bearer token must
    /// never reach another host.
    fn resolve(&self, target: &str) -> Result<reqwest::Url> {
        if !(target.starts_with("http://") || target.starts_with("https://")) {
            return reqwest::Url::parse(&format!("{}{}", self.base_url, target))
                .map_err(|e| GitHubError::InvalidInput(format!("invalid API path '{target}': {e}")));
        }

        let url = reqwest::Url::parse(target)
            .map_err(|e| GitHubError::Decode(format!("invalid link target '{target}': {e}")))?;
        if url.origin() != self.base.origin() {
            return Err(GitHubError::Decode(format!(
                "refusing to follow link to {} outside {}",
                url, self.base_url
            )));
        }
        Ok(url)
    }

    /// Check a recorded response against the status code an operation expects.
    pub(crate) fn expect_status(
        response: RecordedResponse,
        expected: u16,
    ) -> Result<RecordedResponse> {
        if response.status == expected {
            return Ok(response);
        }

        let message = format_error_body(response.status, &response.body);
        if response.status == 401 {
            return Err(GitHubError::Auth(format!(
                "GitHub rejected the access token: {message}"
            )));
        }

        Err(GitHubError::Api {
            status: response.status,
            message,
        })
    }
}

fn decode_body(bytes: &[u8]) -> serde_json::Value {
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
