//! Authenticated user lookup.

use reqwest::Method;
use serde::Deserialize;

use super::client::RepositoryClient;
use super::error::{GitHubError, Result};

#[derive(Debug, Deserialize)]
struct CurrentUser {
    login: String,
}

impl RepositoryClient {
    /// Login of the user the access token belongs to (`GET /user`).
    ///
    /// The result is cached for the current credential; only the first call
    /// after `authenticate` reaches the API.
    pub async fn current_user_login(&mut self) -> Result<String> {
        if let Some(login) = self.cached_login() {
            return Ok(login.to_string());
        }

        let response = self.send(Method::GET, "/user", None).await?;
        let response = Self::expect_status(response, 200)?;
        let user: CurrentUser = serde_json::from_value(response.body)
            .map_err(|e| GitHubError::Decode(format!("current user: {e}")))?;

        tracing::debug!(login = %user.login, "resolved current user");
        self.cache_login(&user.login);
        Ok(user.login)
    }
}
