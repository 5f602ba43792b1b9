//! Repository operations.

use std::collections::HashSet;

use lazy_regex::{regex_captures, regex_is_match};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{RecordedResponse, RepositoryClient};
use super::error::{GitHubError, Result};

const LIST_PAGE_SIZE: u32 = 100;

/// Repository to be created under the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub description: String,
    pub homepage: String,
    #[serde(rename = "private")]
    pub is_private: bool,
}

/// Projection of a listed repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
}

impl RepositoryClient {
    /// Create a repository owned by the authenticated user.
    ///
    /// `POST /user/repos`, expecting 201. Never retried: a second attempt
    /// after an ambiguous failure would fail with "name already exists".
    pub async fn create_repository(&mut self, descriptor: &RepositoryDescriptor) -> Result<()> {
        if descriptor.name.trim().is_empty() {
            return Err(GitHubError::InvalidInput(
                "repository name must not be empty".to_string(),
            ));
        }

        let body = serde_json::to_value(descriptor)
            .map_err(|e| GitHubError::InvalidInput(e.to_string()))?;
        let response = self.send(Method::POST, "/user/repos", Some(&body)).await?;
        Self::expect_status(response, 201)?;

        tracing::info!(name = %descriptor.name, private = descriptor.is_private, "created repository");
        Ok(())
    }

    /// Delete `owner/name`, resolving the owner via `GET /user` when `None`.
    ///
    /// `DELETE /repos/{owner}/{name}`, expecting 204.
    pub async fn delete_repository(&mut self, owner: Option<&str>, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(GitHubError::InvalidInput(
                "repository name must not be empty".to_string(),
            ));
        }

        validate_path_segment("repository name", name)?;
        if let Some(owner) = owner {
            validate_path_segment("owner", owner)?;
        }

        let owner = match owner {
            Some(owner) => owner.to_string(),
            None => {
                let login = self.current_user_login().await?;
                validate_path_segment("owner", &login)?;
                login
            }
        };

        let route = format!("/repos/{owner}/{name}");
        let response = self.send(Method::DELETE, &route, None).await?;
        Self::expect_status(response, 204)?;

        tracing::info!(%owner, %name, "deleted repository");
        Ok(())
    }

    /// List every repository owned by the authenticated user.
    ///
    /// Follows `Link: rel="next"` until the last page; the returned order is
    /// the order GitHub served them in. A `next` link back to a page already
    /// fetched ends the listing.
    pub async fn list_my_repositories(&mut self) -> Result<Vec<RepositorySummary>> {
        let mut repositories = Vec::new();
        let mut target = format!("/user/repos?affiliation=owner&per_page={LIST_PAGE_SIZE}");
        let mut visited = HashSet::new();

        loop {
            let response = self.send(Method::GET, &target, None).await?;
            let RecordedResponse {
                body,
                next_page,
                url,
                ..
            } = Self::expect_status(response, 200)?;
            visited.insert(url.to_string());

            let page: Vec<RepositorySummary> = serde_json::from_value(body)
                .map_err(|e| GitHubError::Decode(format!("repository list: {e}")))?;
            repositories.extend(page);

            match next_page {
                Some(next) if visited.contains(&next) => {
                    tracing::warn!(%next, "pagination link revisits a fetched page; stopping");
                    break;
                }
                Some(next) => target = next,
                None => break,
            }
        }
        let pages = visited.len();

        tracing::info!(count = repositories.len(), pages, "listed repositories");
        Ok(repositories)
    }
}

/// Exact, case-sensitive membership check on repository names.
pub fn contains_repository(results: &[RepositorySummary], name: &str) -> bool {
    results.iter().any(|r| r.name == name)
}

/// Check that `value` is a single owner or repository path segment.
///
/// GitHub names only use ASCII letters, digits, `.`, `-` and `_`. Anything
/// else, and the dot segments `.` and `..`, could address a different
/// resource once the URL is normalised.
fn validate_path_segment(kind: &str, value: &str) -> Result<()> {
    if value == "." || value == ".." || !regex_is_match!(r"^[A-Za-z0-9._-]+$", value) {
        return Err(GitHubError::InvalidInput(format!(
            "invalid {kind} '{value}': only letters, digits, '.', '-' and '_' are allowed"
        )));
    }
    Ok(())
}

/// Extract the `rel="next"` target from a `Link` header.
///
/// GitHub sends `<url>; rel="next", <url>; rel="last"`.
pub(crate) fn next_page_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let (_, url, rel) = regex_captures!(r#"^\s*<([^>]+)>\s*;\s*rel="([^"]+)"\s*$"#, entry)?;
        (rel == "next").then(|| url.to_string())
    })
}
