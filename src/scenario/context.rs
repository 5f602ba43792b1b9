//! State owned by one running scenario.

use crate::infra::github::{ClientConfig, GitHubError, RepositoryClient, RepositorySummary};
use crate::shared::config::RepositoryDefaults;

/// One scenario's client, repository defaults and last listing.
///
/// Never shared between scenarios: each starts unauthenticated with no
/// recorded response and no listed results.
#[derive(Debug)]
pub struct Scenario {
    pub(super) client: RepositoryClient,
    pub(super) defaults: RepositoryDefaults,
    pub(super) results: Option<Vec<RepositorySummary>>,
}

impl Scenario {
    pub fn new(config: &ClientConfig, defaults: RepositoryDefaults) -> Result<Self, GitHubError> {
        Ok(Self {
            client: RepositoryClient::new(config)?,
            defaults,
            results: None,
        })
    }

    pub fn client(&self) -> &RepositoryClient {
        &self.client
    }

    pub fn defaults(&self) -> &RepositoryDefaults {
        &self.defaults
    }

    /// Repositories from the most recent "request a list" step, if one ran.
    pub fn results(&self) -> Option<&[RepositorySummary]> {
        self.results.as_deref()
    }

    pub fn into_client(self) -> RepositoryClient {
        self.client
    }
}
