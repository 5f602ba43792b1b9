use thiserror::Error;

use crate::infra::github::GitHubError;

/// Failure of a scenario step.
///
/// Assertion failures are kept apart from client errors so a scenario report
/// can tell "the API call failed" from "the API call succeeded but the
/// outcome was wrong".
#[derive(Error, Debug)]
pub enum StepError {
    #[error("Expected a {expected} status code but got {actual} instead!")]
    UnexpectedStatus { expected: u16, actual: u16 },

    #[error("Expected to find a repository called '{0}' but it doesn't exist.")]
    RepositoryMissing(String),

    #[error("Expected not to find a repository called '{0}' but it does exist.")]
    RepositoryPresent(String),

    #[error("No repository list to check; request a list of repositories first")]
    NoResults,

    #[error(
        "No GitHub access token configured (set REPO_SCENARIOS_GITHUB_TOKEN, GITHUB_TOKEN or github_token)"
    )]
    MissingToken,

    #[error(transparent)]
    Client(#[from] GitHubError),
}

impl StepError {
    /// Whether the step ran but its expectation did not hold.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatus { .. } | Self::RepositoryMissing(_) | Self::RepositoryPresent(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StepError>;
