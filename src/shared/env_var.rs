//! Centralized reader for the environment variables repo-scenarios honours.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const GITHUB_TOKEN: &str = "REPO_SCENARIOS_GITHUB_TOKEN";
const GITHUB_TOKEN_FALLBACK: &str = "GITHUB_TOKEN";
const LOG: &str = "REPO_SCENARIOS_LOG";

/// Snapshot of the relevant environment variables at load time.
pub struct EnvVars {
    /// Access token from REPO_SCENARIOS_GITHUB_TOKEN, else GITHUB_TOKEN.
    pub github_token: Option<String>,

    /// `tracing` filter directive, e.g. "repo_scenarios=debug".
    pub log_filter: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read the variables from the current process.
    pub fn load() -> Self {
        Self {
            github_token: non_empty_var(GITHUB_TOKEN)
                .or_else(|| non_empty_var(GITHUB_TOKEN_FALLBACK)),
            log_filter: non_empty_var(LOG),
        }
    }
}
