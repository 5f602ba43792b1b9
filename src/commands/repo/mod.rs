pub mod create;
pub mod delete;
pub mod lifecycle;
pub mod list;

pub use create::CreateArgs;
pub use delete::DeleteArgs;
pub use lifecycle::LifecycleArgs;
pub use list::ListArgs;

use anyhow::Context;

use crate::infra::github::RepositoryClient;
use crate::scenario::{Scenario, steps};
use crate::shared::config::Config;
use crate::shared::env_var::EnvVars;

/// Start a scenario from configuration and authenticate it with the configured token.
fn authenticated_scenario(config: &Config, env: &EnvVars) -> anyhow::Result<Scenario> {
    let mut scenario = Scenario::new(&config.client_config(), config.repository.clone())
        .context("Failed to build GitHub client")?;
    steps::i_am_an_authenticated_user(&mut scenario, config.resolve_token(env).as_deref())?;
    Ok(scenario)
}

/// Authenticated client for the single-operation commands.
fn connect(config: &Config, env: &EnvVars) -> anyhow::Result<RepositoryClient> {
    Ok(authenticated_scenario(config, env)?.into_client())
}
