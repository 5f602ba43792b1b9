use clap::Args;

use crate::scenario::{Scenario, steps};
use crate::shared::config::Config;
use crate::shared::env_var::EnvVars;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Fail unless a repository with exactly this name is listed
    #[arg(long, value_name = "NAME")]
    pub expect: Option<String>,

    /// Fail if a repository with exactly this name is listed
    #[arg(long, value_name = "NAME")]
    pub expect_absent: Option<String>,
}

#[tokio::main]
pub async fn run(args: &ListArgs, config: &Config, env: &EnvVars) -> anyhow::Result<()> {
    let mut scenario = super::authenticated_scenario(config, env)?;
    let output = execute(args, &mut scenario).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// List repositories, check the expectations and return one name per line.
async fn execute(args: &ListArgs, scenario: &mut Scenario) -> anyhow::Result<String> {
    steps::i_request_a_list_of_my_repositories(scenario).await?;

    if let Some(name) = &args.expect {
        steps::the_results_should_include_a_repository_named(scenario, name)?;
    }
    if let Some(name) = &args.expect_absent {
        steps::the_results_should_not_include_a_repository_named(scenario, name)?;
    }

    Ok(scenario
        .results()
        .unwrap_or_default()
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}
