use clap::Args;

use crate::scenario::run_lifecycle;
use crate::shared::config::Config;
use crate::shared::env_var::EnvVars;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct LifecycleArgs {
    /// Name of the repository to create and delete
    #[arg(default_value = "demo-repo")]
    pub name: String,
}

#[tokio::main]
pub async fn run(args: &LifecycleArgs, config: &Config, env: &EnvVars) -> anyhow::Result<()> {
    let token = config.resolve_token(env);

    let report = run_lifecycle(
        &config.client_config(),
        token.as_deref(),
        &config.repository,
        &args.name,
    )
    .await;
    println!("{report}");

    if !report.passed() {
        anyhow::bail!("lifecycle scenarios failed");
    }
    Ok(())
}
