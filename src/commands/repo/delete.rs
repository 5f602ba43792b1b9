use clap::Args;

use crate::infra::github::RepositoryClient;
use crate::shared::config::Config;
use crate::shared::env_var::EnvVars;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Repository name
    pub name: String,

    /// Repository owner (default: the authenticated user)
    #[arg(long)]
    pub owner: Option<String>,
}

#[tokio::main]
pub async fn run(args: &DeleteArgs, config: &Config, env: &EnvVars) -> anyhow::Result<()> {
    let mut client = super::connect(config, env)?;
    let message = execute(args, &mut client).await?;
    println!("{message}");
    Ok(())
}

async fn execute(args: &DeleteArgs, client: &mut RepositoryClient) -> anyhow::Result<String> {
    client
        .delete_repository(args.owner.as_deref(), &args.name)
        .await?;
    let owner = match &args.owner {
        Some(owner) => owner.clone(),
        // Resolved and cached by the delete itself.
        None => client.current_user_login().await?,
    };

    Ok(format!(
        "Deleted repository {owner}/{} (HTTP {})",
        args.name,
        client.last_status_code()?
    ))
}
