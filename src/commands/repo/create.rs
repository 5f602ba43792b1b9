use clap::Args;

use crate::infra::github::{RepositoryClient, RepositoryDescriptor};
use crate::shared::config::{Config, RepositoryDefaults};
use crate::shared::env_var::EnvVars;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    /// Repository name
    pub name: String,

    /// Repository description (default: from config)
    #[arg(long)]
    pub description: Option<String>,

    /// Homepage URL (default: from config)
    #[arg(long)]
    pub homepage: Option<String>,

    /// Create a public repository
    #[arg(long, conflicts_with = "private")]
    pub public: bool,

    /// Create a private repository
    #[arg(long)]
    pub private: bool,
}

#[tokio::main]
pub async fn run(args: &CreateArgs, config: &Config, env: &EnvVars) -> anyhow::Result<()> {
    let mut client = super::connect(config, env)?;
    let message = execute(args, &config.repository, &mut client).await?;
    println!("{message}");
    Ok(())
}

async fn execute(
    args: &CreateArgs,
    defaults: &RepositoryDefaults,
    client: &mut RepositoryClient,
) -> anyhow::Result<String> {
    let descriptor = build_descriptor(args, defaults);
    client.create_repository(&descriptor).await?;

    let visibility = if descriptor.is_private {
        "private"
    } else {
        "public"
    };
    Ok(format!(
        "Created {visibility} repository {} (HTTP {})",
        descriptor.name,
        client.last_status_code()?
    ))
}

/// Merge command-line overrides onto the configured repository defaults.
fn build_descriptor(args: &CreateArgs, defaults: &RepositoryDefaults) -> RepositoryDescriptor {
    let is_private = if args.public {
        false
    } else if args.private {
        true
    } else {
        defaults.private
    };

    RepositoryDescriptor {
        name: args.name.clone(),
        description: args
            .description
            .clone()
            .unwrap_or_else(|| defaults.description.clone()),
        homepage: args
            .homepage
            .clone()
            .unwrap_or_else(|| defaults.homepage.clone()),
        is_private,
    }
}
