use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::commands::config::ConfigCommands;
use crate::commands::repo::{self, CreateArgs, DeleteArgs, LifecycleArgs, ListArgs};
use crate::shared::config::{self, Config};
use crate::shared::env_var::EnvVars;
use crate::shared::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "repo-scenarios",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file (default: ~/.config/repo-scenarios/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a repository owned by the authenticated user
    Create(CreateArgs),

    /// Delete a repository
    Delete(DeleteArgs),

    /// List repositories owned by the authenticated user
    List(ListArgs),

    /// Run the create/list/delete/list scenarios against the live API
    Lifecycle(LifecycleArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    pub fn run(&self, config_path: Option<&Path>, env: &EnvVars) -> anyhow::Result<()> {
        let load = || -> anyhow::Result<Config> {
            let config = config::load_config(config_path)?;
            tracing::debug!(?config, "loaded configuration");
            Ok(config)
        };

        match self {
            Self::Create(args) => repo::create::run(args, &load()?, env),
            Self::Delete(args) => repo::delete::run(args, &load()?, env),
            Self::List(args) => repo::list::run(args, &load()?, env),
            Self::Lifecycle(args) => repo::lifecycle::run(args, &load()?, env),
            Self::Config(cmd) => cmd.run(),
        }
    }
}
