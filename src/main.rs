mod cli;
mod commands;
mod infra;
mod scenario;
mod shared;

use clap::Parser;
use cli::Cli;
use shared::env_var::EnvVars;

fn main() -> anyhow::Result<()> {
    let Cli {
        command,
        config,
        log_format,
    } = Cli::parse();

    let env = EnvVars::load();
    shared::logging::init(log_format, env.log_filter.as_deref())?;

    command.run(config.as_deref(), &env)
}
