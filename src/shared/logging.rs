use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when REPO_SCENARIOS_LOG is unset.
const DEFAULT_FILTER: &str = "warn";

/// Output format of log lines on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Build the filter from an optional directive string, e.g. "repo_scenarios=debug".
fn build_filter(directive: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directive = directive.unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{directive}': {e}"))
}

/// Install the global tracing subscriber writing to stderr.
///
/// stdout is reserved for command output (e.g. `list`).
pub fn init(format: LogFormat, directive: Option<&str>) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(directive)?);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
