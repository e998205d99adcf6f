mod check;
mod exchanges;
mod serve;

use std::process::ExitCode;

use railcheck_core::config::{BIND_VAR, CACHE_TTL_SECS_VAR, EXCHANGES_VAR, TIMEOUT_MS_VAR};
use railcheck_core::{Aggregator, AggregatorBuilder, Settings, ValidationError};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Loads settings from `lookup`, then applies command-line overrides.
///
/// Variables a flag replaces are never read, so a bad value there cannot
/// block a run that overrides it.
pub fn load_settings<F>(cli: &Cli, lookup: F) -> Result<Settings, ValidationError>
where
    F: Fn(&str) -> Option<String>,
{
    let overridden = |name: &str| match name {
        EXCHANGES_VAR => !cli.exchanges.is_empty(),
        TIMEOUT_MS_VAR => cli.timeout_ms.is_some(),
        CACHE_TTL_SECS_VAR => cli.cache_ttl_secs.is_some(),
        BIND_VAR => matches!(&cli.command, Command::Serve(args) if args.bind.is_some()),
        _ => false,
    };

    let settings = Settings::from_lookup(|name| if overridden(name) { None } else { lookup(name) })?;
    Ok(resolve_settings(cli, settings))
}

/// Applies command-line overrides on top of environment settings.
pub fn resolve_settings(cli: &Cli, mut settings: Settings) -> Settings {
    if !cli.exchanges.is_empty() {
        settings.exchanges = cli.exchanges.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.timeout_ms = timeout_ms;
    }
    if let Some(cache_ttl_secs) = cli.cache_ttl_secs {
        settings.cache_ttl_secs = cache_ttl_secs;
    }
    if let Command::Serve(args) = &cli.command {
        if let Some(bind) = args.bind {
            settings.bind_addr = bind;
        }
    }
    settings
}

pub async fn run(cli: &Cli, settings: Settings) -> Result<ExitCode, CliError> {
    let aggregator = build_aggregator(&settings);

    match &cli.command {
        Command::Check(args) => check::run(args, &aggregator, cli.pretty).await,
        Command::Serve(_) => serve::run(aggregator, &settings).await,
        Command::Exchanges => exchanges::run(&aggregator, cli.pretty),
    }
}

fn build_aggregator(settings: &Settings) -> Aggregator {
    AggregatorBuilder::from_settings(settings).build()
}
