//! CLI argument definitions for railcheck.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Check one coin on every configured exchange |
//! | `serve` | Run the HTTP service and status page |
//! | `exchanges` | List configured exchanges |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--exchange` | `RAILCHECK_EXCHANGES` | Exchange to query (repeatable) |
//! | `--timeout-ms` | `RAILCHECK_TIMEOUT_MS` | Per-request timeout in ms |
//! | `--cache-ttl-secs` | `RAILCHECK_CACHE_TTL_SECS` | Response cache TTL, `0` disables |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! railcheck check usdt --pretty
//! railcheck check eth --exchange gateio --exchange kucoin
//! railcheck serve --bind 0.0.0.0:3000
//! ```

use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use railcheck_core::ExchangeId;

/// Exchange deposit/withdraw status checker.
#[derive(Debug, Parser)]
#[command(
    name = "railcheck",
    author,
    version,
    about = "Check whether exchanges accept deposits and withdrawals of a coin",
    long_about = "railcheck queries the public currency listings of several centralized \
exchanges concurrently and reports, per exchange and per network, whether deposits and \
withdrawals of a coin are enabled, disabled or delayed.\n\
\n\
Use 'railcheck <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Exchange to query; repeat to query several. Overrides RAILCHECK_EXCHANGES.
    #[arg(long = "exchange", global = true, value_parser = parse_exchange)]
    pub exchanges: Vec<ExchangeId>,

    /// Per-request timeout in milliseconds. Overrides RAILCHECK_TIMEOUT_MS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Response cache TTL in seconds; 0 disables. Overrides RAILCHECK_CACHE_TTL_SECS.
    #[arg(long, global = true)]
    pub cache_ttl_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a coin on every configured exchange.
    ///
    /// Exits 0 on success, 2 for an empty coin and 3 when any exchange
    /// reported an error.
    ///
    /// # Examples
    ///
    ///   railcheck check BTC
    ///   railcheck check usdt --pretty
    Check(CheckArgs),

    /// Run the HTTP service and status page until Ctrl-C.
    ///
    /// # Examples
    ///
    ///   railcheck serve
    ///   railcheck serve --bind 0.0.0.0:8080
    Serve(ServeArgs),

    /// List the configured exchanges.
    Exchanges,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Coin ticker, case-insensitive.
    pub coin: String,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Listen address. Overrides RAILCHECK_BIND.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

fn parse_exchange(value: &str) -> Result<ExchangeId, String> {
    value.parse::<ExchangeId>().map_err(|error| error.to_string())
}
