//! Runtime settings.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `RAILCHECK_EXCHANGES` | `gateio,bitget,kucoin` | ordered adapter list |
//! | `RAILCHECK_TIMEOUT_MS` | `8000` | per-request timeout |
//! | `RAILCHECK_CACHE_TTL_SECS` | `60` | response cache TTL, `0` disables |
//! | `RAILCHECK_BIND` | `127.0.0.1:3000` | HTTP listen address |
//! | `RAILCHECK_LOG` | `info` | log filter used when `RUST_LOG` is unset |

use std::net::SocketAddr;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TTL;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::{ExchangeId, ValidationError};

pub const EXCHANGES_VAR: &str = "RAILCHECK_EXCHANGES";
pub const TIMEOUT_MS_VAR: &str = "RAILCHECK_TIMEOUT_MS";
pub const CACHE_TTL_SECS_VAR: &str = "RAILCHECK_CACHE_TTL_SECS";
pub const BIND_VAR: &str = "RAILCHECK_BIND";
pub const LOG_VAR: &str = "RAILCHECK_LOG";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Adapters in registration order, without duplicates.
    pub exchanges: Vec<ExchangeId>,
    pub timeout_ms: u64,
    pub cache_ttl_secs: u64,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchanges: ExchangeId::ALL.to_vec(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_filter: String::from(DEFAULT_LOG_FILTER),
        }
    }
}

impl Settings {
    /// Loads settings from an arbitrary variable source.
    ///
    /// Unset and blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut settings = Self::default();

        if let Some(raw) = read(EXCHANGES_VAR) {
            settings.exchanges = parse_exchange_list(&raw)?;
        }
        if let Some(raw) = read(TIMEOUT_MS_VAR) {
            settings.timeout_ms = parse_timeout_ms(TIMEOUT_MS_VAR, &raw)?;
        }
        if let Some(raw) = read(CACHE_TTL_SECS_VAR) {
            settings.cache_ttl_secs = raw.parse::<u64>().map_err(|_| invalid(CACHE_TTL_SECS_VAR, &raw))?;
        }
        if let Some(raw) = read(BIND_VAR) {
            settings.bind_addr = raw.parse::<SocketAddr>().map_err(|_| invalid(BIND_VAR, &raw))?;
        }
        if let Some(raw) = read(LOG_VAR) {
            settings.log_filter = raw;
        }

        Ok(settings)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Parses a comma-separated exchange list, keeping first occurrences only.
pub fn parse_exchange_list(raw: &str) -> Result<Vec<ExchangeId>, ValidationError> {
    let mut exchanges = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let exchange = item.parse::<ExchangeId>()?;
        if !exchanges.contains(&exchange) {
            exchanges.push(exchange);
        }
    }

    if exchanges.is_empty() {
        return Err(invalid(EXCHANGES_VAR, raw));
    }

    Ok(exchanges)
}

fn parse_timeout_ms(name: &'static str, raw: &str) -> Result<u64, ValidationError> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid(name, raw)),
    }
}

fn invalid(name: &'static str, raw: &str) -> ValidationError {
    ValidationError::InvalidSetting {
        name,
        value: raw.to_string(),
    }
}
