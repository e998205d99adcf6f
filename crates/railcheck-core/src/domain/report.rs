use serde::{Deserialize, Serialize};

use crate::{CoinTicker, ExchangeId, UtcDateTime};

/// Deposit/withdraw state of one network for an asset on one exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStatus {
    pub name: String,
    pub deposit: bool,
    pub withdraw: bool,
    /// Only meaningful when `withdraw` is true.
    pub withdraw_delayed: bool,
}

impl ChainStatus {
    pub fn new(name: impl Into<String>, deposit: bool, withdraw: bool, withdraw_delayed: bool) -> Self {
        Self {
            name: name.into(),
            deposit,
            withdraw,
            withdraw_delayed,
        }
    }
}

/// Normalized status of a listed asset, produced by an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub deposit: bool,
    pub withdraw: bool,
    pub withdraw_delayed: bool,
    /// `None` when the exchange does not expose per-network data.
    pub chains: Option<Vec<ChainStatus>>,
}

/// One exchange's answer for a ticker.
///
/// `deposit`, `withdraw`, `withdraw_delayed` and `chains` are only present
/// when `found` is true; `error` is only present on adapter failure and then
/// `found` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeReport {
    pub name: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdraw: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdraw_delayed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chains: Option<Vec<ChainStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExchangeReport {
    pub fn listed(exchange: ExchangeId, status: AssetStatus) -> Self {
        Self {
            name: exchange.display_name().to_owned(),
            found: true,
            deposit: Some(status.deposit),
            withdraw: Some(status.withdraw),
            withdraw_delayed: Some(status.withdraw_delayed),
            chains: status.chains,
            error: None,
        }
    }

    pub fn not_listed(exchange: ExchangeId) -> Self {
        Self {
            name: exchange.display_name().to_owned(),
            found: false,
            deposit: None,
            withdraw: None,
            withdraw_delayed: None,
            chains: None,
            error: None,
        }
    }

    pub fn failed(exchange: ExchangeId, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            String::from("unknown error")
        } else {
            message
        };

        Self {
            error: Some(message),
            ..Self::not_listed(exchange)
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of one aggregated check across every registered exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub coin: CoinTicker,
    /// One entry per registered adapter, in registration order.
    pub results: Vec<ExchangeReport>,
    pub checked_at: UtcDateTime,
}

impl AggregateReport {
    pub fn any_found(&self) -> bool {
        self.results.iter().any(|report| report.found)
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|report| report.is_failure()).count()
    }
}
