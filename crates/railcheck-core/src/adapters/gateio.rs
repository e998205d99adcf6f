use std::sync::Arc;

use serde::Deserialize;

use super::fetch_listing;
use crate::exchange::{ExchangeAdapter, LookupError, LookupFuture, LookupOutcome};
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{AssetStatus, ChainStatus, CoinTicker, ExchangeId};

pub const GATEIO_CURRENCIES_URL: &str = "https://api.gateio.ws/api/v4/spot/currencies";

/// Gate.io spot currency adapter.
///
/// Gate.io publishes `*_disabled` flags; they are negated into enabled flags.
/// `withdraw_delayed` is copied as published.
#[derive(Clone)]
pub struct GateioAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for GateioAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl GateioAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn resolve(&self, ticker: &CoinTicker) -> Result<Option<AssetStatus>, LookupError> {
        let body = fetch_listing(
            self.http_client.as_ref(),
            ExchangeId::Gateio,
            GATEIO_CURRENCIES_URL,
            self.timeout_ms,
        )
        .await?;

        let status = parse_currencies(&body, ticker)?;
        self.http_client.retain(GATEIO_CURRENCIES_URL, body).await;
        Ok(status)
    }
}

impl ExchangeAdapter for GateioAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Gateio
    }

    fn lookup<'a>(&'a self, ticker: &'a CoinTicker) -> LookupFuture<'a> {
        Box::pin(async move { LookupOutcome::from(self.resolve(ticker).await) })
    }
}

fn parse_currencies(body: &str, ticker: &CoinTicker) -> Result<Option<AssetStatus>, LookupError> {
    let currencies: Vec<GateCurrency> = serde_json::from_str(body)
        .map_err(|error| LookupError::decode(ExchangeId::Gateio, &error))?;

    Ok(currencies
        .into_iter()
        .find(|entry| ticker.matches_native(&entry.currency))
        .map(normalize_currency))
}

fn normalize_currency(currency: GateCurrency) -> AssetStatus {
    let chains = currency
        .chains
        .unwrap_or_default()
        .into_iter()
        .map(|chain| {
            ChainStatus::new(
                chain.name,
                !chain.deposit_disabled,
                !chain.withdraw_disabled,
                chain.withdraw_delayed,
            )
        })
        .collect();

    AssetStatus {
        deposit: !currency.deposit_disabled,
        withdraw: !currency.withdraw_disabled,
        withdraw_delayed: currency.withdraw_delayed,
        chains: Some(chains),
    }
}

// Gate.io API response structures
#[derive(Debug, Clone, Deserialize)]
struct GateCurrency {
    currency: String,
    deposit_disabled: bool,
    withdraw_disabled: bool,
    withdraw_delayed: bool,
    #[serde(default)]
    chains: Option<Vec<GateChain>>,
}

#[derive(Debug, Clone, Deserialize)]
struct GateChain {
    name: String,
    deposit_disabled: bool,
    withdraw_disabled: bool,
    withdraw_delayed: bool,
}
