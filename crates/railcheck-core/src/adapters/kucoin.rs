use std::sync::Arc;

use serde::Deserialize;

use super::fetch_listing;
use crate::exchange::{ExchangeAdapter, LookupError, LookupFuture, LookupOutcome};
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{AssetStatus, ChainStatus, CoinTicker, ExchangeId};

pub const KUCOIN_CURRENCIES_URL: &str = "https://api.kucoin.com/api/v3/currencies";

const KUCOIN_SUCCESS_CODE: &str = "200000";

/// KuCoin currency adapter.
///
/// KuCoin publishes enabled flags per chain and no delay signal. Currencies
/// without chain data are reported as listed with deposit and withdraw closed.
#[derive(Clone)]
pub struct KucoinAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for KucoinAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl KucoinAdapter {
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
            ExchangeId::Kucoin,
            KUCOIN_CURRENCIES_URL,
            self.timeout_ms,
        )
        .await?;

        let status = parse_currencies(&body, ticker)?;
        self.http_client.retain(KUCOIN_CURRENCIES_URL, body).await;
        Ok(status)
    }
}

impl ExchangeAdapter for KucoinAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Kucoin
    }

    fn lookup<'a>(&'a self, ticker: &'a CoinTicker) -> LookupFuture<'a> {
        Box::pin(async move { LookupOutcome::from(self.resolve(ticker).await) })
    }
}

fn parse_currencies(body: &str, ticker: &CoinTicker) -> Result<Option<AssetStatus>, LookupError> {
    let envelope: KucoinEnvelope = serde_json::from_str(body)
        .map_err(|error| LookupError::decode(ExchangeId::Kucoin, &error))?;

    if envelope.code != KUCOIN_SUCCESS_CODE {
        return Err(LookupError::upstream_error(
            ExchangeId::Kucoin,
            format!(
                "{} (code {})",
                envelope.msg.as_deref().unwrap_or("no message"),
                envelope.code
            ),
        ));
    }

    let currencies = envelope.data.ok_or_else(|| {
        LookupError::upstream_error(ExchangeId::Kucoin, "response carried no data")
    })?;

    Ok(currencies
        .into_iter()
        .find(|entry| ticker.matches_native(&entry.currency))
        .map(normalize_currency))
}

fn normalize_currency(currency: KucoinCurrency) -> AssetStatus {
    let Some(chains) = currency.chains else {
        return AssetStatus {
            deposit: false,
            withdraw: false,
            withdraw_delayed: false,
            chains: None,
        };
    };

    let chains = chains
        .into_iter()
        .map(|chain| {
            ChainStatus::new(
                chain.chain_name,
                chain.is_deposit_enabled,
                chain.is_withdraw_enabled,
                false,
            )
        })
        .collect::<Vec<_>>();

    AssetStatus {
        deposit: chains.iter().any(|chain| chain.deposit),
        withdraw: chains.iter().any(|chain| chain.withdraw),
        withdraw_delayed: false,
        chains: Some(chains),
    }
}

// KuCoin API response structures
#[derive(Debug, Clone, Deserialize)]
struct KucoinEnvelope {
    code: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Vec<KucoinCurrency>>,
}

#[derive(Debug, Clone, Deserialize)]
struct KucoinCurrency {
    currency: String,
    #[serde(default)]
    chains: Option<Vec<KucoinChain>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KucoinChain {
    chain_name: String,
    is_deposit_enabled: bool,
    is_withdraw_enabled: bool,
}
