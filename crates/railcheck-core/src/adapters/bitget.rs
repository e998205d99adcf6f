use std::sync::Arc;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

use super::fetch_listing;
use crate::exchange::{ExchangeAdapter, LookupError, LookupFuture, LookupOutcome};
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{AssetStatus, ChainStatus, CoinTicker, ExchangeId};

pub const BITGET_COINS_URL: &str = "https://api.bitget.com/api/v2/spot/public/coins";

const BITGET_SUCCESS_CODE: &str = "00000";

/// Bitget spot coin adapter.
///
/// Bitget only publishes per-chain flags. The coin is depositable or
/// withdrawable when any of its chains is, and withdraw-delayed when a
/// withdrawable chain reports congestion.
#[derive(Clone)]
pub struct BitgetAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for BitgetAdapter {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl BitgetAdapter {
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
            ExchangeId::Bitget,
            BITGET_COINS_URL,
            self.timeout_ms,
        )
        .await?;

        let status = parse_coins(&body, ticker)?;
        self.http_client.retain(BITGET_COINS_URL, body).await;
        Ok(status)
    }
}

impl ExchangeAdapter for BitgetAdapter {
    fn id(&self) -> ExchangeId {
        ExchangeId::Bitget
    }

    fn lookup<'a>(&'a self, ticker: &'a CoinTicker) -> LookupFuture<'a> {
        Box::pin(async move { LookupOutcome::from(self.resolve(ticker).await) })
    }
}

fn parse_coins(body: &str, ticker: &CoinTicker) -> Result<Option<AssetStatus>, LookupError> {
    let envelope: BitgetEnvelope = serde_json::from_str(body)
        .map_err(|error| LookupError::decode(ExchangeId::Bitget, &error))?;

    if envelope.code != BITGET_SUCCESS_CODE {
        return Err(LookupError::upstream_error(
            ExchangeId::Bitget,
            format!(
                "{} (code {})",
                envelope.msg.as_deref().unwrap_or("no message"),
                envelope.code
            ),
        ));
    }

    let coins = envelope.data.ok_or_else(|| {
        LookupError::upstream_error(ExchangeId::Bitget, "response carried no data")
    })?;

    Ok(coins
        .into_iter()
        .find(|entry| ticker.matches_native(&entry.coin))
        .map(normalize_coin))
}

fn normalize_coin(coin: BitgetCoin) -> AssetStatus {
    let chains = coin
        .chains
        .into_iter()
        .map(|chain| {
            let congested = chain
                .congestion
                .as_deref()
                .is_some_and(|value| !value.trim().eq_ignore_ascii_case("normal"));
            ChainStatus::new(chain.chain, chain.rechargeable, chain.withdrawable, congested)
        })
        .collect::<Vec<_>>();

    AssetStatus {
        deposit: chains.iter().any(|chain| chain.deposit),
        withdraw: chains.iter().any(|chain| chain.withdraw),
        withdraw_delayed: chains
            .iter()
            .any(|chain| chain.withdraw && chain.withdraw_delayed),
        chains: Some(chains),
    }
}

/// Bitget encodes booleans as `"true"`/`"false"` strings.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!(
                "expected \"true\" or \"false\", got '{other}'"
            ))),
        },
    }
}

// Bitget API response structures
#[derive(Debug, Clone, Deserialize)]
struct BitgetEnvelope {
    code: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Vec<BitgetCoin>>,
}

#[derive(Debug, Clone, Deserialize)]
struct BitgetCoin {
    coin: String,
    #[serde(default)]
    chains: Vec<BitgetChain>,
}

#[derive(Debug, Clone, Deserialize)]
struct BitgetChain {
    chain: String,
    #[serde(deserialize_with = "flexible_bool")]
    rechargeable: bool,
    #[serde(deserialize_with = "flexible_bool")]
    withdrawable: bool,
    #[serde(default)]
    congestion: Option<String>,
}
