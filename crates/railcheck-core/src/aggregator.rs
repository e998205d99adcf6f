//! Concurrent fan-out of one ticker across every registered exchange.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;

use crate::adapters::adapter_for;
use crate::cache::{CacheStore, CachedHttpClient, DEFAULT_CACHE_TTL};
use crate::config::Settings;
use crate::exchange::{ExchangeAdapter, LookupError, LookupOutcome};
use crate::http_client::{HttpClient, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{AggregateReport, CoinTicker, ExchangeId, ExchangeReport, UtcDateTime, ValidationError};

/// Ordered adapter registry and the check entry point.
pub struct Aggregator {
    adapters: Vec<Arc<dyn ExchangeAdapter>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        AggregatorBuilder::new().build()
    }
}

impl Aggregator {
    /// Registers `adapters` in the order their reports should appear.
    pub fn new(adapters: Vec<Arc<dyn ExchangeAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn exchanges(&self) -> Vec<ExchangeId> {
        self.adapters.iter().map(|adapter| adapter.id()).collect()
    }

    /// Validates `raw` and checks it against every adapter.
    ///
    /// An empty or whitespace-only ticker is rejected before any adapter runs.
    pub async fn check(&self, raw: &str) -> Result<AggregateReport, ValidationError> {
        let ticker = CoinTicker::parse(raw)?;
        Ok(self.check_ticker(ticker).await)
    }

    /// Runs every adapter concurrently and waits for all of them.
    ///
    /// Reports keep registration order whatever the completion order was.
    pub async fn check_ticker(&self, ticker: CoinTicker) -> AggregateReport {
        let started = Instant::now();

        let tasks = self.adapters.iter().map(|adapter| {
            let adapter = Arc::clone(adapter);
            let ticker = ticker.clone();
            tokio::spawn(async move { adapter.lookup(&ticker).await })
        });

        let outcomes = join_all(tasks).await;

        let results = self
            .adapters
            .iter()
            .zip(outcomes)
            .map(|(adapter, joined)| {
                let exchange = adapter.id();
                let outcome = joined.unwrap_or_else(|error| {
                    LookupOutcome::Failed(LookupError::internal(format!(
                        "{} lookup task failed: {error}",
                        exchange.display_name()
                    )))
                });

                if let LookupOutcome::Failed(error) = &outcome {
                    tracing::warn!(
                        exchange = %exchange,
                        coin = %ticker,
                        code = error.code(),
                        "exchange lookup failed: {}",
                        error.message()
                    );
                } else {
                    tracing::debug!(exchange = %exchange, coin = %ticker, outcome = outcome.label());
                }

                outcome.into_report(exchange)
            })
            .collect::<Vec<ExchangeReport>>();

        let report = AggregateReport {
            coin: ticker,
            results,
            checked_at: UtcDateTime::now(),
        };

        tracing::info!(
            coin = %report.coin,
            exchanges = report.results.len(),
            found = report.results.iter().filter(|result| result.found).count(),
            failed = report.failure_count(),
            latency_ms = started.elapsed().as_millis() as u64,
            "coin check completed"
        );

        report
    }
}

/// Assembles an [`Aggregator`] over one shared, cached transport.
///
/// # Example
///
/// ```rust,ignore
/// use railcheck_core::{AggregatorBuilder, ExchangeId};
///
/// let aggregator = AggregatorBuilder::new()
///     .with_exchanges(vec![ExchangeId::Gateio, ExchangeId::Kucoin])
///     .with_timeout_ms(5_000)
///     .build();
///
/// let report = aggregator.check("btc").await?;
/// ```
pub struct AggregatorBuilder {
    exchanges: Vec<ExchangeId>,
    timeout_ms: u64,
    cache_ttl: Duration,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl Default for AggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregatorBuilder {
    /// Every supported exchange, default timeout and default cache TTL.
    pub fn new() -> Self {
        Self {
            exchanges: ExchangeId::ALL.to_vec(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl: DEFAULT_CACHE_TTL,
            http_client: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with_exchanges(settings.exchanges.clone())
            .with_timeout_ms(settings.timeout_ms)
            .with_cache_ttl(settings.cache_ttl())
    }

    /// Sets the registration order. Repeated exchanges are registered once.
    pub fn with_exchanges(mut self, exchanges: Vec<ExchangeId>) -> Self {
        let mut unique = Vec::with_capacity(exchanges.len());
        for exchange in exchanges {
            if !unique.contains(&exchange) {
                unique.push(exchange);
            }
        }
        self.exchanges = unique;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// A zero TTL disables response caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Replaces the reqwest transport, e.g. with a `StaticHttpClient`.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> Aggregator {
        let transport = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));
        let cached: Arc<dyn HttpClient> = Arc::new(CachedHttpClient::new(
            transport,
            CacheStore::new(self.cache_ttl),
        ));

        let adapters = self
            .exchanges
            .into_iter()
            .map(|exchange| adapter_for(exchange, Arc::clone(&cached), self.timeout_ms))
            .collect();

        Aggregator::new(adapters)
    }
}
