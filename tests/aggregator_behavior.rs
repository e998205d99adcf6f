//! Behavior-driven tests for the aggregated coin check
//!
//! These tests drive the real adapters through the aggregator over canned
//! upstream listings, checking ordering, normalization, failure isolation
//! and caching as a caller observes them.

use std::sync::Arc;
use std::time::Duration;

use railcheck_core::adapters::{BITGET_COINS_URL, GATEIO_CURRENCIES_URL, KUCOIN_CURRENCIES_URL};
use railcheck_core::{
    AggregateReport, Aggregator, AggregatorBuilder, ChainStatus, ExchangeId, HttpError,
    StaticHttpClient, ValidationError,
};
use serde_json::json;

const GATEIO_LISTING: &str = r#"[
    {"currency": "ETH", "deposit_disabled": false, "withdraw_disabled": false, "withdraw_delayed": false,
     "chains": [{"name": "ERC20", "deposit_disabled": false, "withdraw_disabled": false, "withdraw_delayed": false}]},
    {"currency": "XRP", "deposit_disabled": false, "withdraw_disabled": true, "withdraw_delayed": true,
     "chains": [{"name": "XRP", "deposit_disabled": false, "withdraw_disabled": true, "withdraw_delayed": true}]}
]"#;

const BITGET_LISTING: &str = r#"{"code": "00000", "msg": "success", "data": [
    {"coin": "ETH", "chains": [
        {"chain": "ERC20", "rechargeable": "true", "withdrawable": "true", "congestion": "normal"},
        {"chain": "ArbitrumOne", "rechargeable": "true", "withdrawable": "true", "congestion": "congested"}
    ]}
]}"#;

const KUCOIN_LISTING: &str = r#"{"code": "200000", "data": [
    {"currency": "ETH", "chains": [
        {"chainName": "ERC20", "isDepositEnabled": false, "isWithdrawEnabled": true}
    ]}
]}"#;

fn healthy_upstream() -> StaticHttpClient {
    StaticHttpClient::new()
        .with_json(GATEIO_CURRENCIES_URL, GATEIO_LISTING)
        .with_json(BITGET_COINS_URL, BITGET_LISTING)
        .with_json(KUCOIN_CURRENCIES_URL, KUCOIN_LISTING)
}

fn aggregator_over(client: Arc<StaticHttpClient>) -> Aggregator {
    AggregatorBuilder::new()
        .with_http_client(client)
        .with_cache_ttl(Duration::ZERO)
        .build()
}

fn names(report: &AggregateReport) -> Vec<&str> {
    report.results.iter().map(|result| result.name.as_str()).collect()
}

// =============================================================================
// Aggregated check: shape and ordering
// =============================================================================

#[tokio::test]
async fn when_coin_is_listed_everywhere_each_exchange_reports_in_registration_order() {
    // Given: Three exchanges that all list ETH
    let aggregator = aggregator_over(Arc::new(healthy_upstream()));

    // When: ETH is checked
    let report = aggregator.check("ETH").await.expect("valid ticker");

    // Then: One report per exchange, in registration order
    assert_eq!(report.coin.as_str(), "ETH");
    assert_eq!(names(&report), vec!["Gate.io", "Bitget", "KuCoin"]);
    assert!(report.results.iter().all(|result| result.found));

    // And: Gate.io reports the ERC20 network as fully open
    let gateio = serde_json::to_value(&report.results[0]).expect("serializable");
    assert_eq!(
        gateio,
        json!({
            "name": "Gate.io",
            "found": true,
            "deposit": true,
            "withdraw": true,
            "withdraw_delayed": false,
            "chains": [{"name": "ERC20", "deposit": true, "withdraw": true, "withdraw_delayed": false}]
        })
    );

    // And: Bitget surfaces congestion as a delayed withdrawal
    assert_eq!(report.results[1].withdraw_delayed, Some(true));
    assert_eq!(
        report.results[1].chains.as_deref().map(|chains| chains[1].clone()),
        Some(ChainStatus::new("ArbitrumOne", true, true, true))
    );

    // And: KuCoin reports deposits closed
    assert_eq!(report.results[2].deposit, Some(false));
    assert_eq!(report.results[2].withdraw, Some(true));
}

#[tokio::test]
async fn when_exchanges_answer_at_different_speeds_order_is_unchanged() {
    // Given: The first exchange is the slowest to answer
    let client = healthy_upstream()
        .with_latency(GATEIO_CURRENCIES_URL, Duration::from_millis(80))
        .with_latency(BITGET_COINS_URL, Duration::from_millis(40));
    let aggregator = aggregator_over(Arc::new(client));

    // When: A coin is checked
    let report = aggregator.check("eth").await.expect("valid ticker");

    // Then: Reports still follow registration order
    assert_eq!(names(&report), vec!["Gate.io", "Bitget", "KuCoin"]);
}

#[tokio::test]
async fn when_coin_is_listed_nowhere_every_report_is_not_found_without_error() {
    // Given: Healthy exchanges
    let aggregator = aggregator_over(Arc::new(healthy_upstream()));

    // When: An unknown ticker is checked
    let report = aggregator.check("ZZZNOTACOIN").await.expect("valid ticker");

    // Then: Every exchange says not found, and none reports an error
    assert!(!report.any_found());
    assert_eq!(report.failure_count(), 0);
    for result in &report.results {
        let value = serde_json::to_value(result).expect("serializable");
        assert_eq!(value, json!({"name": result.name, "found": false}));
    }
}

// =============================================================================
// Ticker normalization and validation
// =============================================================================

#[tokio::test]
async fn when_ticker_case_or_spacing_differs_results_are_identical() {
    // Given: One aggregator over an unchanged upstream
    let aggregator = aggregator_over(Arc::new(healthy_upstream()));

    // When: The same coin is checked in three spellings
    let lower = aggregator.check("xrp").await.expect("valid ticker");
    let upper = aggregator.check("XRP").await.expect("valid ticker");
    let padded = aggregator.check(" Xrp ").await.expect("valid ticker");

    // Then: The normalized key and every report are the same
    assert_eq!(lower.coin, upper.coin);
    assert_eq!(upper.coin, padded.coin);
    assert_eq!(lower.results, upper.results);
    assert_eq!(upper.results, padded.results);

    // And: Gate.io negated its disabled flags
    assert_eq!(lower.results[0].deposit, Some(true));
    assert_eq!(lower.results[0].withdraw, Some(false));
    assert_eq!(lower.results[0].withdraw_delayed, Some(true));
}

#[tokio::test]
async fn when_ticker_is_blank_no_exchange_is_called() {
    // Given: An upstream that records every request
    let client = Arc::new(healthy_upstream());
    let aggregator = aggregator_over(client.clone());

    // When: Blank tickers are submitted
    for raw in ["", "   ", "\t\n"] {
        // Then: Validation fails
        assert_eq!(aggregator.check(raw).await, Err(ValidationError::EmptyTicker));
    }

    // And: No upstream request was made
    assert_eq!(client.request_count(), 0);
}

// =============================================================================
// Failure isolation
// =============================================================================

#[tokio::test]
async fn when_one_exchange_is_down_the_others_still_report() {
    // Given: Bitget refuses connections and KuCoin returns garbage
    let client = StaticHttpClient::new()
        .with_json(GATEIO_CURRENCIES_URL, GATEIO_LISTING)
        .with_error(BITGET_COINS_URL, HttpError::new("connection refused"))
        .with_json(KUCOIN_CURRENCIES_URL, "<html>maintenance</html>");
    let aggregator = aggregator_over(Arc::new(client));

    // When: ETH is checked
    let report = aggregator.check("ETH").await.expect("valid ticker");

    // Then: Gate.io is unaffected
    assert!(report.results[0].found);
    assert!(report.results[0].error.is_none());

    // And: The failing exchanges report found=false with a message
    for failed in &report.results[1..] {
        assert!(!failed.found);
        assert!(failed.error.as_deref().is_some_and(|message| !message.is_empty()));
    }
    assert_eq!(report.failure_count(), 2);
}

// =============================================================================
// Idempotence and caching
// =============================================================================

#[tokio::test]
async fn when_checked_twice_results_match_and_upstream_is_fetched_once() {
    // Given: An aggregator with the response cache enabled
    let client = Arc::new(healthy_upstream());
    let aggregator = AggregatorBuilder::new()
        .with_exchanges(vec![ExchangeId::Gateio, ExchangeId::Kucoin])
        .with_http_client(client.clone())
        .with_cache_ttl(Duration::from_secs(60))
        .build();

    // When: Two different checks run back to back
    let first = aggregator.check("ETH").await.expect("valid ticker");
    let second = aggregator.check("ETH").await.expect("valid ticker");
    aggregator.check("XRP").await.expect("valid ticker");

    // Then: Reports are identical apart from the timestamp
    assert_eq!(first.results, second.results);

    // And: Each listing was fetched a single time
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn when_exchange_answers_with_an_error_envelope_the_failure_is_not_cached() {
    // Given: Bitget answers 200 with a rate-limit code and Gate.io with an unreadable body
    let client = Arc::new(
        StaticHttpClient::new()
            .with_json(BITGET_COINS_URL, r#"{"code":"40034","msg":"rate limited","data":null}"#)
            .with_json(GATEIO_CURRENCIES_URL, "<html>maintenance</html>"),
    );
    let aggregator = AggregatorBuilder::new()
        .with_exchanges(vec![ExchangeId::Gateio, ExchangeId::Bitget])
        .with_http_client(client.clone())
        .with_cache_ttl(Duration::from_secs(60))
        .build();

    // When: The same coin is checked twice within the TTL
    let first = aggregator.check("BTC").await.expect("valid ticker");
    let second = aggregator.check("BTC").await.expect("valid ticker");

    // Then: Both checks report the failures
    assert_eq!(first.failure_count(), 2);
    assert_eq!(second.failure_count(), 2);
    assert!(second.results[1]
        .error
        .as_deref()
        .is_some_and(|message| message.contains("rate limited")));

    // And: Each exchange was asked again on the second check
    assert_eq!(client.request_count(), 4);
}

#[tokio::test]
async fn when_cache_is_disabled_every_check_reaches_upstream() {
    // Given: A zero cache TTL
    let client = Arc::new(healthy_upstream());
    let aggregator = aggregator_over(client.clone());

    // When: A coin is checked twice
    aggregator.check("ETH").await.expect("valid ticker");
    aggregator.check("ETH").await.expect("valid ticker");

    // Then: Every exchange was called each time
    assert_eq!(client.request_count(), 6);
}
