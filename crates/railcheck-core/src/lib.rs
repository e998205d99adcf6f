//! # Railcheck Core
//!
//! Deposit and withdraw status of a coin across centralized exchanges.
//!
//! ## Overview
//!
//! - **Canonical report models** shared by every exchange
//! - **Exchange adapters** that decode each exchange's public currency listing
//! - **Aggregator** that checks one ticker on every exchange concurrently
//! - **Response cache** so repeated checks reuse one upstream listing fetch
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Gate.io, Bitget and KuCoin adapters |
//! | [`aggregator`] | Fan-out/join over registered adapters |
//! | [`cache`] | TTL response cache and caching transport |
//! | [`config`] | Environment-backed settings |
//! | [`domain`] | Ticker, report and timestamp types |
//! | [`error`] | Core error types |
//! | [`exchange`] | Adapter trait and lookup outcome |
//! | [`http_client`] | HTTP client abstraction |
//! | [`source`] | Exchange identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use railcheck_core::AggregatorBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let aggregator = AggregatorBuilder::new().build();
//!     let report = aggregator.check("usdt").await?;
//!
//!     for result in &report.results {
//!         println!("{}: found={}", result.name, result.found);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Web / CLI      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Aggregator    │  one task per adapter, joined in order
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ExchangeAdapter │────▶│ CachedHttpClient │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ ReqwestHttpClient│
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Only ticker validation fails a check. Exchange failures are reported as
//! data in the affected [`ExchangeReport`]:
//!
//! ```rust
//! use railcheck_core::{ExchangeId, ExchangeReport};
//!
//! let report = ExchangeReport::failed(ExchangeId::Kucoin, "KuCoin returned HTTP status 503");
//! assert!(!report.found);
//! assert!(report.is_failure());
//! ```

pub mod adapters;
pub mod aggregator;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod http_client;
pub mod source;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{adapter_for, BitgetAdapter, GateioAdapter, KucoinAdapter};

// Aggregation
pub use aggregator::{Aggregator, AggregatorBuilder};

// Caching
pub use cache::{CacheStore, CachedHttpClient};

// Configuration
pub use config::Settings;

// Domain models
pub use domain::{AggregateReport, AssetStatus, ChainStatus, CoinTicker, ExchangeReport, UtcDateTime};

// Error types
pub use error::ValidationError;

// Adapter contract
pub use exchange::{ExchangeAdapter, LookupError, LookupErrorKind, LookupFuture, LookupOutcome};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, ReqwestHttpClient, RetainFuture,
    StaticHttpClient,
};

// Exchange identifiers
pub use source::ExchangeId;
