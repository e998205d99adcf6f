//! Exchange adapter trait and the tagged lookup result.
//!
//! Every exchange integration implements [`ExchangeAdapter`]. An adapter
//! decodes its exchange's native listing into a [`LookupOutcome`] and never
//! returns an error past its own boundary: failures are encoded as
//! [`LookupOutcome::Failed`] so that one exchange's outage cannot abort an
//! aggregated check.
//!
//! # Example Implementation
//!
//! ```rust,ignore
//! use railcheck_core::{CoinTicker, ExchangeAdapter, ExchangeId, LookupFuture, LookupOutcome};
//!
//! struct MyExchange;
//!
//! impl ExchangeAdapter for MyExchange {
//!     fn id(&self) -> ExchangeId {
//!         ExchangeId::Gateio
//!     }
//!
//!     fn lookup<'a>(&'a self, ticker: &'a CoinTicker) -> LookupFuture<'a> {
//!         Box::pin(async move { LookupOutcome::NotListed })
//!     }
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::HttpError;
use crate::{AssetStatus, CoinTicker, ExchangeId, ExchangeReport};

/// Adapter-level failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// The request could not be sent or the body could not be read.
    Transport,
    /// The exchange answered with a non-success HTTP status.
    UpstreamStatus,
    /// The exchange answered 2xx but reported an API-level error.
    UpstreamError,
    /// The body did not match the exchange's expected shape.
    Decode,
    /// The lookup task itself failed.
    Internal,
}

/// Structured adapter failure, reported to users as the `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    kind: LookupErrorKind,
    message: String,
}

impl LookupError {
    pub fn transport(exchange: ExchangeId, error: &HttpError) -> Self {
        Self {
            kind: LookupErrorKind::Transport,
            message: format!("{} transport error: {}", exchange.display_name(), error.message()),
        }
    }

    pub fn upstream_status(exchange: ExchangeId, status: u16) -> Self {
        Self {
            kind: LookupErrorKind::UpstreamStatus,
            message: format!("{} returned HTTP status {status}", exchange.display_name()),
        }
    }

    pub fn upstream_error(exchange: ExchangeId, detail: impl Display) -> Self {
        Self {
            kind: LookupErrorKind::UpstreamError,
            message: format!("{} API error: {detail}", exchange.display_name()),
        }
    }

    pub fn decode(exchange: ExchangeId, error: &serde_json::Error) -> Self {
        Self {
            kind: LookupErrorKind::Decode,
            message: format!(
                "failed to parse {} response: {error}",
                exchange.display_name()
            ),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> LookupErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            LookupErrorKind::Transport => "lookup.transport",
            LookupErrorKind::UpstreamStatus => "lookup.upstream_status",
            LookupErrorKind::UpstreamError => "lookup.upstream_error",
            LookupErrorKind::Decode => "lookup.decode",
            LookupErrorKind::Internal => "lookup.internal",
        }
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for LookupError {}

/// Tagged result of one adapter lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Listed(AssetStatus),
    /// The exchange does not list the ticker. Not an error.
    NotListed,
    Failed(LookupError),
}

impl LookupOutcome {
    pub fn into_report(self, exchange: ExchangeId) -> ExchangeReport {
        match self {
            Self::Listed(status) => ExchangeReport::listed(exchange, status),
            Self::NotListed => ExchangeReport::not_listed(exchange),
            Self::Failed(error) => ExchangeReport::failed(exchange, error.message()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Listed(_) => "listed",
            Self::NotListed => "not_listed",
            Self::Failed(_) => "failed",
        }
    }
}

impl From<Result<Option<AssetStatus>, LookupError>> for LookupOutcome {
    fn from(value: Result<Option<AssetStatus>, LookupError>) -> Self {
        match value {
            Ok(Some(status)) => Self::Listed(status),
            Ok(None) => Self::NotListed,
            Err(error) => Self::Failed(error),
        }
    }
}

pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = LookupOutcome> + Send + 'a>>;

/// Exchange adapter contract.
///
/// Implementations must be `Send + Sync`; the aggregator shares them across
/// tasks. `lookup` issues at most one outbound request and always resolves.
pub trait ExchangeAdapter: Send + Sync {
    /// Returns the exchange this adapter reports for.
    fn id(&self) -> ExchangeId;

    /// Looks up the deposit/withdraw status of `ticker`.
    fn lookup<'a>(&'a self, ticker: &'a CoinTicker) -> LookupFuture<'a>;
}
