//! # Domain Models
//!
//! Canonical domain types for railcheck reports.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CoinTicker`] | Trimmed, uppercased lookup key |
//! | [`ChainStatus`] | Deposit/withdraw state of one network |
//! | [`AssetStatus`] | Normalized status of a listed asset |
//! | [`ExchangeReport`] | One exchange's answer for a ticker |
//! | [`AggregateReport`] | All exchanges' answers plus check time |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Every report is built fresh per check and never mutated afterwards.

mod report;
mod ticker;
mod timestamp;

pub use report::{AggregateReport, AssetStatus, ChainStatus, ExchangeReport};
pub use ticker::CoinTicker;
pub use timestamp::UtcDateTime;
