use thiserror::Error;

/// Validation and contract errors exposed by `railcheck-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("coin ticker cannot be empty")]
    EmptyTicker,

    #[error("invalid exchange '{value}', expected one of gateio, bitget, kucoin")]
    InvalidExchange { value: String },

    #[error("invalid value '{value}' for setting {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("invalid RFC3339 timestamp '{value}'")]
    InvalidTimestamp { value: String },
}

