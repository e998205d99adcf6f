use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical exchange identifiers used in configuration and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Gateio,
    Bitget,
    Kucoin,
}

impl ExchangeId {
    pub const ALL: [Self; 3] = [Self::Gateio, Self::Bitget, Self::Kucoin];

    /// Configuration slug.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gateio => "gateio",
            Self::Bitget => "bitget",
            Self::Kucoin => "kucoin",
        }
    }

    /// Name shown to users in reports.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gateio => "Gate.io",
            Self::Bitget => "Bitget",
            Self::Kucoin => "KuCoin",
        }
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gateio" | "gate.io" | "gate" => Ok(Self::Gateio),
            "bitget" => Ok(Self::Bitget),
            "kucoin" => Ok(Self::Kucoin),
            other => Err(ValidationError::InvalidExchange {
                value: other.to_owned(),
            }),
        }
    }
}
