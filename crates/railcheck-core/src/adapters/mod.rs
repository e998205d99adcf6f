//! Exchange adapters.
//!
//! | Adapter | Endpoint | Native flags |
//! |---------|----------|--------------|
//! | [`GateioAdapter`] | `/api/v4/spot/currencies` | `*_disabled` booleans |
//! | [`BitgetAdapter`] | `/api/v2/spot/public/coins` | `"true"`/`"false"` strings per chain |
//! | [`KucoinAdapter`] | `/api/v3/currencies` | `is*Enabled` booleans per chain |

mod bitget;
mod gateio;
mod kucoin;

use std::sync::Arc;

pub use bitget::{BitgetAdapter, BITGET_COINS_URL};
pub use gateio::{GateioAdapter, GATEIO_CURRENCIES_URL};
pub use kucoin::{KucoinAdapter, KUCOIN_CURRENCIES_URL};

use crate::exchange::{ExchangeAdapter, LookupError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::ExchangeId;

/// Builds the adapter for `exchange` on top of a shared transport.
pub fn adapter_for(
    exchange: ExchangeId,
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
) -> Arc<dyn ExchangeAdapter> {
    match exchange {
        ExchangeId::Gateio => Arc::new(GateioAdapter::new(http_client).with_timeout_ms(timeout_ms)),
        ExchangeId::Bitget => Arc::new(BitgetAdapter::new(http_client).with_timeout_ms(timeout_ms)),
        ExchangeId::Kucoin => Arc::new(KucoinAdapter::new(http_client).with_timeout_ms(timeout_ms)),
    }
}

/// Issues the single listing GET for an adapter and returns the 2xx body.
async fn fetch_listing(
    http_client: &dyn HttpClient,
    exchange: ExchangeId,
    url: &str,
    timeout_ms: u64,
) -> Result<String, LookupError> {
    let request = HttpRequest::get(url)
        .with_header("accept", "application/json")
        .with_timeout_ms(timeout_ms);

    tracing::debug!(exchange = %exchange, url, timeout_ms, "fetching currency listing");

    let response = http_client
        .execute(request)
        .await
        .map_err(|error| LookupError::transport(exchange, &error))?;

    if !response.is_success() {
        return Err(LookupError::upstream_status(exchange, response.status));
    }

    Ok(response.body)
}
