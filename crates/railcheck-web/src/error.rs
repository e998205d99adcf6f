use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use railcheck_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Request-level failures. Exchange failures never reach this type; they are
/// reported inside the aggregate.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required query parameter 'coin'")]
    MissingCoin,

    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCoin | Self::InvalidQuery(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "rejecting request");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
