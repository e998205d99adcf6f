use std::future::Future;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use railcheck_core::AggregateReport;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    coin: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    exchanges: Vec<&'static str>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/check", get(check))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, exchanges = state.aggregator.exchanges().len(), "railcheck listening");
    }

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/check?coin=<ticker>
async fn check(
    State(state): State<AppState>,
    query: Result<Query<CheckParams>, QueryRejection>,
) -> Result<Json<AggregateReport>, ApiError> {
    let Query(params) = query?;
    let coin = params.coin.ok_or(ApiError::MissingCoin)?;
    let report = state.aggregator.check(&coin).await?;
    Ok(Json(report))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        exchanges: state
            .aggregator
            .exchanges()
            .into_iter()
            .map(|exchange| exchange.as_str())
            .collect(),
    })
}
