use std::process::ExitCode;

use railcheck_core::{Aggregator, Settings};
use railcheck_web::AppState;
use tokio::net::TcpListener;

use crate::error::CliError;

pub async fn run(aggregator: Aggregator, settings: &Settings) -> Result<ExitCode, CliError> {
    let listener = TcpListener::bind(settings.bind_addr).await?;

    railcheck_web::serve(listener, AppState::new(aggregator), shutdown_signal()).await?;

    tracing::info!("railcheck stopped");
    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
