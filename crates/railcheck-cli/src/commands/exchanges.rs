use std::process::ExitCode;

use railcheck_core::Aggregator;
use serde::Serialize;

use crate::error::CliError;
use crate::output::render_json;

#[derive(Debug, Serialize)]
struct ExchangeRow {
    slug: &'static str,
    name: &'static str,
}

pub fn run(aggregator: &Aggregator, pretty: bool) -> Result<ExitCode, CliError> {
    let rows = aggregator
        .exchanges()
        .into_iter()
        .map(|exchange| ExchangeRow {
            slug: exchange.as_str(),
            name: exchange.display_name(),
        })
        .collect::<Vec<_>>();

    render_json(&rows, pretty)?;
    Ok(ExitCode::SUCCESS)
}
