use std::process::ExitCode;

use railcheck_core::Aggregator;

use crate::cli::CheckArgs;
use crate::error::CliError;
use crate::output::render_json;

/// Exit status when at least one exchange could not be checked.
const PARTIAL_FAILURE_EXIT: u8 = 3;

pub async fn run(
    args: &CheckArgs,
    aggregator: &Aggregator,
    pretty: bool,
) -> Result<ExitCode, CliError> {
    let report = aggregator.check(&args.coin).await?;
    render_json(&report, pretty)?;

    if report.failure_count() > 0 {
        return Ok(ExitCode::from(PARTIAL_FAILURE_EXIT));
    }

    Ok(ExitCode::SUCCESS)
}
