use tracing::info;

use crate::args::OutputFormat;
use crate::config::LoadSettings;
use crate::error::AppResult;
use crate::load::{WorkPlan, run_load};
use crate::shutdown::shutdown_channel;
use crate::system::shutdown_handlers::setup_signal_shutdown_handler;

use super::summary;

/// Runs one load and prints its report to stdout.
pub(crate) async fn run_local(settings: LoadSettings) -> AppResult<()> {
    let plan = WorkPlan::new(settings.iterations, settings.quantum);
    if settings.output_format == OutputFormat::Text {
        for line in summary::header_lines(&settings, plan.worker_count()) {
            println!("{}", line);
        }
    }

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let result = run_load(&settings, &shutdown_tx).await;
    signal_handle.abort();
    if let Err(err) = signal_handle.await
        && !err.is_cancelled()
    {
        return Err(err.into());
    }
    let report = result?;

    info!(
        success = report.totals.success,
        conn_err = report.totals.conn_err,
        timeout = report.totals.timeout,
        generic_err = report.totals.generic_err,
        "Load finished"
    );

    match settings.output_format {
        OutputFormat::Text => {
            for line in summary::report_lines(&report, settings.print_worker_stats) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary::JsonReport::new(&settings, &report))?;
            println!("{}", json);
        }
    }
    Ok(())
}
