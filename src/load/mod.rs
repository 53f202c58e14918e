//! Two-tier load execution: a scheduler fans a run out into worker batches,
//! each batch fans out into one task per fetch, and results flow back over a
//! queue into a single [`Report`].
mod batch;
mod fetch;
mod plan;
mod scheduler;
mod tally;


use std::sync::Arc;

use tracing::info;

pub use fetch::{Fetch, FetchTarget, Outcome};
pub use plan::WorkPlan;
pub use scheduler::run_plan;
pub use tally::{BatchResult, OutcomeCounts, Report};

#[cfg(test)]
pub(crate) use batch::run_batch;

use crate::config::LoadSettings;
use crate::error::{AppError, AppResult};
use crate::http::HttpFetcher;
use crate::shutdown::ShutdownSender;

/// Runs a fully resolved load over HTTP and returns the whole-run report.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be configured for the target
/// or when worker results cannot be reconciled with the plan.
pub async fn run_load(settings: &LoadSettings, shutdown_tx: &ShutdownSender) -> AppResult<Report> {
    let target = FetchTarget {
        url: settings.url.clone(),
        interface: Some(settings.interface.clone()),
        timeout: settings.timeout,
    };
    HttpFetcher::preflight(&target).map_err(AppError::http)?;

    let plan = WorkPlan::new(settings.iterations, settings.quantum);
    info!(
        iterations = plan.iterations(),
        workers = plan.worker_count(),
        interface = %settings.interface,
        "Dispatching requests"
    );
    run_plan(
        Arc::new(HttpFetcher::new()),
        target,
        plan,
        shutdown_tx,
        settings.print_worker_stats,
    )
    .await
}
