use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::{AppError, AppResult, LoadError};
use crate::shutdown::ShutdownSender;

use super::batch::run_batch;
use super::fetch::{Fetch, FetchTarget};
use super::plan::WorkPlan;
use super::tally::{BatchResult, OutcomeCounts, Report};

/// Runs every batch of `plan` concurrently and sums their results.
///
/// Each batch reports over an unbounded queue. A batch whose task dies before
/// reporting is replaced by a fully generic-error result, so the report always
/// covers `plan.iterations()` requests.
///
/// # Errors
///
/// Returns an error if the queue yields a different number of results than
/// batches were dispatched, or if the totals do not match the plan.
pub async fn run_plan<F>(
    fetcher: Arc<F>,
    target: FetchTarget,
    plan: WorkPlan,
    shutdown_tx: &ShutdownSender,
    keep_worker_stats: bool,
) -> AppResult<Report>
where
    F: Fetch + ?Sized + 'static,
{
    let target = Arc::new(target);
    let (result_tx, result_rx) = mpsc::unbounded_channel::<BatchResult>();

    let mut batches = Vec::new();
    for (index, size) in plan.batch_sizes().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        let target = Arc::clone(&target);
        let result_tx = result_tx.clone();
        let shutdown_rx = shutdown_tx.subscribe();
        let worker = index.saturating_add(1);
        let handle = tokio::spawn(async move {
            debug!(worker, size, "Worker started");
            let result = run_batch(fetcher, target, size, shutdown_rx).await;
            debug!(worker, ?result, "Worker finished");
            drop(result_tx.send(result));
        });
        batches.push(BatchHandle { size, handle });
    }

    collect_report(plan, batches, result_tx, result_rx, keep_worker_stats).await
}

/// A dispatched batch: its size and the task that reports its result.
pub(super) struct BatchHandle {
    pub(super) size: u64,
    pub(super) handle: JoinHandle<()>,
}

/// Joins every batch task, then drains the result queue into a [`Report`].
///
/// A task that ends without reporting (panic or abort) gets a fully
/// generic-error result sent on its behalf. `result_tx` is dropped after all
/// joins, so draining never blocks.
///
/// # Errors
///
/// Returns an error if the queue yields a different number of results than
/// `plan.worker_count()`, or if the totals do not match `plan.iterations()`.
pub(super) async fn collect_report(
    plan: WorkPlan,
    batches: Vec<BatchHandle>,
    result_tx: UnboundedSender<BatchResult>,
    mut result_rx: UnboundedReceiver<BatchResult>,
    keep_worker_stats: bool,
) -> AppResult<Report> {
    let worker_count = plan.worker_count();
    for BatchHandle { size, handle } in batches {
        if let Err(err) = handle.await {
            error!(
                "Worker faulted before reporting ({}); counting its {} request(s) as generic errors.",
                err, size
            );
            drop(result_tx.send(BatchResult::faulted(size)));
        }
    }
    drop(result_tx);

    let mut totals = OutcomeCounts::default();
    let mut workers = Vec::new();
    let mut received = 0u64;
    while let Some(result) = result_rx.recv().await {
        received = received.saturating_add(1);
        totals.merge(&result);
        if keep_worker_stats {
            workers.push(result);
        }
    }

    if received != worker_count {
        return Err(AppError::load(LoadError::MissingBatchResults {
            expected: worker_count,
            received,
        }));
    }
    if totals.total() != plan.iterations() {
        return Err(AppError::load(LoadError::ReportMismatch {
            expected: plan.iterations(),
            accounted: totals.total(),
        }));
    }

    Ok(Report {
        iterations: plan.iterations(),
        quantum: plan.quantum(),
        worker_count,
        workers,
        totals,
    })
}
