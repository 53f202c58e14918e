use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

use crate::shutdown::ShutdownReceiver;

use super::fetch::{Fetch, FetchTarget, Outcome};
use super::tally::BatchResult;

enum BatchEvent {
    Joined(Option<Result<Outcome, JoinError>>),
    Shutdown,
    ShutdownClosed,
}

/// Runs `count` fetches concurrently, one task each, and tallies them.
///
/// `shutdown_rx` must be subscribed before the batch is spawned so a shutdown
/// broadcast in between is still observed. On shutdown every unfinished fetch
/// is aborted. Returns only after every task has reached a terminal state.
/// Panicked and cancelled fetches count as generic errors, so the result
/// always sums to `count`.
pub async fn run_batch<F>(
    fetcher: Arc<F>,
    target: Arc<FetchTarget>,
    count: u64,
    mut shutdown_rx: ShutdownReceiver,
) -> BatchResult
where
    F: Fetch + ?Sized + 'static,
{
    let mut tasks = JoinSet::new();
    for _ in 0..count {
        let fetcher = Arc::clone(&fetcher);
        let target = Arc::clone(&target);
        tasks.spawn(async move { fetcher.fetch(&target).await });
    }

    let mut result = BatchResult::default();
    let mut cancelled = 0u64;
    let mut panicked = 0u64;
    let mut listening = true;
    loop {
        let event = if listening {
            tokio::select! {
                joined = tasks.join_next() => BatchEvent::Joined(joined),
                signal = shutdown_rx.recv() => match signal {
                    Ok(()) | Err(RecvError::Lagged(_)) => BatchEvent::Shutdown,
                    Err(RecvError::Closed) => BatchEvent::ShutdownClosed,
                },
            }
        } else {
            BatchEvent::Joined(tasks.join_next().await)
        };

        match event {
            BatchEvent::Shutdown => {
                tasks.abort_all();
                listening = false;
            }
            BatchEvent::ShutdownClosed => listening = false,
            BatchEvent::Joined(None) => break,
            BatchEvent::Joined(Some(Ok(outcome))) => result.record(outcome),
            BatchEvent::Joined(Some(Err(err))) => {
                if err.is_cancelled() {
                    cancelled = cancelled.saturating_add(1);
                } else if err.is_panic() {
                    panicked = panicked.saturating_add(1);
                }
                debug!("Fetch task ended abnormally: {}", err);
                result.record(Outcome::GenericError);
            }
        }
    }

    if cancelled > 0 {
        warn!("{} request(s) cancelled by shutdown.", cancelled);
    }
    if panicked > 0 {
        warn!("{} request(s) panicked and were counted as generic errors.", panicked);
    }

    result.settle(count);
    result
}
