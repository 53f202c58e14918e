use tracing::{info, warn};

use crate::shutdown::ShutdownSender;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Exit status used when a second interrupt forces the process down.
const FORCED_EXIT_CODE: i32 = 130;

/// Broadcasts shutdown on Ctrl+C (and SIGTERM on Unix).
///
/// Ends on its own if shutdown is broadcast by anyone else first. After it
/// has broadcast, it keeps listening and a second signal exits the process
/// with status 130; callers abort the task once the run is over.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };
        #[cfg(not(unix))]
        let mut term_signal = None;

        tokio::select! {
            _ = shutdown_rx.recv() => return,
            name = next_signal(&mut term_signal) => {
                info!("{}; cancelling in-flight requests.", name);
                drop(shutdown_tx.send(()));
            }
        }

        let name = next_signal(&mut term_signal).await;
        warn!("{} again; exiting without a report.", name);
        std::process::exit(FORCED_EXIT_CODE);
    })
}

#[cfg(unix)]
async fn next_signal(term_signal: &mut Option<Signal>) -> &'static str {
    tokio::select! {
        () = interrupt() => "Interrupted",
        () = async {
            if let Some(signal) = term_signal.as_mut() {
                signal.recv().await;
            } else {
                std::future::pending::<()>().await;
            }
        } => "Terminated",
    }
}

#[cfg(not(unix))]
async fn next_signal(_term_signal: &mut Option<()>) -> &'static str {
    interrupt().await;
    "Interrupted"
}

async fn interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::shutdown_channel;
    use std::future::Future;
    use std::time::Duration;

    const SIGNAL_HANDLER_SETTLE: Duration = Duration::from_millis(10);
    const SHUTDOWN_HANDLER_TIMEOUT: Duration = Duration::from_secs(1);

    fn run_async_test<F>(future: F) -> Result<(), String>
    where
        F: Future<Output = Result<(), String>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("Failed to build runtime: {}", err))?;
        runtime.block_on(future)
    }

    #[test]
    fn signal_handler_exits_on_shutdown() -> Result<(), String> {
        run_async_test(async {
            let (shutdown_tx, _) = shutdown_channel();
            let handle = setup_signal_shutdown_handler(&shutdown_tx);

            tokio::time::sleep(SIGNAL_HANDLER_SETTLE).await;
            if shutdown_tx.send(()).is_err() {
                return Err("Failed to send shutdown".to_owned());
            }

            tokio::time::timeout(SHUTDOWN_HANDLER_TIMEOUT, handle)
                .await
                .map_err(|err| format!("Timed out waiting for shutdown handler: {}", err))?
                .map_err(|err| format!("Shutdown task join error: {}", err))?;
            Ok(())
        })
    }

    #[cfg(unix)]
    #[test]
    fn term_signal_broadcasts_shutdown_and_handler_waits() -> Result<(), String> {
        run_async_test(async {
            let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
            let handle = setup_signal_shutdown_handler(&shutdown_tx);

            tokio::time::sleep(Duration::from_millis(200)).await;
            // Safety: raise only delivers SIGTERM to this process, whose
            // handler tokio installed when the task registered for it.
            let rc = unsafe { libc::raise(libc::SIGTERM) };
            if rc != 0 {
                return Err(format!("raise failed with {}", rc));
            }

            tokio::time::timeout(SHUTDOWN_HANDLER_TIMEOUT, shutdown_rx.recv())
                .await
                .map_err(|err| format!("No shutdown after SIGTERM: {}", err))?
                .map_err(|err| format!("Shutdown channel failed: {}", err))?;

            tokio::time::sleep(SIGNAL_HANDLER_SETTLE).await;
            if handle.is_finished() {
                return Err("Handler stopped listening after the first signal".to_owned());
            }
            handle.abort();
            match handle.await {
                Err(err) if err.is_cancelled() => Ok(()),
                Err(err) => Err(format!("Shutdown task join error: {}", err)),
                Ok(()) => Err("Handler ended on its own".to_owned()),
            }
        })
    }
}
