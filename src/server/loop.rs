// Server loop module
// Accept loop with graceful shutdown and a bounded connection drain

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

/// How long shutdown waits for in-flight connections to finish
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll interval while waiting for the connection counter to reach zero
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept loop: serve connections until a shutdown signal arrives.
///
/// On shutdown the listener is dropped immediately (no new connections),
/// then in-flight connections get a bounded drain period to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // notify_waiters stores no permit, so re-check the flag in case the
        // signal landed between select iterations
        if signals.is_shutdown_requested() {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                break;
            }
        }
    }

    logger::log_shutdown_requested();
    drop(listener);
    drain_connections(&state).await;
    Ok(())
}

/// Wait for in-flight connections to finish, up to `DRAIN_TIMEOUT`.
async fn drain_connections(state: &Arc<AppState>) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;

    loop {
        let remaining = state.active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            logger::log_drain_finished(0);
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_drain_finished(remaining);
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
