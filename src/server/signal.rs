// Signal handling module
//
// SIGTERM and SIGINT stop the accept loop; anything else is left to the
// default disposition. A harness that simply kills the process is fine too.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Signal handler state
pub struct SignalHandler {
    /// Fired once when SIGTERM or SIGINT arrives
    pub shutdown: Arc<Notify>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
        }
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
#[cfg(unix)]
pub fn start_signal_handler(handler: &SignalHandler) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = Arc::clone(&handler.shutdown);

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => logger::log_shutdown("SIGTERM"),
            _ = sigint.recv() => logger::log_shutdown("SIGINT"),
        }
        // notify_one stores a permit, so a loop between polls still sees it
        shutdown.notify_one();
    });
    Ok(())
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: &SignalHandler) -> std::io::Result<()> {
    let shutdown = Arc::clone(&handler.shutdown);

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_shutdown("Ctrl+C");
            shutdown.notify_one();
        }
    });
    Ok(())
}
