//! Shutdown handle and OS signal listener

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable one-way cancellation flag.
///
/// Every clone observes the same state. Once triggered it stays triggered.
#[derive(Clone, Debug)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Only read by the test harness; the binary just awaits `cancelled`
    #[allow(dead_code)]
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the handle has been triggered, immediately if it already was.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }
}

/// Spawn a detached task that triggers `shutdown` on Ctrl+C or SIGTERM.
///
/// The task is never joined; it simply dies with the runtime if no signal arrives.
pub fn spawn_signal_listener(shutdown: Shutdown) {
    spawn_shutdown_on(shutdown, wait_for_signal());
}

/// Spawn a detached task that triggers `shutdown` once `signal` resolves.
pub fn spawn_shutdown_on<F>(shutdown: Shutdown, signal: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        signal.await;
        tracing::info!("Received shutdown signal");
        shutdown.trigger();
    });
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::debug!("Ctrl+C received"),
        () = terminate => tracing::debug!("SIGTERM received"),
    }
}
