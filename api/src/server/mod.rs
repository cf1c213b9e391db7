//! HTTP server lifecycle
//!
//! Binds a listener, serves a router on it, and stops gracefully when the
//! server's [`Shutdown`] handle is triggered. The server can either run in the
//! foreground ([`Server::serve`]) or be spawned and joined later
//! ([`Server::spawn`] / [`RunningServer::shutdown`]).

mod shutdown;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::error::ServerError;

pub use shutdown::{spawn_signal_listener, Shutdown};

/// A bound but not yet running server
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Bind `addr`. Port 0 picks an ephemeral port, see [`Server::local_addr`].
    pub async fn bind(addr: SocketAddr, router: Router) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self { listener, router })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::LocalAddr)
    }

    /// Serve until `shutdown` is triggered and in-flight connections drain.
    pub async fn serve(self, shutdown: Shutdown) -> Result<(), ServerError> {
        let addr = self.local_addr()?;
        tracing::info!("Listening on {}", addr);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!(%addr, "Server shutdown complete");
        Ok(())
    }

    /// Run [`Server::serve`] on its own task.
    ///
    /// Used by the test harness; the binary serves in the foreground.
    #[allow(dead_code)]
    pub fn spawn(self, shutdown: Shutdown) -> Result<RunningServer, ServerError> {
        let addr = self.local_addr()?;
        let task = tokio::spawn(self.serve(shutdown.clone()));

        Ok(RunningServer {
            addr,
            shutdown,
            task,
        })
    }
}

/// Handle to a server running on a background task
#[allow(dead_code)]
pub struct RunningServer {
    addr: SocketAddr,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), ServerError>>,
}

#[allow(dead_code)]
impl RunningServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Trigger shutdown and wait for the server task to finish.
    ///
    /// Returns only once the listener has been dropped.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        self.task.await?
    }
}
