//! In-process server harness
//!
//! Each test starts its own server on `127.0.0.1:0`, talks to it over real TCP,
//! and shuts it down before returning. The server handle and its shutdown flag
//! are owned by the harness value rather than living in statics.

use std::net::{Ipv4Addr, SocketAddr};

use reqwest::{Client, Method, StatusCode};

use crate::server::{spawn_signal_listener, RunningServer, Server, Shutdown};

pub struct TestHarness {
    server: RunningServer,
    shutdown: Shutdown,
    client: Client,
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestHarness {
    /// Bind an ephemeral port, install the signal listener and start serving.
    pub async fn start() -> Self {
        let shutdown = Shutdown::new();
        spawn_signal_listener(shutdown.clone());

        let server = Server::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)), crate::router())
            .await
            .expect("Failed to bind test server");
        let server = server
            .spawn(shutdown.clone())
            .expect("Failed to start test server");

        // No idle pooling: shutdown should not wait on keep-alive sockets
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            server,
            shutdown,
            client,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.server.addr()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.base_url(), path)
    }

    pub fn shutdown_handle(&self) -> &Shutdown {
        &self.shutdown
    }

    /// GET `path`, failing the test on any transport error.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path).await
    }

    pub async fn request(&self, method: Method, path: &str) -> TestResponse {
        let url = self.url(path);
        let response = self
            .client
            .request(method.clone(), &url)
            .send()
            .await
            .unwrap_or_else(|e| panic!("Failed to send {} request to {}: {}", method, url, e));

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| panic!("Failed to read response body from {}: {}", url, e));

        TestResponse { status, body }
    }

    /// Stop the server and wait for its task to finish.
    pub async fn shutdown(self) {
        self.server
            .shutdown()
            .await
            .expect("Test server did not shut down cleanly");
    }
}
