//! Greetings API Server
//!
//! A minimal HTTP service answering `/hello` and `/goodbye` with a single
//! fixed line of text, whatever the method. Everything else gets the default 404.

use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod server;

#[cfg(test)]
mod test_utils;


use config::Config;
use server::{spawn_signal_listener, Server, Shutdown};

/// Build the application router
pub fn router() -> Router {
    Router::new()
        .route("/hello", any(handlers::hello))
        .route("/goodbye", any(handlers::goodbye))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,greetings_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Greetings API...");

    let config = Config::from_env()?;

    // Constructed here and passed down; nothing global
    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = Server::bind(config.bind_addr(), router()).await?;
    server.serve(shutdown).await?;

    Ok(())
}
