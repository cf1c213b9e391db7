//! Error types for the Greetings API
//!
//! The handlers themselves cannot fail, so errors only come from the
//! process edges:
//! - `ConfigError`: invalid environment configuration
//! - `ServerError`: binding, serving and joining the HTTP server

use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid HOST {value:?}: {source}")]
    InvalidHost {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Invalid PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Server lifecycle errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read local address: {0}")]
    LocalAddr(#[source] io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] io::Error),

    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
