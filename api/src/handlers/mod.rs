//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod greetings;

pub use greetings::{goodbye, hello};
