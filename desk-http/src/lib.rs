//! desk-http: the console's single HTTP client.
//!
//! One [`HttpClient`] is built per application from a [`ClientConfig`] and
//! shared (behind an `Arc`) by every resource hook. It adds nothing on top
//! of the request: no retries, no de-duplication, no timeout override.

mod client;
mod config;

pub use client::HttpClient;
pub use config::ClientConfig;
