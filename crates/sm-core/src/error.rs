//! Typed error definitions for the sentiment monitor.
//!
//! Provides [`MonitorError`] for domain-specific errors that are more
//! informative than plain `anyhow::Error` strings. All variants implement
//! `std::error::Error` via `thiserror`, so they integrate seamlessly with
//! `anyhow::Result`.

use thiserror::Error;

/// Domain-specific errors for the sentiment monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// UDP bind failure for one instrument's listener.
    #[error("bind failed for {ticker} on port {port}: {source}")]
    Bind {
        ticker: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// UDP socket setup or send failure after a successful bind.
    #[error("socket error for {ticker}: {source}")]
    Socket {
        ticker: String,
        #[source]
        source: std::io::Error,
    },
}
