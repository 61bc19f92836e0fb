//! # sm-core
//!
//! Core crate for the stock sentiment monitor, providing:
//!
//! - **Types** (`types`) — observations and feed events shared by every crate
//! - **Watchlist** (`watchlist`) — tracked instruments and their UDP ports
//! - **Error types** (`error`) — domain-specific `MonitorError` via thiserror
//! - **Shutdown** (`shutdown`) — cooperative cancellation token for workers
//! - **Time utilities** (`time_util`) — wall-clock stamps for observations
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod error;
pub mod logging;
pub mod shutdown;
pub mod time_util;
pub mod types;
pub mod watchlist;

// Re-export types at crate root for convenience.
pub use shutdown::ShutdownToken;
pub use types::*;
pub use watchlist::{Instrument, Watchlist};
