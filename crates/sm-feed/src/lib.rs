//! # sm-feed
//!
//! UDP sentiment ingestion: one blocking listener thread per instrument,
//! one channel into the GUI.
//!
//! ## Architecture
//!
//! [`runtime::FeedRuntime`] spawns a [`listener`] thread for every
//! watchlist instrument. Listeners parse datagrams into stamped
//! observations and push [`sm_core::FeedEvent`]s over an unbounded
//! crossbeam channel. The GUI thread owns the [`history::HistoryStore`]
//! and empties the channel once per frame through [`drain::drain`].
//!
//! ## Modules
//!
//! - [`listener`] — per-port blocking UDP receive loop
//! - [`drain`] — non-blocking channel-to-store bridge
//! - [`history`] — per-ticker observation series and link states
//! - [`runtime`] — thread lifecycle and shutdown

pub mod drain;
pub mod history;
pub mod listener;
pub mod runtime;

pub use drain::{drain, DrainStats};
pub use history::HistoryStore;
pub use listener::ListenerConfig;
pub use runtime::FeedRuntime;
