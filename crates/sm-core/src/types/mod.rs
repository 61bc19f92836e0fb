//! Core data types flowing through the sentiment feed.
//!
//! Everything here is shared by the ingestion crate, the simulator, and the
//! GUI; keep these types small and dependency-free.

pub mod event;
pub mod observation;

pub use event::*;
pub use observation::*;
