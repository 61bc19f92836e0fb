//! # sm-sim
//!
//! Sentiment simulator library: OU mood dynamics, JSON config, and the
//! thread runtime that feeds the monitor over UDP.
//!
//! ## Modules
//!
//! - [`config`] — JSON config where every field has a default
//! - [`engine`] — Ornstein-Uhlenbeck mood engine
//! - [`service`] — engine and sender thread lifecycle

pub mod config;
pub mod engine;
pub mod service;

pub use config::{load_config, SimConfig};
pub use engine::MoodEngine;
pub use service::SimService;
