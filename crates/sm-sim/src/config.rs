//! Simulator configuration, deserialized from a JSON file.
//!
//! Every field has a default, so an empty object `{}` (or no config file at
//! all) yields a working simulator feeding the monitor's built-in watchlist
//! on loopback.
//!
//! # Example config
//!
//! ```json
//! {
//!   "instruments": [
//!     { "ticker": "AAPL", "company": "Apple", "port": 3001 }
//!   ],
//!   "target_ip": "127.0.0.1",
//!   "tick_interval_ms": 100,
//!   "send_interval_ms": 5,
//!   "mean": 0.0,
//!   "reversion_speed": 0.05,
//!   "volatility": 0.5
//! }
//! ```

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use sm_core::error::MonitorError;
use sm_core::{Instrument, Watchlist};

/// Top-level simulator config.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Instruments to emit. Empty means the built-in watchlist.
    #[serde(default)]
    pub instruments: Vec<Instrument>,

    /// Destination address for every datagram (default `127.0.0.1`).
    #[serde(default = "default_target_ip")]
    pub target_ip: String,

    /// Mood update period in milliseconds (default 100).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Per-instrument send period in milliseconds (default 5).
    #[serde(default = "default_send_interval_ms")]
    pub send_interval_ms: u64,

    /// Level the market mood reverts toward (default 0.0).
    #[serde(default = "default_mean")]
    pub mean: f64,

    /// Strength of the pull toward `mean` (default 0.05).
    #[serde(default = "default_reversion_speed")]
    pub reversion_speed: f64,

    /// Standard deviation of the mood noise term (default 0.5).
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

fn default_target_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_send_interval_ms() -> u64 {
    5
}

fn default_mean() -> f64 {
    0.0
}

fn default_reversion_speed() -> f64 {
    0.05
}

fn default_volatility() -> f64 {
    0.5
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            instruments: Vec::new(),
            target_ip: default_target_ip(),
            tick_interval_ms: default_tick_interval_ms(),
            send_interval_ms: default_send_interval_ms(),
            mean: default_mean(),
            reversion_speed: default_reversion_speed(),
            volatility: default_volatility(),
        }
    }
}

impl SimConfig {
    /// Reject configs the engine or the sockets cannot run with.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.tick_interval_ms == 0 {
            return Err(MonitorError::Config("tick_interval_ms must be > 0".into()));
        }
        if self.send_interval_ms == 0 {
            return Err(MonitorError::Config("send_interval_ms must be > 0".into()));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(MonitorError::Config(format!(
                "volatility must be finite and >= 0, got {}",
                self.volatility
            )));
        }
        if !self.mean.is_finite() {
            return Err(MonitorError::Config(format!(
                "mean must be finite, got {}",
                self.mean
            )));
        }
        if !self.reversion_speed.is_finite() {
            return Err(MonitorError::Config(format!(
                "reversion_speed must be finite, got {}",
                self.reversion_speed
            )));
        }
        self.target_addr()?;
        self.effective_instruments()?;
        Ok(())
    }

    /// Destination IP, parsed.
    pub fn target_addr(&self) -> Result<IpAddr, MonitorError> {
        self.target_ip.parse().map_err(|_| {
            MonitorError::Config(format!(
                "target_ip {:?} is not an IP address",
                self.target_ip
            ))
        })
    }

    /// Configured instruments, or the built-in watchlist when none are given.
    pub fn effective_instruments(&self) -> Result<Watchlist, MonitorError> {
        if self.instruments.is_empty() {
            Ok(Watchlist::builtin())
        } else {
            Watchlist::new(self.instruments.clone())
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn send_interval(&self) -> Duration {
        Duration::from_millis(self.send_interval_ms)
    }
}

/// Load, parse, and validate a JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<SimConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
