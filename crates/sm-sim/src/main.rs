//! # sm-sim
//!
//! Stand-in sentiment source for the monitor. Drives an Ornstein-Uhlenbeck
//! market mood and sends per-instrument values over UDP, one textual float
//! per datagram, to each instrument's port.
//!
//! # Usage
//!
//! ```bash
//! sm-sim                         # built-in watchlist, loopback, defaults
//! sm-sim sim.json --log-level debug
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use sm_sim::{load_config, SimConfig, SimService};
use tracing::info;

/// Sentiment feed simulator.
#[derive(Parser)]
#[command(name = "sm-sim", about = "Sentiment feed simulator")]
struct Cli {
    /// Configuration file path (JSON). Built-in defaults when omitted.
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    sm_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "sm-sim");

    // 2. Load configuration
    let config = match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            info!("config loaded from {}", path.display());
            config
        }
        None => {
            info!("no config file given, using built-in defaults");
            SimConfig::default()
        }
    };

    // 3. Start the engine and senders
    let _service = SimService::start(&config)?;
    info!("sim running, kill the process to stop");

    // 4. Keep the main thread alive
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
