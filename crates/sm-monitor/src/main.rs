//! # sm-monitor
//!
//! Desktop sentiment monitor. Starts one UDP listener per built-in
//! instrument, then hands control to the eframe event loop. The feed shuts
//! down when the window closes and the app is dropped.
//!
//! The monitor takes no arguments and reads no config file; the watchlist
//! and its ports are compiled in. Log verbosity follows `RUST_LOG`.

mod app;
mod chart;

use eframe::egui;
use sm_core::logging::init_logging;
use sm_core::Watchlist;
use sm_feed::{FeedRuntime, ListenerConfig};
use tracing::info;

use crate::app::MonitorApp;

fn main() -> eframe::Result<()> {
    init_logging("info", None, "sm-monitor");

    let watchlist = Watchlist::builtin();
    info!("starting monitor, {} instruments", watchlist.len());
    for inst in watchlist.iter() {
        info!("[{}] {} on udp port {}", inst.ticker, inst.company, inst.port);
    }

    let runtime = FeedRuntime::start(&watchlist, ListenerConfig::default());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Real-time Stock Sentiment Monitor",
        options,
        Box::new(move |_cc| Ok(Box::new(MonitorApp::new(watchlist, runtime)))),
    )?;

    info!("monitor closed");
    Ok(())
}
