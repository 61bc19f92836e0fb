//! Simulator runtime: one mood-engine thread, one sender thread per
//! instrument.
//!
//! The engine thread owns the [`MoodEngine`] and refreshes a shared
//! ticker-to-value map once per tick. Sender threads read the map and fire
//! one `{:.6}` datagram at their instrument's port every send interval.
//! Sends are fire and forget; a failed send is logged at debug and skipped.

use std::net::{SocketAddr, UdpSocket};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use ahash::AHashMap;
use sm_core::error::MonitorError;
use sm_core::{Instrument, ShutdownToken};
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::engine::MoodEngine;

type SharedValues = Arc<RwLock<AHashMap<String, f64>>>;

pub struct SimService {
    values: SharedValues,
    token: ShutdownToken,
    handles: Vec<(String, thread::JoinHandle<()>)>,
}

impl SimService {
    /// Validate the config, then spawn the engine and one sender per
    /// instrument.
    pub fn start(cfg: &SimConfig) -> Result<Self, MonitorError> {
        cfg.validate()?;
        let watchlist = cfg.effective_instruments()?;
        let target_ip = cfg.target_addr()?;
        let engine = MoodEngine::from_config(cfg)?;

        let mut map = AHashMap::with_capacity(watchlist.len());
        let mut tickers = Vec::with_capacity(watchlist.len());
        for inst in watchlist.iter() {
            map.insert(inst.ticker.clone(), 0.0);
            tickers.push(inst.ticker.clone());
        }
        let values: SharedValues = Arc::new(RwLock::new(map));
        let token = ShutdownToken::new();

        let mut handles = Vec::with_capacity(watchlist.len() + 1);
        handles.push((
            "engine".to_string(),
            spawn_engine(
                engine,
                tickers,
                cfg.tick_interval(),
                Arc::clone(&values),
                token.clone(),
            ),
        ));
        for inst in watchlist.iter().cloned() {
            let target = SocketAddr::new(target_ip, inst.port);
            let label = inst.ticker.clone();
            handles.push((
                label,
                spawn_sender(
                    inst,
                    target,
                    cfg.send_interval(),
                    Arc::clone(&values),
                    token.clone(),
                ),
            ));
        }
        info!("sim started, {} instruments -> {target_ip}", watchlist.len());

        Ok(Self {
            values,
            token,
            handles,
        })
    }

    /// Latest value for one ticker; 0.0 for unknown tickers.
    pub fn value(&self, ticker: &str) -> f64 {
        self.values
            .read()
            .map(|map| map.get(ticker).copied().unwrap_or(0.0))
            .unwrap_or(0.0)
    }

    /// Cancel every thread and join them. Idempotent.
    pub fn shutdown(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        info!("sim shutdown requested");
        self.token.cancel();
        for (label, handle) in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("[{label}] sim thread panicked");
            }
        }
        info!("sim stopped");
    }
}

impl Drop for SimService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_engine(
    mut engine: MoodEngine,
    tickers: Vec<String>,
    tick: Duration,
    values: SharedValues,
    token: ShutdownToken,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !token.is_cancelled() {
            thread::sleep(tick);
            engine.step();
            if let Ok(mut map) = values.write() {
                // Watchlist order, so seeded runs assign jitter the same way.
                for ticker in &tickers {
                    if let Some(slot) = map.get_mut(ticker) {
                        *slot = engine.instrument_value();
                    }
                }
            }
        }
    })
}

fn spawn_sender(
    inst: Instrument,
    target: SocketAddr,
    interval: Duration,
    values: SharedValues,
    token: ShutdownToken,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let sock = match UdpSocket::bind("0.0.0.0:0") {
            Ok(sock) => sock,
            Err(e) => {
                warn!("[{}] sender socket failed: {e}", inst.ticker);
                return;
            }
        };
        info!("[{}] {} -> {target}", inst.ticker, inst.company);

        while !token.is_cancelled() {
            let value = values
                .read()
                .map(|map| map.get(&inst.ticker).copied().unwrap_or(0.0))
                .unwrap_or(0.0);
            let payload = format!("{value:.6}");
            if let Err(e) = sock.send_to(payload.as_bytes(), target) {
                debug!("[{}] send failed: {e}", inst.ticker);
            }
            thread::sleep(interval);
        }
    })
}
