//! Feed lifecycle: spawn one listener per instrument, tear them all down.
//!
//! `FeedRuntime` owns the receiving half of the event channel, the shared
//! cancellation token, and every listener join handle. Dropping it shuts
//! the feed down, so the GUI can own it as a plain field.

use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use sm_core::{FeedEvent, ShutdownToken, Watchlist};
use tracing::{info, warn};

use crate::listener::{run_listener, ListenerConfig};

pub struct FeedRuntime {
    rx: Receiver<FeedEvent>,
    token: ShutdownToken,
    handles: Vec<(String, thread::JoinHandle<()>)>,
}

impl FeedRuntime {
    /// Spawn one listener thread per watchlist instrument.
    ///
    /// The sending half of the channel lives only in the listener threads;
    /// once every listener has exited the channel reads as disconnected.
    pub fn start(watchlist: &Watchlist, cfg: ListenerConfig) -> Self {
        let (tx, rx) = unbounded();
        let token = ShutdownToken::new();

        let mut handles = Vec::with_capacity(watchlist.len());
        for inst in watchlist.iter().cloned() {
            let ticker = inst.ticker.clone();
            let cfg = cfg.clone();
            let tx = tx.clone();
            let token = token.clone();
            let handle = thread::spawn(move || run_listener(&inst, &cfg, &tx, &token));
            handles.push((ticker, handle));
        }
        info!("feed started, {} listeners", handles.len());

        Self { rx, token, handles }
    }

    /// Channel the GUI drains every frame.
    pub fn receiver(&self) -> &Receiver<FeedEvent> {
        &self.rx
    }

    /// Cancel every listener and join their threads. Idempotent.
    ///
    /// Blocks up to one receive-timeout interval per straggler while the
    /// listeners notice the token.
    pub fn shutdown(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        info!("feed shutdown requested");
        self.token.cancel();
        for (ticker, handle) in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("[{ticker}] listener thread panicked");
            }
        }
        info!("feed stopped");
    }
}

impl Drop for FeedRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
