//! Non-blocking bridge from the feed channel into the history store.
//!
//! Called once per GUI frame. Empties whatever the listeners queued since
//! the last frame without ever blocking the paint path: `try_recv` until
//! `Empty`. Events are applied in channel order, so per-ticker arrival
//! order is preserved end to end.

use crossbeam_channel::{Receiver, TryRecvError};
use sm_core::FeedEvent;

use crate::history::HistoryStore;

/// What one drain pass moved, for the caller's status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub observations: usize,
    pub status_events: usize,
    /// All senders are gone; no further events will ever arrive.
    pub disconnected: bool,
}

/// Move every queued event into the store. Returns immediately when the
/// channel is empty.
pub fn drain(rx: &Receiver<FeedEvent>, store: &mut HistoryStore) -> DrainStats {
    let mut stats = DrainStats::default();
    loop {
        match rx.try_recv() {
            Ok(FeedEvent::Observation { ticker, obs }) => {
                store.append(&ticker, obs);
                stats.observations += 1;
            }
            Ok(FeedEvent::Status { ticker, state }) => {
                store.set_link(&ticker, state);
                stats.status_events += 1;
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                stats.disconnected = true;
                break;
            }
        }
    }
    stats
}
