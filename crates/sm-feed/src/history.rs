//! In-memory history of everything the feed has produced.
//!
//! Owned by the GUI thread and mutated only through [`drain`](crate::drain);
//! listeners never see it. Keyed by ticker, seeded from the watchlist so
//! every instrument has a series and a link state from the first frame.
//! History is unbounded by design: a monitoring session is expected to be
//! shorter than memory.

use ahash::AHashMap;
use sm_core::{LinkState, Observation, Watchlist};

/// Per-ticker observation series plus link state.
#[derive(Debug, Default)]
pub struct HistoryStore {
    series: AHashMap<String, Vec<Observation>>,
    links: AHashMap<String, LinkState>,
}

impl HistoryStore {
    /// Seed empty series and `Waiting` link states for every instrument.
    pub fn new(watchlist: &Watchlist) -> Self {
        let mut series = AHashMap::with_capacity(watchlist.len());
        let mut links = AHashMap::with_capacity(watchlist.len());
        for inst in watchlist.iter() {
            series.insert(inst.ticker.clone(), Vec::new());
            links.insert(inst.ticker.clone(), LinkState::default());
        }
        Self { series, links }
    }

    /// Append one observation. Tickers outside the watchlist are dropped.
    pub fn append(&mut self, ticker: &str, obs: Observation) {
        if let Some(points) = self.series.get_mut(ticker) {
            points.push(obs);
        }
    }

    /// Record a link-state transition. Tickers outside the watchlist are dropped.
    pub fn set_link(&mut self, ticker: &str, state: LinkState) {
        if let Some(slot) = self.links.get_mut(ticker) {
            *slot = state;
        }
    }

    /// Full series for one ticker, oldest first. `None` for unknown tickers.
    pub fn series(&self, ticker: &str) -> Option<&[Observation]> {
        self.series.get(ticker).map(Vec::as_slice)
    }

    pub fn link(&self, ticker: &str) -> Option<&LinkState> {
        self.links.get(ticker)
    }

    /// Number of ports currently bound and receiving.
    pub fn listening_count(&self) -> usize {
        self.links.values().filter(|s| s.is_listening()).count()
    }

    /// Number of listeners that terminated on a bind or socket failure.
    pub fn failed_count(&self) -> usize {
        self.links.values().filter(|s| s.is_failed()).count()
    }

    /// Total observations held, across all tickers.
    pub fn total_observations(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}
