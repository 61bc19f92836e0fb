//! Tracked instruments and their fixed UDP ports.
//!
//! The monitor has no config surface: its watchlist is compiled in via
//! [`Watchlist::builtin`]. The simulator may supply its own list through its
//! JSON config, which is why [`Instrument`] derives `Deserialize`.
//!
//! A [`Watchlist`] is validated once at construction and immutable for the
//! process lifetime: tickers are normalized and unique, ports are unique.

use serde::Deserialize;

use crate::error::MonitorError;

/// Normalize a ticker code: trim surrounding whitespace and upper-case.
#[inline]
pub fn normalize_ticker(s: &str) -> String {
    s.trim().to_uppercase()
}

/// One tracked ticker: display info plus the local UDP port it listens on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Instrument {
    /// Ticker code, normalized to upper-case (e.g. `"AAPL"`).
    pub ticker: String,
    /// Company name shown next to the ticker in the side panel.
    pub company: String,
    /// Local UDP port this ticker's sentiment datagrams arrive on.
    pub port: u16,
}

impl Instrument {
    pub fn new(ticker: &str, company: &str, port: u16) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            company: company.to_string(),
            port,
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) :{}", self.ticker, self.company, self.port)
    }
}

/// Validated, insertion-ordered set of tracked instruments.
#[derive(Debug, Clone)]
pub struct Watchlist {
    instruments: Vec<Instrument>,
}

impl Watchlist {
    /// Validate and build a watchlist.
    ///
    /// Tickers are normalized first; the list must be non-empty with unique
    /// tickers and unique ports.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, MonitorError> {
        if instruments.is_empty() {
            return Err(MonitorError::Config("watchlist is empty".into()));
        }

        let mut instruments = instruments;
        for inst in &mut instruments {
            inst.ticker = normalize_ticker(&inst.ticker);
            if inst.ticker.is_empty() {
                return Err(MonitorError::Config(format!(
                    "empty ticker for port {}",
                    inst.port
                )));
            }
        }

        let mut tickers = ahash::AHashSet::with_capacity(instruments.len());
        let mut ports = ahash::AHashSet::with_capacity(instruments.len());
        for inst in &instruments {
            if !tickers.insert(inst.ticker.as_str()) {
                return Err(MonitorError::Config(format!(
                    "duplicate ticker {}",
                    inst.ticker
                )));
            }
            if !ports.insert(inst.port) {
                return Err(MonitorError::Config(format!(
                    "duplicate port {} for {}",
                    inst.port, inst.ticker
                )));
            }
        }

        Ok(Self { instruments })
    }

    /// The compiled-in watchlist the monitor runs with.
    pub fn builtin() -> Self {
        // Known-good set; bypasses validation by construction.
        Self {
            instruments: vec![
                Instrument::new("AAPL", "Apple", 3001),
                Instrument::new("GOOGL", "Google Class A", 4001),
                Instrument::new("PLTR", "Palantir Technologies", 5001),
            ],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instrument> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Look up an instrument by ticker (normalized before the lookup).
    pub fn get(&self, ticker: &str) -> Option<&Instrument> {
        let normalized = normalize_ticker(ticker);
        self.instruments.iter().find(|i| i.ticker == normalized)
    }
}
