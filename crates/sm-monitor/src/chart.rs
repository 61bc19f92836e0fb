//! Plot data assembly, kept free of egui types so it can be tested headless.

use ahash::AHashMap;
use sm_core::Watchlist;
use sm_feed::HistoryStore;

/// One plottable line: a ticker and its `[time_secs, value]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub ticker: String,
    pub points: Vec<[f64; 2]>,
}

/// Build the lines for the current frame, in watchlist order.
///
/// A ticker contributes a line only when its checkbox is on and it has at
/// least one observation. Deselecting drops the line from the output while
/// the underlying history keeps growing.
pub fn visible_series(
    watchlist: &Watchlist,
    selected: &AHashMap<String, bool>,
    store: &HistoryStore,
) -> Vec<Series> {
    let mut out = Vec::new();
    for inst in watchlist.iter() {
        if !selected.get(&inst.ticker).copied().unwrap_or(false) {
            continue;
        }
        let Some(series) = store.series(&inst.ticker) else {
            continue;
        };
        if series.is_empty() {
            continue;
        }
        out.push(Series {
            ticker: inst.ticker.clone(),
            points: series.iter().map(|o| [o.at_secs(), o.value]).collect(),
        });
    }
    out
}

/// Render an x-axis position (seconds since the epoch) as a local wall clock.
///
/// Axis marks can land outside the representable timestamp range while the
/// user pans; those render as empty labels rather than garbage.
pub fn format_clock(secs: f64) -> String {
    let whole = secs.floor() as i64;
    match chrono::DateTime::from_timestamp(whole, 0) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format("%H:%M:%S")
            .to_string(),
        None => String::new(),
    }
}
