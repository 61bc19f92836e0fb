//! Events carried on the listener-to-GUI hand-off channel.
//!
//! Listener threads never touch the history store directly; everything they
//! produce crosses the channel as a [`FeedEvent`] and is applied by the drain
//! cycle on the UI thread.

use super::observation::Observation;

// ---------------------------------------------------------------------------
// Link state
// ---------------------------------------------------------------------------

/// Connectivity of one ticker's UDP listener.
///
/// `Waiting` is the initial state before the listener thread reports in;
/// `Failed` is terminal for that listener (no retries).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Waiting,
    Listening,
    Failed(String),
}

impl LinkState {
    pub fn is_listening(&self) -> bool {
        matches!(self, Self::Listening)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Listening => write!(f, "listening"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Feed events
// ---------------------------------------------------------------------------

/// A message from a listener thread to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A successfully parsed sentiment sample for one ticker.
    Observation { ticker: String, obs: Observation },
    /// A listener connectivity change (bound, or terminally failed).
    Status { ticker: String, state: LinkState },
}

impl FeedEvent {
    /// Ticker this event belongs to.
    pub fn ticker(&self) -> &str {
        match self {
            Self::Observation { ticker, .. } => ticker,
            Self::Status { ticker, .. } => ticker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_state_display() {
        assert_eq!(LinkState::Waiting.to_string(), "waiting");
        assert_eq!(LinkState::Listening.to_string(), "listening");
        assert_eq!(
            LinkState::Failed("address in use".into()).to_string(),
            "failed: address in use"
        );
    }

    #[test]
    fn link_state_predicates() {
        assert!(LinkState::Listening.is_listening());
        assert!(!LinkState::Waiting.is_listening());
        assert!(LinkState::Failed("x".into()).is_failed());
        assert!(!LinkState::Listening.is_failed());
    }

    #[test]
    fn event_ticker_accessor() {
        let ev = FeedEvent::Observation {
            ticker: "AAPL".into(),
            obs: Observation::new(1, 0.5),
        };
        assert_eq!(ev.ticker(), "AAPL");

        let ev = FeedEvent::Status {
            ticker: "PLTR".into(),
            state: LinkState::Listening,
        };
        assert_eq!(ev.ticker(), "PLTR");
    }
}
