//! A single timestamped sentiment sample.
//!
//! # Timestamp convention
//!
//! Timestamps are in **microseconds since Unix epoch** (us), stamped with the
//! local wall clock at the moment the datagram is received. The chart divides
//! down to fractional seconds for its x-axis.

use crate::time_util;

/// One sentiment sample for one ticker.
///
/// Produced exactly once per datagram that parses successfully; immutable
/// after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Wall-clock receipt time, microseconds since Unix epoch.
    pub at_us: u64,
    /// The sentiment value carried by the datagram.
    pub value: f64,
}

impl Observation {
    pub fn new(at_us: u64, value: f64) -> Self {
        Self { at_us, value }
    }

    /// Build an observation stamped with the current wall clock.
    #[inline]
    pub fn now(value: f64) -> Self {
        Self::new(time_util::now_us(), value)
    }

    /// Receipt time as fractional seconds since Unix epoch (chart x-value).
    #[inline]
    pub fn at_secs(&self) -> f64 {
        time_util::us_to_secs(self.at_us)
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6} @ {}us", self.value, self.at_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_uses_current_clock() {
        let before = time_util::now_us();
        let obs = Observation::now(0.42);
        assert!(obs.at_us >= before);
        assert_eq!(obs.value, 0.42);
    }

    #[test]
    fn at_secs_converts_microseconds() {
        let obs = Observation::new(1_500_000, -0.25);
        assert!((obs.at_secs() - 1.5).abs() < 1e-12);
    }
}
