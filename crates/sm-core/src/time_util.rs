//! Wall-clock time utilities.
//!
//! Observations are stamped in **microseconds since Unix epoch**; the chart
//! works in fractional seconds. Both conversions live here so the convention
//! is defined in exactly one place.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as **microseconds** since Unix epoch.
#[inline]
pub fn now_us() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as u64
}

/// Convert an epoch-microseconds stamp to fractional epoch seconds.
#[inline]
pub fn us_to_secs(us: u64) -> f64 {
    us as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        // 2020-01-01T00:00:00Z in microseconds.
        assert!(now_us() > 1_577_836_800_000_000);
    }

    #[test]
    fn now_is_monotonic_enough() {
        let a = now_us();
        let b = now_us();
        assert!(b >= a);
    }

    #[test]
    fn us_to_secs_conversion() {
        assert_eq!(us_to_secs(0), 0.0);
        assert!((us_to_secs(2_500_000) - 2.5).abs() < 1e-12);
    }
}
