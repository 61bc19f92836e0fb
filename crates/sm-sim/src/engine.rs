//! Ornstein-Uhlenbeck market mood.
//!
//! One shared mood value drives every instrument. Each tick pulls the mood
//! toward the configured mean, adds Gaussian noise scaled by sqrt(dt), and
//! clamps to [-1, 1]. Per-instrument values add a small uniform jitter on
//! top of the shared mood so the chart lines separate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use sm_core::error::MonitorError;

use crate::config::SimConfig;

pub struct MoodEngine {
    mood: f64,
    mean: f64,
    reversion_speed: f64,
    volatility: f64,
    dt: f64,
    noise: Normal<f64>,
    rng: StdRng,
}

impl MoodEngine {
    pub fn from_config(cfg: &SimConfig) -> Result<Self, MonitorError> {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    /// Deterministic engine for tests and reproducible runs.
    pub fn seeded(cfg: &SimConfig, seed: u64) -> Result<Self, MonitorError> {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: &SimConfig, rng: StdRng) -> Result<Self, MonitorError> {
        // Normal::new accepts any finite sigma, negative included; gate here.
        if !cfg.volatility.is_finite() || cfg.volatility < 0.0 {
            return Err(MonitorError::Config(format!(
                "volatility must be finite and >= 0, got {}",
                cfg.volatility
            )));
        }
        let noise = Normal::new(0.0, cfg.volatility)
            .map_err(|e| MonitorError::Config(format!("bad volatility {}: {e}", cfg.volatility)))?;
        Ok(Self {
            mood: 0.0,
            mean: cfg.mean,
            reversion_speed: cfg.reversion_speed,
            volatility: cfg.volatility,
            dt: cfg.tick_interval().as_secs_f64(),
            noise,
            rng,
        })
    }

    /// Advance the shared mood by one tick and return it.
    pub fn step(&mut self) -> f64 {
        let reversion = self.reversion_speed * (self.mean - self.mood) * self.dt;
        let noise = self.noise.sample(&mut self.rng) * self.dt.sqrt();
        self.mood = (self.mood + reversion + noise).clamp(-1.0, 1.0);
        self.mood
    }

    /// Current mood plus a per-instrument jitter, clamped like the mood.
    pub fn instrument_value(&mut self) -> f64 {
        let jitter = self.volatility * 0.1 * self.rng.gen_range(-1.0..1.0);
        (self.mood + jitter).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_cfg(mean: f64, reversion_speed: f64) -> SimConfig {
        SimConfig {
            mean,
            reversion_speed,
            volatility: 0.0,
            tick_interval_ms: 1000, // dt = 1 s
            ..SimConfig::default()
        }
    }

    #[test]
    fn zero_volatility_converges_toward_mean() {
        let mut engine = MoodEngine::seeded(&quiet_cfg(0.8, 0.5), 7).unwrap();
        let mut prev = engine.mood;
        for _ in 0..32 {
            let mood = engine.step();
            assert!(mood > prev);
            assert!(mood <= 0.8);
            prev = mood;
        }
        assert!((engine.mood - 0.8).abs() < 1e-3);
    }

    #[test]
    fn mood_clamps_to_unit_range() {
        let mut engine = MoodEngine::seeded(&quiet_cfg(5.0, 10.0), 7).unwrap();
        assert_eq!(engine.step(), 1.0);
        assert_eq!(engine.step(), 1.0);

        let mut engine = MoodEngine::seeded(&quiet_cfg(-5.0, 10.0), 7).unwrap();
        assert_eq!(engine.step(), -1.0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let cfg = SimConfig::default();
        let mut a = MoodEngine::seeded(&cfg, 42).unwrap();
        let mut b = MoodEngine::seeded(&cfg, 42).unwrap();
        for _ in 0..100 {
            assert_eq!(a.step(), b.step());
            assert_eq!(a.instrument_value(), b.instrument_value());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let cfg = SimConfig::default();
        let mut a = MoodEngine::seeded(&cfg, 1).unwrap();
        let mut b = MoodEngine::seeded(&cfg, 2).unwrap();
        let same = (0..16).all(|_| a.step() == b.step());
        assert!(!same);
    }

    #[test]
    fn instrument_value_stays_in_unit_range() {
        let cfg = SimConfig {
            volatility: 2.0,
            ..SimConfig::default()
        };
        let mut engine = MoodEngine::seeded(&cfg, 3).unwrap();
        for _ in 0..500 {
            engine.step();
            let value = engine.instrument_value();
            assert!((-1.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn bad_volatility_is_rejected() {
        for volatility in [-1.0, f64::NAN, f64::INFINITY] {
            let cfg = SimConfig {
                volatility,
                ..SimConfig::default()
            };
            assert!(
                MoodEngine::seeded(&cfg, 0).is_err(),
                "volatility {volatility} accepted"
            );
        }
    }
}
