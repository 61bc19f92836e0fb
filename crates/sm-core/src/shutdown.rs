//! Cooperative cancellation for blocking worker threads.
//!
//! UDP listener and broadcaster threads block with a short timeout, so a
//! shared flag checked once per loop iteration is enough: after cancellation,
//! each thread exits within one timeout interval. There is no forced
//! cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable cancellation flag shared between an owner and its worker threads.
///
/// Cancellation is one-way: once cancelled, the token never resets.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    cancelled: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal every holder of a clone to stop. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
