//! Fetch throttle — jittered delay before each provider call.
//!
//! Quote backends ban IPs that hammer them at a fixed cadence. Sleeping a
//! randomly chosen duration from a small fixed set before every history
//! fetch keeps request spacing irregular without a global rate limiter.

use rand::seq::SliceRandom;
use std::time::Duration;

/// Default jitter set, in milliseconds.
pub const DEFAULT_DELAYS_MS: [u64; 4] = [200, 300, 400, 500];

/// Pre-fetch throttle over a fixed delay set.
///
/// An empty delay set disables sleeping entirely; tests use that to drive
/// the pipeline at full speed.
#[derive(Debug, Clone)]
pub struct Throttle {
    delays: Vec<Duration>,
}

impl Throttle {
    pub fn new(delays_ms: &[u64]) -> Self {
        Self {
            delays: delays_ms.iter().map(|&ms| Duration::from_millis(ms)).collect(),
        }
    }

    /// Throttle that never sleeps.
    pub fn disabled() -> Self {
        Self { delays: Vec::new() }
    }

    /// Sleep for one uniformly chosen delay from the set.
    pub fn pause(&self) {
        if let Some(delay) = self.delays.choose(&mut rand::thread_rng()) {
            std::thread::sleep(*delay);
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(&DEFAULT_DELAYS_MS)
    }
}
