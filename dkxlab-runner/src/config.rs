//! Serializable screen configuration.

use chrono::NaiveDate;
use dkxlab_core::data::{Adjust, Period};
use dkxlab_core::indicators::{MacdParams, DKX_SMA_WINDOW, DKX_WINDOW};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::worker::DEFAULT_MIN_BARS;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one screen run.
///
/// Defaults reproduce the fixed constants of the daily screen: forward-adjusted
/// daily bars over the trailing 365 days, 12/26/9 MACD, 100-bar minimum
/// history, no resampling, jittered fetch throttle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Bar granularity requested from the provider.
    pub period: Period,

    /// Price adjustment mode.
    pub adjust: Adjust,

    /// History range start (inclusive).
    pub start: NaiveDate,

    /// History range end (inclusive).
    pub end: NaiveDate,

    /// Symbols with fewer bars than this are skipped as newly listed.
    pub min_bars: usize,

    /// When set, collapse the fetched series into blocks of this many bars
    /// before computing indicators.
    pub resample_block: Option<usize>,

    /// MACD periods.
    pub macd: MacdParams,

    /// Number of shards and pool threads.
    pub worker_count: usize,

    /// Jitter set for the pre-fetch throttle, in milliseconds. Empty disables
    /// throttling.
    pub throttle_ms: Vec<u64>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        let end = chrono::Local::now().date_naive();
        Self {
            period: Period::Daily,
            adjust: Adjust::Forward,
            start: end - chrono::Duration::days(365),
            end,
            min_bars: DEFAULT_MIN_BARS,
            resample_block: None,
            macd: MacdParams::default(),
            worker_count: default_worker_count(),
            throttle_ms: dkxlab_core::data::throttle::DEFAULT_DELAYS_MS.to_vec(),
        }
    }
}

impl ScreenConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Bars the indicator pipeline needs before the cross-up check has two
    /// fully supported points: the DKX-SMA needs a previous value and the
    /// MACD signal line needs its seed.
    pub fn warmup_bars(&self) -> usize {
        (DKX_WINDOW + DKX_SMA_WINDOW).max(self.macd.warmup_bars())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::Invalid("worker_count must be >= 1".into()));
        }
        if self.start > self.end {
            return Err(ConfigError::Invalid(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        if let Some(block) = self.resample_block {
            if block == 0 {
                return Err(ConfigError::Invalid("resample_block must be >= 1".into()));
            }
        }

        let block = self.resample_block.unwrap_or(1);
        let effective_bars = self.min_bars.div_ceil(block);
        if effective_bars < self.warmup_bars() {
            return Err(ConfigError::Invalid(format!(
                "min_bars {} leaves {} bars after {}-bar resampling; the \
                 indicators need at least {}",
                self.min_bars,
                effective_bars,
                block,
                self.warmup_bars()
            )));
        }

        Ok(())
    }
}

/// Default pool size: a capped function of core count, so a large machine
/// does not open dozens of concurrent connections against the provider.
pub fn default_worker_count() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores + 4).min(32)
}
