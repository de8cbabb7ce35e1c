//! MACD — EMA(fast) − EMA(slow) with a signal line.
//!
//! Line defined from index slow-1; signal is an EMA of the defined line
//! segment, so it is defined from index slow + signal_period - 2.

use super::ema::ema_of_series;
use serde::{Deserialize, Serialize};

/// MACD periods. Defaults match the conventional 12/26/9 parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1, "fast period must be >= 1");
        assert!(slow > fast, "slow period must be > fast period");
        assert!(signal >= 1, "signal period must be >= 1");
        Self { fast, slow, signal }
    }

    /// Bars needed before the signal line has its first defined value.
    pub fn warmup_bars(&self) -> usize {
        self.slow + self.signal - 1
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

/// Aligned MACD output: both vectors have the input length, NaN where
/// undefined.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
}

/// Compute the MACD line and signal line over a close-price series.
pub fn macd_series(closes: &[f64], params: &MacdParams) -> MacdSeries {
    let n = closes.len();
    let fast = ema_of_series(closes, params.fast);
    let slow = ema_of_series(closes, params.slow);

    let mut line = vec![f64::NAN; n];
    for i in 0..n {
        if !fast[i].is_nan() && !slow[i].is_nan() {
            line[i] = fast[i] - slow[i];
        }
    }

    // Signal: EMA over the defined segment of the line, mapped back into
    // full-length alignment.
    let mut signal = vec![f64::NAN; n];
    if n >= params.slow {
        let segment_start = params.slow - 1;
        let segment_ema = ema_of_series(&line[segment_start..], params.signal);
        for (j, v) in segment_ema.into_iter().enumerate() {
            signal[segment_start + j] = v;
        }
    }

    MacdSeries { line, signal }
}
