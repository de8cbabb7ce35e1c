//! DKX — 20-period backward-weighted average of a typical-price proxy,
//! plus its 10-period SMA.
//!
//! Per-bar typical price: (3*close + low + open + high) / 6.
//! DKX[i] = sum over the 20 bars ending at i of weight * typical, where the
//! newest bar weighs 20 and the oldest weighs 1, divided by 210 (the weight
//! sum). First valid value at index 19; the SMA needs 10 valid DKX values,
//! so its first valid value is at index 28.
//!
//! Both series roll forward with O(1) window updates: the weighted sum
//! advances by W' = W + 20*t_new - S, where S is the plain sum of the
//! outgoing window.

use crate::domain::Bar;

/// DKX lookback window.
pub const DKX_WINDOW: usize = 20;

/// Sum of weights 1..=20.
pub const DKX_WEIGHT_DIVISOR: f64 = 210.0;

/// DKX smoothing window.
pub const DKX_SMA_WINDOW: usize = 10;

/// Typical-price proxy weighting the close triple.
fn typical(bar: &Bar) -> f64 {
    (3.0 * bar.close + bar.low + bar.open + bar.high) / 6.0
}

/// Compute the DKX series. Positions with fewer than `DKX_WINDOW` trailing
/// bars are NaN.
pub fn dkx_series(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if n < DKX_WINDOW {
        return result;
    }

    let typicals: Vec<f64> = bars.iter().map(typical).collect();

    // Initial window [0, DKX_WINDOW): plain sum and weighted sum, where
    // typicals[DKX_WINDOW-1] is the newest bar (weight 20).
    let mut plain_sum = 0.0;
    let mut weighted_sum = 0.0;
    for (k, &t) in typicals[..DKX_WINDOW].iter().enumerate() {
        plain_sum += t;
        weighted_sum += (k + 1) as f64 * t;
    }
    result[DKX_WINDOW - 1] = weighted_sum / DKX_WEIGHT_DIVISOR;

    for i in DKX_WINDOW..n {
        let entering = typicals[i];
        let leaving = typicals[i - DKX_WINDOW];
        // Demote every weight in the old window by one, drop the bar that
        // fell to weight zero, admit the new bar at full weight.
        weighted_sum = weighted_sum - plain_sum + DKX_WINDOW as f64 * entering;
        plain_sum = plain_sum - leaving + entering;
        result[i] = weighted_sum / DKX_WEIGHT_DIVISOR;
    }

    result
}

/// Compute the 10-period trailing mean of a DKX series. Positions whose
/// window contains any NaN (i.e. before index `DKX_WINDOW + DKX_SMA_WINDOW - 2`)
/// are NaN.
pub fn dkx_sma_series(dkx: &[f64]) -> Vec<f64> {
    let n = dkx.len();
    let mut result = vec![f64::NAN; n];

    let first_dkx = DKX_WINDOW - 1;
    let first_sma = first_dkx + DKX_SMA_WINDOW - 1;
    if n <= first_sma {
        return result;
    }

    let mut sum: f64 = dkx[first_dkx..=first_sma].iter().sum();
    result[first_sma] = sum / DKX_SMA_WINDOW as f64;

    for i in (first_sma + 1)..n {
        sum = sum - dkx[i - DKX_SMA_WINDOW] + dkx[i];
        result[i] = sum / DKX_SMA_WINDOW as f64;
    }

    result
}
