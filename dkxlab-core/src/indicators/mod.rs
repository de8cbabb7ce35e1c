//! Indicator series computation.
//!
//! All series are pure transforms: input bars in ascending chronological
//! order, output `Vec<f64>` of the same length, `f64::NAN` for positions
//! without a full lookback window. Downstream code must treat NaN as
//! "undefined — never evaluated" and guard accordingly.

pub mod dkx;
pub mod ema;
pub mod macd;

pub use dkx::{dkx_series, dkx_sma_series, DKX_SMA_WINDOW, DKX_WINDOW};
pub use ema::ema_of_series;
pub use macd::{macd_series, MacdParams, MacdSeries};

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHL: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
            }
        })
        .collect()
}

/// Create bars where open = high = low = close, so the DKX typical price
/// equals the close exactly.
#[cfg(test)]
pub fn make_flat_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
