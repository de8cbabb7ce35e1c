//! Cross-up rule — DKX crossing above its SMA with MACD confirmation.
//!
//! Fires when the DKX was strictly below its SMA on the previous bar and is
//! strictly above it on the latest bar, while the MACD line and signal line
//! are both positive with the line on top.

/// Evaluate the cross-up rule on aligned indicator series.
///
/// Consults exactly the last two points of `dkx`/`dkx_sma` and the last
/// point of `macd`/`macd_signal`. NaN at any consulted position means the
/// window there was never fully supported, so no signal. Series shorter
/// than two points cannot cross.
pub fn cross_up(dkx: &[f64], dkx_sma: &[f64], macd: &[f64], macd_signal: &[f64]) -> bool {
    let n = dkx.len();
    if n < 2 || dkx_sma.len() != n || macd.len() != n || macd_signal.len() != n {
        return false;
    }

    let (dkx_prev, dkx_cur) = (dkx[n - 2], dkx[n - 1]);
    let (sma_prev, sma_cur) = (dkx_sma[n - 2], dkx_sma[n - 1]);
    let (line, signal) = (macd[n - 1], macd_signal[n - 1]);

    if dkx_prev.is_nan()
        || dkx_cur.is_nan()
        || sma_prev.is_nan()
        || sma_cur.is_nan()
        || line.is_nan()
        || signal.is_nan()
    {
        return false;
    }

    dkx_prev < sma_prev && dkx_cur > sma_cur && line > 0.0 && signal > 0.0 && line > signal
}
