//! Block resampling — collapse consecutive bars into fixed-size blocks.
//!
//! Used for the coarse-period variant of the screen: grouping daily bars
//! into 3-bar blocks produces a lower-frequency series that runs through
//! the indicator engine unchanged.

use crate::domain::Bar;

/// Collapse consecutive bars into blocks of `block` bars each.
///
/// Each block becomes one bar: open of the first bar, close of the last,
/// max high, min low, dated by the block's last bar. The trailing partial
/// block is kept even when undersized.
pub fn compress_blocks(bars: &[Bar], block: usize) -> Vec<Bar> {
    assert!(block >= 1, "block size must be >= 1");

    bars.chunks(block)
        .map(|chunk| {
            let first = &chunk[0];
            let last = &chunk[chunk.len() - 1];
            Bar {
                date: last.date,
                open: first.open,
                close: last.close,
                high: chunk.iter().map(|b| b.high).fold(f64::MIN, f64::max),
                low: chunk.iter().map(|b| b.low).fold(f64::MAX, f64::min),
            }
        })
        .collect()
}
