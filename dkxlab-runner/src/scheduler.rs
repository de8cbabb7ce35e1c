//! Fan-out scheduler — sharded concurrent screening with a full-completion
//! join.
//!
//! The universe is split into contiguous shards, one rayon pool thread per
//! shard. Shards run independently; the scheduler blocks until all of them
//! finish and only then aggregates the summary. Successes and errors stream
//! to the log as they happen.

use dkxlab_core::data::{MarketDataProvider, Throttle};
use rayon::prelude::*;
use tracing::info;

use crate::config::ScreenConfig;
use crate::outcome::ScreenSummary;
use crate::worker::screen_shard;

/// Partition symbols into at most `worker_count` contiguous shards of
/// `ceil(n / worker_count)` symbols; the last shard may be smaller.
/// Concatenating the shards reproduces the input exactly.
pub fn partition(symbols: &[String], worker_count: usize) -> Vec<&[String]> {
    assert!(worker_count >= 1, "worker_count must be >= 1");
    if symbols.is_empty() {
        return Vec::new();
    }
    let shard_size = symbols.len().div_ceil(worker_count);
    symbols.chunks(shard_size).collect()
}

/// Screen the whole universe and block until every shard has completed.
///
/// Per-symbol failures are contained inside the workers, so this function
/// always returns a full summary; the caller only fails before fan-out
/// (e.g. when the universe itself cannot be fetched).
pub fn run_screen(
    provider: &dyn MarketDataProvider,
    config: &ScreenConfig,
    symbols: &[String],
) -> ScreenSummary {
    info!(
        "start checking: {} symbols across {} workers",
        symbols.len(),
        config.worker_count
    );

    let throttle = Throttle::new(&config.throttle_ms);
    let shards = partition(symbols, config.worker_count);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_count)
        .build()
        .expect("failed to build rayon thread pool");

    let outcomes: Vec<_> = pool.install(|| {
        shards
            .par_iter()
            .map(|shard| screen_shard(provider, config, &throttle, shard))
            .collect()
    });

    let summary = ScreenSummary::from_outcomes(outcomes.into_iter().flatten());
    info!(
        "check finished: {} crossed, {} no signal, {} skipped, {} failed",
        summary.crossed.len(),
        summary.no_signal,
        summary.skipped,
        summary.failed
    );
    summary
}
