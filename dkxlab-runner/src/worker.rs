//! Symbol worker — the per-symbol screening pipeline.
//!
//! throttle → fetch history → minimum-history gate → optional resampling →
//! indicator series → cross-up rule. Every failure is folded into the
//! symbol's own outcome; the shard loop never stops early.

use dkxlab_core::data::{compress_blocks, MarketDataProvider, RawBar, Throttle};
use dkxlab_core::domain::Bar;
use dkxlab_core::indicators::{dkx_series, dkx_sma_series, macd_series};
use dkxlab_core::signals::cross_up;
use tracing::{debug, error, info};

use crate::config::ScreenConfig;
use crate::outcome::{OutcomeStatus, SkipReason, SymbolOutcome};

/// Series shorter than this are newly-listed symbols without enough history
/// to support the indicator windows.
pub const DEFAULT_MIN_BARS: usize = 100;

/// Screen one symbol end to end. Never panics past its own boundary; every
/// error becomes a `Failed` outcome.
pub fn screen_symbol(
    provider: &dyn MarketDataProvider,
    config: &ScreenConfig,
    throttle: &Throttle,
    symbol: &str,
) -> SymbolOutcome {
    info!("check {symbol}");

    throttle.pause();
    let history =
        provider.fetch_history(symbol, config.period, config.start, config.end, config.adjust);
    let raw = match history {
        Ok(raw) => raw,
        Err(err) => {
            error!("process {symbol} error: {err}");
            return SymbolOutcome::new(symbol, OutcomeStatus::Failed(err.to_string()));
        }
    };

    if raw.len() < config.min_bars {
        debug!("skip {symbol}: {} bars < {}", raw.len(), config.min_bars);
        return SymbolOutcome::new(
            symbol,
            OutcomeStatus::Skipped(SkipReason::InsufficientHistory { got: raw.len() }),
        );
    }

    let mut bars: Vec<Bar> = raw.into_iter().map(RawBar::into_bar).collect();
    if let Some(block) = config.resample_block {
        bars = compress_blocks(&bars, block);
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let dkx = dkx_series(&bars);
    let dkx_sma = dkx_sma_series(&dkx);
    let macd = macd_series(&closes, &config.macd);

    if cross_up(&dkx, &dkx_sma, &macd.line, &macd.signal) {
        info!("{symbol} cross up");
        SymbolOutcome::new(symbol, OutcomeStatus::CrossUp)
    } else {
        SymbolOutcome::new(symbol, OutcomeStatus::NoSignal)
    }
}

/// Screen one shard sequentially, in the shard's original order, collecting
/// every outcome. A failed symbol never affects the rest of the shard.
pub fn screen_shard(
    provider: &dyn MarketDataProvider,
    config: &ScreenConfig,
    throttle: &Throttle,
    shard: &[String],
) -> Vec<SymbolOutcome> {
    shard
        .iter()
        .map(|symbol| screen_symbol(provider, config, throttle, symbol))
        .collect()
}
