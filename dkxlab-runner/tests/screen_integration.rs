//! Integration tests for the screening pipeline: worker isolation, shard
//! fan-out coverage, and the minimum-history gate, driven by a mock provider.

use chrono::NaiveDate;
use dkxlab_core::data::{Adjust, DataError, MarketDataProvider, Period, RawBar};
use dkxlab_runner::{
    run_screen, screen_symbol, OutcomeStatus, ScreenConfig, SkipReason, SymbolOutcome,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Provider backed by canned histories. Records every history fetch so tests
/// can assert exactly-once processing.
struct MockProvider {
    histories: HashMap<String, Vec<RawBar>>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    fn new(histories: HashMap<String, Vec<RawBar>>) -> Self {
        Self {
            histories,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn fetched_symbols(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl MarketDataProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_universe(&self) -> Result<Vec<String>, DataError> {
        let mut symbols: Vec<String> = self.histories.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn fetch_history(
        &self,
        symbol: &str,
        _period: Period,
        _start: NaiveDate,
        _end: NaiveDate,
        _adjust: Adjust,
    ) -> Result<Vec<RawBar>, DataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        match self.histories.get(symbol) {
            Some(bars) => Ok(bars.clone()),
            None => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
        }
    }
}

/// Flat bars (open = high = low = close) from a close series, so the DKX
/// typical price equals the close and outcomes are exactly predictable.
fn flat_history(closes: &[f64]) -> Vec<RawBar> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 21).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| RawBar {
            date: base + chrono::Duration::days(i as i64),
            open: close,
            close,
            high: close,
            low: close,
            volume: 1000,
            amount: close * 1000.0,
        })
        .collect()
}

/// 100 flat bars at 10.0 with a one-bar dip to 9.0 and a final pop to 20.0.
///
/// The dip pulls the DKX strictly below its SMA on the second-to-last bar;
/// the pop lifts it strictly above on the last bar. The long flat prefix
/// leaves both MACD EMAs converged at the price, so the final spike makes the
/// line positive, the signal positive, and the line the larger of the two.
fn crossing_history() -> Vec<RawBar> {
    let mut closes = vec![10.0; 100];
    closes[98] = 9.0;
    closes[99] = 20.0;
    flat_history(&closes)
}

fn quiet_config() -> ScreenConfig {
    ScreenConfig {
        throttle_ms: Vec::new(), // no sleeping in tests
        worker_count: 4,
        ..Default::default()
    }
}

fn status_of(summary_outcome: &SymbolOutcome) -> &OutcomeStatus {
    &summary_outcome.status
}

#[test]
fn crossing_series_fires() {
    let provider = MockProvider::new(HashMap::from([("600519".to_string(), crossing_history())]));
    let config = quiet_config();
    let throttle = dkxlab_core::data::Throttle::disabled();

    let outcome = screen_symbol(&provider, &config, &throttle, "600519");
    assert_eq!(outcome.status, OutcomeStatus::CrossUp);
}

#[test]
fn flat_series_does_not_fire() {
    // DKX equals its SMA everywhere: no strict crossover.
    let provider = MockProvider::new(HashMap::from([(
        "000001".to_string(),
        flat_history(&[10.0; 100]),
    )]));
    let config = quiet_config();
    let throttle = dkxlab_core::data::Throttle::disabled();

    let outcome = screen_symbol(&provider, &config, &throttle, "000001");
    assert_eq!(outcome.status, OutcomeStatus::NoSignal);
}

#[test]
fn short_history_is_silently_skipped() {
    let provider = MockProvider::new(HashMap::from([(
        "688981".to_string(),
        flat_history(&[10.0; 99]),
    )]));
    let config = quiet_config();
    let throttle = dkxlab_core::data::Throttle::disabled();

    let outcome = screen_symbol(&provider, &config, &throttle, "688981");
    assert_eq!(
        outcome.status,
        OutcomeStatus::Skipped(SkipReason::InsufficientHistory { got: 99 })
    );
}

#[test]
fn fetch_failure_becomes_failed_outcome() {
    let provider = MockProvider::new(HashMap::new());
    let config = quiet_config();
    let throttle = dkxlab_core::data::Throttle::disabled();

    let outcome = screen_symbol(&provider, &config, &throttle, "999999");
    match status_of(&outcome) {
        OutcomeStatus::Failed(detail) => assert!(detail.contains("999999")),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn every_symbol_processed_exactly_once() {
    let mut histories = HashMap::new();
    for i in 0..23 {
        histories.insert(format!("{i:06}"), flat_history(&[10.0; 100]));
    }
    let provider = MockProvider::new(histories);
    let symbols = provider.fetch_universe().unwrap();
    let config = quiet_config();

    let summary = run_screen(&provider, &config, &symbols);

    assert_eq!(summary.total, 23);
    assert_eq!(summary.no_signal, 23);

    let mut fetched = provider.fetched_symbols();
    fetched.sort();
    assert_eq!(fetched, symbols, "each symbol fetched exactly once");
}

#[test]
fn one_failure_does_not_stop_the_rest() {
    // Ten symbols; only four have history. The six missing ones fail at
    // fetch but every symbol still gets processed and reported.
    let mut histories = HashMap::new();
    for symbol in ["000001", "000002", "600519", "688981"] {
        histories.insert(symbol.to_string(), flat_history(&[10.0; 100]));
    }
    let provider = MockProvider::new(histories);
    let symbols: Vec<String> = (1..=10).map(|i| format!("{i:06}")).collect();
    let config = ScreenConfig {
        worker_count: 3,
        ..quiet_config()
    };

    let summary = run_screen(&provider, &config, &symbols);

    assert_eq!(summary.total, 10);
    assert_eq!(summary.no_signal, 2); // 000001, 000002
    assert_eq!(summary.failed, 8);
    assert_eq!(summary.errors.len(), 8);
    assert_eq!(provider.fetched_symbols().len(), 10);
}

#[test]
fn mixed_universe_summary() {
    let mut histories = HashMap::new();
    histories.insert("600519".to_string(), crossing_history());
    histories.insert("000001".to_string(), flat_history(&[10.0; 100]));
    histories.insert("688981".to_string(), flat_history(&[10.0; 40]));
    let provider = MockProvider::new(histories);
    let symbols = vec![
        "600519".to_string(),
        "000001".to_string(),
        "688981".to_string(),
        "999999".to_string(),
    ];
    let config = ScreenConfig {
        worker_count: 2,
        ..quiet_config()
    };

    let summary = run_screen(&provider, &config, &symbols);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.crossed, vec!["600519".to_string()]);
    assert_eq!(summary.no_signal, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert!(!summary.all_succeeded());
}

#[test]
fn resampled_screen_runs_with_minimum_history() {
    // 100 daily bars collapse to 34 three-bar blocks — exactly the warmup
    // requirement. A flat series stays signal-free either way.
    let provider = MockProvider::new(HashMap::from([(
        "000001".to_string(),
        flat_history(&[10.0; 100]),
    )]));
    let config = ScreenConfig {
        resample_block: Some(3),
        ..quiet_config()
    };
    config.validate().unwrap();
    let throttle = dkxlab_core::data::Throttle::disabled();

    let outcome = screen_symbol(&provider, &config, &throttle, "000001");
    assert_eq!(outcome.status, OutcomeStatus::NoSignal);
}

#[test]
fn single_worker_preserves_universe_order_in_log_stream() {
    // With one shard the fetch order must be the universe order.
    let mut histories = HashMap::new();
    for i in 0..8 {
        histories.insert(format!("{i:06}"), flat_history(&[10.0; 100]));
    }
    let provider = MockProvider::new(histories);
    let symbols: Vec<String> = (0..8).map(|i| format!("{i:06}")).collect();
    let config = ScreenConfig {
        worker_count: 1,
        ..quiet_config()
    };

    run_screen(&provider, &config, &symbols);
    assert_eq!(provider.fetched_symbols(), symbols);
}
