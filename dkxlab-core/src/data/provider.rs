//! Data provider trait and structured error types.
//!
//! The MarketDataProvider trait abstracts over the quote source so the
//! screening pipeline can be driven by a mock in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Bar;

/// Raw periodic OHLCV bar as delivered by a provider, before the
/// volume/turnover columns are dropped for indicator computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub amount: f64,
}

impl RawBar {
    /// Strip the fields the indicator engine never consumes.
    pub fn into_bar(self) -> Bar {
        Bar {
            date: self.date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

/// Bar granularity requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Kline type code used by the quote API.
    pub fn klt(&self) -> u32 {
        match self {
            Period::Daily => 101,
            Period::Weekly => 102,
            Period::Monthly => 103,
        }
    }
}

/// Price adjustment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjust {
    /// Unadjusted prices.
    None,
    /// Forward adjustment (qfq) — historical prices rebased to current splits.
    Forward,
    /// Backward adjustment (hfq).
    Backward,
}

impl Adjust {
    /// Adjustment code used by the quote API.
    pub fn fqt(&self) -> u32 {
        match self {
            Adjust::None => 0,
            Adjust::Forward => 1,
            Adjust::Backward => 2,
        }
    }
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("symbol listing returned no entries")]
    EmptyUniverse,

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for market data sources.
///
/// Implementations handle the specifics of one quote backend; the worker
/// and scheduler only see this interface.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the current tradable symbol universe as an ordered list of
    /// unique symbol codes.
    fn fetch_universe(&self) -> Result<Vec<String>, DataError>;

    /// Fetch periodic OHLCV bars for one symbol over a date range,
    /// ascending chronological order.
    fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
        start: NaiveDate,
        end: NaiveDate,
        adjust: Adjust,
    ) -> Result<Vec<RawBar>, DataError>;
}
