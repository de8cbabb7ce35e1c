//! DKXLab Core — domain types, market data access, indicator engine, signal rule.
//!
//! This crate contains everything the screener needs below the orchestration
//! layer:
//! - Domain types (daily OHLC bars)
//! - Market data provider trait plus the Eastmoney push2 implementation
//! - Fetch throttle and block resampling
//! - DKX / DKX-SMA / MACD series computation
//! - The cross-up signal rule

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signals;
