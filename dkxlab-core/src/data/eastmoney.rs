//! Eastmoney push2 quote API provider.
//!
//! Two endpoints back the screener: the A-share listing (`clist/get`) for the
//! symbol universe and the kline endpoint (`stock/kline/get`) for history.
//! Both are unauthenticated JSON APIs with no published contract, so parse
//! failures are surfaced as `ResponseFormatChanged` rather than panics.

use super::provider::{Adjust, DataError, MarketDataProvider, Period, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

const LIST_URL: &str = "https://82.push2.eastmoney.com/api/qt/clist/get";
const KLINE_URL: &str = "https://push2his.eastmoney.com/api/qt/stock/kline/get";

/// The listing endpoint caps page size; loop `pn` until `total` is covered.
const LIST_PAGE_SIZE: usize = 200;

/// Listing response: `data.diff` carries one entry per security,
/// field `f12` is the symbol code.
#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Option<ListData>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    total: usize,
    diff: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    #[serde(rename = "f12")]
    code: String,
}

/// Kline response: `data.klines` is a list of comma-joined strings
/// `date,open,close,high,low,volume,amount,...`.
#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    klines: Option<Vec<String>>,
}

/// Eastmoney market data provider.
pub struct EastmoneyProvider {
    client: reqwest::blocking::Client,
}

impl EastmoneyProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Security id for the kline endpoint: `{market}.{code}` where market is
    /// 1 for Shanghai listings (60x main board, 68x STAR) and 0 otherwise.
    fn secid(symbol: &str) -> String {
        if symbol.starts_with("60") || symbol.starts_with("68") {
            format!("1.{symbol}")
        } else {
            format!("0.{symbol}")
        }
    }

    fn list_url(page: usize) -> String {
        // fs filter: SZ main/ChiNext, SH main/STAR, BJ — the full A-share board.
        format!(
            "{LIST_URL}?pn={page}&pz={LIST_PAGE_SIZE}&po=1&np=1&fltt=2&invt=2&fid=f3\
             &fs=m:0+t:6,m:0+t:80,m:1+t:2,m:1+t:23,m:0+t:81+s:2048&fields=f12"
        )
    }

    fn kline_url(
        symbol: &str,
        period: Period,
        start: NaiveDate,
        end: NaiveDate,
        adjust: Adjust,
    ) -> String {
        let secid = Self::secid(symbol);
        let beg = start.format("%Y%m%d");
        let end = end.format("%Y%m%d");
        format!(
            "{KLINE_URL}?secid={secid}&klt={klt}&fqt={fqt}&beg={beg}&end={end}\
             &fields1=f1,f2,f3,f4,f5,f6\
             &fields2=f51,f52,f53,f54,f55,f56,f57,f58,f59,f60,f61",
            klt = period.klt(),
            fqt = adjust.fqt(),
        )
    }

    /// Parse one comma-joined kline record.
    fn parse_kline(symbol: &str, line: &str) -> Result<RawBar, DataError> {
        let mut fields = line.split(',');

        let date_str = fields.next().ok_or_else(|| {
            DataError::ResponseFormatChanged(format!("kline for {symbol} missing date: {line}"))
        })?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            DataError::ResponseFormatChanged(format!("kline date for {symbol}: {e}"))
        })?;

        let mut num = |name: &str| -> Result<f64, DataError> {
            let raw = fields.next().ok_or_else(|| {
                DataError::ResponseFormatChanged(format!(
                    "kline for {symbol} missing field '{name}': {line}"
                ))
            })?;
            raw.parse::<f64>().map_err(|e| {
                DataError::ResponseFormatChanged(format!("kline {name} for {symbol}: {e}"))
            })
        };

        let open = num("open")?;
        let close = num("close")?;
        let high = num("high")?;
        let low = num("low")?;
        let volume = num("volume")? as u64;
        let amount = num("amount")?;

        Ok(RawBar {
            date,
            open,
            close,
            high,
            low,
            volume,
            amount,
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, DataError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status}")));
        }

        resp.json::<T>()
            .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))
    }
}

impl Default for EastmoneyProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for EastmoneyProvider {
    fn name(&self) -> &str {
        "eastmoney"
    }

    fn fetch_universe(&self) -> Result<Vec<String>, DataError> {
        let mut symbols: Vec<String> = Vec::new();

        let mut page = 1;
        loop {
            let resp: ListResponse = self.get_json(&Self::list_url(page))?;
            let data = resp.data.ok_or(DataError::EmptyUniverse)?;
            if data.diff.is_empty() {
                break;
            }
            symbols.extend(data.diff.into_iter().map(|e| e.code));
            if symbols.len() >= data.total {
                break;
            }
            page += 1;
        }

        if symbols.is_empty() {
            return Err(DataError::EmptyUniverse);
        }

        // The listing is sorted server-side by the fid param; duplicates would
        // double-process a symbol, so drop them while keeping first occurrence.
        let mut seen = std::collections::HashSet::new();
        symbols.retain(|s| seen.insert(s.clone()));

        Ok(symbols)
    }

    fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
        start: NaiveDate,
        end: NaiveDate,
        adjust: Adjust,
    ) -> Result<Vec<RawBar>, DataError> {
        let url = Self::kline_url(symbol, period, start, end, adjust);
        let resp: KlineResponse = self.get_json(&url)?;

        let klines = resp
            .data
            .and_then(|d| d.klines)
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;

        klines
            .iter()
            .map(|line| Self::parse_kline(symbol, line))
            .collect()
    }
}
