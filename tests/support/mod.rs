#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use perp_momentum_scanner::error::FetchError;
use perp_momentum_scanner::exchange::MarketDataSource;
use perp_momentum_scanner::model::candle::Candle;
use perp_momentum_scanner::model::market::{Instrument, ListedSymbol, TickerSnapshot};

/// Candles with the given closes and volumes; each bar spans close +/- 1.
pub fn candles(closes: &[f64], volumes: &[f64]) -> Vec<Candle> {
    assert_eq!(closes.len(), volumes.len(), "closes and volumes must align");
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| Candle {
            open_time: i as u64 * 300_000,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        })
        .collect()
}

pub fn flat_volume(closes: &[f64]) -> Vec<Candle> {
    candles(closes, &vec![1.0; closes.len()])
}

pub fn listed(ids: &[&str]) -> Vec<ListedSymbol> {
    ids.iter().map(|id| ListedSymbol::new(*id, *id)).collect()
}

pub fn perp(symbol: &str, base: &str, quote: &str) -> Instrument {
    Instrument {
        symbol: symbol.to_string(),
        base_asset: base.to_string(),
        quote_asset: quote.to_string(),
        trading: true,
        perpetual: true,
    }
}

/// In-memory market. Symbols without a window fail with `UnknownSymbol`;
/// symbols in `failing` fail with a malformed-response error.
#[derive(Default)]
pub struct FakeMarket {
    pub instruments: Vec<Instrument>,
    pub tickers: Vec<TickerSnapshot>,
    pub windows: HashMap<String, Vec<Candle>>,
    pub failing: HashSet<String>,
    pub prices: Mutex<HashMap<String, f64>>,
    pub candle_calls: AtomicUsize,
}

impl FakeMarket {
    pub fn with_window(mut self, symbol: &str, window: Vec<Candle>) -> Self {
        self.windows.insert(symbol.to_string(), window);
        self
    }

    pub fn with_failure(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    pub fn set_price(&self, symbol: &str, price: f64) {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
    }

    pub fn clear_price(&self, symbol: &str) {
        self.prices.lock().unwrap().remove(symbol);
    }

    pub fn candle_calls(&self) -> usize {
        self.candle_calls.load(Ordering::SeqCst)
    }
}

impl MarketDataSource for FakeMarket {
    fn venue(&self) -> &'static str {
        "fake"
    }

    async fn instruments(&self) -> Result<Vec<Instrument>, FetchError> {
        Ok(self.instruments.clone())
    }

    async fn tickers(&self) -> Result<Vec<TickerSnapshot>, FetchError> {
        Ok(self.tickers.clone())
    }

    async fn candles(
        &self,
        symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        self.candle_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(symbol) {
            return Err(FetchError::malformed(format!("{} kline body truncated", symbol)));
        }
        let window = self
            .windows
            .get(symbol)
            .ok_or_else(|| FetchError::UnknownSymbol(symbol.to_string()))?;
        let start = window.len().saturating_sub(limit);
        Ok(window[start..].to_vec())
    }

    async fn last_price(&self, symbol: &str) -> Result<f64, FetchError> {
        self.prices
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .ok_or_else(|| FetchError::UnknownSymbol(symbol.to_string()))
    }
}
