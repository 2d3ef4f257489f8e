//! Venue-neutral market data access.
//!
//! The scanner and the paper trader only see [`MarketDataSource`]; the
//! concrete REST clients live in `crate::bybit` and `crate::binance`.

pub mod wire;

use std::future::Future;
use std::time::Duration;

use crate::binance::rest::BinanceFuturesClient;
use crate::bybit::rest::BybitRestClient;
use crate::config::{ExchangeConfig, Venue};
use crate::error::FetchError;
use crate::model::candle::Candle;
use crate::model::market::{Instrument, TickerSnapshot};

pub trait MarketDataSource {
    fn venue(&self) -> &'static str;

    /// Every linear contract the venue lists, active or not.
    fn instruments(&self) -> impl Future<Output = Result<Vec<Instrument>, FetchError>> + Send;

    /// 24h ticker snapshot for every linear contract.
    fn tickers(&self) -> impl Future<Output = Result<Vec<TickerSnapshot>, FetchError>> + Send;

    /// Most recent `limit` candles, oldest first.
    fn candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Candle>, FetchError>> + Send;

    fn last_price(&self, symbol: &str) -> impl Future<Output = Result<f64, FetchError>> + Send;
}

/// Client for whichever venue the config selects.
pub enum ExchangeClient {
    Bybit(BybitRestClient),
    BinanceFutures(BinanceFuturesClient),
}

impl ExchangeClient {
    pub fn from_config(cfg: &ExchangeConfig) -> Result<Self, FetchError> {
        let http = build_http_client(cfg.request_timeout_secs)?;
        let base_url = cfg.resolved_base_url();
        Ok(match cfg.venue {
            Venue::Bybit => Self::Bybit(BybitRestClient::new(http, &base_url)),
            Venue::BinanceFutures => {
                Self::BinanceFutures(BinanceFuturesClient::new(http, &base_url))
            }
        })
    }
}

impl MarketDataSource for ExchangeClient {
    fn venue(&self) -> &'static str {
        match self {
            Self::Bybit(c) => c.venue(),
            Self::BinanceFutures(c) => c.venue(),
        }
    }

    async fn instruments(&self) -> Result<Vec<Instrument>, FetchError> {
        match self {
            Self::Bybit(c) => c.instruments().await,
            Self::BinanceFutures(c) => c.instruments().await,
        }
    }

    async fn tickers(&self) -> Result<Vec<TickerSnapshot>, FetchError> {
        match self {
            Self::Bybit(c) => c.tickers().await,
            Self::BinanceFutures(c) => c.tickers().await,
        }
    }

    async fn candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        match self {
            Self::Bybit(c) => c.candles(symbol, timeframe, limit).await,
            Self::BinanceFutures(c) => c.candles(symbol, timeframe, limit).await,
        }
    }

    async fn last_price(&self, symbol: &str) -> Result<f64, FetchError> {
        match self {
            Self::Bybit(c) => c.last_price(symbol).await,
            Self::BinanceFutures(c) => c.last_price(symbol).await,
        }
    }
}

pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .user_agent(concat!("perp-momentum-scanner/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
