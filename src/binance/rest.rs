use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    klines_to_candles, BinanceApiErrorResponse, ExchangeInfo, Ticker24h, TickerPrice,
};
use crate::config::parse_interval_ms;
use crate::error::FetchError;
use crate::exchange::wire::compact_error_body;
use crate::exchange::MarketDataSource;
use crate::model::candle::Candle;
use crate::model::market::{Instrument, TickerSnapshot};

const VENUE: &str = "binance_futures";
const MAX_KLINE_LIMIT: usize = 1500;

/// Public Binance USD-M futures market endpoints.
pub struct BinanceFuturesClient {
    http: reqwest::Client,
    base_url: String,
}

impl BinanceFuturesClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.get(&url).query(query).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<BinanceApiErrorResponse>(&body) {
                return Err(FetchError::Api {
                    venue: VENUE,
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(FetchError::malformed(format!(
                "{} {} returned {}: {}",
                VENUE,
                path,
                status,
                compact_error_body(&body)
            )));
        }

        let body: Value = resp.json().await?;
        serde_json::from_value(body)
            .map_err(|e| FetchError::malformed(format!("{} {}: {}", VENUE, path, e)))
    }
}

impl MarketDataSource for BinanceFuturesClient {
    fn venue(&self) -> &'static str {
        VENUE
    }

    async fn instruments(&self) -> Result<Vec<Instrument>, FetchError> {
        let info: ExchangeInfo = self.get("/fapi/v1/exchangeInfo", &[]).await?;
        Ok(info.symbols.into_iter().map(Instrument::from).collect())
    }

    async fn tickers(&self) -> Result<Vec<TickerSnapshot>, FetchError> {
        let rows: Vec<Ticker24h> = self.get("/fapi/v1/ticker/24hr", &[]).await?;
        Ok(rows.into_iter().map(TickerSnapshot::from).collect())
    }

    async fn candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        parse_interval_ms(timeframe).map_err(|e| FetchError::malformed(format!("{:#}", e)))?;
        let limit = limit.clamp(1, MAX_KLINE_LIMIT).to_string();
        let rows: Vec<Vec<Value>> = self
            .get(
                "/fapi/v1/klines",
                &[
                    ("symbol", symbol),
                    ("interval", timeframe),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        klines_to_candles(&rows)
    }

    async fn last_price(&self, symbol: &str) -> Result<f64, FetchError> {
        let ticker: TickerPrice = self
            .get("/fapi/v1/ticker/price", &[("symbol", symbol)])
            .await?;
        if ticker.symbol != symbol {
            return Err(FetchError::UnknownSymbol(symbol.to_string()));
        }
        if ticker.price <= 0.0 {
            return Err(FetchError::malformed(format!(
                "{} reported non-positive price for {}",
                VENUE, symbol
            )));
        }
        Ok(ticker.price)
    }
}
