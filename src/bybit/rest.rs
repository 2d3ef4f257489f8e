use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    bybit_interval, BybitEnvelope, BybitInstrument, InstrumentsPage, KlineResult, TickersResult,
};
use crate::error::FetchError;
use crate::exchange::wire::compact_error_body;
use crate::exchange::MarketDataSource;
use crate::model::candle::Candle;
use crate::model::market::{Instrument, TickerSnapshot};

const VENUE: &str = "bybit";
const CATEGORY: &str = "linear";
const INSTRUMENTS_PAGE_LIMIT: &str = "1000";
const MAX_INSTRUMENT_PAGES: usize = 50;
const MAX_KLINE_LIMIT: usize = 1000;

/// Public (unauthenticated) Bybit v5 market endpoints for linear contracts.
pub struct BybitRestClient {
    http: reqwest::Client,
    base_url: String,
}

impl BybitRestClient {
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

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if let Ok(env) = serde_json::from_str::<BybitEnvelope>(&body) {
                return Err(FetchError::Api {
                    venue: VENUE,
                    code: env.ret_code,
                    msg: env.ret_msg,
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

        let env: BybitEnvelope = resp.json().await?;
        if env.ret_code != 0 {
            return Err(FetchError::Api {
                venue: VENUE,
                code: env.ret_code,
                msg: env.ret_msg,
            });
        }
        decode_result(env.result, path)
    }
}

/// Fetch pages until the venue returns an empty cursor, or stop after
/// `max_pages` and keep what was collected. The first request has an empty cursor.
pub(crate) async fn follow_cursor<F, Fut>(
    mut fetch_page: F,
    max_pages: usize,
) -> Result<Vec<BybitInstrument>, FetchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<InstrumentsPage, FetchError>>,
{
    let mut out = Vec::new();
    let mut cursor = String::new();
    for page_no in 0..max_pages {
        let page = fetch_page(std::mem::take(&mut cursor)).await?;
        tracing::debug!(page = page_no, count = page.list.len(), "Fetched Bybit instruments page");
        out.extend(page.list);
        if page.next_page_cursor.is_empty() {
            return Ok(out);
        }
        cursor = page.next_page_cursor;
    }
    tracing::warn!(
        pages = max_pages,
        count = out.len(),
        "Bybit instrument pagination did not terminate; using partial list"
    );
    Ok(out)
}

fn decode_result<T: DeserializeOwned>(result: Value, path: &str) -> Result<T, FetchError> {
    serde_json::from_value(result)
        .map_err(|e| FetchError::malformed(format!("{} {}: {}", VENUE, path, e)))
}

impl MarketDataSource for BybitRestClient {
    fn venue(&self) -> &'static str {
        VENUE
    }

    async fn instruments(&self) -> Result<Vec<Instrument>, FetchError> {
        let listed = follow_cursor(
            move |cursor| async move {
                let mut query = vec![("category", CATEGORY), ("limit", INSTRUMENTS_PAGE_LIMIT)];
                if !cursor.is_empty() {
                    query.push(("cursor", cursor.as_str()));
                }
                self.get::<InstrumentsPage>("/v5/market/instruments-info", &query)
                    .await
            },
            MAX_INSTRUMENT_PAGES,
        )
        .await?;
        Ok(listed.into_iter().map(Instrument::from).collect())
    }

    async fn tickers(&self) -> Result<Vec<TickerSnapshot>, FetchError> {
        let result: TickersResult = self
            .get("/v5/market/tickers", &[("category", CATEGORY)])
            .await?;
        Ok(result.list.into_iter().map(TickerSnapshot::from).collect())
    }

    async fn candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, FetchError> {
        let interval = bybit_interval(timeframe)?;
        let limit = limit.clamp(1, MAX_KLINE_LIMIT).to_string();
        let result: KlineResult = self
            .get(
                "/v5/market/kline",
                &[
                    ("category", CATEGORY),
                    ("symbol", symbol),
                    ("interval", interval),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;
        result.into_candles()
    }

    async fn last_price(&self, symbol: &str) -> Result<f64, FetchError> {
        let result: TickersResult = self
            .get(
                "/v5/market/tickers",
                &[("category", CATEGORY), ("symbol", symbol)],
            )
            .await?;
        let ticker = result
            .list
            .into_iter()
            .find(|t| t.symbol == symbol)
            .ok_or_else(|| FetchError::UnknownSymbol(symbol.to_string()))?;
        if ticker.last_price <= 0.0 {
            return Err(FetchError::malformed(format!(
                "{} reported non-positive last price for {}",
                VENUE, symbol
            )));
        }
        Ok(ticker.last_price)
    }
}
