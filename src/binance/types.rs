use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::exchange::wire::{column_f64, column_u64, string_to_f64};
use crate::model::candle::Candle;
use crate::model::market::{Instrument, TickerSnapshot};

#[derive(Debug, Deserialize)]
pub struct BinanceApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

/// GET /fapi/v1/exchangeInfo (only the fields the catalog needs).
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub symbols: Vec<BinanceSymbolInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceSymbolInfo {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
    #[serde(default)]
    pub contract_type: String,
}

impl From<BinanceSymbolInfo> for Instrument {
    fn from(raw: BinanceSymbolInfo) -> Self {
        Instrument {
            trading: raw.status == "TRADING",
            perpetual: raw.contract_type == "PERPETUAL",
            symbol: raw.symbol,
            base_asset: raw.base_asset,
            quote_asset: raw.quote_asset,
        }
    }
}

/// GET /fapi/v1/ticker/24hr item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    #[serde(deserialize_with = "string_to_f64")]
    pub quote_volume: f64,
}

impl From<Ticker24h> for TickerSnapshot {
    fn from(raw: Ticker24h) -> Self {
        TickerSnapshot {
            symbol: raw.symbol,
            quote_volume_24h: raw.quote_volume,
        }
    }
}

/// GET /fapi/v1/ticker/price?symbol=...
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    #[serde(deserialize_with = "string_to_f64")]
    pub price: f64,
}

/// Rows are `[openTime, open, high, low, close, volume, closeTime, ...]`, oldest first.
pub fn klines_to_candles(rows: &[Vec<Value>]) -> Result<Vec<Candle>, FetchError> {
    rows.iter()
        .map(|row| {
            Ok(Candle {
                open_time: column_u64(row, 0)?,
                open: column_f64(row, 1)?,
                high: column_f64(row, 2)?,
                low: column_f64(row, 3)?,
                close: column_f64(row, 4)?,
                volume: column_f64(row, 5)?,
            })
        })
        .collect()
}
