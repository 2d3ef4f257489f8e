use serde::Deserialize;
use serde_json::Value;

use crate::exchange::wire::{column_f64, column_u64, string_or_number_to_f64_default};
use crate::error::FetchError;
use crate::model::candle::Candle;
use crate::model::market::{Instrument, TickerSnapshot};

/// Every v5 response is wrapped in this envelope. `result` is `{}` on errors,
/// so it is kept untyped until `ret_code` has been checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitEnvelope {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    #[serde(default)]
    pub result: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentsPage {
    #[serde(default)]
    pub list: Vec<BybitInstrument>,
    #[serde(default)]
    pub next_page_cursor: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BybitInstrument {
    pub symbol: String,
    pub status: String,
    #[serde(default)]
    pub base_coin: String,
    #[serde(default)]
    pub quote_coin: String,
    #[serde(default)]
    pub contract_type: String,
}

impl From<BybitInstrument> for Instrument {
    fn from(raw: BybitInstrument) -> Self {
        Instrument {
            trading: raw.status.eq_ignore_ascii_case("Trading"),
            perpetual: raw.contract_type == "LinearPerpetual",
            symbol: raw.symbol,
            base_asset: raw.base_coin,
            quote_asset: raw.quote_coin,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TickersResult {
    #[serde(default)]
    pub list: Vec<BybitTicker>,
}

#[derive(Debug, Deserialize)]
pub struct BybitTicker {
    pub symbol: String,
    #[serde(rename = "lastPrice", default, deserialize_with = "string_or_number_to_f64_default")]
    pub last_price: f64,
    #[serde(rename = "turnover24h", default, deserialize_with = "string_or_number_to_f64_default")]
    pub turnover_24h: f64,
}

impl From<BybitTicker> for TickerSnapshot {
    fn from(raw: BybitTicker) -> Self {
        TickerSnapshot {
            symbol: raw.symbol,
            quote_volume_24h: raw.turnover_24h,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KlineResult {
    #[serde(default)]
    pub list: Vec<Vec<Value>>,
}

impl KlineResult {
    /// Rows are `[start, open, high, low, close, volume, turnover]`, newest first.
    pub fn into_candles(self) -> Result<Vec<Candle>, FetchError> {
        let mut candles = self
            .list
            .iter()
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
            .collect::<Result<Vec<_>, FetchError>>()?;
        candles.sort_by_key(|c| c.open_time);
        Ok(candles)
    }
}

/// Map a `5m`-style timeframe to Bybit's kline interval token.
pub fn bybit_interval(timeframe: &str) -> Result<&'static str, FetchError> {
    let token = match timeframe {
        "1m" => "1",
        "3m" => "3",
        "5m" => "5",
        "15m" => "15",
        "30m" => "30",
        "1h" => "60",
        "2h" => "120",
        "4h" => "240",
        "6h" => "360",
        "12h" => "720",
        "1d" => "D",
        "1w" => "W",
        "1M" => "M",
        other => {
            return Err(FetchError::malformed(format!(
                "timeframe '{}' has no Bybit kline interval",
                other
            )))
        }
    };
    Ok(token)
}
