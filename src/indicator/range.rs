use super::sma::Sma;
use crate::model::candle::Candle;

/// Mean high-low range over the trailing `period` candles, or over every
/// candle when the window is shorter. `None` for an empty window.
///
/// This is a stop-distance proxy, not Wilder's true range: gaps between the
/// previous close and the current bar are ignored.
pub fn average_range(candles: &[Candle], period: usize) -> Option<f64> {
    let mut sma = Sma::new(period);
    let start = candles.len().saturating_sub(period);
    for candle in &candles[start..] {
        sma.push(candle.range());
    }
    sma.mean()
}
