/// One OHLCV bar. Windows are ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// High-low span of the bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
