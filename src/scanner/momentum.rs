use super::{MIN_WINDOW_LEN, SUB_WINDOW_LEN};
use crate::model::candle::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumMetrics {
    pub price_change_pct: f64,
    /// Recent-5 volume over prior-5 volume. `None` when the prior sum is not positive.
    pub volume_ratio: Option<f64>,
}

impl MomentumMetrics {
    /// `|change| * ratio`, with a missing ratio counting as 1.0.
    pub fn score(&self) -> f64 {
        self.price_change_pct.abs() * self.volume_ratio.unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSymbol {
    pub symbol: String,
    pub price_change_pct: f64,
    pub volume_ratio: Option<f64>,
    pub score: f64,
}

impl ScoredSymbol {
    pub fn new(symbol: impl Into<String>, metrics: MomentumMetrics) -> Self {
        Self {
            symbol: symbol.into(),
            price_change_pct: metrics.price_change_pct,
            volume_ratio: metrics.volume_ratio,
            score: metrics.score(),
        }
    }
}

/// Price change and volume surge over the tail of `window`.
///
/// Returns `None` for windows shorter than [`MIN_WINDOW_LEN`]. A zero close at
/// the start of the recent sub-window is not special-cased; the resulting
/// infinite or NaN change flows through unchanged.
pub fn score_window(window: &[Candle]) -> Option<MomentumMetrics> {
    if window.len() < MIN_WINDOW_LEN {
        return None;
    }

    let split = window.len() - SUB_WINDOW_LEN;
    let recent = &window[split..];
    let prior = &window[split - SUB_WINDOW_LEN..split];

    let first_close = recent.first()?.close;
    let last_close = recent.last()?.close;
    let price_change_pct = (last_close / first_close - 1.0) * 100.0;

    let vol_recent: f64 = recent.iter().map(|c| c.volume).sum();
    let vol_prior: f64 = prior.iter().map(|c| c.volume).sum();
    let volume_ratio = (vol_prior > 0.0).then(|| vol_recent / vol_prior);

    Some(MomentumMetrics {
        price_change_pct,
        volume_ratio,
    })
}
