use crate::config::PaperConfig;
use crate::indicator::ema::Ema;
use crate::indicator::range::average_range;
use crate::model::candle::Candle;
use crate::model::signal::{Direction, TrendSignal};

/// EMA-crossover direction with range-based stop and fixed reward-to-risk target.
#[derive(Debug, Clone)]
pub struct TrendSignalGenerator {
    fast_span: usize,
    slow_span: usize,
    atr_period: usize,
    risk_reward: f64,
}

impl Default for TrendSignalGenerator {
    fn default() -> Self {
        Self::new(20, 50, 14, 2.0)
    }
}

impl TrendSignalGenerator {
    pub fn new(fast_span: usize, slow_span: usize, atr_period: usize, risk_reward: f64) -> Self {
        assert!(
            fast_span > 0 && slow_span > 0 && atr_period > 0,
            "indicator periods must be > 0"
        );
        Self {
            fast_span,
            slow_span,
            atr_period,
            risk_reward,
        }
    }

    pub fn from_config(cfg: &PaperConfig) -> Self {
        Self::new(cfg.fast_span, cfg.slow_span, cfg.atr_period, cfg.risk_reward)
    }

    pub fn risk_reward(&self) -> f64 {
        self.risk_reward
    }

    /// Build a signal from the latest indicator values. Windows shorter than
    /// the slow span still produce a signal from the partially warmed EMAs.
    /// `None` for an empty window, or when every bar has `high == low` and
    /// the stop would coincide with the entry.
    pub fn signal(&self, symbol: &str, window: &[Candle], now_ms: u64) -> Option<TrendSignal> {
        let last = window.last()?;

        let mut fast = Ema::new(self.fast_span);
        let mut slow = Ema::new(self.slow_span);
        for candle in window {
            fast.push(candle.close);
            slow.push(candle.close);
        }
        let fast_v = fast.value()?;
        let slow_v = slow.value()?;
        let atr = average_range(window, self.atr_period)?;
        if !(atr.is_finite() && atr > 0.0) {
            return None;
        }

        if !slow.is_warm() {
            tracing::debug!(
                symbol,
                candles = window.len(),
                slow_span = self.slow_span,
                "Slow EMA not fully warmed; using partial value"
            );
        }

        let direction = if fast_v > slow_v {
            Direction::Long
        } else {
            Direction::Short
        };

        let entry = last.close;
        let (stop_loss, take_profit) = match direction {
            Direction::Long => {
                let stop = entry - atr;
                (stop, entry + (entry - stop) * self.risk_reward)
            }
            Direction::Short => {
                let stop = entry + atr;
                (stop, entry - (stop - entry) * self.risk_reward)
            }
        };

        Some(TrendSignal {
            symbol: symbol.to_string(),
            direction,
            entry,
            stop_loss,
            take_profit,
            opened_at_ms: now_ms,
        })
    }
}
