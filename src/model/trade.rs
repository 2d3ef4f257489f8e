use super::signal::{Direction, TrendSignal};

/// The single simulated position. Levels come from the signal; only the
/// tracking fields change while it is open.
#[derive(Debug, Clone)]
pub struct PaperTrade {
    pub trade_id: String,
    /// Report label; `signal.symbol` holds the exchange id.
    pub label: String,
    pub signal: TrendSignal,
    pub best_move_pct: f64,
    pub worst_move_pct: f64,
    pub ticks_evaluated: u64,
}

impl PaperTrade {
    pub fn open(signal: TrendSignal, label: impl Into<String>) -> Self {
        let trade_id = format!("paper-{}", &uuid::Uuid::new_v4().to_string()[..8]);
        Self {
            trade_id,
            label: label.into(),
            signal,
            best_move_pct: 0.0,
            worst_move_pct: 0.0,
            ticks_evaluated: 0,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.signal.symbol
    }

    pub fn direction(&self) -> Direction {
        self.signal.direction
    }

    /// Signed return in percent at `price`, positive when the trade is in profit.
    pub fn return_pct_at(&self, price: f64) -> f64 {
        let entry = self.signal.entry;
        if entry == 0.0 {
            return 0.0;
        }
        let raw = (price / entry - 1.0) * 100.0;
        match self.signal.direction {
            Direction::Long => raw,
            Direction::Short => -raw,
        }
    }

    pub fn observe(&mut self, price: f64) {
        self.ticks_evaluated += 1;
        let move_pct = self.return_pct_at(price);
        if move_pct > self.best_move_pct {
            self.best_move_pct = move_pct;
        }
        if move_pct < self.worst_move_pct {
            self.worst_move_pct = move_pct;
        }
    }

    pub fn held_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.signal.opened_at_ms)
    }
}
