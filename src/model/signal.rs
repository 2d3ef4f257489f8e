use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// Directional entry with fixed protective levels. Never recomputed after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSignal {
    pub symbol: String,
    pub direction: Direction,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub opened_at_ms: u64,
}

impl TrendSignal {
    pub fn risk_distance(&self) -> f64 {
        (self.entry - self.stop_loss).abs()
    }

    pub fn reward_distance(&self) -> f64 {
        (self.take_profit - self.entry).abs()
    }
}
