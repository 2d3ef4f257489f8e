use std::fmt;

use thiserror::Error;

use super::exit_orchestrator::ExitOrchestrator;
use crate::model::signal::{Direction, TrendSignal};
use crate::model::trade::PaperTrade;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitTrigger {
    TakeProfit,
    StopLoss,
    TimeExit,
}

impl fmt::Display for ExitTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ExitOrchestrator::decide(*self))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("a paper trade is already open on {symbol} ({trade_id})")]
    AlreadyOpen { symbol: String, trade_id: String },
}

#[derive(Debug, Clone, Default)]
enum LifecycleState {
    #[default]
    Idle,
    Open(PaperTrade),
}

#[derive(Debug, Clone)]
pub struct ClosedTrade {
    pub trade: PaperTrade,
    pub trigger: ExitTrigger,
    pub exit_price: f64,
    pub closed_at_ms: u64,
    pub return_pct: f64,
}

/// Exit check for one observed price. Price levels are checked before the
/// holding-time limit, so a stop hit after the deadline still reports
/// `StopLoss`.
pub fn evaluate_exit(
    signal: &TrendSignal,
    price: f64,
    held_ms: u64,
    hold_ms: u64,
) -> Option<ExitTrigger> {
    let level_hit = match signal.direction {
        Direction::Long if price >= signal.take_profit => Some(ExitTrigger::TakeProfit),
        Direction::Long if price <= signal.stop_loss => Some(ExitTrigger::StopLoss),
        Direction::Short if price <= signal.take_profit => Some(ExitTrigger::TakeProfit),
        Direction::Short if price >= signal.stop_loss => Some(ExitTrigger::StopLoss),
        _ => None,
    };
    level_hit.or((held_ms >= hold_ms).then_some(ExitTrigger::TimeExit))
}

/// Single-slot paper position: `Idle` or exactly one `Open` trade.
#[derive(Debug, Clone)]
pub struct TradeLifecycle {
    state: LifecycleState,
    hold_ms: u64,
}

impl TradeLifecycle {
    pub fn new(hold_ms: u64) -> Self {
        Self {
            state: LifecycleState::Idle,
            hold_ms,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LifecycleState::Open(_))
    }

    pub fn current(&self) -> Option<&PaperTrade> {
        match &self.state {
            LifecycleState::Open(trade) => Some(trade),
            LifecycleState::Idle => None,
        }
    }

    /// Idle -> Open, returning a copy of the opened trade. Refused while a
    /// trade is open.
    pub fn open(
        &mut self,
        signal: TrendSignal,
        label: impl Into<String>,
    ) -> Result<PaperTrade, LifecycleError> {
        if let LifecycleState::Open(existing) = &self.state {
            return Err(LifecycleError::AlreadyOpen {
                symbol: existing.symbol().to_string(),
                trade_id: existing.trade_id.clone(),
            });
        }
        let trade = PaperTrade::open(signal, label);
        self.state = LifecycleState::Open(trade.clone());
        Ok(trade)
    }

    /// Feed a price for the open trade. Returns the closed trade when an
    /// exit fires (Open -> Idle); otherwise the trade stays open. No-op while idle.
    pub fn on_price(&mut self, price: f64, now_ms: u64) -> Option<ClosedTrade> {
        let LifecycleState::Open(trade) = &mut self.state else {
            return None;
        };
        trade.observe(price);
        let trigger = evaluate_exit(&trade.signal, price, trade.held_ms(now_ms), self.hold_ms)?;

        let LifecycleState::Open(trade) = std::mem::take(&mut self.state) else {
            return None;
        };
        let return_pct = trade.return_pct_at(price);
        Some(ClosedTrade {
            trade,
            trigger,
            exit_price: price,
            closed_at_ms: now_ms,
            return_pct,
        })
    }
}
