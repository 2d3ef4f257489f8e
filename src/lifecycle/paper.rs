use super::engine::{ClosedTrade, TradeLifecycle};
use crate::config::Config;
use crate::error::FetchError;
use crate::exchange::MarketDataSource;
use crate::model::market::ListedSymbol;
use crate::model::trade::PaperTrade;
use crate::strategy::selector::SymbolSelector;
use crate::strategy::trend_signal::TrendSignalGenerator;

/// What one paper-trading tick did.
#[derive(Debug)]
pub enum TickOutcome {
    Opened(PaperTrade),
    Holding {
        label: String,
        price: f64,
        return_pct: f64,
    },
    Closed(ClosedTrade),
    /// Idle, but no symbol could be selected.
    NoCandidate,
    /// Idle, and the selected symbol produced no signal this tick.
    SignalUnavailable { label: String, reason: String },
    /// Open, but the price could not be fetched; the trade stays open.
    PriceUnavailable { label: String, error: FetchError },
}

/// Drives a [`TradeLifecycle`] against live market data, one tick at a time.
pub struct PaperTrader<Sel: SymbolSelector + ?Sized> {
    lifecycle: TradeLifecycle,
    generator: TrendSignalGenerator,
    timeframe: String,
    signal_candle_limit: usize,
    selector: Box<Sel>,
}

impl<Sel: SymbolSelector + ?Sized> PaperTrader<Sel> {
    pub fn new(
        lifecycle: TradeLifecycle,
        generator: TrendSignalGenerator,
        timeframe: impl Into<String>,
        signal_candle_limit: usize,
        selector: Box<Sel>,
    ) -> Self {
        Self {
            lifecycle,
            generator,
            timeframe: timeframe.into(),
            signal_candle_limit,
            selector,
        }
    }

    pub fn from_config(config: &Config, selector: Box<Sel>) -> Self {
        Self::new(
            TradeLifecycle::new(config.paper.hold_ms()),
            TrendSignalGenerator::from_config(&config.paper),
            config.scanner.timeframe.clone(),
            config.paper.signal_candle_limit,
            selector,
        )
    }

    pub fn lifecycle(&self) -> &TradeLifecycle {
        &self.lifecycle
    }

    pub async fn tick<S: MarketDataSource>(
        &mut self,
        source: &S,
        candidates: &[ListedSymbol],
        now_ms: u64,
    ) -> TickOutcome {
        match self.lifecycle.current() {
            Some(trade) => {
                let id = trade.symbol().to_string();
                let label = trade.label.clone();
                self.evaluate_open(source, id, label, now_ms).await
            }
            None => self.try_open(source, candidates, now_ms).await,
        }
    }

    async fn evaluate_open<S: MarketDataSource>(
        &mut self,
        source: &S,
        id: String,
        label: String,
        now_ms: u64,
    ) -> TickOutcome {
        let price = match source.last_price(&id).await {
            Ok(p) => p,
            Err(error) => {
                tracing::warn!(symbol = %label, error = %error, "Price fetch failed; trade stays open");
                return TickOutcome::PriceUnavailable { label, error };
            }
        };

        match self.lifecycle.on_price(price, now_ms) {
            Some(closed) => {
                tracing::info!(
                    symbol = %label,
                    trade_id = %closed.trade.trade_id,
                    reason = %closed.trigger,
                    exit_price = closed.exit_price,
                    return_pct = closed.return_pct,
                    best_move_pct = closed.trade.best_move_pct,
                    worst_move_pct = closed.trade.worst_move_pct,
                    ticks = closed.trade.ticks_evaluated,
                    "Paper trade closed"
                );
                TickOutcome::Closed(closed)
            }
            None => {
                let return_pct = self
                    .lifecycle
                    .current()
                    .map(|t| t.return_pct_at(price))
                    .unwrap_or_default();
                tracing::debug!(symbol = %label, price, return_pct, "Paper trade holding");
                TickOutcome::Holding {
                    label,
                    price,
                    return_pct,
                }
            }
        }
    }

    async fn try_open<S: MarketDataSource>(
        &mut self,
        source: &S,
        candidates: &[ListedSymbol],
        now_ms: u64,
    ) -> TickOutcome {
        let Some(picked) = self.selector.select(candidates).cloned() else {
            return TickOutcome::NoCandidate;
        };

        let window = match source
            .candles(&picked.id, &self.timeframe, self.signal_candle_limit)
            .await
        {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!(symbol = %picked.label, error = %e, "Candle fetch failed; staying idle");
                return TickOutcome::SignalUnavailable {
                    label: picked.label,
                    reason: e.to_string(),
                };
            }
        };

        let Some(signal) = self.generator.signal(&picked.id, &window, now_ms) else {
            let reason = if window.is_empty() {
                "no candles returned"
            } else {
                "zero price range, stop would sit on entry"
            };
            tracing::warn!(symbol = %picked.label, candles = window.len(), reason, "No signal; staying idle");
            return TickOutcome::SignalUnavailable {
                label: picked.label,
                reason: reason.to_string(),
            };
        };

        match self.lifecycle.open(signal, picked.label.clone()) {
            Ok(trade) => {
                tracing::info!(
                    symbol = %trade.label,
                    trade_id = %trade.trade_id,
                    direction = %trade.direction(),
                    entry = trade.signal.entry,
                    stop_loss = trade.signal.stop_loss,
                    take_profit = trade.signal.take_profit,
                    risk = trade.signal.risk_distance(),
                    reward = trade.signal.reward_distance(),
                    candles = window.len(),
                    "Paper trade opened"
                );
                TickOutcome::Opened(trade)
            }
            Err(e) => TickOutcome::SignalUnavailable {
                label: picked.label,
                reason: e.to_string(),
            },
        }
    }
}
