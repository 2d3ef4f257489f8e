//! Console report text. Formatting only; callers decide where it goes.

use chrono::{DateTime, Utc};

use crate::lifecycle::{ClosedTrade, ExitOrchestrator};
use crate::model::trade::PaperTrade;
use crate::scanner::{ScanOutcome, ScoredSymbol};

const RULE_WIDTH: usize = 70;

pub fn format_scan_row(row: &ScoredSymbol) -> String {
    format!(
        "{:<12} | Δ%: {:>6.2} | Vol x: {:.2}",
        row.symbol,
        row.price_change_pct,
        row.volume_ratio.unwrap_or(0.0)
    )
}

pub fn format_scan_report(outcome: &ScanOutcome, timeframe: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{} | top {} movers (last {})",
        clock(outcome.at),
        outcome.ranked.len(),
        timeframe
    ));
    out.push('\n');
    out.push_str(&rule);
    for row in &outcome.ranked {
        out.push('\n');
        out.push_str(&format_scan_row(row));
    }
    if outcome.ranked.is_empty() {
        out.push_str("\nno qualifying symbols this cycle");
    }
    out
}

pub fn format_trade_opened(trade: &PaperTrade) -> String {
    let s = &trade.signal;
    format!(
        "OPEN  {} {} entry={:.4} stop={:.4} target={:.4}",
        trade.label,
        trade.direction(),
        s.entry,
        s.stop_loss,
        s.take_profit
    )
}

/// Close line with the reason tag and the trade's best/worst excursion.
pub fn format_trade_closed(closed: &ClosedTrade) -> String {
    let t = &closed.trade;
    format!(
        "CLOSE {} {} exit={:.4} return={:+.2}% best={:+.2}% worst={:+.2}% ticks={}",
        t.label,
        ExitOrchestrator::decide(closed.trigger),
        closed.exit_price,
        closed.return_pct,
        t.best_move_pct,
        t.worst_move_pct,
        t.ticks_evaluated
    )
}

fn clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}
