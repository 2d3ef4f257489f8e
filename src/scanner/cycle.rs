use std::time::Instant;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};

use super::momentum::{score_window, ScoredSymbol};
use super::ranker::rank;
use crate::config::ScannerConfig;
use crate::error::FetchError;
use crate::exchange::MarketDataSource;
use crate::model::candle::Candle;
use crate::model::market::ListedSymbol;

/// Why a symbol did not make it into a cycle's ranking input.
#[derive(Debug)]
pub enum SkipReason {
    InsufficientHistory { len: usize },
    Fetch(FetchError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub requested: usize,
    pub scored: usize,
    pub short_history: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub at: DateTime<Utc>,
    pub ranked: Vec<ScoredSymbol>,
    pub summary: ScanSummary,
}

#[derive(Debug, Clone)]
pub struct ScanParams {
    pub timeframe: String,
    pub candle_limit: usize,
    pub top_n: usize,
    pub fetch_concurrency: usize,
}

impl From<&ScannerConfig> for ScanParams {
    fn from(cfg: &ScannerConfig) -> Self {
        Self {
            timeframe: cfg.timeframe.clone(),
            candle_limit: cfg.candle_limit,
            top_n: cfg.top_n,
            fetch_concurrency: cfg.fetch_concurrency.max(1),
        }
    }
}

pub fn evaluate_symbol(
    label: &str,
    fetched: Result<Vec<Candle>, FetchError>,
) -> Result<ScoredSymbol, SkipReason> {
    let window = fetched.map_err(SkipReason::Fetch)?;
    let metrics = score_window(&window).ok_or(SkipReason::InsufficientHistory { len: window.len() })?;
    Ok(ScoredSymbol::new(label, metrics))
}

/// Score every fetched window in order and rank the successes.
pub fn rank_fetched<I>(fetched: I, top_n: usize) -> (Vec<ScoredSymbol>, ScanSummary)
where
    I: IntoIterator<Item = (String, Result<Vec<Candle>, FetchError>)>,
{
    let mut summary = ScanSummary::default();
    let mut scored = Vec::new();
    for (label, result) in fetched {
        summary.requested += 1;
        match evaluate_symbol(&label, result) {
            Ok(s) => scored.push(s),
            Err(SkipReason::InsufficientHistory { len }) => {
                summary.short_history += 1;
                tracing::debug!(symbol = %label, len, "Skipping symbol: not enough candles");
            }
            Err(SkipReason::Fetch(e)) => {
                summary.failed += 1;
                tracing::debug!(symbol = %label, error = %e, "Skipping symbol: fetch failed");
            }
        }
    }
    summary.scored = scored.len();
    (rank(scored, top_n), summary)
}

/// One full scan: fetch each symbol's window, score, rank.
///
/// Fetches run `fetch_concurrency` at a time but results are gathered in
/// catalog order before ranking, so ties resolve the same way as a
/// sequential scan.
pub async fn scan_cycle<S: MarketDataSource>(
    source: &S,
    symbols: &[ListedSymbol],
    params: &ScanParams,
) -> ScanOutcome {
    let started = Instant::now();
    let at = Utc::now();

    let fetched: Vec<(String, Result<Vec<Candle>, FetchError>)> = stream::iter(symbols)
        .map(|sym| async move {
            let result = source
                .candles(&sym.id, &params.timeframe, params.candle_limit)
                .await;
            (sym.label.clone(), result)
        })
        .buffered(params.fetch_concurrency.max(1))
        .collect()
        .await;

    let (ranked, mut summary) = rank_fetched(fetched, params.top_n);
    summary.elapsed_ms = started.elapsed().as_millis() as u64;

    tracing::info!(
        venue = source.venue(),
        requested = summary.requested,
        scored = summary.scored,
        short_history = summary.short_history,
        failed = summary.failed,
        ranked = ranked.len(),
        elapsed_ms = summary.elapsed_ms,
        "Scan cycle complete"
    );

    ScanOutcome {
        at,
        ranked,
        summary,
    }
}
