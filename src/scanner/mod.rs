pub mod cycle;
pub mod momentum;
pub mod ranker;

pub use cycle::{evaluate_symbol, rank_fetched, scan_cycle, ScanOutcome, ScanParams, ScanSummary, SkipReason};
pub use momentum::{score_window, MomentumMetrics, ScoredSymbol};
pub use ranker::rank;

/// Shortest window the momentum scorer accepts.
pub const MIN_WINDOW_LEN: usize = 10;
/// Length of the recent and prior sub-windows.
pub const SUB_WINDOW_LEN: usize = 5;
