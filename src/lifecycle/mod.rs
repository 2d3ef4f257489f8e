pub mod engine;
pub mod exit_orchestrator;
pub mod paper;

pub use engine::{evaluate_exit, ClosedTrade, ExitTrigger, LifecycleError, TradeLifecycle};
pub use exit_orchestrator::ExitOrchestrator;
pub use paper::{PaperTrader, TickOutcome};
