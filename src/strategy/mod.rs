pub mod selector;
pub mod trend_signal;

pub use selector::{selector_for, RandomSelector, RoundRobinSelector, SymbolSelector};
pub use trend_signal::TrendSignalGenerator;
