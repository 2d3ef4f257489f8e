//! Momentum and volume-surge scanner for USDT-margined perpetuals, plus a
//! single-slot paper trader driven by an EMA trend signal.
//!
//! The scoring, ranking and trade lifecycle are pure and exchange-agnostic;
//! venue access goes through [`exchange::MarketDataSource`].

pub mod binance;
pub mod bybit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod exchange;
pub mod indicator;
pub mod lifecycle;
pub mod model;
pub mod report;
pub mod scanner;
pub mod strategy;

pub use config::Config;
pub use error::{AppError, FetchError};
