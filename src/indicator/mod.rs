pub mod ema;
pub mod range;
pub mod sma;
