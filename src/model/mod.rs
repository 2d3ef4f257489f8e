pub mod candle;
pub mod market;
pub mod signal;
pub mod trade;
