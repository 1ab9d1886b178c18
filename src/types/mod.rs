// src/types/mod.rs

pub mod trade;

pub use trade::{Side, TradeError, TradeOutcome};
