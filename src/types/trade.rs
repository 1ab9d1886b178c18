// src/types/trade.rs

use crate::stocks::StockId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// What a `buy_or_sell` request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TradeOutcome {
    Filled { side: Side, amount: f64 },
    /// The desired quantity was already held.
    Unchanged,
}

/// Rejected trades. State is untouched whenever one of these comes back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    #[error("not enough cash: {amount} of stock {stock} costs {cost:.2}, only {cash:.2} available")]
    InsufficientFunds {
        stock: StockId,
        amount: f64,
        cost: f64,
        cash: f64,
    },
    #[error("not enough shares: tried to sell {amount} of stock {stock}, holding {held}")]
    InsufficientHoldings {
        stock: StockId,
        amount: f64,
        held: f64,
    },
    #[error("trade amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
}
