// src/portfolio.rs

use crate::stocks::StockId;
use crate::types::TradeError;
use std::collections::BTreeMap;

/// Holdings per stock. A missing entry means zero.
///
/// Entries are kept once created, even at zero: a stock that has ever been
/// held keeps paying its dividend to the holder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    holdings: BTreeMap<StockId, f64>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(&self, stock: StockId) -> f64 {
        self.holdings.get(&stock).copied().unwrap_or(0.0)
    }

    /// Every stock ever held, in roster order.
    pub fn holdings(&self) -> impl Iterator<Item = (StockId, f64)> + '_ {
        self.holdings.iter().map(|(&id, &qty)| (id, qty))
    }

    pub fn contains(&self, stock: StockId) -> bool {
        self.holdings.contains_key(&stock)
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub(crate) fn add(&mut self, stock: StockId, amount: f64) {
        *self.holdings.entry(stock).or_insert(0.0) += amount;
    }

    /// Fails without touching anything if `amount` exceeds the holding.
    pub(crate) fn remove(&mut self, stock: StockId, amount: f64) -> Result<(), TradeError> {
        let held = self.holding(stock);
        if amount > held {
            return Err(TradeError::InsufficientHoldings {
                stock,
                amount,
                held,
            });
        }
        self.add(stock, -amount);
        Ok(())
    }

    pub(crate) fn set(&mut self, stock: StockId, quantity: f64) {
        self.holdings.insert(stock, quantity);
    }
}
