// src/stocks/definitions.rs
//! The tradeable stocks and their per-round price walk.
//
//! A game owns one fixed roster built by `default_roster()`. Stocks are never
//! removed; a bankrupt stock is reset in place and keeps its `StockId`, so
//! holdings keyed by id stay valid for the whole session.

use crate::config::{BANKRUPTCY_PRICE, INITIAL_PRICE, PRICE_STEP_DIVISOR, SHARE_ISSUE_PRICE};
use crate::simulators::{RoundDraw, UnitDraws};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a stock in the roster. Portfolios key on this, never on the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StockId(pub usize);

impl fmt::Display for StockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    id: StockId,
    name: String,
    price: f64,
    /// Price before the latest round, 0 until the first round (or after a reset).
    previous_price: f64,
    dividend: f64,
    /// Last price delta.
    change: f64,
}

impl Stock {
    #[inline]
    pub fn new<T: Into<String>>(id: StockId, name: T) -> Self {
        Self {
            id,
            name: name.into(),
            price: INITIAL_PRICE,
            previous_price: 0.0,
            dividend: 0.0,
            change: 0.0,
        }
    }

    /// Builds a stock at an arbitrary price. Mostly useful for setting up
    /// scenarios around the bankruptcy and share-issue thresholds.
    pub fn with_price<T: Into<String>>(id: StockId, name: T, price: f64) -> Self {
        Self {
            price,
            ..Self::new(id, name)
        }
    }

    pub fn id(&self) -> StockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn previous_price(&self) -> f64 {
        self.previous_price
    }

    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    pub fn change(&self) -> f64 {
        self.change
    }

    /// Samples this round's draw and applies it.
    pub fn advance_round<D: UnitDraws + ?Sized>(&mut self, draws: &mut D) {
        let draw = RoundDraw::sample(draws);
        self.apply_draw(draw);
    }

    /// The price walk itself. A price that lands at or below the bankruptcy
    /// line voids the dividend but is left as computed; the market resets it
    /// once holders have been settled.
    pub fn apply_draw(&mut self, draw: RoundDraw) {
        self.dividend = draw.dividend;
        self.change = draw.direction.sign() * self.price / PRICE_STEP_DIVISOR * f64::from(draw.steps);
        self.previous_price = self.price;
        self.price += self.change;
        if self.price <= BANKRUPTCY_PRICE {
            self.dividend = 0.0;
        }
    }

    pub fn is_bankrupt(&self) -> bool {
        self.price <= BANKRUPTCY_PRICE
    }

    pub fn is_share_issued(&self) -> bool {
        self.price >= SHARE_ISSUE_PRICE
    }

    /// Back to the listing state: price 10, everything else zeroed.
    pub fn reset(&mut self) {
        self.price = INITIAL_PRICE;
        self.previous_price = 0.0;
        self.dividend = 0.0;
        self.change = 0.0;
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The roster a game boots with: `count` stocks named "1", "2", ... in id order.
pub fn default_roster(count: usize) -> Vec<Stock> {
    (0..count)
        .map(|i| Stock::new(StockId(i), (i + 1).to_string()))
        .collect()
}
