// src/player.rs

use crate::config::SHARE_ISSUE_RATIO;
use crate::portfolio::Portfolio;
use crate::stocks::Stock;
use crate::types::{Side, TradeError, TradeOutcome};
use serde::Serialize;

/// A participant: a cash balance plus the shares they own.
///
/// Several players can trade against the same roster; each one owns a
/// separate `Portfolio`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    cash: f64,
    portfolio: Portfolio,
}

/// A player's final tally, used for end-of-game rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub name: String,
    pub cash: f64,
    pub net_worth: f64,
}

fn check_amount(amount: f64) -> Result<(), TradeError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(TradeError::InvalidAmount(amount));
    }
    Ok(())
}

impl Player {
    pub fn new<T: Into<String>>(name: T, cash: f64) -> Self {
        Self {
            name: name.into(),
            cash,
            portfolio: Portfolio::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn holding(&self, stock: &Stock) -> f64 {
        self.portfolio.holding(stock.id())
    }

    /// Buys `amount` shares at the stock's current price.
    pub fn buy(&mut self, stock: &Stock, amount: f64) -> Result<(), TradeError> {
        check_amount(amount)?;
        if amount == 0.0 {
            return Ok(());
        }
        let cost = stock.price() * amount;
        if cost > self.cash {
            return Err(TradeError::InsufficientFunds {
                stock: stock.id(),
                amount,
                cost,
                cash: self.cash,
            });
        }
        self.portfolio.add(stock.id(), amount);
        self.cash -= cost;
        Ok(())
    }

    /// Sells `amount` shares at the stock's current price.
    pub fn sell(&mut self, stock: &Stock, amount: f64) -> Result<(), TradeError> {
        check_amount(amount)?;
        if amount == 0.0 {
            return Ok(());
        }
        self.portfolio.remove(stock.id(), amount)?;
        self.cash += stock.price() * amount;
        Ok(())
    }

    /// Moves the holding to `desired`, buying or selling the difference.
    ///
    /// `desired` is a whole number of shares, or the current holding as is.
    /// Only share issues make holdings fractional, so from 7.5 shares a
    /// request for 7 sells the odd half.
    pub fn buy_or_sell(&mut self, stock: &Stock, desired: f64) -> Result<TradeOutcome, TradeError> {
        check_amount(desired)?;
        let held = self.holding(stock);
        if desired.fract() != 0.0 && desired != held {
            return Err(TradeError::InvalidAmount(desired));
        }
        let delta = desired - held;
        if delta > 0.0 {
            self.buy(stock, delta)?;
            Ok(TradeOutcome::Filled {
                side: Side::Buy,
                amount: delta,
            })
        } else if delta < 0.0 {
            self.sell(stock, -delta)?;
            Ok(TradeOutcome::Filled {
                side: Side::Sell,
                amount: -delta,
            })
        } else {
            Ok(TradeOutcome::Unchanged)
        }
    }

    /// Upper bound for the desired holding of `stock`: what is held now plus
    /// as many whole shares as the cash covers.
    pub fn max_affordable(&self, stock: &Stock) -> f64 {
        let held = self.holding(stock);
        if stock.price() <= 0.0 {
            return held;
        }
        held + (self.cash / stock.price()).floor()
    }

    /// Settles one round: wipes bankrupt positions, grows share-issued ones
    /// by half and pays every listed position its dividend.
    ///
    /// Must run after every stock has moved and before bankrupt stocks are
    /// reset, since it reads their post-walk state.
    pub fn apply_market_changes(&mut self, stocks: &[Stock]) {
        let held: Vec<_> = self.portfolio.holdings().collect();
        for (id, quantity) in held {
            let Some(stock) = stocks.iter().find(|s| s.id() == id) else {
                continue;
            };
            if stock.is_bankrupt() {
                self.portfolio.set(id, 0.0);
            } else if stock.is_share_issued() {
                self.portfolio.set(id, quantity + quantity * SHARE_ISSUE_RATIO);
            }
            self.cash += stock.dividend();
        }
    }

    /// Cash plus every holding at its current price.
    pub fn net_worth(&self, stocks: &[Stock]) -> f64 {
        self.cash
            + stocks
                .iter()
                .map(|s| self.holding(s) * s.price())
                .sum::<f64>()
    }

    pub fn standing(&self, stocks: &[Stock]) -> Standing {
        Standing {
            name: self.name.clone(),
            cash: self.cash,
            net_worth: self.net_worth(stocks),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
//  Unit tests: trading and settlement
// ──────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulators::{Direction, RoundDraw};
    use crate::stocks::StockId;
    use proptest::prelude::*;

    /// A stock sitting at `price` that paid `dividend` this round.
    fn settled_stock(id: usize, price: f64, dividend: f64) -> Stock {
        let mut s = Stock::with_price(StockId(id), (id + 1).to_string(), price);
        s.apply_draw(RoundDraw {
            dividend,
            direction: Direction::Flat,
            steps: 1,
        });
        s
    }

    #[test]
    fn buy_then_overspend_is_rejected() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("Player 1", 100.0);

        p.buy(&stock, 5.0).unwrap();
        assert_eq!(p.cash(), 50.0);
        assert_eq!(p.holding(&stock), 5.0);

        let err = p.buy(&stock, 6.0).unwrap_err();
        assert!(matches!(err, TradeError::InsufficientFunds { cost, cash, .. } if cost == 60.0 && cash == 50.0));
        assert_eq!(p.cash(), 50.0);
        assert_eq!(p.holding(&stock), 5.0);
    }

    #[test]
    fn spending_every_last_coin_is_allowed() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 100.0);
        p.buy(&stock, 10.0).unwrap();
        assert_eq!(p.cash(), 0.0);
    }

    #[test]
    fn overselling_is_rejected() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 100.0);
        assert!(matches!(
            p.sell(&stock, 1.0),
            Err(TradeError::InsufficientHoldings { held, .. }) if held == 0.0
        ));
        p.buy(&stock, 2.0).unwrap();
        assert!(p.sell(&stock, 3.0).is_err());
        assert_eq!(p.cash(), 80.0);
        assert_eq!(p.holding(&stock), 2.0);
    }

    #[test]
    fn sale_uses_the_current_price() {
        let mut stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 100.0);
        p.buy(&stock, 4.0).unwrap();
        stock.apply_draw(RoundDraw {
            dividend: 0.0,
            direction: Direction::Up,
            steps: 4,
        });
        p.sell(&stock, 4.0).unwrap();
        assert_eq!(p.cash(), 60.0 + 60.0);
    }

    #[test]
    fn zero_amounts_do_nothing() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 0.0);
        p.buy(&stock, 0.0).unwrap();
        p.sell(&stock, 0.0).unwrap();
        assert_eq!(p.cash(), 0.0);
        assert!(p.portfolio().is_empty());
    }

    #[test]
    fn negative_or_nan_amounts_are_invalid() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 100.0);
        assert_eq!(p.buy(&stock, -1.0), Err(TradeError::InvalidAmount(-1.0)));
        assert!(matches!(p.sell(&stock, f64::NAN), Err(TradeError::InvalidAmount(_))));
        assert!(matches!(
            p.buy_or_sell(&stock, f64::INFINITY),
            Err(TradeError::InvalidAmount(_))
        ));
        assert_eq!(p.cash(), 100.0);
        assert!(p.portfolio().is_empty());
    }

    #[test]
    fn buy_or_sell_dispatches_on_the_difference() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 100.0);
        assert_eq!(
            p.buy_or_sell(&stock, 3.0).unwrap(),
            TradeOutcome::Filled {
                side: Side::Buy,
                amount: 3.0
            }
        );
        assert_eq!(
            p.buy_or_sell(&stock, 1.0).unwrap(),
            TradeOutcome::Filled {
                side: Side::Sell,
                amount: 2.0
            }
        );
        assert_eq!(p.buy_or_sell(&stock, 1.0).unwrap(), TradeOutcome::Unchanged);
        assert_eq!(p.cash(), 90.0);
    }

    #[test]
    fn desired_holdings_are_whole_shares() {
        let stock = Stock::new(StockId(0), "1");
        let mut p = Player::new("p", 100.0);
        assert_eq!(p.buy_or_sell(&stock, 2.37), Err(TradeError::InvalidAmount(2.37)));
        assert_eq!(p.cash(), 100.0);
        assert!(p.portfolio().is_empty());
    }

    #[test]
    fn fractional_holding_trades_back_to_whole_shares() {
        let stock = settled_stock(0, 40.0, 0.0);
        let mut p = Player::new("p", 1_000.0);
        p.buy(&stock, 5.0).unwrap();
        p.apply_market_changes(std::slice::from_ref(&stock));
        assert_eq!(p.holding(&stock), 7.5);
        let cash = p.cash();

        // keeping the odd holding is fine, anything else must be whole
        assert_eq!(p.buy_or_sell(&stock, 7.5).unwrap(), TradeOutcome::Unchanged);
        assert_eq!(p.buy_or_sell(&stock, 6.5), Err(TradeError::InvalidAmount(6.5)));

        assert_eq!(
            p.buy_or_sell(&stock, 7.0).unwrap(),
            TradeOutcome::Filled {
                side: Side::Sell,
                amount: 0.5
            }
        );
        assert_eq!(p.holding(&stock), 7.0);
        assert_eq!(p.cash(), cash + 20.0);
    }

    #[test]
    fn max_affordable_truncates_to_whole_shares() {
        let stock = Stock::with_price(StockId(0), "1", 15.0);
        let mut p = Player::new("p", 100.0);
        assert_eq!(p.max_affordable(&stock), 6.0);
        p.buy(&stock, 2.0).unwrap();
        // 70 cash left -> 4 more
        assert_eq!(p.max_affordable(&stock), 6.0);
    }

    #[test]
    fn share_issue_grows_holding_by_half() {
        let stock = settled_stock(0, 40.0, 0.5);
        let mut p = Player::new("p", 1_000.0);
        p.buy(&stock, 10.0).unwrap();
        let cash = p.cash();

        p.apply_market_changes(std::slice::from_ref(&stock));
        assert_eq!(p.holding(&stock), 15.0);
        assert_eq!(p.cash(), cash + 0.5);

        // fractional holdings keep compounding
        p.apply_market_changes(std::slice::from_ref(&stock));
        assert_eq!(p.holding(&stock), 22.5);
    }

    #[test]
    fn bankruptcy_wipes_without_compensation() {
        let mut stock = Stock::with_price(StockId(0), "1", 2.0);
        let mut p = Player::new("p", 100.0);
        p.buy(&stock, 7.0).unwrap();
        let cash = p.cash();
        stock.apply_draw(RoundDraw {
            dividend: 1.4,
            direction: Direction::Down,
            steps: 4,
        });
        assert!(stock.is_bankrupt());

        p.apply_market_changes(std::slice::from_ref(&stock));
        assert_eq!(p.holding(&stock), 0.0);
        assert_eq!(p.cash(), cash);
    }

    #[test]
    fn never_held_stocks_are_ignored_and_emptied_ones_still_pay() {
        let held = settled_stock(0, 12.0, 0.25);
        let sold_out = settled_stock(1, 12.0, 0.5);
        let never = settled_stock(2, 40.0, 1.0);
        let stocks = vec![held.clone(), sold_out.clone(), never.clone()];

        let mut p = Player::new("p", 100.0);
        p.buy(&held, 1.0).unwrap();
        p.buy(&sold_out, 1.0).unwrap();
        p.sell(&sold_out, 1.0).unwrap();
        let cash = p.cash();

        p.apply_market_changes(&stocks);
        assert_eq!(p.cash(), cash + 0.25 + 0.5);
        assert!(!p.portfolio().contains(never.id()));
    }

    #[test]
    fn net_worth_marks_holdings_to_market() {
        let stocks = vec![Stock::new(StockId(0), "1"), Stock::with_price(StockId(1), "2", 20.0)];
        let mut p = Player::new("p", 100.0);
        p.buy(&stocks[0], 2.0).unwrap();
        p.buy(&stocks[1], 1.0).unwrap();
        assert_eq!(p.net_worth(&stocks), 100.0);
        assert_eq!(p.standing(&stocks).cash, 60.0);
    }

    // Prices on an eighths grid keep the arithmetic exact, like the walk does.
    fn eighths_price() -> impl Strategy<Value = f64> {
        (9u32..400).prop_map(|n| f64::from(n) / 8.0)
    }

    proptest! {
        #[test]
        fn buy_then_sell_restores_state(price in eighths_price(), cash in 0u32..10_000, amount in 0u32..50) {
            let stock = Stock::with_price(StockId(0), "1", price);
            let mut p = Player::new("p", f64::from(cash));
            let before = p.clone();
            if p.buy(&stock, f64::from(amount)).is_ok() {
                p.sell(&stock, f64::from(amount)).unwrap();
                prop_assert_eq!(p.cash(), before.cash());
                prop_assert_eq!(p.holding(&stock), before.holding(&stock));
            } else {
                prop_assert_eq!(p, before);
            }
        }

        #[test]
        fn zero_amount_trades_leave_any_state_alone(price in eighths_price(), cash in 0u32..10_000, held in 0u32..50) {
            let stock = Stock::with_price(StockId(0), "1", price);
            let mut p = Player::new("p", f64::from(cash) + price * f64::from(held));
            p.buy(&stock, f64::from(held)).unwrap();
            let before = p.clone();

            prop_assert!(p.buy(&stock, 0.0).is_ok());
            prop_assert_eq!(&p, &before);
            prop_assert!(p.sell(&stock, 0.0).is_ok());
            prop_assert_eq!(&p, &before);
        }

        #[test]
        fn failed_trades_leave_state_untouched(price in eighths_price(), cash in 0u32..1_000, amount in 1u32..500) {
            let stock = Stock::with_price(StockId(0), "1", price);
            let mut p = Player::new("p", f64::from(cash));
            let before = p.clone();

            if p.sell(&stock, f64::from(amount)).is_err() {
                prop_assert_eq!(&p, &before);
            }
            match p.buy(&stock, f64::from(amount)) {
                Err(TradeError::InsufficientFunds { .. }) => prop_assert_eq!(&p, &before),
                Err(other) => prop_assert!(false, "unexpected error {other}"),
                Ok(()) => prop_assert!(price * f64::from(amount) <= f64::from(cash)),
            }
        }

        #[test]
        fn max_affordable_never_overspends(price in eighths_price(), cash in 0u32..10_000, held in 0u32..20) {
            let stock = Stock::with_price(StockId(0), "1", price);
            let mut p = Player::new("p", f64::from(cash) + price * f64::from(held));
            p.buy(&stock, f64::from(held)).unwrap();
            let cap = p.max_affordable(&stock);
            prop_assert!(p.buy_or_sell(&stock, cap).is_ok());
            prop_assert!(p.cash() >= 0.0);
        }
    }
}
