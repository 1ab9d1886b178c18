// src/market.rs

use crate::simulators::UnitDraws;
use crate::stocks::{Stock, StockId};
use serde::Serialize;
use tracing::debug;

/// The stock roster plus the round counter. Players live in the session;
/// the market only moves prices and reports what happened.
#[derive(Debug, Clone)]
pub struct Market {
    round: u32,
    stocks: Vec<Stock>,
}

/// Which stocks crossed a threshold in a round, by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// The round the market moved into.
    pub round: u32,
    pub bankrupted: Vec<StockId>,
    pub share_issued: Vec<StockId>,
}

impl RoundReport {
    /// Nothing worth a news popup happened.
    pub fn is_quiet(&self) -> bool {
        self.bankrupted.is_empty() && self.share_issued.is_empty()
    }

    /// The news text for this round, or `None` if it was quiet.
    pub fn headline(&self, market: &Market) -> Option<String> {
        if self.is_quiet() {
            return None;
        }
        let names = |ids: &[StockId]| {
            ids.iter()
                .filter_map(|&id| market.stock(id))
                .map(Stock::name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut lines = Vec::new();
        if !self.bankrupted.is_empty() {
            lines.push(format!(
                "The following stocks went bankrupt: {}",
                names(&self.bankrupted)
            ));
        }
        if !self.share_issued.is_empty() {
            lines.push(format!(
                "The following stocks are giving share issue: {}",
                names(&self.share_issued)
            ));
        }
        Some(lines.join("\n"))
    }
}

impl Market {
    /// Opens the market at round 1.
    pub fn new(stocks: Vec<Stock>) -> Self {
        Self { round: 1, stocks }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn stock(&self, id: StockId) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id() == id)
    }

    /// Bumps the round, walks every stock once and sorts out which ones went
    /// bankrupt or issued shares. Bankrupt stocks are left as they landed so
    /// that holders can still be settled against them.
    pub fn advance_stocks<D: UnitDraws + ?Sized>(&mut self, draws: &mut D) -> RoundReport {
        self.round += 1;
        for stock in self.stocks.iter_mut() {
            stock.advance_round(draws);
        }

        let mut report = RoundReport {
            round: self.round,
            ..RoundReport::default()
        };
        for stock in &self.stocks {
            if stock.is_bankrupt() {
                report.bankrupted.push(stock.id());
            } else if stock.is_share_issued() {
                report.share_issued.push(stock.id());
            }
        }
        debug!(
            round = self.round,
            bankrupted = report.bankrupted.len(),
            share_issued = report.share_issued.len(),
            "stocks advanced"
        );
        report
    }

    /// Relists every stock the report marked bankrupt.
    pub fn reset_bankrupt(&mut self, report: &RoundReport) {
        for stock in self.stocks.iter_mut() {
            if report.bankrupted.contains(&stock.id()) {
                debug!(stock = %stock.name(), price = stock.price(), "relisting bankrupt stock");
                stock.reset();
            }
        }
    }
}
