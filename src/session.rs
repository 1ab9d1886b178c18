// src/session.rs

//! A whole game: the market, its players and the random source that drives it.
//!
//! Whatever front-end sits on top (the desktop window, the headless runner)
//! holds one `GameSession`, feeds it the holdings the user asks for and reads
//! stocks and players back out to redraw after every call.

use crate::config::{ConfigError, SessionConfig};
use crate::market::{Market, RoundReport};
use crate::player::{Player, Standing};
use crate::simulators::UnitDraws;
use crate::stocks::{Stock, StockId, default_roster};
use crate::types::{TradeError, TradeOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no stock with id {0}")]
    UnknownStock(StockId),
    #[error("no player at seat {0}")]
    UnknownPlayer(usize),
    #[error(transparent)]
    Trade(#[from] TradeError),
}

pub struct GameSession {
    market: Market,
    players: Vec<Player>,
    current: usize,
    draws: Box<dyn UnitDraws>,
    max_rounds: Option<u32>,
}

impl GameSession {
    /// Builds a session from `config`, seeding the market RNG when a seed is given.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_draws(config, rng)
    }

    /// Like [`GameSession::new`] but with a caller-supplied random source.
    pub fn with_draws<D: UnitDraws + 'static>(
        config: &SessionConfig,
        draws: D,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let players = config
            .player_names
            .iter()
            .map(|name| Player::new(name.clone(), config.starting_cash))
            .collect();
        let session = Self::from_parts(
            default_roster(config.stock_count),
            players,
            draws,
            config.max_rounds,
        )?;
        debug!(
            stocks = config.stock_count,
            players = config.player_names.len(),
            seed = ?config.seed,
            "session started"
        );
        Ok(session)
    }

    /// Assembles a session from ready-made pieces, e.g. a hand-picked roster.
    ///
    /// The roster must be non-empty with `stocks[i].id() == StockId(i)`, and
    /// there must be at least one player.
    pub fn from_parts<D: UnitDraws + 'static>(
        stocks: Vec<Stock>,
        players: Vec<Player>,
        draws: D,
        max_rounds: Option<u32>,
    ) -> Result<Self, ConfigError> {
        if stocks.is_empty() {
            return Err(ConfigError::Invalid("at least one stock is required".into()));
        }
        if let Some((i, stock)) = stocks
            .iter()
            .enumerate()
            .find(|(i, s)| s.id() != StockId(*i))
        {
            return Err(ConfigError::Invalid(format!(
                "stock {} sits at roster position {} but has id {}",
                stock.name(),
                i,
                stock.id()
            )));
        }
        if players.is_empty() {
            return Err(ConfigError::Invalid("at least one player is required".into()));
        }
        Ok(Self {
            market: Market::new(stocks),
            players,
            current: 0,
            draws: Box::new(draws),
            max_rounds,
        })
    }

    pub fn round(&self) -> u32 {
        self.market.round()
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn stocks(&self) -> &[Stock] {
        self.market.stocks()
    }

    pub fn stock(&self, id: StockId) -> Result<&Stock, SessionError> {
        self.market.stock(id).ok_or(SessionError::UnknownStock(id))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player whose trades `buy_or_sell` applies to. Every constructor
    /// requires at least one player and `select_player` only accepts seated
    /// ones, so the seat is always valid.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_seat(&self) -> usize {
        self.current
    }

    pub fn select_player(&mut self, seat: usize) -> Result<(), SessionError> {
        if seat >= self.players.len() {
            return Err(SessionError::UnknownPlayer(seat));
        }
        self.current = seat;
        Ok(())
    }

    /// Moves the current player's holding of `stock` to `desired`.
    pub fn buy_or_sell(&mut self, stock: StockId, desired: f64) -> Result<TradeOutcome, SessionError> {
        let listed = self
            .market
            .stock(stock)
            .ok_or(SessionError::UnknownStock(stock))?;
        let player = self
            .players
            .get_mut(self.current)
            .ok_or(SessionError::UnknownPlayer(self.current))?;
        let outcome = player.buy_or_sell(listed, desired)?;
        debug!(
            player = %player.name(),
            stock = %listed.name(),
            ?outcome,
            cash = player.cash(),
            "trade"
        );
        Ok(outcome)
    }

    /// Cap for the current player's desired holding of `stock`.
    pub fn max_affordable(&self, stock: StockId) -> Result<f64, SessionError> {
        let listed = self.stock(stock)?;
        let player = self
            .players
            .get(self.current)
            .ok_or(SessionError::UnknownPlayer(self.current))?;
        Ok(player.max_affordable(listed))
    }

    /// Plays one round. The order is fixed: every stock moves, then every
    /// player is settled against the new prices, then bankrupt stocks are
    /// relisted.
    pub fn advance_round(&mut self) -> RoundReport {
        let report = self.market.advance_stocks(&mut *self.draws);
        for player in self.players.iter_mut() {
            player.apply_market_changes(self.market.stocks());
        }
        self.market.reset_bankrupt(&report);
        debug!(
            round = report.round,
            bankrupted = ?report.bankrupted,
            share_issued = ?report.share_issued,
            "round advanced"
        );
        report
    }

    /// True once the configured number of rounds has been played.
    pub fn is_over(&self) -> bool {
        self.max_rounds.is_some_and(|max| self.round() > max)
    }

    /// Players ranked by net worth, richest first.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .map(|p| p.standing(self.market.stocks()))
            .collect();
        standings.sort_by(|a, b| b.net_worth.total_cmp(&a.net_worth));
        standings
    }
}
