// src/config.rs

//! A centralized place for the game rules and the session setup.
//!
//! The rule constants are fixed for every game. Only the *shape* of a session
//! (who plays, how many stocks, how long, which seed) goes through
//! [`SessionConfig`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// --- Stock ---
pub const INITIAL_PRICE: f64 = 10.0;
/// A stock at or below this price is bankrupt.
pub const BANKRUPTCY_PRICE: f64 = 1.0;
/// A stock at or above this price issues new shares to its holders.
pub const SHARE_ISSUE_PRICE: f64 = 30.0;
pub const MAX_DIVIDEND: f64 = 1.5;

// --- Random walk ---
// direction draw: [0, UP_CUTOFF] up, (UP_CUTOFF, DOWN_CUTOFF] down, rest flat.
pub const UP_CUTOFF: f64 = 0.4;
pub const DOWN_CUTOFF: f64 = 0.7;
pub const MAX_STEPS: u32 = 4;
/// One step moves the price by `price / PRICE_STEP_DIVISOR`.
pub const PRICE_STEP_DIVISOR: f64 = 8.0;

// --- Player ---
pub const STARTING_CASH: f64 = 100.0;
/// Fraction of the current holding granted on a share issue (3-for-2).
pub const SHARE_ISSUE_RATIO: f64 = 0.5;

// --- Session ---
pub const DEFAULT_STOCK_COUNT: usize = 10;
pub const DEFAULT_MAX_ROUNDS: u32 = 10;
pub const DEFAULT_PLAYER_NAME: &str = "Player 1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read session config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse session config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid session config: {0}")]
    Invalid(String),
}

/// How a single game session is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed for the market's random source. `None` draws from entropy.
    pub seed: Option<u64>,
    pub player_names: Vec<String>,
    pub stock_count: usize,
    /// Round after which the game counts as over. `None` plays forever.
    pub max_rounds: Option<u32>,
    pub starting_cash: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player_names: vec![DEFAULT_PLAYER_NAME.to_string()],
            stock_count: DEFAULT_STOCK_COUNT,
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
            starting_cash: STARTING_CASH,
        }
    }
}

impl SessionConfig {
    /// Same as the default but with a fixed seed, handy for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock_count == 0 {
            return Err(ConfigError::Invalid("at least one stock is required".into()));
        }
        if self.player_names.is_empty() {
            return Err(ConfigError::Invalid("at least one player is required".into()));
        }
        if !self.starting_cash.is_finite() || self.starting_cash < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "starting cash must be a non-negative number, got {}",
                self.starting_cash
            )));
        }
        Ok(())
    }
}
