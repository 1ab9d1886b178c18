// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod config;
pub mod market;
pub mod player;
pub mod portfolio;
pub mod session;
pub mod simulators;
pub mod stocks;
pub mod types;

// === 2. Re-export the public-facing components to create a clean API ===

// --- From `config` ---
pub use config::{ConfigError, SessionConfig};

// --- From our `market` engine ---
pub use market::{Market, RoundReport};
pub use session::{GameSession, SessionError};

// --- From `player` / `portfolio` ---
pub use player::{Player, Standing};
pub use portfolio::Portfolio;

// --- From `simulators` ---
pub use simulators::{Direction, RoundDraw, ScriptedDraws, UnitDraws};

// --- From `stocks` ---
pub use stocks::{Stock, StockId, default_roster};

// --- From `types` ---
pub use types::{Side, TradeError, TradeOutcome};
