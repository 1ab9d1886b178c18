// src/bin/autoplay.rs

//! Plays a seeded game without a window and prints what happened as JSON,
//! one line per round followed by the final standings.
//!
//! Run with:  cargo run --bin autoplay -- --seed 7 --rounds 20

use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use stock_trader::config::DEFAULT_MAX_ROUNDS;
use stock_trader::{GameSession, SessionConfig, SessionError, StockId};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config (JSON). Defaults to a single player with 10 stocks.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the market, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to play, overrides the config
    #[arg(long)]
    rounds: Option<u32>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// Dumps every position that just lost value, then puts all the cash into
/// the stock that rose the most.
fn chase_momentum(session: &mut GameSession) -> Result<(), SessionError> {
    let falling: Vec<StockId> = session
        .stocks()
        .iter()
        .filter(|s| s.change() < 0.0 && session.current_player().holding(s) > 0.0)
        .map(|s| s.id())
        .collect();
    for id in falling {
        session.buy_or_sell(id, 0.0)?;
    }

    let best = session
        .stocks()
        .iter()
        .filter(|s| s.change() > 0.0)
        .max_by(|a, b| a.change().total_cmp(&b.change()))
        .map(|s| s.id());
    if let Some(id) = best {
        // a share issue can leave the cap fractional; only whole shares are bought
        let target = session.max_affordable(id)?.floor();
        let held = session.current_player().holding(session.stock(id)?);
        if target > held {
            session.buy_or_sell(id, target)?;
        }
    }
    Ok(())
}

fn print(value: &serde_json::Value, pretty: bool) -> Result<(), serde_json::Error> {
    let line = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{line}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    // an unlimited game would never stop here
    config.max_rounds = Some(args.rounds.or(config.max_rounds).unwrap_or(DEFAULT_MAX_ROUNDS));

    let mut session = GameSession::new(&config)?;
    while !session.is_over() {
        for seat in 0..session.players().len() {
            session.select_player(seat)?;
            if let Err(err) = chase_momentum(&mut session) {
                warn!(seat, %err, "strategy trade rejected");
            }
        }

        let report = session.advance_round();
        let names = |ids: &[StockId]| -> Vec<String> {
            ids.iter()
                .filter_map(|&id| session.stock(id).ok())
                .map(|s| s.name().to_string())
                .collect()
        };
        let cash: Vec<f64> = session.players().iter().map(|p| p.cash()).collect();
        print(
            &json!({
                "round": report.round,
                "bankrupted": names(&report.bankrupted),
                "share_issued": names(&report.share_issued),
                "headline": report.headline(session.market()),
                "cash": cash,
            }),
            args.pretty,
        )?;
    }

    print(&json!({ "standings": session.standings() }), args.pretty)?;
    Ok(())
}
