// src/simulators/random_walk.rs

//! One round of a stock's price walk, sampled up front so the stock itself
//! only has to apply it.

use super::draws::UnitDraws;
use crate::config::{DOWN_CUTOFF, MAX_DIVIDEND, MAX_STEPS, UP_CUTOFF};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// `x <= 0.4` goes up, `0.4 < x <= 0.7` goes down, anything above stays flat.
    pub fn from_draw(x: f64) -> Self {
        if x <= UP_CUTOFF {
            Direction::Up
        } else if x <= DOWN_CUTOFF {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
            Direction::Flat => 0.0,
        }
    }
}

/// Everything random about a single stock's round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundDraw {
    pub dividend: f64,
    pub direction: Direction,
    /// Magnitude in eighths of the current price, always in `1..=MAX_STEPS`.
    pub steps: u32,
}

impl RoundDraw {
    /// Takes exactly three draws: dividend, direction, magnitude.
    pub fn sample<D: UnitDraws + ?Sized>(draws: &mut D) -> Self {
        let dividend = draws.next_unit() * MAX_DIVIDEND;
        let direction = Direction::from_draw(draws.next_unit());
        let steps = ((draws.next_unit() * f64::from(MAX_STEPS)) as u32 + 1).min(MAX_STEPS);
        Self {
            dividend,
            direction,
            steps,
        }
    }
}
