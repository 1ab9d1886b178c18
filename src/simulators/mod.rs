// src/simulators/mod.rs

pub mod draws;
pub mod random_walk;

pub use draws::{ScriptedDraws, UnitDraws};
pub use random_walk::{Direction, RoundDraw};
