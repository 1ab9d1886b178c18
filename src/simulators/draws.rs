// src/simulators/draws.rs

use rand::Rng;

/// Anything that can hand out uniform draws in `[0, 1)`.
///
/// The market never reaches for ambient randomness: every round is driven by
/// one of these, so a seeded RNG or a scripted sequence replays a game exactly.
pub trait UnitDraws {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> UnitDraws for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Replays a fixed list of draws, starting over once the list runs out.
/// An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// How many draws have been handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UnitDraws for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
