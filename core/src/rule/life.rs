use rand::Rng;
use std::fmt;

use super::{CellRules, Color};
use crate::kernel::Kernel;

/// State of a cell in a 2-state automaton.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LifeState {
    Dead = 0,
    Alive = 1,
}
impl Default for LifeState {
    fn default() -> Self {
        Self::Dead
    }
}
impl From<bool> for LifeState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}
impl From<LifeState> for f64 {
    fn from(state: LifeState) -> Self {
        state as u8 as f64
    }
}
impl LifeState {
    /// Returns whether the cell is alive.
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }
}

/// Conway's Game of Life, expressed as a convolution with a range-1 Moore
/// kernel that excludes the center cell.
///
/// The growth mapping turns the live neighbor count into `-1` (death), `0`
/// (survival only) or `+1` (birth or survival), and the state mapping treats
/// anything at least 1 as alive.
#[derive(Debug, Clone)]
pub struct Life {
    kernel: Kernel,
}
impl Default for Life {
    fn default() -> Self {
        Self {
            kernel: Kernel::moore(1),
        }
    }
}
impl Life {
    /// Returns the rule for Conway's Game of Life.
    pub fn new() -> Self {
        Self::default()
    }
}
impl fmt::Display for Life {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B3/S23")
    }
}

impl CellRules for Life {
    type Cell = LifeState;

    fn empty(&self) -> LifeState {
        LifeState::Dead
    }
    fn full(&self) -> LifeState {
        LifeState::Alive
    }

    fn mult(&self, cell: LifeState, weight: f64) -> f64 {
        f64::from(cell) * weight
    }
    fn add(&self, cell: LifeState, delta: f64) -> f64 {
        f64::from(cell) + delta
    }

    fn kernel(&self) -> &Kernel {
        &self.kernel
    }
    fn growth_mapping(&self, live_neighbors: f64) -> f64 {
        if live_neighbors < 2.0 {
            -1.0
        } else if live_neighbors == 2.0 {
            0.0
        } else if live_neighbors == 3.0 {
            1.0
        } else {
            -1.0
        }
    }
    fn state_mapping(&self, n: f64) -> LifeState {
        LifeState::from(n >= 1.0)
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> LifeState {
        LifeState::from(rng.gen_bool(0.5))
    }
    fn value_to_color(&self, cell: LifeState) -> Color {
        match cell {
            LifeState::Dead => Color { r: 0, g: 0, b: 0 },
            LifeState::Alive => Color {
                r: 255,
                g: 255,
                b: 255,
            },
        }
    }
}
