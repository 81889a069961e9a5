//! Convolution-based cellular automaton engine on toroidal 2D grids.
//!
//! Each generation, the grid is convolved with a kernel, the convolution is
//! passed through a growth function and added to the previous cell state, and
//! the result is mapped back onto a valid cell value. Conway's Game of Life and
//! continuous Lenia-style automata are both expressed as a [`CellRules`]
//! implementation driving the same [`Automaton`].
//!
//! [`CellRules`]: rule::CellRules
//! [`Automaton`]: automaton::Automaton

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod automaton;
pub mod grid;
pub mod kernel;
pub mod math;
pub mod patterns;
pub mod rule;

pub mod prelude {
    //! Commonly used types and traits.

    pub use crate::automaton::{Automaton, AutomatonError, AutomatonResult};
    pub use crate::grid::{Grid, Size};
    pub use crate::kernel::{Kernel, KernelError, KernelResult};
    pub use crate::patterns::{NamedPattern, Pattern, PatternError, PATTERNS};
    pub use crate::rule::{
        CellRules, Color, Lenia, LeniaParams, Life, LifeState, RuleError, RuleResult,
    };
}

#[cfg(test)]
mod tests;
