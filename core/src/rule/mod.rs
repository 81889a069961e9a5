//! Everything related to the description of a cellular automaton rule: the
//! cell algebra, the kernel, and the growth and state mappings.

use core::fmt;
use rand::Rng;
use thiserror::Error;

mod lenia;
mod life;

use crate::kernel::{Kernel, KernelError};
pub use lenia::*;
pub use life::*;

/// 8-bit sRGB color used when rendering cells.
pub use colorous::Color;

/// Result type returned by fallible rule constructors.
pub type RuleResult<T> = Result<T, RuleError>;

/// Error encountered while constructing a rule.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("invalid kernel: {0}")]
    Kernel(#[from] KernelError),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

/// Cellular automaton rule, defining the cell algebra and kernel for one kind
/// of automaton.
///
/// Each generation, the engine convolves the grid with [`CellRules::kernel()`]
/// using [`CellRules::mult()`], passes each sum through
/// [`CellRules::growth_mapping()`], combines the result with the old cell
/// using [`CellRules::add()`], and then turns it back into a cell using
/// [`CellRules::state_mapping()`].
pub trait CellRules: fmt::Debug + fmt::Display + Send + Sync {
    /// Value stored in each cell.
    type Cell: Copy + fmt::Debug + PartialEq + Send + Sync;

    /// Returns the background cell value, used to initialize the grid.
    fn empty(&self) -> Self::Cell;
    /// Returns the cell value written when painting a cell.
    fn full(&self) -> Self::Cell;

    /// Multiplies a cell by a kernel weight.
    fn mult(&self, cell: Self::Cell, weight: f64) -> f64;
    /// Adds a growth delta to a cell.
    fn add(&self, cell: Self::Cell, delta: f64) -> f64;

    /// Returns the convolution kernel.
    fn kernel(&self) -> &Kernel;
    /// Maps a convolution sum to a state delta.
    fn growth_mapping(&self, conv: f64) -> f64;
    /// Maps a raw number back onto a valid cell value.
    fn state_mapping(&self, n: f64) -> Self::Cell;

    /// Returns a randomly sampled cell value.
    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Cell;
    /// Returns the color to display for a cell value.
    fn value_to_color(&self, cell: Self::Cell) -> Color;
}
