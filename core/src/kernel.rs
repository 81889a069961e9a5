//! Convolution kernels.
//!
//! A kernel is an odd-by-odd matrix of weights centered on its middle element.
//! Rows correspond to offsets along the X axis of the grid and columns to
//! offsets along the Y axis.

use itertools::Itertools;
use log::debug;
use std::fmt;
use thiserror::Error;

/// Result type returned by fallible kernel constructors.
pub type KernelResult<T> = Result<T, KernelError>;

/// Error encountered while constructing a kernel.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("kernel has no weights")]
    Empty,
    #[error("kernel dimensions must be odd; got {rows}x{cols}")]
    EvenDimensions { rows: usize, cols: usize },
    #[error("kernel row {row} has {got} weights; expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("kernel has {got} weights; expected {expected}")]
    WrongLength { expected: usize, got: usize },
    #[error("kernel weight at ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
    #[error("kernel weights sum to zero and cannot be normalized")]
    ZeroSum,
}

/// Odd-dimensioned matrix of convolution weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    weights: Box<[f64]>,
}

impl Kernel {
    /// Creates a kernel from a flat row-major slice of weights.
    pub fn new(rows: usize, cols: usize, weights: impl Into<Box<[f64]>>) -> KernelResult<Self> {
        let weights = weights.into();
        if rows == 0 || cols == 0 {
            return Err(KernelError::Empty);
        }
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(KernelError::EvenDimensions { rows, cols });
        }
        if weights.len() != rows * cols {
            return Err(KernelError::WrongLength {
                expected: rows * cols,
                got: weights.len(),
            });
        }
        if let Some(idx) = weights.iter().position(|w| !w.is_finite()) {
            return Err(KernelError::NonFinite {
                row: idx / cols,
                col: idx % cols,
            });
        }
        Ok(Self {
            rows,
            cols,
            weights,
        })
    }

    /// Creates a kernel from a list of rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> KernelResult<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            let got = row.as_ref().len();
            if got != cols {
                return Err(KernelError::RaggedRow {
                    row: i,
                    expected: cols,
                    got,
                });
            }
        }
        let weights = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect_vec();
        Self::new(rows.len(), cols, weights)
    }

    /// Creates a square kernel with the given radius by calling `f(oi, oj)`
    /// for each offset from the center.
    pub fn from_fn(radius: usize, mut f: impl FnMut(isize, isize) -> f64) -> KernelResult<Self> {
        let r = radius as isize;
        let weights = (-r..=r)
            .cartesian_product(-r..=r)
            .map(|(oi, oj)| f(oi, oj))
            .collect_vec();
        Self::new(2 * radius + 1, 2 * radius + 1, weights)
    }

    /// Moore neighborhood of the given radius: every cell within the square
    /// has weight 1, except the center which has weight 0.
    pub fn moore(radius: usize) -> Self {
        Self::square(radius, |oi, oj| oi != 0 || oj != 0)
    }

    /// von Neumann neighborhood of the given radius: every cell within the
    /// given Manhattan distance has weight 1, except the center which has
    /// weight 0.
    pub fn von_neumann(radius: usize) -> Self {
        let r = radius as isize;
        Self::square(radius, |oi, oj| {
            (oi != 0 || oj != 0) && oi.abs() + oj.abs() <= r
        })
    }

    fn square(radius: usize, mut contains: impl FnMut(isize, isize) -> bool) -> Self {
        let side = 2 * radius + 1;
        let r = radius as isize;
        let weights = (-r..=r)
            .cartesian_product(-r..=r)
            .map(|(oi, oj)| if contains(oi, oj) { 1.0 } else { 0.0 })
            .collect_vec();
        Self {
            rows: side,
            cols: side,
            weights: weights.into_boxed_slice(),
        }
    }

    /// Radially symmetric kernel of the given radius, where the weight at
    /// each cell is `shell(d / radius)` for Euclidean distance `d` from the
    /// center. Weights are normalized to sum to 1.
    pub fn ring(radius: usize, shell: impl Fn(f64) -> f64) -> KernelResult<Self> {
        let radius_f = radius as f64;
        let kernel = Self::from_fn(radius, |oi, oj| {
            let dist = ((oi * oi + oj * oj) as f64).sqrt();
            shell(dist / radius_f)
        })?;
        let kernel = kernel.normalized()?;
        debug!(
            "Built {}x{} ring kernel with {} nonzero weights",
            kernel.rows,
            kernel.cols,
            kernel.weights.iter().filter(|&&w| w != 0.0).count(),
        );
        Ok(kernel)
    }

    /// Returns a copy of the kernel scaled so that its weights sum to 1.
    pub fn normalized(&self) -> KernelResult<Self> {
        let sum = self.sum();
        if sum == 0.0 {
            return Err(KernelError::ZeroSum);
        }
        Self::new(
            self.rows,
            self.cols,
            self.weights.iter().map(|w| w / sum).collect_vec(),
        )
    }

    /// Returns the number of rows (extent along the X axis).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    /// Returns the number of columns (extent along the Y axis).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Returns the offset of the center from the first row and column, which
    /// is also the maximum distance away from the center along each axis.
    #[inline]
    pub fn offset(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// Returns the weight at a row and column.
    ///
    /// # Panics
    ///
    /// This function panics if the row or column is out of bounds.
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "Kernel index out of bounds");
        self.weights[row * self.cols + col]
    }

    /// Returns the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Returns an iterator over every offset from the center along with its
    /// weight, in row-major order.
    pub fn iter_offsets(&self) -> impl '_ + Iterator<Item = ((isize, isize), f64)> {
        let (off_row, off_col) = self.offset();
        let (off_row, off_col) = (off_row as isize, off_col as isize);
        (-off_row..=off_row)
            .cartesian_product(-off_col..=off_col)
            .zip(self.weights.iter().copied())
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.weights.chunks(self.cols) {
            writeln!(f, "{}", row.iter().map(|w| format!("{:.3}", w)).join(" "))?;
        }
        Ok(())
    }
}
