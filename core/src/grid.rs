//! Fixed-size toroidal 2D grids.

use itertools::Itertools;
use std::ops::{Index, IndexMut};

use crate::math::wrap;

/// Width and height of a grid.
pub type Size = (usize, usize);

/// Fixed-size 2D array of values of type `T` whose edges wrap around, so every
/// integer coordinate addresses some cell.
///
/// The minimum coordinate of the grid is always 0 along both axes. Cells are
/// stored with X as the outer axis, so flat storage order matches
/// [`Grid::positions()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Box<[T]>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    ///
    /// # Panics
    ///
    /// This function panics if either dimension is zero or if the grid is too
    /// large to address (see [`checked_len()`]).
    pub fn filled(size: Size, value: T) -> Self {
        assert_nonzero(size);
        let (width, height) = size;
        let len = checked_len::<T>(size)
            .unwrap_or_else(|| panic!("Grid is too large; got {}x{}", width, height));
        Self {
            width,
            height,
            data: vec![value; len].into_boxed_slice(),
        }
    }

    /// Sets every cell in the grid to `value`.
    pub fn fill(&mut self, value: T) {
        for cell in self.data.iter_mut() {
            *cell = value.clone();
        }
    }
}

impl<T> Grid<T> {
    /// Creates a grid by calling `f(x, y)` for every position, in the order
    /// returned by [`Grid::positions()`].
    ///
    /// # Panics
    ///
    /// This function panics if either dimension is zero.
    pub fn from_fn(size: Size, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert_nonzero(size);
        let data = positions(size).map(|(x, y)| f(x, y)).collect_vec();
        Self::from_flat_slice(size, data)
    }

    /// Creates a grid from a flat vector laid out with X as the outer axis.
    ///
    /// # Panics
    ///
    /// This function panics if either dimension is zero or if the length of
    /// `data` does not match `size`.
    pub fn from_flat_slice(size: Size, data: impl Into<Box<[T]>>) -> Self {
        assert_nonzero(size);
        let data = data.into();
        assert_eq!(
            size.0.checked_mul(size.1),
            Some(data.len()),
            "Wrong size for Grid",
        );
        Self {
            width: size.0,
            height: size.1,
            data,
        }
    }

    /// Returns the flat data behind the grid.
    #[inline]
    pub fn into_flat_slice(self) -> Box<[T]> {
        self.data
    }

    /// Returns the width and height of the grid.
    #[inline]
    pub fn size(&self) -> Size {
        (self.width, self.height)
    }
    /// Returns the size of the grid along the X axis.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    /// Returns the size of the grid along the Y axis.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    /// Returns the number of cells in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Always returns `false`; grids have at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the cell at a position, wrapping around the edges.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> &T {
        &self.data[self.wrapped_idx(x, y)]
    }
    /// Returns a mutable reference to the cell at a position, wrapping around
    /// the edges.
    #[inline]
    pub fn get_mut(&mut self, x: isize, y: isize) -> &mut T {
        let idx = self.wrapped_idx(x, y);
        &mut self.data[idx]
    }
    /// Sets the cell at a position, wrapping around the edges.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, value: T) {
        *self.get_mut(x, y) = value;
    }

    /// Returns an iterator over every position in the grid, with X as the outer
    /// loop and Y as the inner loop.
    #[inline]
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        positions(self.size())
    }
    /// Returns an iterator over all the cells in the grid, in the same order as
    /// [`Grid::positions()`].
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
    /// Returns an iterator over all the cells in the grid, enumerated by their
    /// positions.
    #[inline]
    pub fn iter_enumerated<'a>(&'a self) -> impl 'a + Iterator<Item = ((usize, usize), &'a T)> {
        self.positions().zip(self.data.iter())
    }

    /// Creates a new grid of the same size by applying a function to every
    /// cell in the grid.
    #[inline]
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid::from_flat_slice(self.size(), self.data.iter().map(f).collect_vec())
    }

    fn wrapped_idx(&self, x: isize, y: isize) -> usize {
        flatten_idx(self.size(), (wrap(x, self.width), wrap(y, self.height)))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: (usize, usize)) -> &T {
        &self.data[flatten_idx(self.size(), pos)]
    }
}
impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, pos: (usize, usize)) -> &mut T {
        let idx = flatten_idx(self.size(), pos);
        &mut self.data[idx]
    }
}

fn assert_nonzero(size: Size) {
    assert!(
        size.0 > 0 && size.1 > 0,
        "Grid dimensions must be positive; got {}x{}",
        size.0,
        size.1,
    );
}

/// Returns the number of cells in a grid of type `T` with the given size, or
/// `None` if either dimension does not fit in an `isize` or the cells would
/// take up more than `isize::MAX` bytes.
pub fn checked_len<T>(size: Size) -> Option<usize> {
    let (width, height) = size;
    let max = isize::MAX as usize;
    if width > max || height > max {
        return None;
    }
    let len = width.checked_mul(height)?;
    let bytes = len.checked_mul(std::mem::size_of::<T>())?;
    if bytes > max {
        return None;
    }
    Some(len)
}

/// Returns an iterator over every position in a grid of the given size, with X
/// as the outer loop.
fn positions(size: Size) -> impl Iterator<Item = (usize, usize)> {
    let (width, height) = size;
    (0..width).cartesian_product(0..height)
}

/// Converts an in-bounds position into a "flattened" index.
fn flatten_idx(size: Size, pos: (usize, usize)) -> usize {
    let (width, height) = size;
    let (x, y) = pos;
    assert!(x < width && y < height, "Position out of bounds");
    x * height + y
}

/// Converts a "flattened" index into a position.
#[cfg(test)]
fn unflatten_idx(size: Size, idx: usize) -> (usize, usize) {
    let (width, height) = size;
    assert!(idx < width * height);
    (idx / height, idx % height)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_grid_flatten_unflatten_idx() {
        let size = (4, 7);
        let mut last_index = None;
        for pos in positions(size) {
            let flat_idx = flatten_idx(size, pos);
            assert!(flat_idx < 28);
            assert_eq!(pos, unflatten_idx(size, flat_idx));
            if let Some(last) = last_index {
                assert_eq!(flat_idx, last + 1);
            }
            last_index = Some(flat_idx);
        }
    }

    #[test]
    fn test_grid_positions_row_major() {
        let grid = Grid::filled((3, 2), 0_u8);
        let visited = grid.positions().collect_vec();
        assert_eq!(
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)],
            visited,
        );
        let unique: HashSet<_> = visited.iter().copied().collect();
        assert_eq!(grid.len(), unique.len());
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_grid_from_fn() {
        let grid = Grid::from_fn((5, 3), |x, y| x * 10 + y);
        for ((x, y), &cell) in grid.iter_enumerated() {
            assert_eq!(x * 10 + y, cell);
            assert_eq!(cell, grid[(x, y)]);
        }
    }

    #[test]
    fn test_grid_negative_set() {
        let mut grid = Grid::filled((4, 5), 0);
        grid.set(-1, -1, 7);
        assert_eq!(7, grid[(3, 4)]);
        grid.set(-9, 11, 3);
        assert_eq!(3, grid[(3, 1)]);
    }

    #[test]
    #[should_panic(expected = "Grid dimensions must be positive")]
    fn test_grid_zero_width() {
        Grid::filled((0, 3), false);
    }

    #[test]
    fn test_grid_checked_len() {
        assert_eq!(Some(12), checked_len::<u8>((3, 4)));
        assert_eq!(Some(0), checked_len::<u8>((0, 4)));
        assert_eq!(None, checked_len::<u8>((usize::MAX, 2)));
        assert_eq!(None, checked_len::<u8>((isize::MAX as usize + 1, 1)));
        assert_eq!(None, checked_len::<u64>((isize::MAX as usize, 1)));
        assert_eq!(
            Some(isize::MAX as usize),
            checked_len::<u8>((isize::MAX as usize, 1)),
        );
    }

    #[test]
    #[should_panic(expected = "Grid is too large")]
    fn test_grid_too_large() {
        Grid::filled((usize::MAX, 2), 0_u8);
    }

    #[test]
    #[should_panic(expected = "Wrong size for Grid")]
    fn test_grid_wrong_flat_len() {
        Grid::from_flat_slice((2, 2), vec![1, 2, 3]);
    }

    proptest! {
        #[test]
        fn test_grid_toroidal_get(
            width in 1..20_usize,
            height in 1..20_usize,
            x in -100..100_isize,
            y in -100..100_isize,
        ) {
            let grid = Grid::from_fn((width, height), |x, y| (x, y));
            let (w, h) = (width as isize, height as isize);
            let expected = grid.get(x, y);
            prop_assert_eq!(expected, grid.get(x + w, y));
            prop_assert_eq!(expected, grid.get(x - w, y));
            prop_assert_eq!(expected, grid.get(x, y + h));
            prop_assert_eq!(expected, grid.get(x, y - h));
            prop_assert_eq!(*expected, (wrap(x, width), wrap(y, height)));
        }

        #[test]
        fn test_grid_set_get_agree(
            width in 1..20_usize,
            height in 1..20_usize,
            x in -100..100_isize,
            y in -100..100_isize,
        ) {
            let mut grid = Grid::filled((width, height), false);
            grid.set(x, y, true);
            prop_assert!(*grid.get(x, y));
            prop_assert!(grid[(wrap(x, width), wrap(y, height))]);
            prop_assert_eq!(1, grid.iter().filter(|&&c| c).count());
        }
    }
}
