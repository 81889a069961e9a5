//! High-level CA interface.

use log::{debug, trace};
use rand::Rng;
use thiserror::Error;

use crate::grid::{self, Grid, Size};
use crate::patterns::Pattern;
use crate::rule::{CellRules, Color};

/// Result type returned by fallible automaton constructors.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Error encountered while constructing an automaton.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutomatonError {
    #[error("grid dimensions must be positive; got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid is too large; got {width}x{height}")]
    GridTooLarge { width: usize, height: usize },
}

/// Cellular automaton simulation on a toroidal grid, including the grid of
/// cells, a rule, and a generation count.
#[derive(Debug, Clone)]
pub struct Automaton<R: CellRules> {
    grid: Grid<R::Cell>,
    rules: R,
    generation: usize,
}

impl<R: CellRules> Automaton<R> {
    /// Creates an automaton with every cell set to the rule's empty value.
    ///
    /// # Panics
    ///
    /// This function panics if either dimension is zero or the grid is too
    /// large to address.
    pub fn new(rules: R, size: Size) -> Self {
        match Self::try_new(rules, size) {
            Ok(ret) => ret,
            Err(e) => panic!("Cannot create automaton: {}", e),
        }
    }

    /// Creates an automaton with every cell set to the rule's empty value,
    /// returning an error if either dimension is zero or the grid is too large
    /// to address.
    pub fn try_new(rules: R, size: Size) -> AutomatonResult<Self> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(AutomatonError::EmptyGrid { width, height });
        }
        if grid::checked_len::<R::Cell>(size).is_none() {
            return Err(AutomatonError::GridTooLarge { width, height });
        }
        debug!("Creating {}x{} automaton with rule {}", width, height, rules);
        Ok(Self {
            grid: Grid::filled(size, rules.empty()),
            rules,
            generation: 0,
        })
    }

    /// Returns the rule of the automaton.
    #[inline]
    pub fn rules(&self) -> &R {
        &self.rules
    }
    /// Returns the grid of cells.
    #[inline]
    pub fn grid(&self) -> &Grid<R::Cell> {
        &self.grid
    }
    /// Returns the width and height of the grid.
    #[inline]
    pub fn size(&self) -> Size {
        self.grid.size()
    }
    /// Returns the width of the grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    /// Returns the height of the grid.
    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    /// Returns the number of generations simulated since the grid was last
    /// cleared or randomized.
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Returns the cell at a position, wrapping around the edges.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> R::Cell {
        *self.grid.get(x, y)
    }
    /// Sets the cell at a position, wrapping around the edges.
    #[inline]
    pub fn set(&mut self, x: isize, y: isize, cell: R::Cell) {
        self.grid.set(x, y, cell);
    }
    /// Sets the cell at a position to the rule's "full" value.
    #[inline]
    pub fn paint(&mut self, x: isize, y: isize) {
        let full = self.rules.full();
        self.set(x, y, full);
    }
    /// Returns the color of the cell at a position.
    #[inline]
    pub fn color(&self, x: isize, y: isize) -> Color {
        self.rules.value_to_color(self.get(x, y))
    }

    /// Calls `visit(x, y)` for every position in the grid, with X as the outer
    /// loop and Y as the inner loop.
    pub fn for_cells(&self, mut visit: impl FnMut(usize, usize)) {
        for (x, y) in self.grid.positions() {
            visit(x, y);
        }
    }
    /// Returns an iterator over every position in the grid, in the same order
    /// as [`Automaton::for_cells()`].
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        self.grid.positions()
    }

    /// Sets every cell to the rule's empty value and resets the generation
    /// count.
    pub fn clear(&mut self) {
        self.grid.fill(self.rules.empty());
        self.generation = 0;
    }
    /// Sets every cell to a random value using the thread-local RNG and resets
    /// the generation count.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }
    /// Sets every cell to a random value drawn from `rng`, once per cell in
    /// traversal order, and resets the generation count.
    pub fn randomize_with<G: Rng + ?Sized>(&mut self, rng: &mut G) {
        for (x, y) in self.grid.positions() {
            self.grid[(x, y)] = self.rules.random(rng);
        }
        self.generation = 0;
    }
    /// Paints the live cells of a pattern with its top-left corner at the
    /// given position, wrapping around the edges.
    pub fn stamp(&mut self, pattern: &Pattern, x: isize, y: isize) {
        for &(dx, dy) in pattern.cells() {
            self.paint(x + dx as isize, y + dy as isize);
        }
    }

    /// Returns the number of cells that are not empty.
    pub fn population(&self) -> usize {
        let empty = self.rules.empty();
        self.grid.iter().filter(|&&cell| cell != empty).count()
    }
    /// Returns the sum of every cell's value, as measured by the rule's
    /// multiplication with a weight of 1.
    pub fn mass(&self) -> f64 {
        self.grid
            .iter()
            .map(|&cell| self.rules.mult(cell, 1.0))
            .sum()
    }

    /// Returns the convolution of the current generation with the rule's
    /// kernel, wrapping around the edges.
    pub fn convolve(&self) -> Grid<f64> {
        let kernel = self.rules.kernel();
        Grid::from_fn(self.size(), |i, j| {
            let (i, j) = (i as isize, j as isize);
            kernel
                .iter_offsets()
                .map(|((oi, oj), weight)| self.rules.mult(self.get(i + oi, j + oj), weight))
                .sum()
        })
    }

    /// Steps forward in the simulation by one generation.
    pub fn step(&mut self) {
        let convolution = self.convolve();
        let rules = &self.rules;
        let current = &self.grid;
        let next = Grid::from_fn(self.grid.size(), |i, j| {
            let growth = rules.growth_mapping(convolution[(i, j)]);
            rules.state_mapping(rules.add(current[(i, j)], growth))
        });
        self.grid = next;
        self.generation += 1;
        trace!("Stepped to generation {}", self.generation);
    }
    /// Steps forward in the simulation by the given number of generations.
    pub fn steps(&mut self, gens: usize) {
        for _ in 0..gens {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::rule::{Lenia, LeniaParams, Life, LifeState};

    #[test]
    fn test_automaton_starts_empty() {
        let automaton = Automaton::new(Life::new(), (6, 4));
        assert_eq!((6, 4), automaton.size());
        assert_eq!(0, automaton.population());
        assert_eq!(0, automaton.generation());
        automaton.for_cells(|x, y| {
            assert_eq!(LifeState::Dead, automaton.get(x as isize, y as isize));
        });
    }

    #[test]
    fn test_automaton_zero_size() {
        assert_eq!(
            Err(AutomatonError::EmptyGrid {
                width: 0,
                height: 5
            }),
            Automaton::try_new(Life::new(), (0, 5)).map(|_| ()),
        );
    }

    #[test]
    fn test_automaton_too_large() {
        for &size in &[(usize::MAX, 2), (2, usize::MAX), (isize::MAX as usize + 1, 1)] {
            assert_eq!(
                Err(AutomatonError::GridTooLarge {
                    width: size.0,
                    height: size.1,
                }),
                Automaton::try_new(Life::new(), size).map(|_| ()),
            );
        }
        // Lenia cells are 8 bytes wide.
        let lenia = Lenia::new(LeniaParams::default()).unwrap();
        assert!(matches!(
            Automaton::try_new(lenia, (isize::MAX as usize / 4, 1)),
            Err(AutomatonError::GridTooLarge { .. }),
        ));
    }

    #[test]
    #[should_panic(expected = "grid dimensions must be positive")]
    fn test_automaton_zero_size_panics() {
        Automaton::new(Life::new(), (3, 0));
    }

    #[test]
    fn test_automaton_wrapped_access() {
        let mut automaton = Automaton::new(Life::new(), (5, 7));
        automaton.set(-1, -1, LifeState::Alive);
        assert_eq!(LifeState::Alive, automaton.get(4, 6));
        assert_eq!(LifeState::Alive, automaton.get(9, 13));
        assert_eq!(LifeState::Alive, automaton.get(-6, -8));
        automaton.set(12, 3, LifeState::Alive);
        assert_eq!(LifeState::Alive, automaton.get(2, 3));
        assert_eq!(2, automaton.population());
        assert_eq!((255, 255, 255), automaton.color(2, -4).as_tuple());
    }

    #[test]
    fn test_automaton_for_cells_covers_grid_once() {
        let automaton = Automaton::new(Life::new(), (4, 3));
        let mut visited = vec![];
        automaton.for_cells(|x, y| visited.push((x, y)));
        assert_eq!(12, visited.len());
        let mut sorted = visited.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(12, sorted.len());
        assert_eq!((0, 0), visited[0]);
        assert_eq!((0, 1), visited[1]);
        assert_eq!((1, 0), visited[3]);
        assert_eq!(visited, automaton.positions().collect::<Vec<_>>());
    }

    #[test]
    fn test_automaton_clear_and_randomize() {
        let mut automaton = Automaton::new(Life::new(), (16, 16));
        automaton.randomize_with(&mut StdRng::seed_from_u64(42));
        let pop = automaton.population();
        assert!(pop > 0 && pop < 256);
        automaton.step();
        assert_eq!(1, automaton.generation());
        automaton.clear();
        assert_eq!(0, automaton.population());
        assert_eq!(0, automaton.generation());

        // Seeded randomization is reproducible.
        let mut a = Automaton::new(Life::new(), (16, 16));
        let mut b = Automaton::new(Life::new(), (16, 16));
        a.randomize_with(&mut StdRng::seed_from_u64(1234));
        b.randomize_with(&mut StdRng::seed_from_u64(1234));
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_automaton_convolve_counts_neighbors() {
        let mut automaton = Automaton::new(Life::new(), (5, 5));
        automaton.paint(0, 0);
        automaton.paint(1, 0);
        let conv = automaton.convolve();
        assert_eq!(1.0, conv[(0, 0)]);
        assert_eq!(1.0, conv[(1, 0)]);
        assert_eq!(2.0, conv[(0, 1)]);
        // Wraps around to the opposite edges.
        assert_eq!(1.0, conv[(4, 4)]);
        assert_eq!(2.0, conv[(0, 4)]);
        assert_eq!(0.0, conv[(3, 2)]);
    }

    #[test]
    fn test_automaton_mass() {
        let mut automaton = Automaton::new(Lenia::new(LeniaParams::default()).unwrap(), (8, 8));
        automaton.set(0, 0, 0.5);
        automaton.set(3, 3, 0.25);
        assert!((automaton.mass() - 0.75).abs() < 1e-12);
        assert_eq!(2, automaton.population());
    }
}
