//! A fixed-size grid of colours.

use pixelwars_protocol::{Delta, Rgb};

/// An `nx` by `ny` grid of [`Rgb`] cells, all black at creation.
///
/// Cells are stored row-major (`index = y * nx + x`) in one flat `Vec`,
/// so the shape can never drift: there is no inner `Vec` to resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    cells: Vec<Rgb>,
}

impl Grid {
    /// Creates a black grid. Callers guarantee `nx, ny > 0`.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            cells: vec![Rgb::BLACK; nx * ny],
        }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Returns the colour at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrites the colour at `(x, y)`. Returns `false` (and changes
    /// nothing) outside the grid.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Column-major copy: `columns()[x][y]` is the colour at `(x, y)`.
    pub fn columns(&self) -> Vec<Vec<Rgb>> {
        (0..self.nx)
            .map(|x| (0..self.ny).map(|y| self.cells[y * self.nx + x]).collect())
            .collect()
    }

    /// Every cell where `self` differs from `seen`, row-major (y, then x).
    ///
    /// Both grids must have the same shape.
    pub fn diff(&self, seen: &Grid) -> Vec<Delta> {
        debug_assert_eq!((self.nx, self.ny), (seen.nx, seen.ny));
        self.cells
            .iter()
            .zip(&seen.cells)
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(i, (now, _))| Delta {
                y: i / self.nx,
                x: i % self.nx,
                color: *now,
            })
            .collect()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.nx && y < self.ny).then(|| y * self.nx + x)
    }
}
