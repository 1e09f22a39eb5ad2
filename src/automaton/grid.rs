//! Species grid storage, toroidal addressing and neighbour sampling.

use std::collections::TryReserveError;

use super::species::{Species, EMPTY};

/// A row-major grid of species codes. `width` is the number of columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>, // one species code per cell
}

/// Axis neighbours of a cell in sampling order: up, down, left, right.
pub type Neighbors = [u8; 4];

impl Grid {
    /// Allocate an all-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Allocate an all-empty grid, reporting allocation failure instead of aborting.
    pub fn try_new(width: usize, height: usize) -> Result<Self, TryReserveError> {
        let size = width * height;
        let mut cells = Vec::new();
        cells.try_reserve_exact(size)?;
        cells.resize(size, EMPTY);
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw codes in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Linear index of an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Linear index of a signed coordinate, wrapped onto the torus.
    #[inline]
    pub fn wrapped_index(&self, row: isize, col: isize) -> usize {
        let r = row.rem_euclid(self.height as isize) as usize;
        let c = col.rem_euclid(self.width as isize) as usize;
        self.index_of(r, c)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if self.in_bounds(row, col) {
            Some(self.cells[self.index_of(row, col)])
        } else {
            None
        }
    }

    /// Overwrite one cell. Returns false if the coordinate is off the grid.
    pub fn set(&mut self, row: usize, col: usize, code: u8) -> bool {
        if !self.in_bounds(row, col) {
            return false;
        }
        let idx = self.index_of(row, col);
        self.cells[idx] = code;
        true
    }

    pub fn fill(&mut self, code: u8) {
        self.cells.fill(code);
    }

    /// Sample the four axis neighbours of `(row, col)`, wrapping at every edge.
    #[inline]
    pub fn neighbors(&self, row: usize, col: usize) -> Neighbors {
        let (r, c) = (row as isize, col as isize);
        [
            self.cells[self.wrapped_index(r - 1, c)],
            self.cells[self.wrapped_index(r + 1, c)],
            self.cells[self.wrapped_index(r, c - 1)],
            self.cells[self.wrapped_index(r, c + 1)],
        ]
    }

    /// Number of cells holding `species`.
    pub fn count(&self, species: Species) -> usize {
        let code = species.code();
        self.cells.iter().filter(|&&c| c == code).count()
    }

    /// Cell counts indexed like `Species::ALL`.
    pub fn population(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for &code in &self.cells {
            match Species::from_code(code) {
                Some(Species::Empty) => counts[0] += 1,
                Some(Species::A) => counts[1] += 1,
                Some(Species::B) => counts[2] += 1,
                Some(Species::C) => counts[3] += 1,
                None => {}
            }
        }
        counts
    }
}
