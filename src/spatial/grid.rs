//! Fixed-size 2D grids addressed by `(x, y)`
//!
//! Storage is an `ndarray` matrix indexed `[row, col]`, i.e. `[y, x]`, with row 0
//! at the top. Raster order is row-major from the top-left cell. Cells never
//! reference each other; neighbours are found by coordinate arithmetic.

use ndarray::Array2;

use crate::io::error::{AlgorithmError, Result};

/// Rectangular grid of cells with `(x, y)` addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid<T> {
    cells: Array2<T>,
}

impl<T: Clone> TileGrid<T> {
    /// Create a grid filled with copies of `value`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the grid is too large to allocate
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        cell_count::<T>(width, height)?;
        Ok(Self {
            cells: Array2::from_elem((height, width), value),
        })
    }
}

/// Cells in a `width` x `height` grid, bounded so the storage fits in `isize`
fn cell_count<T>(width: usize, height: usize) -> Result<usize> {
    let limit = isize::MAX.unsigned_abs() / size_of::<T>().max(1);
    width
        .checked_mul(height)
        .filter(|&count| count <= limit)
        .ok_or_else(|| AlgorithmError::InvalidParameter {
            parameter: "grid size",
            value: format!("{width}x{height}"),
            reason: "grid is too large to allocate".to_string(),
        })
}

impl<T> TileGrid<T> {
    /// Wrap an existing `[row, col]` matrix
    pub const fn from_array(cells: Array2<T>) -> Self {
        Self { cells }
    }

    /// Build a grid from row-major cells, row 0 first
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `cells.len() != width * height`
    pub fn from_row_major(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        let expected = cell_count::<T>(width, height)?;
        let found = cells.len();
        Array2::from_shape_vec((height, width), cells)
            .map(Self::from_array)
            .map_err(|_shape_error| AlgorithmError::InvalidParameter {
                parameter: "cells",
                value: found.to_string(),
                reason: format!("expected {expected} cells for a {width}x{height} grid"),
            })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.cells.get([y, x])
    }

    /// Mutable cell at `(x, y)`
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.cells.get_mut([y, x])
    }

    /// Cell at `(x, y)`, reporting out-of-range coordinates as an error
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn checked(&self, x: usize, y: usize) -> Result<&T> {
        let dimensions = (self.width(), self.height());
        self.get(x, y).ok_or(AlgorithmError::OutOfBounds {
            position: [x, y],
            grid_dimensions: dimensions,
        })
    }

    /// Mutable cell at `(x, y)`, reporting out-of-range coordinates as an error
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn checked_mut(&mut self, x: usize, y: usize) -> Result<&mut T> {
        let dimensions = (self.width(), self.height());
        self.get_mut(x, y).ok_or(AlgorithmError::OutOfBounds {
            position: [x, y],
            grid_dimensions: dimensions,
        })
    }

    /// All positions `[x, y]` in raster order
    pub fn positions(&self) -> impl Iterator<Item = [usize; 2]> + use<T> {
        let width = self.width();
        let height = self.height();
        (0..height).flat_map(move |y| (0..width).map(move |x| [x, y]))
    }

    /// Cells with their positions in raster order
    pub fn indexed_iter(&self) -> impl Iterator<Item = ([usize; 2], &T)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([col, row], cell))
    }

    /// Cells in raster order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Mutable cells in raster order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> TileGrid<U> {
        TileGrid {
            cells: self.cells.map(f),
        }
    }

    /// Underlying `[row, col]` matrix
    pub const fn as_array(&self) -> &Array2<T> {
        &self.cells
    }
}
