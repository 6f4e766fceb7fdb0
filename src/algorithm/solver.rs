//! Wave function collapse over a fixed-size grid
//!
//! Each cell moves from uncollapsed to collapsed; the only way back is an
//! explicit reset. Entropy caches are rebuilt on demand from collapsed
//! neighbours, so callers decide when to recalculate.
//!
//! Changing the palette invalidates every cached total. Call
//! [`WaveFunctionSolver::recalculate_all_entropy`] after
//! [`WaveFunctionSolver::set_palette`] before querying entropy again.

use tracing::trace;

use crate::algorithm::cell::WaveCell;
use crate::algorithm::entropy::recalculate_cell;
use crate::algorithm::palette::Palette;
use crate::algorithm::selection::{RandomSource, lowest_entropy_cell, sample_cell, weighted_index};
use crate::analysis::ruleset::Ruleset;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{Direction, TileGrid, TileVisual, direction::neighbours};

/// Grid of wave cells plus the active palette, bound to one ruleset
#[derive(Debug, Clone)]
pub struct WaveFunctionSolver<'r> {
    ruleset: &'r Ruleset,
    grid: TileGrid<WaveCell>,
    palette: Palette,
}

impl<'r> WaveFunctionSolver<'r> {
    /// Allocate a grid of uncollapsed cells with an empty palette
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - `catalog_size` differs from the ruleset's catalog
    pub fn new(
        ruleset: &'r Ruleset,
        width: usize,
        height: usize,
        catalog_size: usize,
    ) -> Result<Self> {
        let mut solver = Self {
            ruleset,
            grid: TileGrid::filled(0, 0, WaveCell::new(0))?,
            palette: Palette::empty(),
        };
        solver.initialize(width, height, catalog_size)?;
        Ok(solver)
    }

    /// Reallocate the grid, reset every cell and clear the palette
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The grid is too large to allocate
    /// - `catalog_size` differs from the ruleset's catalog
    pub fn initialize(&mut self, width: usize, height: usize, catalog_size: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "grid size",
                value: format!("{width}x{height}"),
                reason: "grid dimensions must be non-zero".to_string(),
            });
        }
        if catalog_size != self.ruleset.catalog_size() {
            return Err(AlgorithmError::CatalogMismatch {
                ruleset: self.ruleset.catalog_size(),
                solver: catalog_size,
            });
        }

        self.grid = TileGrid::filled(width, height, WaveCell::new(catalog_size))?;
        self.palette = Palette::empty();
        Ok(())
    }

    /// Grid width
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Grid height
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Ruleset the solver reads from
    pub const fn ruleset(&self) -> &'r Ruleset {
        self.ruleset
    }

    /// Active palette
    pub const fn palette(&self) -> Palette {
        self.palette
    }

    /// Replace the allowed types
    ///
    /// Cached totals are stale until entropy is recalculated.
    pub fn set_palette(&mut self, palette: Palette) {
        trace!(%palette, "palette set");
        self.palette = palette;
    }

    /// Cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Result<&WaveCell> {
        self.grid.checked(x, y)
    }

    /// All cells
    pub const fn grid(&self) -> &TileGrid<WaveCell> {
        &self.grid
    }

    /// Force a cell to a known tile without sampling
    ///
    /// Neighbour caches are not refreshed.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid, the tile index is
    /// outside the catalog, or the type differs from the one learned for it
    pub fn preset_cell(&mut self, x: usize, y: usize, visual: TileVisual) -> Result<()> {
        self.ruleset.check_visual(visual)?;
        self.grid.checked_mut(x, y)?.commit(visual);
        Ok(())
    }

    /// Return a cell to the uncollapsed state with cleared superpositions
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn reset_cell(&mut self, x: usize, y: usize) -> Result<()> {
        self.grid.checked_mut(x, y)?.reset();
        Ok(())
    }

    /// Reset every cell, keeping the palette
    pub fn reset(&mut self) {
        for cell in self.grid.iter_mut() {
            cell.reset();
        }
    }

    /// Rebuild one cell's superpositions from its collapsed neighbours
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn recalculate_entropy(&mut self, x: usize, y: usize) -> Result<()> {
        let collapsed = self.collapsed_neighbours(x, y);
        let cell = self.grid.checked_mut(x, y)?;
        recalculate_cell(cell, collapsed, self.ruleset, &self.palette);
        Ok(())
    }

    /// Rebuild every cell
    pub fn recalculate_all_entropy(&mut self) {
        let constraints: Vec<_> = self
            .grid
            .positions()
            .map(|[x, y]| self.collapsed_neighbours(x, y))
            .collect();

        for (cell, collapsed) in self.grid.iter_mut().zip(constraints) {
            recalculate_cell(cell, collapsed, self.ruleset, &self.palette);
        }
    }

    /// Direction and tile index of every collapsed neighbour of `(x, y)`
    fn collapsed_neighbours(&self, x: usize, y: usize) -> Vec<(Direction, usize)> {
        neighbours(x, y, self.width(), self.height())
            .filter_map(|(direction, [nx, ny])| {
                self.grid
                    .get(nx, ny)
                    .and_then(WaveCell::collapsed)
                    .map(|visual| (direction, visual.tile_index))
            })
            .collect()
    }

    /// Rebuild the in-bounds neighbours of `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn recalculate_neighbours(&mut self, x: usize, y: usize) -> Result<()> {
        self.grid.checked(x, y)?;
        let positions: Vec<_> = neighbours(x, y, self.width(), self.height()).collect();
        for (_, [nx, ny]) in positions {
            self.recalculate_entropy(nx, ny)?;
        }
        Ok(())
    }

    /// Uncollapsed cell with the fewest legal options, first in raster order on ties
    pub fn lowest_entropy_cell(&self, allow_zero_entropy: bool) -> Option<[usize; 2]> {
        lowest_entropy_cell(&self.grid, allow_zero_entropy)
    }

    /// Commit a cell to a weighted-random candidate
    ///
    /// Returns `Ok(false)` and leaves the cell untouched when it has no positive
    /// weight or is already collapsed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn collapse_cell<R: RandomSource + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        rng: &mut R,
    ) -> Result<bool> {
        let cell = self.grid.checked_mut(x, y)?;
        if !cell.can_collapse() {
            return Ok(false);
        }

        match sample_cell(cell, rng) {
            Some(visual) => {
                cell.commit(visual);
                trace!(x, y, tile = visual.tile_index, "cell collapsed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether any neighbour of `(x, y)` is collapsed
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn is_constrained(&self, x: usize, y: usize) -> Result<bool> {
        self.grid.checked(x, y)?;
        Ok(neighbours(x, y, self.width(), self.height()).any(|(_, [nx, ny])| {
            self.grid
                .get(nx, ny)
                .is_some_and(|neighbour| !neighbour.can_collapse())
        }))
    }

    /// First uncollapsed cell in raster order without any collapsed neighbour
    pub fn first_unconstrained_cell(&self) -> Option<[usize; 2]> {
        self.grid.indexed_iter().find_map(|([x, y], cell)| {
            (cell.can_collapse() && !self.is_constrained(x, y).unwrap_or(true)).then_some([x, y])
        })
    }

    /// Collapse a cell from the sample tile frequencies of in-palette types
    ///
    /// Used for cells no collapsed neighbour constrains yet, such as the first
    /// cell of a blank grid. Returns `Ok(false)` when the cell is already
    /// collapsed or no in-palette tile was ever observed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn seed_cell<R: RandomSource + ?Sized>(
        &mut self,
        x: usize,
        y: usize,
        rng: &mut R,
    ) -> Result<bool> {
        if !self.grid.checked(x, y)?.can_collapse() {
            return Ok(false);
        }

        let ruleset = self.ruleset;
        let palette = self.palette;
        let weights: Vec<u64> = ruleset
            .tile_frequencies()
            .iter()
            .enumerate()
            .map(|(tile_index, &frequency)| {
                match ruleset.block_type_of(tile_index) {
                    Some(block_type) if palette.contains(block_type) => frequency,
                    _ => 0,
                }
            })
            .collect();

        let total: u64 = weights.iter().sum();
        if total == 0 {
            return Ok(false);
        }

        let Some(tile_index) = weighted_index(weights, rng.draw_inclusive(total)) else {
            return Ok(false);
        };
        let Some(block_type) = ruleset.block_type_of(tile_index) else {
            return Ok(false);
        };

        self.grid
            .checked_mut(x, y)?
            .commit(TileVisual::new(tile_index, block_type));
        trace!(x, y, tile = tile_index, "cell seeded");
        Ok(true)
    }

    /// Number of cells still undecided
    pub fn uncollapsed_count(&self) -> usize {
        self.grid.iter().filter(|cell| cell.can_collapse()).count()
    }

    /// Committed tiles, `None` where undecided
    pub fn collapsed_tiles(&self) -> TileGrid<Option<TileVisual>> {
        self.grid.map(WaveCell::collapsed)
    }
}
