//! Cell ordering and weighted tile sampling

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::cell::WaveCell;
use crate::spatial::{TileGrid, TileVisual};

/// Source of uniform random integers for tile sampling
///
/// Injected into collapse so tests can script the drawn values.
pub trait RandomSource {
    /// Uniform integer in `0..=upper`
    fn draw_inclusive(&mut self, upper: u64) -> u64;
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for RandomSelector {
    fn draw_inclusive(&mut self, upper: u64) -> u64 {
        self.rng.random_range(0..=upper)
    }
}

impl RandomSource for StdRng {
    fn draw_inclusive(&mut self, upper: u64) -> u64 {
        self.random_range(0..=upper)
    }
}

/// Find the uncollapsed cell with the fewest legal options
///
/// Scans in raster order. Cells with zero entropy are only eligible when
/// `allow_zero_entropy` is set. The scan stops at the first cell whose entropy
/// equals the best achievable value (0 when zero is allowed, 1 otherwise), so
/// among ties the earliest cell in raster order wins. Returns `None` when no
/// eligible cell exists.
pub fn lowest_entropy_cell(
    grid: &TileGrid<WaveCell>,
    allow_zero_entropy: bool,
) -> Option<[usize; 2]> {
    let best_possible = usize::from(!allow_zero_entropy);
    let mut lowest: Option<([usize; 2], usize)> = None;

    for (position, cell) in grid.indexed_iter() {
        if !cell.can_collapse() {
            continue;
        }

        let entropy = cell.entropy();
        if entropy == 0 && !allow_zero_entropy {
            continue;
        }
        if entropy == best_possible {
            return Some(position);
        }
        if lowest.is_none_or(|(_, lowest_entropy)| entropy < lowest_entropy) {
            lowest = Some((position, entropy));
        }
    }

    lowest.map(|(position, _)| position)
}

/// Index chosen by weighted iterative subtraction
///
/// `draw` is expected in `0..=sum(weights)`. Zero weights are skipped; the first
/// index at which the running value drops to zero or below is chosen.
pub fn weighted_index<I>(weights: I, draw: u64) -> Option<usize>
where
    I: IntoIterator<Item = u64>,
{
    let mut remaining = draw;

    for (index, weight) in weights.into_iter().enumerate() {
        if weight == 0 {
            continue;
        }
        if remaining <= weight {
            return Some(index);
        }
        remaining -= weight;
    }

    None
}

/// Pick a candidate of a cell, visiting tile indices in ascending order
pub fn weighted_candidate(cell: &WaveCell, draw: u64) -> Option<TileVisual> {
    let slots = cell.superpositions();
    let tile_index = weighted_index(slots.iter().map(|slot| slot.support.weight()), draw)?;
    slots
        .get(tile_index)
        .map(|slot| TileVisual::new(tile_index, slot.block_type))
}

/// Draw a tile for an uncollapsed cell
///
/// Returns `None` when the cell has no positive weight to sample from.
pub fn sample_cell<R: RandomSource + ?Sized>(cell: &WaveCell, rng: &mut R) -> Option<TileVisual> {
    let total = cell.total_weight();
    if total == 0 {
        return None;
    }
    weighted_candidate(cell, rng.draw_inclusive(total))
}
