//! Adjacency ruleset learned from sample grids
//!
//! For every centre tile index, neighbour direction and candidate tile index the
//! ruleset holds how often that candidate was observed at that offset from the
//! centre across the whole dataset. It is a frequency histogram, not a
//! probability table.

use ndarray::{Array3, Axis};
use tracing::debug;

use crate::analysis::samples::Sample;
use crate::io::error::{AlgorithmError, Result, malformed_sample};
use crate::spatial::{Direction, TileType, TileVisual, direction::DIRECTION_COUNT};

/// One cell of the adjacency table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleEntry {
    /// Number of observations of this candidate at this offset
    pub count: u32,
    /// Semantic type of the candidate tile
    pub block_type: TileType,
}

/// Immutable adjacency table indexed `[centre, direction, candidate]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    weights: Array3<RuleEntry>,
    block_types: Vec<Option<TileType>>,
    tile_frequencies: Vec<u64>,
}

impl Ruleset {
    /// Number of tile variants the table covers
    pub fn catalog_size(&self) -> usize {
        self.block_types.len()
    }

    /// Entry for a centre tile, direction and candidate tile
    pub fn entry(&self, centre: usize, direction: Direction, candidate: usize) -> Option<&RuleEntry> {
        self.weights.get([centre, direction.index(), candidate])
    }

    /// All candidate entries for a centre tile in one direction, by candidate index
    pub fn candidates(
        &self,
        centre: usize,
        direction: Direction,
    ) -> Option<ndarray::ArrayView1<'_, RuleEntry>> {
        (centre < self.catalog_size()).then(|| {
            self.weights
                .index_axis(Axis(0), centre)
                .index_axis_move(Axis(0), direction.index())
        })
    }

    /// Semantic type learned for a tile index, if it was ever observed
    pub fn block_type_of(&self, tile_index: usize) -> Option<TileType> {
        self.block_types.get(tile_index).copied().flatten()
    }

    /// Check a tile can be placed against this ruleset
    ///
    /// Indices never observed accept any type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The index lies outside the catalog
    /// - The index was learned with a different type
    pub fn check_visual(&self, visual: TileVisual) -> Result<()> {
        if visual.tile_index >= self.catalog_size() {
            return Err(AlgorithmError::InvalidTileIndex {
                index: visual.tile_index,
                catalog_size: self.catalog_size(),
            });
        }
        match self.block_type_of(visual.tile_index) {
            Some(learned) if learned != visual.block_type => Err(AlgorithmError::TileTypeMismatch {
                tile_index: visual.tile_index,
                learned,
                requested: visual.block_type,
            }),
            _ => Ok(()),
        }
    }

    /// Total observations recorded for a centre tile in one direction
    pub fn observation_count(&self, centre: usize, direction: Direction) -> u64 {
        self.candidates(centre, direction)
            .map_or(0, |row| row.iter().map(|entry| u64::from(entry.count)).sum())
    }

    /// How many times each tile index appeared in the samples
    pub fn tile_frequencies(&self) -> &[u64] {
        &self.tile_frequencies
    }
}

/// Learns a [`Ruleset`] from a set of samples
#[derive(Debug, Clone, Copy)]
pub struct RulesetBuilder {
    catalog_size: usize,
}

impl RulesetBuilder {
    /// Create a builder for a catalog of `catalog_size` tile variants
    pub const fn new(catalog_size: usize) -> Self {
        Self { catalog_size }
    }

    /// Count neighbour co-occurrences across every sample
    ///
    /// Neighbours that fall outside a sample contribute nothing for that
    /// direction. Accumulation is commutative, so sample order does not affect
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog size is zero
    /// - A sample uses a tile index outside the catalog (`MalformedSample`)
    /// - One tile index appears with two different block types
    pub fn build(&self, samples: &[Sample]) -> Result<Ruleset> {
        if self.catalog_size == 0 {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "catalog_size",
                value: "0".to_string(),
                reason: "catalog must contain at least one tile".to_string(),
            });
        }

        let block_types = self.learn_block_types(samples)?;

        let n = self.catalog_size;
        let mut weights = Array3::<RuleEntry>::default((n, DIRECTION_COUNT, n));
        let mut tile_frequencies = vec![0_u64; n];

        for sample in samples {
            let tiles = sample.tiles();
            for ([x, y], centre) in tiles.indexed_iter() {
                if let Some(frequency) = tile_frequencies.get_mut(centre.tile_index) {
                    *frequency += 1;
                }

                for direction in Direction::ALL {
                    let Some([nx, ny]) = direction.step(x, y, tiles.width(), tiles.height()) else {
                        continue;
                    };
                    let Some(neighbour) = tiles.get(nx, ny) else {
                        continue;
                    };
                    if let Some(entry) = weights.get_mut([
                        centre.tile_index,
                        direction.index(),
                        neighbour.tile_index,
                    ]) {
                        entry.count += 1;
                        entry.block_type = neighbour.block_type;
                    }
                }
            }
        }

        // Unobserved pairs still carry the candidate's type so palette filtering
        // depends on the candidate alone
        for mut row in weights.lanes_mut(Axis(2)) {
            for (entry, block_type) in row.iter_mut().zip(&block_types) {
                if let (0, Some(block_type)) = (entry.count, block_type) {
                    entry.block_type = *block_type;
                }
            }
        }

        debug!(
            catalog_size = n,
            samples = samples.len(),
            observed_tiles = block_types.iter().flatten().count(),
            "ruleset built"
        );

        Ok(Ruleset {
            weights,
            block_types,
            tile_frequencies,
        })
    }

    /// Validate every sample against the catalog and record each index's type
    fn learn_block_types(&self, samples: &[Sample]) -> Result<Vec<Option<TileType>>> {
        let mut block_types: Vec<Option<TileType>> = vec![None; self.catalog_size];

        for sample in samples {
            for visual in sample.tiles().iter() {
                let slot = block_types.get_mut(visual.tile_index).ok_or_else(|| {
                    malformed_sample(
                        &sample.name(),
                        &format!(
                            "tile index {} is outside the catalog of {} tiles",
                            visual.tile_index, self.catalog_size
                        ),
                    )
                })?;

                match *slot {
                    Some(known) if known != visual.block_type => {
                        return Err(AlgorithmError::InconsistentTileType {
                            sample: sample.name().to_string(),
                            tile_index: visual.tile_index,
                            first: known,
                            second: visual.block_type,
                        });
                    }
                    Some(_) => {}
                    None => *slot = Some(visual.block_type),
                }
            }
        }

        Ok(block_types)
    }
}
