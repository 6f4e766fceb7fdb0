//! Per-cell superposition state for the wave grid

use crate::spatial::{TileType, TileVisual};

/// Support state of one candidate tile within an uncollapsed cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Support {
    /// Neither supported nor ruled out
    #[default]
    Neutral,
    /// Supported by every collapsed neighbour so far, with accumulated weight
    Weighted(u64),
    /// Ruled out by at least one collapsed neighbour
    Pruned,
}

impl Support {
    /// Sampling weight contributed by this candidate
    pub const fn weight(self) -> u64 {
        match self {
            Self::Weighted(weight) => weight,
            Self::Neutral | Self::Pruned => 0,
        }
    }

    /// Integer encoding: `0` neutral, positive weight, `-1` pruned
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Neutral => 0,
            Self::Weighted(weight) => i64::try_from(weight).unwrap_or(i64::MAX),
            Self::Pruned => -1,
        }
    }

    /// Whether the candidate is currently a legal, weighted choice
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Weighted(weight) if weight > 0)
    }
}

/// One superposition slot, indexed by catalog tile index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Superposition {
    /// Accumulated support for this candidate
    pub support: Support,
    /// Semantic type of the candidate
    pub block_type: TileType,
}

/// One grid position in the solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveCell {
    superpositions: Vec<Superposition>,
    total_weight: u64,
    total_types: usize,
    collapsed: Option<TileVisual>,
}

impl WaveCell {
    /// Create an uncollapsed cell with neutral slots for every catalog entry
    pub fn new(catalog_size: usize) -> Self {
        Self {
            superpositions: vec![Superposition::default(); catalog_size],
            total_weight: 0,
            total_types: 0,
            collapsed: None,
        }
    }

    /// Create an uncollapsed cell from explicit slots, deriving the totals
    pub fn from_superpositions(superpositions: Vec<Superposition>) -> Self {
        let mut cell = Self {
            superpositions,
            total_weight: 0,
            total_types: 0,
            collapsed: None,
        };
        cell.total_weight = cell
            .superpositions
            .iter()
            .map(|slot| slot.support.weight())
            .sum();
        cell.recount_types();
        cell
    }

    /// Return to the uncollapsed state with every slot neutral
    pub fn reset(&mut self) {
        self.clear_superpositions();
        self.collapsed = None;
    }

    /// Neutralise every slot and zero the cached totals
    pub(crate) fn clear_superpositions(&mut self) {
        self.superpositions.fill(Superposition::default());
        self.total_weight = 0;
        self.total_types = 0;
    }

    /// Superposition slots by catalog index
    pub fn superpositions(&self) -> &[Superposition] {
        &self.superpositions
    }

    pub(crate) fn superpositions_mut(&mut self) -> &mut [Superposition] {
        &mut self.superpositions
    }

    /// Sum of all positive candidate weights
    pub const fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Count of candidates with positive weight, used as the entropy measure
    pub const fn entropy(&self) -> usize {
        self.total_types
    }

    /// The committed tile, if any
    pub const fn collapsed(&self) -> Option<TileVisual> {
        self.collapsed
    }

    /// Whether the cell is still undecided
    pub const fn can_collapse(&self) -> bool {
        self.collapsed.is_none()
    }

    pub(crate) const fn set_total_weight(&mut self, total_weight: u64) {
        self.total_weight = total_weight;
    }

    /// Recount supported candidates after a rebuild
    pub(crate) fn recount_types(&mut self) {
        self.total_types = self
            .superpositions
            .iter()
            .filter(|slot| slot.support.is_supported())
            .count();
    }

    /// Commit the cell to a tile
    pub(crate) const fn commit(&mut self, visual: TileVisual) {
        self.collapsed = Some(visual);
    }

    /// Whether the cached totals agree with the slots
    pub fn totals_consistent(&self) -> bool {
        let weight: u64 = self
            .superpositions
            .iter()
            .map(|slot| slot.support.weight())
            .sum();
        let types = self
            .superpositions
            .iter()
            .filter(|slot| slot.support.is_supported())
            .count();
        weight == self.total_weight && types == self.total_types
    }
}
