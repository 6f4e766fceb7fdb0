use bitvec::prelude::*;
use std::fmt;
use std::str::FromStr;

use crate::io::error::AlgorithmError;
use crate::spatial::TileType;

/// Set of semantic tile types the solver may place
///
/// Backed by a single 32-bit mask indexed by [`TileType::ordinal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Palette {
    bits: BitArr!(for 32, in u32),
}

impl Palette {
    /// Create a palette with no types allowed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a palette allowing every type
    pub fn all() -> Self {
        TileType::ALL.into_iter().collect()
    }

    /// Allow a type
    pub fn insert(&mut self, tile_type: TileType) {
        self.bits.set(tile_type.ordinal(), true);
    }

    /// Disallow a type
    pub fn remove(&mut self, tile_type: TileType) {
        self.bits.set(tile_type.ordinal(), false);
    }

    /// Test whether a type is allowed
    pub fn contains(&self, tile_type: TileType) -> bool {
        self.bits.get(tile_type.ordinal()).as_deref() == Some(&true)
    }

    /// Return a copy with `tile_type` allowed
    #[must_use]
    pub fn with(mut self, tile_type: TileType) -> Self {
        self.insert(tile_type);
        self
    }

    /// Test if no types are allowed
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count allowed types
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Allowed types in ordinal order
    pub fn types(&self) -> Vec<TileType> {
        self.bits
            .iter_ones()
            .filter_map(|ordinal| TileType::ALL.get(ordinal).copied())
            .collect()
    }

    /// Raw mask, bit `n` set when the type with ordinal `n` is allowed
    pub fn mask(&self) -> u32 {
        let [mask] = self.bits.into_inner();
        mask
    }

    /// Palette from a raw mask, ignoring bits beyond the known types
    pub fn from_mask(mask: u32) -> Self {
        let known = u32::MAX >> (32 - TileType::COUNT);
        Self {
            bits: BitArray::new([mask & known]),
        }
    }

    /// Union of two palettes
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_mask(self.mask() | other.mask())
    }
}

impl FromIterator<TileType> for Palette {
    fn from_iter<I: IntoIterator<Item = TileType>>(iter: I) -> Self {
        let mut palette = Self::empty();
        for tile_type in iter {
            palette.insert(tile_type);
        }
        palette
    }
}

impl FromStr for Palette {
    type Err = AlgorithmError;

    /// Parse a comma-separated list of type names, or `all`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        s.split(',')
            .filter(|name| !name.trim().is_empty())
            .map(TileType::from_str)
            .collect()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types().into_iter().map(TileType::name).collect();
        write!(f, "{}", names.join(","))
    }
}
