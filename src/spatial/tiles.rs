//! Semantic tile vocabulary and concrete tile choices
//!
//! `TileType` is the closed set of semantic block categories a level can hold.
//! `TileVisual` pairs a catalog index (an opaque key into the external tile
//! catalog) with the semantic type of that catalog entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::io::error::{AlgorithmError, invalid_parameter};

/// Semantic block category of a tile
///
/// The ordinal doubles as the bit index inside a [`Palette`](crate::algorithm::palette::Palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TileType {
    /// Empty space
    #[default]
    None,
    /// Fully solid ground or wall
    Solid,
    /// Platform that can be jumped through from below
    OneWay,
    /// Climbable ladder segment
    Ladder,
    /// Hazard that kills on contact
    Spike,
    /// Collectible coin
    Coin,
    /// Climbable vine
    Vine,
    /// Decorative foliage
    Foliage,
    /// Readable sign
    Sign,
    /// Light source
    Torch,
    /// Player spawn marker
    Start,
    /// Level exit marker
    Finish,
}

impl TileType {
    /// Number of semantic types
    pub const COUNT: usize = 12;

    /// Every type in ordinal order
    pub const ALL: [Self; Self::COUNT] = [
        Self::None,
        Self::Solid,
        Self::OneWay,
        Self::Ladder,
        Self::Spike,
        Self::Coin,
        Self::Vine,
        Self::Foliage,
        Self::Sign,
        Self::Torch,
        Self::Start,
        Self::Finish,
    ];

    /// Ordinal value, also the palette bit index
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Lower-case name accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::OneWay => "one-way",
            Self::Ladder => "ladder",
            Self::Spike => "spike",
            Self::Coin => "coin",
            Self::Vine => "vine",
            Self::Foliage => "foliage",
            Self::Sign => "sign",
            Self::Torch => "torch",
            Self::Start => "start",
            Self::Finish => "finish",
        }
    }

    /// Single character used in text previews
    pub const fn glyph(self) -> char {
        match self {
            Self::None => '.',
            Self::Solid => '#',
            Self::OneWay => '=',
            Self::Ladder => 'H',
            Self::Spike => '^',
            Self::Coin => 'o',
            Self::Vine => '|',
            Self::Foliage => '*',
            Self::Sign => '?',
            Self::Torch => 'i',
            Self::Start => 'S',
            Self::Finish => 'F',
        }
    }

    /// RGBA colour used in image previews
    pub const fn preview_color(self) -> [u8; 4] {
        match self {
            Self::None => [0, 0, 0, 0],
            Self::Solid => [94, 72, 52, 255],
            Self::OneWay => [160, 120, 70, 255],
            Self::Ladder => [200, 160, 90, 255],
            Self::Spike => [200, 40, 40, 255],
            Self::Coin => [250, 210, 40, 255],
            Self::Vine => [60, 150, 60, 255],
            Self::Foliage => [110, 190, 90, 255],
            Self::Sign => [180, 140, 110, 255],
            Self::Torch => [255, 150, 30, 255],
            Self::Start => [60, 120, 230, 255],
            Self::Finish => [230, 60, 200, 255],
        }
    }
}

// Palette masks are 32 bits wide
const _: () = assert!(TileType::COUNT <= 32);

impl TryFrom<u8> for TileType {
    type Error = AlgorithmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| invalid_parameter("blockType", &value, &"unknown block type ordinal"))
    }
}

impl From<TileType> for u8 {
    fn from(value: TileType) -> Self {
        value as Self
    }
}

impl FromStr for TileType {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .iter()
            .copied()
            .find(|tile_type| tile_type.name().replace('-', "") == normalized)
            .ok_or_else(|| invalid_parameter("tile type", &s, &"unknown tile type name"))
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete renderable tile choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileVisual {
    /// Index into the external tile catalog
    pub tile_index: usize,
    /// Semantic type of that catalog entry
    pub block_type: TileType,
}

impl TileVisual {
    /// Create a tile choice
    pub const fn new(tile_index: usize, block_type: TileType) -> Self {
        Self {
            tile_index,
            block_type,
        }
    }
}
