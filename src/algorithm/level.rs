//! Finished level layouts

use std::fmt;

use crate::analysis::samples::Sample;
use crate::io::error::Result;
use crate::spatial::{TileGrid, TileVisual};

/// A fully collapsed grid together with how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLevel {
    /// Chosen tile for every position
    pub tiles: TileGrid<TileVisual>,
    /// Generation attempts used, including the successful one
    pub attempts: usize,
    /// Cells filled with the fallback tile after a contradiction
    pub fallbacks: usize,
}

impl GeneratedLevel {
    /// Level width
    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    /// Level height
    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    /// Tile at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<&TileVisual> {
        self.tiles.get(x, y)
    }

    /// Reuse the level as a training sample
    ///
    /// # Errors
    ///
    /// Propagates sample validation errors
    pub fn to_sample(&self, name: impl Into<String>) -> Result<Sample> {
        Sample::new(
            name,
            self.width(),
            self.height(),
            self.tiles.iter().copied().collect(),
        )
    }
}

impl fmt::Display for GeneratedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.as_array().rows() {
            let line: String = row.iter().map(|visual| visual.block_type.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
