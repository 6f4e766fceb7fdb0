//! Hand-authored sample grids the ruleset is learned from

use crate::io::error::{Result, malformed_sample};
use crate::spatial::{TileGrid, TileVisual};

/// Immutable rectangular grid of tile choices
///
/// Tiles are stored row-major with row 0 at the top, matching the raster
/// order used by the neighbour directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    name: String,
    tiles: TileGrid<TileVisual>,
}

impl Sample {
    /// Validate and wrap a row-major list of tiles
    ///
    /// # Errors
    ///
    /// Returns `MalformedSample` if either dimension is zero or the tile count
    /// differs from `width * height`
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        tiles: Vec<TileVisual>,
    ) -> Result<Self> {
        let name = name.into();

        if width == 0 || height == 0 {
            return Err(malformed_sample(
                &name,
                &format!("dimensions {width}x{height} must be non-zero"),
            ));
        }

        let expected = width
            .checked_mul(height)
            .ok_or_else(|| malformed_sample(&name, &"dimensions overflow"))?;
        if tiles.len() != expected {
            return Err(malformed_sample(
                &name,
                &format!(
                    "declared {width}x{height} ({expected} tiles) but found {} tiles",
                    tiles.len()
                ),
            ));
        }

        let tiles = TileGrid::from_row_major(width, height, tiles)
            .map_err(|e| malformed_sample(&name, &e))?;

        Ok(Self { name, tiles })
    }

    /// Build a sample from text rows, one glyph per tile
    ///
    /// Each character is looked up in `legend`; handy for authoring small
    /// samples inline.
    ///
    /// # Errors
    ///
    /// Returns `MalformedSample` if rows differ in length or a glyph is missing
    /// from the legend
    pub fn from_rows(
        name: impl Into<String>,
        rows: &[&str],
        legend: &[(char, TileVisual)],
    ) -> Result<Self> {
        let name = name.into();
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(malformed_sample(
                    &name,
                    &format!("row {y} has a different length from row 0"),
                ));
            }
            for glyph in row.chars() {
                let visual = legend
                    .iter()
                    .find(|(key, _)| *key == glyph)
                    .map(|(_, visual)| *visual)
                    .ok_or_else(|| malformed_sample(&name, &format!("unknown glyph '{glyph}'")))?;
                tiles.push(visual);
            }
        }

        Self::new(name, width, height, tiles)
    }

    /// Sample name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    /// Tile at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<&TileVisual> {
        self.tiles.get(x, y)
    }

    /// The underlying tile grid
    pub const fn tiles(&self) -> &TileGrid<TileVisual> {
        &self.tiles
    }

    /// Largest tile index used, if any
    pub fn max_tile_index(&self) -> Option<usize> {
        self.tiles.iter().map(|visual| visual.tile_index).max()
    }
}
