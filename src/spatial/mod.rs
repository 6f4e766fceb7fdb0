//! Spatial data structures and tile vocabulary
//!
//! This module contains spatial-related functionality including:
//! - Fixed-size grids addressed by `(x, y)`
//! - The eight neighbour directions and their inverses
//! - Tile types and concrete tile choices

/// Neighbour directions in raster order
pub mod direction;
/// Fixed-size grid container
pub mod grid;
/// Semantic tile types and tile visuals
pub mod tiles;

pub use direction::Direction;
pub use grid::TileGrid;
pub use tiles::{TileType, TileVisual};
