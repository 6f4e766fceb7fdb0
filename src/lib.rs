//! Tile-based level generation by wave function collapse over learned adjacency rules
//!
//! A ruleset is learned from hand-authored sample grids by counting which tile
//! appears next to which, in each of the eight neighbour directions. The solver
//! then fills a fresh grid cell by cell, always taking the most constrained cell
//! and sampling a tile weighted by the counts its collapsed neighbours allow.

#![forbid(unsafe_code)]

/// Palette, superposition state, entropy ordering, collapse, and the driving loop
pub mod algorithm;
/// Sample grids and adjacency ruleset learning
pub mod analysis;
/// Input/output operations, configuration, logging and error handling
pub mod io;
/// Grids, neighbour directions and tile vocabulary
pub mod spatial;

pub use algorithm::executor::{GenerationConfig, LevelGenerator};
pub use algorithm::solver::WaveFunctionSolver;
pub use analysis::ruleset::{Ruleset, RulesetBuilder};
pub use io::error::{AlgorithmError, Result};
