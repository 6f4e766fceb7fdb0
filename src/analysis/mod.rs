//! Learning adjacency statistics from sample grids

/// Adjacency ruleset and its builder
pub mod ruleset;
/// Validated sample grids
pub mod samples;
