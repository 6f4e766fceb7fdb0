/// Per-cell superposition state
pub mod cell;
/// Superposition rebuild from collapsed neighbours
pub mod entropy;
/// Multi-phase driving loop with contradiction handling
pub mod executor;
/// Finished level layouts
pub mod level;
/// Allowed tile type sets
pub mod palette;
/// Lowest-entropy search and weighted sampling
pub mod selection;
/// Wave function collapse solver
pub mod solver;
