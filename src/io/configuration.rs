//! Generation constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default level width in tiles
pub const DEFAULT_WIDTH: usize = 32;

/// Default level height in tiles
pub const DEFAULT_HEIGHT: usize = 16;

/// Default attempt limit when restarting after contradictions
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

// Collapses between progress refreshes
/// Decisions made per progress update
pub const PROGRESS_BATCH: usize = 64;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to generated level filenames
pub const OUTPUT_SUFFIX: &str = "_level";
/// Extension of dataset and level files
pub const DATASET_EXTENSION: &str = "json";
/// Pixels per tile in PNG previews
pub const DEFAULT_PREVIEW_SCALE: u32 = 8;
// Keeps preview images within sane memory bounds
/// Largest accepted preview scale
pub const MAX_PREVIEW_SCALE: u32 = 64;
