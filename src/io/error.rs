//! Error types and context management for ruleset learning and level generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all library operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A sample grid does not match its declared shape or the catalog
    MalformedSample {
        /// Name of the offending sample
        sample: String,
        /// Description of what's wrong with the sample
        reason: String,
    },

    /// One tile index was observed with two different semantic types
    InconsistentTileType {
        /// Name of the sample where the conflict was detected
        sample: String,
        /// The tile index carrying conflicting types
        tile_index: usize,
        /// Type recorded first
        first: crate::spatial::tiles::TileType,
        /// Type encountered later
        second: crate::spatial::tiles::TileType,
    },

    /// A placed tile disagrees with the type learned for its index
    TileTypeMismatch {
        /// Catalog index of the tile
        tile_index: usize,
        /// Type the ruleset learned for the index
        learned: crate::spatial::tiles::TileType,
        /// Type the caller asked for
        requested: crate::spatial::tiles::TileType,
    },

    /// Tile index exceeds the catalog
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Size of the tile catalog
        catalog_size: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Coordinates fall outside the wave grid
    OutOfBounds {
        /// Requested position (x, y)
        position: [usize; 2],
        /// Grid dimensions (width, height)
        grid_dimensions: (usize, usize),
    },

    /// Solver and ruleset disagree on the number of tile variants
    CatalogMismatch {
        /// Catalog size the ruleset was learned with
        ruleset: usize,
        /// Catalog size requested for the solver
        solver: usize,
    },

    /// A cell has no legal candidate and the policy does not recover
    Contradiction {
        /// Position of the contradicting cell (x, y)
        position: [usize; 2],
        /// Generation attempt in which it occurred (1-based)
        attempt: usize,
    },

    /// Every allowed restart ended in a contradiction
    AttemptsExhausted {
        /// Number of attempts made
        attempts: usize,
    },

    /// Dataset or level JSON could not be parsed or written
    Dataset {
        /// File involved in the operation
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSample { sample, reason } => {
                write!(f, "Malformed sample '{sample}': {reason}")
            }
            Self::InconsistentTileType {
                sample,
                tile_index,
                first,
                second,
            } => {
                write!(
                    f,
                    "Sample '{sample}' gives tile {tile_index} type {second:?}, previously seen as {first:?}"
                )
            }
            Self::TileTypeMismatch {
                tile_index,
                learned,
                requested,
            } => {
                write!(
                    f,
                    "Tile {tile_index} was learned as {learned} but placed as {requested}"
                )
            }
            Self::InvalidTileIndex {
                index,
                catalog_size,
            } => {
                write!(
                    f,
                    "Tile index {index} is out of bounds (catalog size: {catalog_size})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds {
                position,
                grid_dimensions,
            } => {
                write!(
                    f,
                    "Position ({}, {}) is outside the grid (size {}x{})",
                    position[0], position[1], grid_dimensions.0, grid_dimensions.1
                )
            }
            Self::CatalogMismatch { ruleset, solver } => {
                write!(
                    f,
                    "Ruleset was built for {ruleset} tiles but the solver expects {solver}"
                )
            }
            Self::Contradiction { position, attempt } => {
                write!(
                    f,
                    "Contradiction at ({}, {}) during attempt {attempt}",
                    position[0], position[1]
                )
            }
            Self::AttemptsExhausted { attempts } => {
                write!(f, "Generation failed after {attempts} attempts")
            }
            Self::Dataset { path, source } => {
                write!(f, "Dataset error in '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dataset { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for library results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed sample error
pub fn malformed_sample(sample: &impl ToString, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::MalformedSample {
        sample: sample.to_string(),
        reason: reason.to_string(),
    }
}
