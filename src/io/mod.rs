/// Command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// JSON datasets and level export
pub mod dataset;
/// Error types
pub mod error;
/// PNG previews
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Progress display
pub mod progress;
