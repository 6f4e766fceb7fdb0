//! Command-line interface for learning a ruleset and generating a level

use crate::algorithm::executor::{ContradictionPolicy, GenerationConfig, LevelGenerator, Preset};
use crate::algorithm::palette::Palette;
use crate::analysis::ruleset::Ruleset;
use crate::io::configuration::{
    DATASET_EXTENSION, DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_PREVIEW_SCALE, DEFAULT_SEED,
    DEFAULT_WIDTH, OUTPUT_SUFFIX,
};
use crate::io::dataset::{Dataset, save_level};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::export_level_as_png;
use crate::io::progress::GenerationProgress;
use crate::spatial::TileVisual;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

/// A preset given on the command line as `x,y,tile_index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetSpec {
    /// Column
    pub x: usize,
    /// Row, 0 at the top
    pub y: usize,
    /// Catalog index to place
    pub tile_index: usize,
}

impl FromStr for PresetSpec {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let &[x, y, tile_index] = parts.as_slice() else {
            return Err(invalid_parameter("preset", &s, &"expected x,y,tile_index"));
        };

        let parse = |value: &str| {
            value
                .parse::<usize>()
                .map_err(|e| invalid_parameter("preset", &s, &e))
        };

        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
            tile_index: parse(tile_index)?,
        })
    }
}

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile levels by wave function collapse over learned adjacency rules"
)]
/// Command-line arguments for the level generator
pub struct Cli {
    /// Dataset JSON file or directory of sample JSON files
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Level width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Level height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Allowed tile types for one phase, comma separated (repeat for more phases)
    #[arg(short, long = "phase", value_name = "TYPES")]
    pub phases: Vec<Palette>,

    /// Fixed tile as x,y,tile_index (repeatable)
    #[arg(long = "preset", value_name = "X,Y,INDEX")]
    pub presets: Vec<PresetSpec>,

    /// Tile index placed on contradicting cells
    #[arg(short, long, value_name = "INDEX", conflicts_with = "restart")]
    pub fallback: Option<usize>,

    /// Restart the whole pass on contradiction
    #[arg(short, long)]
    pub restart: bool,

    /// Attempt limit when restarting
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Override the dataset's catalog size
    #[arg(long)]
    pub catalog_size: Option<usize>,

    /// Output level JSON (defaults next to the dataset)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write a PNG preview
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Pixels per tile in the PNG preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SCALE)]
    pub scale: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Contradiction handling selected by the flags
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback tile was never observed in the dataset
    pub fn contradiction_policy(&self, ruleset: &Ruleset) -> Result<ContradictionPolicy> {
        if let Some(tile_index) = self.fallback {
            return Ok(ContradictionPolicy::Fallback(resolve_tile(ruleset, tile_index)?));
        }
        if self.restart {
            return Ok(ContradictionPolicy::Restart);
        }
        Ok(ContradictionPolicy::Fail)
    }

    /// Build the generation parameters against a learned ruleset
    ///
    /// # Errors
    ///
    /// Returns an error if a preset or fallback names an unknown tile
    pub fn generation_config(&self, ruleset: &Ruleset) -> Result<GenerationConfig> {
        let mut config = GenerationConfig::new(self.width, self.height);
        config.seed = self.seed;
        config.max_attempts = self.max_attempts;
        config.contradiction = self.contradiction_policy(ruleset)?;
        if !self.phases.is_empty() {
            config.phases.clone_from(&self.phases);
        }
        config.presets = self
            .presets
            .iter()
            .map(|spec| {
                Ok(Preset {
                    position: [spec.x, spec.y],
                    visual: resolve_tile(ruleset, spec.tile_index)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(config)
    }

    /// Where the generated level JSON is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.dataset))
    }
}

/// Look up a catalog index's learned block type
fn resolve_tile(ruleset: &Ruleset, tile_index: usize) -> Result<TileVisual> {
    ruleset
        .block_type_of(tile_index)
        .map(|block_type| TileVisual::new(tile_index, block_type))
        .ok_or(AlgorithmError::InvalidTileIndex {
            index: tile_index,
            catalog_size: ruleset.catalog_size(),
        })
}

/// `<stem>_level.json` beside the dataset
///
/// A dataset directory gets its level next to it, never inside, so the output
/// is not learned from on the next run.
fn default_output_path(dataset: &Path) -> PathBuf {
    let stem = dataset.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.{DATASET_EXTENSION}", stem.to_string_lossy());

    dataset
        .parent()
        .map_or_else(|| PathBuf::from(&output_name), |parent| parent.join(&output_name))
}

/// Runs one CLI invocation end to end
pub struct GenerationRunner {
    cli: Cli,
}

impl GenerationRunner {
    /// Create a runner for the parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the dataset, learn the ruleset, generate and export the level
    ///
    /// # Errors
    ///
    /// Returns an error if loading, generation, or export fails
    pub fn run(&self) -> Result<PathBuf> {
        let start_time = Instant::now();

        let dataset = Dataset::load(&self.cli.dataset, self.cli.catalog_size)?;
        let ruleset = dataset.ruleset()?;
        let config = self.cli.generation_config(&ruleset)?;

        let mut generator = LevelGenerator::new(&ruleset, config)?;

        let name = self
            .cli
            .dataset
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = self
            .cli
            .should_show_progress()
            .then(|| GenerationProgress::new(&name, self.cli.width * self.cli.height));

        let level = generator.run(progress.as_ref())?;

        let output_path = self.cli.output_path();
        save_level(&level, &name, &output_path)?;

        if let Some(png_path) = &self.cli.png {
            export_level_as_png(&level, self.cli.scale, png_path)?;
        }

        info!(
            output = %output_path.display(),
            attempts = level.attempts,
            fallbacks = level.fallbacks,
            elapsed_ms = start_time.elapsed().as_millis(),
            "level written"
        );

        Ok(output_path)
    }
}
