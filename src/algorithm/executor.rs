use tracing::{debug, info, warn};

use crate::{
    algorithm::level::GeneratedLevel,
    algorithm::palette::Palette,
    algorithm::selection::RandomSelector,
    algorithm::solver::WaveFunctionSolver,
    analysis::ruleset::Ruleset,
    io::configuration::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, PROGRESS_BATCH},
    io::error::{AlgorithmError, Result, invalid_parameter},
    io::progress::GenerationProgress,
    spatial::TileVisual,
};

/// Tile forced at a fixed position before sampling starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Grid position (x, y)
    pub position: [usize; 2],
    /// Tile to place
    pub visual: TileVisual,
}

/// What to do when an uncollapsed cell has no legal candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContradictionPolicy {
    /// Stop with a `Contradiction` error
    #[default]
    Fail,
    /// Place this neutral tile and carry on
    Fallback(TileVisual),
    /// Start the whole pass again, up to `max_attempts` times
    Restart,
}

/// Parameters for one level generation
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Grid width in tiles
    pub width: usize,
    /// Grid height in tiles
    pub height: usize,
    /// Seed for the tile sampler
    pub seed: u64,
    /// Palettes applied in order, one per phase
    pub phases: Vec<Palette>,
    /// Tiles fixed before sampling
    pub presets: Vec<Preset>,
    /// Contradiction handling
    pub contradiction: ContradictionPolicy,
    /// Upper bound on attempts when restarting
    pub max_attempts: usize,
}

impl GenerationConfig {
    /// Single-phase configuration allowing every tile type
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: DEFAULT_SEED,
            phases: vec![Palette::all()],
            presets: Vec::new(),
            contradiction: ContradictionPolicy::Fail,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Progress of an incremental generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Cells are still undecided
    InProgress {
        /// Number of uncollapsed cells
        remaining: usize,
    },
    /// Every cell is collapsed
    Complete,
}

/// Drives the solver until the grid is filled
///
/// Phases run in order: within a phase the lowest-entropy cell is collapsed and
/// its neighbours refreshed until no cell with a legal option remains. A cell
/// with no collapsed neighbour at all is seeded from the sample tile
/// frequencies. Leftover cells either move on to the next phase's palette or,
/// in the last phase, are contradictions handled per [`ContradictionPolicy`].
/// There is no backtracking.
pub struct LevelGenerator<'r> {
    /// Wave grid and palette
    pub solver: WaveFunctionSolver<'r>,
    config: GenerationConfig,
    random_selector: RandomSelector,
    phase: usize,
    attempt: usize,
    fallbacks: usize,
    collapses: usize,
}

impl<'r> LevelGenerator<'r> {
    /// Validate the configuration and prepare the first attempt
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No phase palette is configured or `max_attempts` is zero
    /// - The grid size is zero
    /// - A preset or fallback tile lies outside the grid or catalog
    /// - A preset or fallback tile disagrees with its learned type
    pub fn new(ruleset: &'r Ruleset, config: GenerationConfig) -> Result<Self> {
        if config.phases.is_empty() {
            return Err(invalid_parameter(
                "phases",
                &0,
                &"at least one palette is required",
            ));
        }
        if config.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &0,
                &"at least one attempt is required",
            ));
        }
        if let ContradictionPolicy::Fallback(visual) = config.contradiction {
            ruleset.check_visual(visual)?;
        }

        let solver =
            WaveFunctionSolver::new(ruleset, config.width, config.height, ruleset.catalog_size())?;
        let random_selector = RandomSelector::new(config.seed);

        let mut generator = Self {
            solver,
            config,
            random_selector,
            phase: 0,
            attempt: 1,
            fallbacks: 0,
            collapses: 0,
        };
        generator.begin_attempt()?;
        Ok(generator)
    }

    /// Current attempt, starting at 1
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    /// Index of the active phase
    pub const fn phase(&self) -> usize {
        self.phase
    }

    /// Cells collapsed by sampling across all attempts
    pub const fn collapses(&self) -> usize {
        self.collapses
    }

    /// Generation parameters
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn begin_attempt(&mut self) -> Result<()> {
        self.solver.reset();
        self.phase = 0;
        self.fallbacks = 0;

        let palette = self.config.phases.first().copied().unwrap_or_default();
        self.solver.set_palette(palette);

        for preset in &self.config.presets {
            let [x, y] = preset.position;
            self.solver.preset_cell(x, y, preset.visual)?;
        }
        self.solver.recalculate_all_entropy();

        debug!(attempt = self.attempt, %palette, "attempt started");
        Ok(())
    }

    /// Make one decision: a collapse, a phase change, or a contradiction outcome
    ///
    /// # Errors
    ///
    /// Returns an error if a contradiction occurs under `Fail`, or every restart
    /// is used up under `Restart`
    pub fn step(&mut self) -> Result<GenerationStatus> {
        loop {
            if self.solver.uncollapsed_count() == 0 {
                return Ok(GenerationStatus::Complete);
            }

            if let Some([x, y]) = self.solver.lowest_entropy_cell(false) {
                if self.solver.collapse_cell(x, y, &mut self.random_selector)? {
                    self.solver.recalculate_neighbours(x, y)?;
                    self.collapses += 1;
                    return Ok(self.status());
                }
                return self.handle_contradiction([x, y]);
            }

            if let Some([x, y]) = self.solver.first_unconstrained_cell() {
                if self.solver.seed_cell(x, y, &mut self.random_selector)? {
                    self.solver.recalculate_neighbours(x, y)?;
                    self.collapses += 1;
                    return Ok(self.status());
                }
            }

            if let Some(&palette) = self.config.phases.get(self.phase + 1) {
                self.phase += 1;
                self.solver.set_palette(palette);
                self.solver.recalculate_all_entropy();
                debug!(phase = self.phase, %palette, "phase advanced");
                continue;
            }

            let position = self.solver.lowest_entropy_cell(true).ok_or(
                AlgorithmError::Contradiction {
                    position: [0, 0],
                    attempt: self.attempt,
                },
            )?;
            return self.handle_contradiction(position);
        }
    }

    fn handle_contradiction(&mut self, position: [usize; 2]) -> Result<GenerationStatus> {
        let [x, y] = position;
        warn!(x, y, attempt = self.attempt, phase = self.phase, "contradiction");

        match self.config.contradiction {
            ContradictionPolicy::Fail => Err(AlgorithmError::Contradiction {
                position,
                attempt: self.attempt,
            }),
            ContradictionPolicy::Fallback(visual) => {
                self.solver.preset_cell(x, y, visual)?;
                self.solver.recalculate_neighbours(x, y)?;
                self.fallbacks += 1;
                Ok(self.status())
            }
            ContradictionPolicy::Restart => {
                if self.attempt >= self.config.max_attempts {
                    return Err(AlgorithmError::AttemptsExhausted {
                        attempts: self.attempt,
                    });
                }
                self.attempt += 1;
                self.begin_attempt()?;
                Ok(self.status())
            }
        }
    }

    fn status(&self) -> GenerationStatus {
        match self.solver.uncollapsed_count() {
            0 => GenerationStatus::Complete,
            remaining => GenerationStatus::InProgress { remaining },
        }
    }

    /// Make at most `budget` decisions
    ///
    /// Lets a caller spread generation over several ticks.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::step`]
    pub fn advance(&mut self, budget: usize) -> Result<GenerationStatus> {
        let mut status = self.status();
        for _ in 0..budget {
            status = self.step()?;
            if status == GenerationStatus::Complete {
                break;
            }
        }
        Ok(status)
    }

    /// Run to completion, reporting progress if a display is given
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::step`]
    pub fn run(&mut self, progress: Option<&GenerationProgress>) -> Result<GeneratedLevel> {
        let total = self.solver.width() * self.solver.height();

        loop {
            let status = self.advance(PROGRESS_BATCH)?;
            if let Some(progress) = progress {
                let remaining = match status {
                    GenerationStatus::InProgress { remaining } => remaining,
                    GenerationStatus::Complete => 0,
                };
                progress.update(total - remaining, self.attempt);
            }
            if status == GenerationStatus::Complete {
                break;
            }
        }

        if let Some(progress) = progress {
            progress.finish();
        }
        self.finish()
    }

    /// Take the finished level
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if cells are still uncollapsed
    pub fn finish(&self) -> Result<GeneratedLevel> {
        let remaining = self.solver.uncollapsed_count();
        if remaining > 0 {
            return Err(invalid_parameter(
                "level",
                &remaining,
                &"cells are still uncollapsed",
            ));
        }

        let tiles = self
            .solver
            .collapsed_tiles()
            .map(|visual| visual.unwrap_or_default());

        info!(
            width = tiles.width(),
            height = tiles.height(),
            attempts = self.attempt,
            fallbacks = self.fallbacks,
            collapses = self.collapses,
            "level generated"
        );

        Ok(GeneratedLevel {
            tiles,
            attempts: self.attempt,
            fallbacks: self.fallbacks,
        })
    }
}
