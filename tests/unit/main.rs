//! Unit tests mirrored on the `src` tree, plus shared fixtures

mod io;
mod spatial;

use std::collections::VecDeque;

use tilecollapse::algorithm::selection::RandomSource;
use tilecollapse::analysis::samples::Sample;
use tilecollapse::spatial::{TileType, TileVisual};
use tilecollapse::{Ruleset, RulesetBuilder};

/// Air, index 0
pub const AIR: TileVisual = TileVisual::new(0, TileType::None);
/// Ground, index 1
pub const GROUND: TileVisual = TileVisual::new(1, TileType::Solid);
/// Coin, index 2
pub const COIN: TileVisual = TileVisual::new(2, TileType::Coin);
/// Spike, index 3
pub const SPIKE: TileVisual = TileVisual::new(3, TileType::Spike);

/// Glyph legend shared by the inline samples
pub const LEGEND: [(char, TileVisual); 4] = [('.', AIR), ('#', GROUND), ('o', COIN), ('^', SPIKE)];

/// Sample from text rows using [`LEGEND`]
pub fn sample(name: &str, rows: &[&str]) -> Sample {
    Sample::from_rows(name, rows, &LEGEND).expect("Failed to build sample")
}

/// Ruleset over the four-tile catalog learned from text samples
pub fn ruleset(samples: &[&[&str]]) -> Ruleset {
    let samples: Vec<Sample> = samples
        .iter()
        .enumerate()
        .map(|(index, rows)| sample(&format!("sample {index}"), rows))
        .collect();
    RulesetBuilder::new(LEGEND.len())
        .build(&samples)
        .expect("Failed to build ruleset")
}

/// Replays fixed draws and records the upper bounds it was asked for
#[derive(Debug, Default)]
pub struct ScriptedSource {
    draws: VecDeque<u64>,
    /// Upper bounds passed to each draw, in call order
    pub uppers: Vec<u64>,
}

impl ScriptedSource {
    /// Source that returns `draws` in order, then zero
    pub fn new(draws: &[u64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            uppers: Vec::new(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn draw_inclusive(&mut self, upper: u64) -> u64 {
        self.uppers.push(upper);
        let draw = self.draws.pop_front().unwrap_or(0);
        assert!(draw <= upper, "scripted draw {draw} exceeds upper bound {upper}");
        draw
    }
}
