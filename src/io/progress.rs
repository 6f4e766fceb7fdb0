//! Terminal progress display for level generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the cells of one level
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Create a bar for `total_cells` cells labelled with `name`
    pub fn new(name: &str, total_cells: usize) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(name.to_string());
        Self { bar }
    }

    /// Hidden bar, for quiet runs and tests
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self { bar }
    }

    /// Report collapsed cells and the current attempt
    pub fn update(&self, collapsed: usize, attempt: usize) {
        self.bar.set_position(collapsed as u64);
        if attempt > 1 {
            self.bar.set_message(format!("(attempt {attempt})"));
        }
    }

    /// Current position of the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Mark the level as finished
    pub fn finish(&self) {
        self.bar.finish();
    }
}
