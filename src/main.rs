//! CLI entry point for learning adjacency rules and generating a level

use clap::Parser;
use tilecollapse::io::cli::{Cli, GenerationRunner};
use tilecollapse::io::logging::init_tracing;

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let runner = GenerationRunner::new(cli);
    runner.run()?;
    Ok(())
}
