//! CLI entry point for the motif pattern tool

use clap::Parser;
use motiftile::io::cli::{Cli, PatternRunner};
use motiftile::io::logging::init_logging;

fn main() -> motiftile::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging_config());

    let mut runner = PatternRunner::new(cli);
    runner.run().map(|_| ())
}
