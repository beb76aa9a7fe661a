//! Sage Control - CLI for the Sage food-waste and nutrition coach.

use anyhow::Result;
use clap::Parser;
use sagectl::cli::Cli;
use sagectl::{commands, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    commands::dispatch(cli)
}
