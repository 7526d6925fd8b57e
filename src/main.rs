use clap::Parser;
use color_eyre::eyre::{Report, Result};
use fastunifrac::{beta_significance, cli::Command, distance_matrix, each_sample, Cli};
use log::{debug, info};

fn main() -> Result<(), Report> {
    // ------------------------------------------------------------------------
    // CLI Setup

    // Parse CLI parameters
    let args = Cli::parse();

    // initialize color_eyre crate for colorized logs
    color_eyre::install()?;

    // Set logging/verbosity level via RUST_LOG
    std::env::set_var("RUST_LOG", args.verbosity.to_string());

    // initialize env_logger crate for logging/verbosity level
    env_logger::init();

    debug!("CLI arguments: {}", serde_json::to_string_pretty(&args)?);

    // check which CLI command we're running (distance-matrix, beta-significance, each-sample)
    let html = match args.command {
        Command::DistanceMatrix(args) => distance_matrix::run(&args)?,
        Command::BetaSignificance(args) => beta_significance::run(&args)?,
        Command::EachSample(args) => each_sample::run(&args)?,
    };
    info!("Done: {html:?}");

    Ok(())
}
