//! [Command-line interface](Cli) (CLI) of the main binary.


use crate::{beta_significance, distance_matrix, each_sample};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
/// ---
/// The CLI is intended for parsing user input from the command-line in the main function. This is achieved with the `parse` function, which parses the command line arguments from [`std::env::args`](https://doc.rust-lang.org/std/env/fn.args.html).
/// ```no_run
/// use clap::Parser;
/// let args = fastunifrac::Cli::parse();
/// ```
/// The command-line arguments from `std::env::args` are simply a vector of space separated strings. Here is a manual example of setting the command-line input:
/// ```rust
/// # use clap::Parser;
/// let input = ["fastunifrac", "distance-matrix", "-i", "dm.txt", "-m", "mapping.txt", "--output-dir", "output"];
/// let args = fastunifrac::Cli::parse_from(input);
/// serde_json::to_string_pretty(&args)?;
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
/// With the following pretty JSON representation:
/// ```json
/// {
///   "command": {
///     "DistanceMatrix": {
///       "input": "dm.txt",
///       "mapping": "mapping.txt",
///       "output": "distance_matrix.html",
///       "output_dir": "output"
///     }
///   },
///   "verbosity": "Info"
/// }
/// ```
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(name = "fastunifrac", author, version)]
#[clap(about = "fastunifrac draws html heatmaps of distance matrices and beta significance results.")]
pub struct Cli {
    #[clap(subcommand)]
    /// Pass CLI arguments to a particular [Command].
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(hide_possible_values = false)]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants). Used to decide which heatmap report the CLI arguments should be passed to.
#[derive(Debug, Deserialize, Serialize, Subcommand)]
pub enum Command {
    /// Pass CLI arguments to the [distance matrix](crate::distance_matrix::run) report.
    /// <br>
    /// ```rust
    /// use clap::Parser;
    /// use fastunifrac::{cli::Command, Cli};
    ///
    /// let input = ["fastunifrac", "distance-matrix", "-i", "dm.txt"];
    /// let args = Cli::parse_from(input);
    /// assert!(matches!(args.command, Command::DistanceMatrix(_)));
    /// ```
    #[clap(about = "Create the heatmap of a distance matrix.")]
    DistanceMatrix(distance_matrix::Args),

    /// Pass CLI arguments to the [beta significance](crate::beta_significance::run) report.
    #[clap(about = "Create the raw and corrected heatmaps of pairwise beta significance results.")]
    BetaSignificance(beta_significance::Args),

    /// Pass CLI arguments to the [per-sample beta significance](crate::each_sample::run) report.
    #[clap(about = "Create the raw and corrected tables of per-sample beta significance results.")]
    EachSample(each_sample::Args),
}

// -----------------------------------------------------------------------------
// Verbosity
// -----------------------------------------------------------------------------

/// The output verbosity level.
///
/// Displayed in lowercase, to be used as the `RUST_LOG` level:
///
/// ```rust
/// use fastunifrac::Verbosity;
///
/// assert_eq!(Verbosity::Debug.to_string(), "debug");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, strum::Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Verbosity {
    #[default]
    Info,
    Warn,
    Debug,
    Error,
}
