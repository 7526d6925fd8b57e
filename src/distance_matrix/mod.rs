//! Heatmap of a symmetric QIIME distance matrix.
//!
//! The first line holds the sample ids (after an empty cell), every other line
//! holds a sample id followed by its distances:
//!
//! ```text
//! 	a	b	c	d
//! a	0	1	2	3
//! b	1	0	4	5
//! c	2	4	0	6
//! d	3	5	6	0
//! ```


use crate::heatmap::{generate_trans_values, get_upper_triangle, Headers, Heatmap, Matrix, Value};
use crate::{mapping::Mapping, report};
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use fastunifrac_table::Table;
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Name and table title of the distance matrix heatmap.
pub const NAME: &str = "Distance matrix";

// ----------------------------------------------------------------------------
// Args

/// Distance matrix heatmap arguments.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Input distance matrix (tab-delimited).
    #[clap(short = 'i', long, required = true)]
    pub input: PathBuf,

    /// QIIME mapping file, used to describe samples in the heatmap.
    #[clap(short = 'm', long)]
    pub mapping: Option<PathBuf>,

    /// Output html file.
    ///
    /// Relative paths are placed inside the output directory.
    #[clap(short = 'o', long, default_value = "distance_matrix.html")]
    pub output: PathBuf,

    /// Output directory.
    ///
    /// If the directory does not exist, it will be created.
    #[clap(long, default_value = "output")]
    pub output_dir: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Args::new()
    }
}

impl Args {
    pub fn new() -> Self {
        Args {
            input: PathBuf::new(),
            mapping: None,
            output: PathBuf::from("distance_matrix.html"),
            output_dir: PathBuf::from("output"),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions

/// Parse the sample ids and distances of a distance matrix [`Table`].
///
/// A leading empty header cell is dropped, so files with or without the
/// initial tab are both accepted. Rows keep their own length.
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::distance_matrix;
/// use fastunifrac::heatmap::Value;
/// use fastunifrac_table::Table;
///
/// let table = Table::from_reader("\ta\tb\na\t0\t0.5\nb\t0.5\t0\n".as_bytes(), '\t', None)?;
/// let (headers, matrix) = distance_matrix::parse(&table)?;
///
/// assert_eq!(headers, ["a", "b"]);
/// assert_eq!(matrix[0], [Value::Number(0.0), Value::Number(0.5)]);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn parse(table: &Table<String>) -> Result<(Vec<String>, Matrix), Report> {
    let headers = match table.headers.first() {
        Some(h) if h.trim().is_empty() => table.headers[1..].to_vec(),
        _ => table.headers.clone(),
    };
    let headers = headers.into_iter().map(|h| h.trim().to_string()).collect_vec();

    if table.rows.is_empty() {
        return Err(eyre!("Distance matrix has no rows: {:?}", table.path)
            .suggestion("The first line holds sample ids, the following lines hold distances."));
    }
    if table.rows.len() != headers.len() {
        warn!(
            "Distance matrix has {} sample ids but {} rows: {:?}",
            headers.len(),
            table.rows.len(),
            table.path
        );
    }

    let matrix = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (sample, values) = row
                .split_first()
                .ok_or_else(|| eyre!("Distance matrix row {i} is empty."))?;
            let sample = sample.trim();
            if headers.get(i).map(String::as_str) != Some(sample) {
                let expected = headers.get(i);
                warn!("Distance matrix row {i} ({sample}) does not match its sample id: {expected:?}");
            }

            values
                .iter()
                .map(|v| {
                    v.trim().parse::<f64>().map(Value::Number).wrap_err_with(|| {
                        eyre!("Failed to parse distance of sample {sample}: {v:?}")
                    })
                })
                .collect::<Result<Vec<_>, Report>>()
        })
        .collect::<Result<Matrix, Report>>()?;

    Ok((headers, matrix))
}

/// Create the [`Heatmap`] of a distance matrix.
///
/// The matrix is symmetric, so only its upper triangle is kept and the
/// quartiles of those distances define the buckets.
pub fn heatmap(headers: Vec<String>, matrix: &[Vec<Value>]) -> Result<Heatmap, Report> {
    let matrix = get_upper_triangle(matrix);
    let table = generate_trans_values(&matrix)?;
    debug!("Distance matrix classification table: {table:?}");

    let heatmap = Heatmap {
        name: NAME.to_string(),
        headers: Headers { vertical: headers.clone(), horizontal: headers },
        matrix,
        table,
        title: NAME.to_string(),
    };

    Ok(heatmap)
}

/// Read a distance matrix file into its [`Heatmap`].
pub fn read<P>(path: &P) -> Result<Heatmap, Report>
where
    P: AsRef<Path> + Debug,
{
    info!("Reading distance matrix: {path:?}");
    let table = Table::read(path, '\t', None)?;
    let (headers, matrix) =
        parse(&table).wrap_err_with(|| eyre!("Failed to parse distance matrix: {path:?}"))?;
    heatmap(headers, &matrix)
}

/// Create the html heatmap report of a distance matrix.
pub fn run(args: &Args) -> Result<PathBuf, Report> {
    let heatmap = read(&args.input)?;
    let mapping = args.mapping.as_ref().map(Mapping::read).transpose()?;

    report::write(&[heatmap], mapping.as_ref(), &args.output, &args.output_dir)
}
