//! Heatmaps of pairwise beta significance p-values.
//!
//! The input starts with a comment naming the test, followed by a header line
//! and one line per pair of samples:
//!
//! ```text
//! #Weighted UniFrac significance test
//! Sample1	Sample2	p value	p value (Bonferroni corrected)
//! s1	s2	0.01	0.15
//! s1	s3	0.0	<=1.0e-02
//! ```
//!
//! Both the raw and the corrected p-values are drawn, each in its own
//! [`Heatmap`], with the fixed [`ClassificationTable::beta_significance`] buckets.


use crate::heatmap::{ClassificationTable, Headers, Heatmap, HeatmapError, Matrix, Value};
use crate::{mapping::Mapping, report};
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use fastunifrac_table::Table;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use strum::{EnumIter, IntoEnumIterator};

/// Sample pair and its (raw, corrected) p-values.
pub type Pairs = BTreeMap<(String, String), (f64, f64)>;

// ----------------------------------------------------------------------------
// Args

/// Beta significance heatmap arguments.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Input pairwise beta significance results (tab-delimited).
    #[clap(short = 'i', long, required = true)]
    pub input: PathBuf,

    /// QIIME mapping file, used to describe samples in the heatmaps.
    #[clap(short = 'm', long)]
    pub mapping: Option<PathBuf>,

    /// Output html file.
    ///
    /// Relative paths are placed inside the output directory.
    #[clap(short = 'o', long, default_value = "beta_significance.html")]
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
            output: PathBuf::from("beta_significance.html"),
            output_dir: PathBuf::from("output"),
        }
    }
}

// ----------------------------------------------------------------------------
// P-Value

/// Which p-value of a pair to draw.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize)]
pub enum PValue {
    Raw,
    Corrected,
}

impl PValue {
    /// Heatmap name of the p-value.
    pub fn name(&self) -> &'static str {
        match self {
            PValue::Raw => "Raw values",
            PValue::Corrected => "Corrected values",
        }
    }

    /// Select this p-value from a (raw, corrected) pair.
    pub fn select(&self, values: (f64, f64)) -> f64 {
        match self {
            PValue::Raw => values.0,
            PValue::Corrected => values.1,
        }
    }
}

impl TryFrom<usize> for PValue {
    type Error = HeatmapError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PValue::Raw),
            1 => Ok(PValue::Corrected),
            _ => Err(HeatmapError::InvalidIndex(index)),
        }
    }
}

// ----------------------------------------------------------------------------
// Parsing

/// Pairwise beta significance results.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Pairwise {
    /// Name of the significance test, from the leading comment.
    pub test_name: String,
    pub pairs: Pairs,
}

/// Parse a p-value, where `<=1.0e-02` is read as `1.0e-02`.
///
/// ```rust
/// use fastunifrac::beta_significance::parse_p_value;
///
/// assert_eq!(parse_p_value("0.15")?, 0.15);
/// assert_eq!(parse_p_value("<=1.0e-02")?, 0.01);
/// assert_eq!(parse_p_value("<0.001")?, 0.001);
/// assert!(parse_p_value("significant").is_err());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn parse_p_value(value: &str) -> Result<f64, Report> {
    let value = value.trim();
    let number = match value.strip_prefix('<') {
        Some(rest) => rest.trim_start_matches('='),
        None => value,
    };
    number.trim().parse::<f64>().wrap_err_with(|| eyre!("Failed to parse p-value: {value:?}"))
}

/// Parse the test name and p-values of a pairwise beta significance [`Table`].
///
/// The table must be read with `#` as the comment prefix, the first comment is the test name.
pub fn parse(table: &Table<String>) -> Result<Pairwise, Report> {
    let test_name = table.comments.first().cloned().unwrap_or_else(|| {
        warn!("Beta significance results have no test name comment: {:?}", table.path);
        String::new()
    });

    if table.rows.is_empty() {
        return Err(eyre!("Beta significance results have no sample pairs: {:?}", table.path)
            .suggestion("Pairwise results are expected, one line per pair of samples."));
    }

    let mut pairs = Pairs::new();
    for (i, row) in table.rows.iter().enumerate() {
        let [s1, s2, p, p_corrected] = row.as_slice() else {
            return Err(eyre!("Row {i} must have 4 columns, found {}: {row:?}", row.len())
                .suggestion("Columns: sample 1, sample 2, p value, corrected p value"));
        };
        let values = (parse_p_value(p)?, parse_p_value(p_corrected)?);
        let key = (s1.trim().to_string(), s2.trim().to_string());
        if pairs.insert(key, values).is_some() {
            warn!("Duplicate sample pair {s1} and {s2}, keeping the last one.");
        }
    }

    Ok(Pairwise { test_name, pairs })
}

// ----------------------------------------------------------------------------
// Heatmaps

/// Lay out the pairwise p-values as a triangular matrix.
///
/// Pairs are walked in sorted order. Every new first sample starts a new row,
/// padded with [`Value::Missing`] up to and including the diagonal. Columns are
/// the first sample followed by every second sample in order of appearance.
///
/// `index` selects the raw (`0`) or the corrected (`1`) p-value, any other
/// index is a [`HeatmapError::InvalidIndex`].
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::beta_significance::{headers_and_matrix, Pairs};
/// use fastunifrac::heatmap::Value;
///
/// let mut pairs = Pairs::new();
/// pairs.insert(("s1".into(), "s2".into()), (0.01, 0.15));
/// pairs.insert(("s1".into(), "s3".into()), (0.0, 0.01));
/// pairs.insert(("s2".into(), "s3".into()), (0.82, 1.0));
///
/// let (headers, matrix) = headers_and_matrix(&pairs, 1)?;
/// assert_eq!(headers.vertical, ["s1", "s2"]);
/// assert_eq!(headers.horizontal, ["s1", "s2", "s3"]);
/// assert_eq!(matrix[1], [Value::Missing, Value::Missing, Value::Number(1.0)]);
///
/// assert!(headers_and_matrix(&pairs, 2).is_err());
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
pub fn headers_and_matrix(pairs: &Pairs, index: usize) -> Result<(Headers, Matrix), HeatmapError> {
    let p_value = PValue::try_from(index)?;

    let mut headers = Headers::default();
    let mut matrix = Matrix::new();
    let mut row = Vec::new();

    for ((s1, s2), values) in pairs {
        if headers.vertical.last() != Some(s1) {
            if headers.vertical.is_empty() {
                headers.horizontal.push(s1.clone());
            } else {
                matrix.push(row);
            }
            headers.vertical.push(s1.clone());
            row = vec![Value::Missing; headers.vertical.len()];
        }
        if !headers.horizontal.contains(s2) {
            headers.horizontal.push(s2.clone());
        }
        row.push(Value::Number(p_value.select(*values)));
    }
    if !headers.vertical.is_empty() {
        matrix.push(row);
    }

    Ok((headers, matrix))
}

/// Create the raw and corrected p-value [`Heatmap`]s.
pub fn heatmaps(pairwise: &Pairwise) -> Result<Vec<Heatmap>, Report> {
    PValue::iter()
        .map(|p_value| {
            let (headers, matrix) = headers_and_matrix(&pairwise.pairs, p_value as usize)?;
            let (rows, columns) = (matrix.len(), headers.horizontal.len());
            debug!("{}: {rows} rows x {columns} columns", p_value.name());
            Ok(Heatmap {
                name: p_value.name().to_string(),
                headers,
                matrix,
                table: ClassificationTable::beta_significance(),
                title: format!("{}: {}", pairwise.test_name, p_value.name()),
            })
        })
        .collect()
}

/// Read a pairwise beta significance file into its raw and corrected [`Heatmap`]s.
pub fn read<P>(path: &P) -> Result<Vec<Heatmap>, Report>
where
    P: AsRef<Path> + Debug,
{
    info!("Reading beta significance results: {path:?}");
    let table = Table::read(path, '\t', Some('#'))?;
    let pairwise = parse(&table)
        .wrap_err_with(|| eyre!("Failed to parse beta significance results: {path:?}"))?;
    info!("Test: {}, sample pairs: {}", pairwise.test_name, pairwise.pairs.len());
    heatmaps(&pairwise)
}

/// Create the html heatmap report of pairwise beta significance results.
pub fn run(args: &Args) -> Result<PathBuf, Report> {
    let heatmaps = read(&args.input)?;
    let mapping = args.mapping.as_ref().map(Mapping::read).transpose()?;

    report::write(&heatmaps, mapping.as_ref(), &args.output, &args.output_dir)
}
