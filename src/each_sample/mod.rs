//! Per-sample beta significance p-values, coloured by significance level.
//!
//! The input starts with a comment naming the test, followed by a header line
//! and one line per sample:
//!
//! ```text
//! #Weighted UniFrac significance test
//! sample	p value	p value (Bonferroni corrected)
//! s1	0.005	0.08
//! s2	0.0	<=1.0e-02
//! ```
//!
//! The report has one table of raw and one table of corrected p-values, both
//! classified with [`ClassificationTable::beta_significance`], and a legend.


use crate::beta_significance::{parse_p_value, PValue};
use crate::heatmap::{BucketId, ClassificationTable, HeatmapError, Value};
use crate::report::{self, bucket_colors, escape, legend_html};
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use fastunifrac_table::Table;
use indoc::formatdoc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Write};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Sample and its (raw, corrected) p-values.
pub type Samples = BTreeMap<String, (f64, f64)>;

// ----------------------------------------------------------------------------
// Args

/// Per-sample beta significance report arguments.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Input per-sample beta significance results (tab-delimited).
    #[clap(short = 'i', long, required = true)]
    pub input: PathBuf,

    /// Output html file.
    ///
    /// Relative paths are placed inside the output directory.
    #[clap(short = 'o', long, default_value = "each_sample.html")]
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
            output: PathBuf::from("each_sample.html"),
            output_dir: PathBuf::from("output"),
        }
    }
}

// ----------------------------------------------------------------------------
// Parsing

/// Per-sample beta significance results.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct EachSample {
    /// Name of the significance test, from the leading comment.
    pub test_name: String,
    pub samples: Samples,
}

/// Parse the test name and p-values of a per-sample beta significance [`Table`].
///
/// The table must be read with `#` as the comment prefix, the first comment is the test name.
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::each_sample::parse;
/// use fastunifrac_table::Table;
///
/// let text = "#Permutation test\nsample\tp\tp corrected\ns1\t0.005\t0.08\ns2\t0.0\t<=1.0e-02\n";
/// let table = Table::from_reader(text.as_bytes(), '\t', Some('#'))?;
/// let each = parse(&table)?;
///
/// assert_eq!(each.test_name, "Permutation test");
/// assert_eq!(each.samples["s2"], (0.0, 0.01));
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn parse(table: &Table<String>) -> Result<EachSample, Report> {
    let test_name = table.comments.first().cloned().unwrap_or_else(|| {
        warn!("Beta significance results have no test name comment: {:?}", table.path);
        String::new()
    });

    if table.rows.is_empty() {
        return Err(eyre!("Beta significance results have no samples: {:?}", table.path)
            .suggestion("Per-sample results are expected, one line per sample."));
    }

    let mut samples = Samples::new();
    for (i, row) in table.rows.iter().enumerate() {
        let [sample, p, p_corrected] = row.as_slice() else {
            return Err(eyre!("Row {i} must have 3 columns, found {}: {row:?}", row.len())
                .suggestion("Columns: sample, p value, corrected p value"));
        };
        let values = (parse_p_value(p)?, parse_p_value(p_corrected)?);
        if samples.insert(sample.trim().to_string(), values).is_some() {
            warn!("Duplicate sample {sample}, keeping the last one.");
        }
    }

    Ok(EachSample { test_name, samples })
}

// ----------------------------------------------------------------------------
// Classification

/// Classify one p-value of every sample, in sample order.
///
/// ```rust
/// use fastunifrac::beta_significance::PValue;
/// use fastunifrac::each_sample::{classify, Samples};
/// use fastunifrac::ClassificationTable;
///
/// let mut samples = Samples::new();
/// samples.insert("s1".into(), (0.005, 0.08));
/// samples.insert("s2".into(), (0.0, 0.01));
///
/// let table = ClassificationTable::beta_significance();
/// let raw = classify(&samples, PValue::Raw, &table)?;
/// assert_eq!(raw, [("s1", 0.005, 2_usize), ("s2", 0.0, 1)]);
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
pub fn classify<'s>(
    samples: &'s Samples,
    p_value: PValue,
    table: &ClassificationTable,
) -> Result<Vec<(&'s str, f64, BucketId)>, HeatmapError> {
    samples
        .iter()
        .map(|(sample, values)| {
            let value = p_value.select(*values);
            Ok((sample.as_str(), value, table.classify(Value::Number(value))?))
        })
        .collect()
}

// ----------------------------------------------------------------------------
// Html

/// Html table of one p-value per sample, each cell coloured by its bucket.
fn sample_table(
    title: &str,
    rows: &[(&str, f64, BucketId)],
    colors: &HashMap<BucketId, String>,
) -> Result<String, Report> {
    let mut html = String::new();
    writeln!(html, "<table cellpadding=2 cellspacing=2 border=1>")?;
    writeln!(html, "<tr><td colspan=2 class=\"header\">{}</td></tr>", escape(title))?;
    writeln!(html, "<tr><td class=\"header\">Sample</td><td class=\"header\" nowrap>P Value</td></tr>")?;
    for (sample, value, bucket) in rows {
        let background =
            colors.get(bucket).ok_or_else(|| eyre!("Bucket {bucket} has no colour."))?;
        writeln!(
            html,
            "<tr><td class=\"row_header\">{}</td><td class=\"normal\" style=\"background-color:{background}\" nowrap>{value}</td></tr>",
            escape(sample)
        )?;
    }
    writeln!(html, "</table>")?;
    Ok(html)
}

/// Html page with the raw and corrected p-value tables and the significance legend.
pub fn html(each: &EachSample) -> Result<String, Report> {
    let table = ClassificationTable::beta_significance();
    let colors = bucket_colors(&table);

    let mut tables = String::new();
    for p_value in PValue::iter() {
        let rows = classify(&each.samples, p_value, &table)
            .wrap_err_with(|| eyre!("Failed to classify {}", p_value.name()))?;
        debug!("{}: {} samples", p_value.name(), rows.len());
        let title = format!("{}: {}", each.test_name, p_value.name());
        tables.push_str(&sample_table(&title, &rows, &colors)?);
    }

    let legend = legend_html(&table, &colors)?;
    let body = formatdoc!(
        "{tables}
        <table cellpadding=2 cellspacing=2 border=1>
        <tr><td class=\"header\">Color description</td></tr>
        <tr><td>
        {legend}
        </td></tr>
        </table>
        "
    );

    Ok(report::page(&body))
}

/// Read a per-sample beta significance file.
pub fn read<P>(path: &P) -> Result<EachSample, Report>
where
    P: AsRef<Path> + Debug,
{
    info!("Reading per-sample beta significance results: {path:?}");
    let table = Table::read(path, '\t', Some('#'))?;
    let each = parse(&table)
        .wrap_err_with(|| eyre!("Failed to parse beta significance results: {path:?}"))?;
    info!("Test: {}, samples: {}", each.test_name, each.samples.len());
    Ok(each)
}

/// Create the html report of per-sample beta significance results.
pub fn run(args: &Args) -> Result<PathBuf, Report> {
    let each = read(&args.input)?;
    report::write_page(&html(&each)?, &args.output, &args.output_dir)
}
