//! Render heatmaps into a single html report.
//!
//! Every [`Heatmap`] is drawn by a [`Render`] implementation from its
//! [`PlotData`]. The [`HtmlRender`] draws a coloured table, one cell per
//! matrix value, with a tooltip naming the two samples compared.


use crate::heatmap::{BucketId, ClassificationTable, Heatmap, PlotData};
use crate::mapping::Mapping;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use fastunifrac_table::Table;
use indoc::formatdoc;
use itertools::Itertools;
use log::{debug, info};
use std::collections::HashMap;
use std::fmt::Write;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

/// Colour of the missing bucket.
pub const MISSING_COLOR: &str = "#ffffff";

/// Spectral palette, from the lowest to the highest bucket.
const SPECTRAL: [(u8, u8, u8); 6] = [
    (0xd5, 0x3e, 0x4f),
    (0xfc, 0x8d, 0x59),
    (0xfe, 0xe0, 0x8b),
    (0xe6, 0xf5, 0x98),
    (0x99, 0xd5, 0x94),
    (0x32, 0x88, 0xbd),
];

// ----------------------------------------------------------------------------
// Render
// ----------------------------------------------------------------------------

/// Draw the plot of a [`Heatmap`].
pub trait Render {
    /// Returns the rendered heatmap, with its title and legend.
    fn render(&self, heatmap: &Heatmap, plot: &PlotData) -> Result<String, Report>;
}

/// Renders heatmaps as html tables.
#[derive(Clone, Debug, Default)]
pub struct HtmlRender<'m> {
    /// Sample descriptions added to cell tooltips.
    pub mapping: Option<&'m Mapping>,
}

impl<'m> HtmlRender<'m> {
    pub fn new(mapping: Option<&'m Mapping>) -> Self {
        HtmlRender { mapping }
    }

    /// Tooltip of a cell, ex. `s1 vs s2: 0.01` followed by sample descriptions.
    pub fn tooltip(&self, row: &str, col: &str, value: &str) -> String {
        let mut lines = vec![format!("{row} vs {col}: {value}")];
        if let Some(mapping) = self.mapping {
            for sample in [row, col] {
                if let Some(description) = mapping.description(sample) {
                    lines.push(format!("{sample}: {description}"));
                }
            }
        }
        lines.iter().map(|l| escape(l)).join("&#10;")
    }
}

impl Render for HtmlRender<'_> {
    fn render(&self, heatmap: &Heatmap, plot: &PlotData) -> Result<String, Report> {
        let colors = bucket_colors(&heatmap.table);
        let color = |id: &BucketId| {
            colors.get(id).ok_or_else(|| eyre!("Bucket {id} is not in the classification table."))
        };

        let mut html = String::new();
        writeln!(html, "<table class=\"heatmap\">")?;

        // column headers
        write!(html, "<tr><th></th>")?;
        for col in &heatmap.headers.horizontal {
            write!(html, "<th class=\"col_header\">{}</th>", escape(col))?;
        }
        writeln!(html, "</tr>")?;

        for (i, (values, buckets)) in heatmap.matrix.iter().zip(&plot.buckets).enumerate() {
            let row = heatmap.headers.vertical.get(i).map(String::as_str).unwrap_or_default();
            write!(html, "<tr><th class=\"row_header\">{}</th>", escape(row))?;

            for (j, (value, bucket)) in values.iter().zip(buckets).enumerate() {
                let background = color(bucket)?;
                match value.as_number() {
                    Some(_) => {
                        let col = heatmap.headers.horizontal.get(j).map(String::as_str);
                        let title = self.tooltip(row, col.unwrap_or_default(), &value.to_string());
                        write!(html, "<td style=\"background-color:{background}\" title=\"{title}\"></td>")?;
                    }
                    None => write!(html, "<td style=\"background-color:{background}\"></td>")?,
                }
            }
            writeln!(html, "</tr>")?;
        }
        writeln!(html, "</table>")?;

        html.push_str(&legend_html(&heatmap.table, &colors)?);

        let download = format!("<a href=\"{}.tsv\">Download buckets</a>", heatmap.slug());

        let table = formatdoc!(
            "<table cellpadding=0 cellspacing=0 border=1>
            <tr><th align=center class=\"header\">{}</th></tr>
            <tr><td class=\"normal\" align=center>
            {html}<br>{download}
            </td></tr>
            </table>
            <br><br>
            ",
            escape(&heatmap.title),
        );

        Ok(table)
    }
}

// ----------------------------------------------------------------------------
// Colours
// ----------------------------------------------------------------------------

/// Discrete colour map of `n` buckets: white for the first (missing) bucket,
/// then evenly spaced colours of the spectral palette.
///
/// ```rust
/// use fastunifrac::report::colormap;
///
/// let colors = colormap(3);
/// assert_eq!(colors, ["#ffffff", "#d53e4f", "#3288bd"]);
/// ```
pub fn colormap(n: usize) -> Vec<String> {
    let steps = n.saturating_sub(1);
    let visible = (0..steps).map(|i| {
        let t = match steps {
            1 => 0.0,
            _ => i as f64 / (steps - 1) as f64,
        };
        let (r, g, b) = spectral(t);
        format!("#{r:02x}{g:02x}{b:02x}")
    });

    std::iter::once(MISSING_COLOR.to_string()).chain(visible).take(n).collect()
}

/// Linear interpolation along the [`SPECTRAL`] palette, `t` in `[0, 1]`.
fn spectral(t: f64) -> (u8, u8, u8) {
    let last = SPECTRAL.len() - 1;
    let position = t.clamp(0.0, 1.0) * last as f64;
    let i = (position.floor() as usize).min(last - 1);
    let frac = position - i as f64;

    let (a, b) = (SPECTRAL[i], SPECTRAL[i + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Colour of every bucket of a table.
///
/// The missing bucket is [`MISSING_COLOR`], legend buckets take the spectral
/// colours in bucket order.
///
/// ```rust
/// use fastunifrac::heatmap::{Bound, ClassificationTable};
/// use fastunifrac::report::{bucket_colors, MISSING_COLOR};
///
/// let table = ClassificationTable::new().with_interval(Bound::Unbounded, Bound::Unbounded, 1, "All");
/// assert_eq!(bucket_colors(&table)[&1], "#d53e4f");
///
/// let colors = bucket_colors(&ClassificationTable::beta_significance());
/// assert_eq!(colors[&0], MISSING_COLOR);
/// assert_eq!(colors[&5], "#3288bd");
/// ```
pub fn bucket_colors(table: &ClassificationTable) -> HashMap<BucketId, String> {
    let legend = table.legend();
    let visible = colormap(legend.len() + 1).into_iter().skip(1);

    let mut colors: HashMap<BucketId, String> =
        legend.into_iter().map(|b| b.id).zip(visible).collect();
    if let Some(missing) = table.missing() {
        colors.entry(missing.id).or_insert_with(|| MISSING_COLOR.to_string());
    }
    colors
}

/// Legend of a classification table as an html table, one swatch per visible
/// bucket in ascending order. The missing bucket is skipped.
pub fn legend_html(
    table: &ClassificationTable,
    colors: &HashMap<BucketId, String>,
) -> Result<String, Report> {
    let mut html = String::new();
    writeln!(html, "<table class=\"legend\">")?;
    for bucket in table.legend() {
        let background = colors
            .get(&bucket.id)
            .ok_or_else(|| eyre!("Bucket {} has no colour.", bucket.id))?;
        writeln!(
            html,
            "<tr><td style=\"background-color:{background}\"></td><td>{}</td></tr>",
            escape(&bucket.label)
        )?;
    }
    writeln!(html, "</table>")?;
    Ok(html)
}

/// Escape text for html content and attributes.
///
/// ```rust
/// use fastunifrac::report::escape;
///
/// assert_eq!(escape("<b>\"s1\" & 's2'</b>"), "&lt;b&gt;&quot;s1&quot; &amp; &#39;s2&#39;&lt;/b&gt;");
/// ```
pub fn escape(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut escaped, c| {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
        escaped
    })
}

// ----------------------------------------------------------------------------
// Tables
// ----------------------------------------------------------------------------

/// The bucket grid of a heatmap as a [`Table`], with sample ids as headers and row names.
pub fn bucket_table(heatmap: &Heatmap, plot: &PlotData) -> Table<String> {
    let mut table = Table::new();
    table.comments = vec![heatmap.title.clone()];
    table.headers = std::iter::once(String::new())
        .chain(heatmap.headers.horizontal.iter().cloned())
        .collect();
    table.rows = plot
        .buckets
        .iter()
        .enumerate()
        .map(|(i, buckets)| {
            let sample = heatmap.headers.vertical.get(i).cloned().unwrap_or_default();
            std::iter::once(sample).chain(buckets.iter().map(|b| b.to_string())).collect()
        })
        .collect();
    table
}

/// The legend of a classification table: interval, bucket and label of every entry.
pub fn legend_table(classification: &ClassificationTable) -> Table<String> {
    let mut table = Table::new();
    table.headers = ["Interval", "Bucket", "Label"].into_iter().map(String::from).collect();
    table.rows = classification
        .entries()
        .iter()
        .map(|e| vec![e.interval.to_string(), e.bucket.id.to_string(), e.bucket.label.clone()])
        .collect();
    table
}

// ----------------------------------------------------------------------------
// Report
// ----------------------------------------------------------------------------

/// Assemble the rendered heatmap tables into a complete html page.
pub fn page(tables: &str) -> String {
    formatdoc!(
        "<html>
        <head>
        <meta charset=\"utf-8\"/>
        <style type=\"text/css\">
        .normal {{ color: black; font-family: Arial, Verdana; font-size: 12px; font-weight: normal; }}
        .header {{ color: white; font-family: Arial, Verdana; font-size: 12px; font-weight: bold; background-color: #2C3143; }}
        .row_header, .col_header {{ color: black; font-family: Arial, Verdana; font-size: 12px; font-weight: bold; background-color: #C1C9E5; }}
        .heatmap td {{ width: 24px; height: 24px; }}
        .legend td {{ padding: 2px 6px; }}
        </style>
        <title>Fastunifrac</title>
        </head>
        <body>
        {tables}
        </body>
        </html>
        "
    )
}

/// Write the html report of `heatmaps`, and the bucket grid of each one.
///
/// The output directory is created if it does not exist. A relative `output`
/// is placed inside `output_dir`. Returns the path of the html page.
pub fn write(
    heatmaps: &[Heatmap],
    mapping: Option<&Mapping>,
    output: &Path,
    output_dir: &Path,
) -> Result<PathBuf, Report> {
    create_dir_all(output_dir)
        .wrap_err_with(|| eyre!("Failed to create output directory: {output_dir:?}"))?;

    let render = HtmlRender::new(mapping);
    let mut tables = String::new();

    for heatmap in heatmaps {
        let plot = heatmap
            .plot_data()
            .wrap_err_with(|| eyre!("Failed to classify heatmap: {}", heatmap.name))?;
        debug!("Legend of {}:\n{}", heatmap.name, legend_table(&heatmap.table).to_markdown()?);

        let tsv = output_dir.join(format!("{}.tsv", heatmap.slug()));
        bucket_table(heatmap, &plot).write(&tsv, '\t')?;
        debug!("Wrote bucket grid: {tsv:?}");

        tables.push_str(&render.render(heatmap, &plot)?);
    }

    write_page(&page(&tables), output, output_dir)
}

/// Write a complete html page to `output`, placed inside `output_dir` when relative.
///
/// The output directory is created if it does not exist. Returns the path of the page.
pub fn write_page(html: &str, output: &Path, output_dir: &Path) -> Result<PathBuf, Report> {
    create_dir_all(output_dir)
        .wrap_err_with(|| eyre!("Failed to create output directory: {output_dir:?}"))?;

    let path = match output.is_absolute() {
        true => output.to_path_buf(),
        false => output_dir.join(output),
    };
    std::fs::write(&path, html).wrap_err_with(|| eyre!("Failed to write html report: {path:?}"))?;
    info!("Wrote html report: {path:?}");

    Ok(path)
}
