//! QIIME mapping file: per-sample metadata keyed by `#SampleID`.

#[cfg(test)]
mod tests;

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use fastunifrac_table::Table;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::Path;

/// Column holding the free-text description of a sample.
pub const DESCRIPTION: &str = "Description";

/// Metadata of every sample in a mapping file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Mapping {
    /// Column names, without the leading `#` of the sample id column.
    pub headers: Vec<String>,
    /// Values by sample, then by column.
    pub samples: BTreeMap<String, BTreeMap<String, String>>,
    /// Comment lines found after the header line.
    pub comments: Vec<String>,
}

impl Mapping {
    pub fn new() -> Self {
        Mapping { headers: Vec::new(), samples: BTreeMap::new(), comments: Vec::new() }
    }

    /// Read a tab-delimited mapping file.
    pub fn read<P>(path: &P) -> Result<Self, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let table = Table::read(path, '\t', None)?;
        let mapping = Mapping::from_table(&table)
            .wrap_err_with(|| eyre!("Failed to parse mapping file: {path:?}"))?;
        debug!("Read {} samples from mapping file: {path:?}", mapping.samples.len());
        Ok(mapping)
    }

    /// Convert a [`Table`] into a [`Mapping`].
    ///
    /// The first header must start with `#` (ex. `#SampleID`). Rows whose
    /// first cell starts with `#` are comments.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use fastunifrac::mapping::Mapping;
    /// use fastunifrac_table::Table;
    ///
    /// let text = "#SampleID\tDescription\n#Pilot study\ns1\tGut sample\n";
    /// let table = Table::from_reader(text.as_bytes(), '\t', None)?;
    /// let mapping = Mapping::from_table(&table)?;
    ///
    /// assert_eq!(mapping.headers, ["SampleID", "Description"]);
    /// assert_eq!(mapping.comments, ["Pilot study"]);
    /// assert_eq!(mapping.description("s1"), Some("Gut sample"));
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn from_table(table: &Table<String>) -> Result<Self, Report> {
        let first = table.headers.first().map(String::as_str).unwrap_or_default();
        let Some(sample_header) = first.strip_prefix('#') else {
            return Err(eyre!("Mapping file header must start with '#', found: {first:?}")
                .suggestion("The first column of a QIIME mapping file is named #SampleID."));
        };

        let mut mapping = Mapping::new();
        mapping.headers = std::iter::once(sample_header)
            .chain(table.headers.iter().skip(1).map(String::as_str))
            .map(|h| h.trim().to_string())
            .collect();

        for row in &table.rows {
            let Some(sample) = row.first().map(|s| s.trim()) else { continue };
            if let Some(comment) = sample.strip_prefix('#') {
                let comment = std::iter::once(comment).chain(row[1..].iter().map(String::as_str));
                mapping.comments.push(comment.collect::<Vec<_>>().join("\t").trim().to_string());
                continue;
            }
            if row.len() != mapping.headers.len() {
                warn!(
                    "Mapping file sample {sample} has {} values, expected {}.",
                    row.len(),
                    mapping.headers.len()
                );
            }

            let values = mapping
                .headers
                .iter()
                .zip(row.iter())
                .skip(1)
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect();
            if mapping.samples.insert(sample.to_string(), values).is_some() {
                warn!("Mapping file sample {sample} is duplicated, keeping the last one.");
            }
        }

        Ok(mapping)
    }

    /// Returns the value of a sample under a column.
    pub fn get(&self, sample: &str, column: &str) -> Option<&str> {
        self.samples.get(sample)?.get(column).map(String::as_str)
    }

    /// Returns the [`DESCRIPTION`] of a sample.
    pub fn description(&self, sample: &str) -> Option<&str> {
        self.get(sample, DESCRIPTION)
    }
}
