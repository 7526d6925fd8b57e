//! Read and inspect a row-based [`Table`] of delimited text.
//!
//! Every input of the heatmap tools (distance matrices, pairwise significance
//! results, mapping files) is a small delimited text file. The [`Table`] keeps
//! rows exactly as they were read, so rows may differ in length.

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

/// A row-based [`Table`] of generic data.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Table<T> {
    /// Names of the table columns.
    pub headers: Vec<T>,
    /// Rows of table values.
    pub rows: Vec<Vec<T>>,
    /// Comment lines, with the comment prefix removed.
    pub comments: Vec<String>,
    /// Optional file path for where the table was read from.
    pub path: Option<PathBuf>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    /// Returns a new row-based [`Table`] with empty headers and rows.
    ///
    /// ## Examples
    ///
    /// ```
    /// let mut table = fastunifrac_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// # assert!(table.rows.is_empty());
    /// ```
    pub fn new() -> Self {
        Table { headers: Vec::new(), rows: Vec::new(), comments: Vec::new(), path: None }
    }
}

impl<T> Table<T>
where
    T: Clone + Display + Debug + PartialEq<T>,
{
    /// Convert table to markdown format.
    ///
    /// Missing cells of short rows are written as empty cells.
    ///
    /// ## Examples
    ///
    /// ```
    /// let mut table = fastunifrac_table::Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// table.rows = vec![vec!["A", "B", "C"]];
    ///
    /// let expected = "| 1 | 2 | 3 |\n|---|---|---|\n| A | B | C |\n";
    /// assert_eq!(table.to_markdown()?, expected);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn to_markdown(&self) -> Result<String, Report> {
        let cell =
            |row: &[T], col_i: usize| row.get(col_i).map(|v| v.to_string()).unwrap_or_default();

        // get the maximum width of each column, +2 to add space on either side
        let col_widths = self
            .headers
            .iter()
            .enumerate()
            .map(|(col_i, header)| {
                let header_width = header.to_string().len();
                self.rows
                    .iter()
                    .map(|row| cell(row.as_slice(), col_i).len())
                    .chain(std::iter::once(header_width))
                    .max()
                    .unwrap_or(header_width)
                    + 2
            })
            .collect_vec();

        let mut markdown = String::from("|");
        // frame in between headers and rows
        let mut header_frame = String::from("|");

        for (header, col_width) in self.headers.iter().zip(col_widths.iter()) {
            markdown.push_str(&format!("{:^width$}|", header.to_string(), width = col_width));
            header_frame.push_str(&format!("{}|", "-".repeat(*col_width)));
        }
        markdown.push('\n');
        markdown.push_str(&header_frame);
        markdown.push('\n');

        for row in &self.rows {
            markdown.push('|');
            for (col_i, col_width) in col_widths.iter().enumerate() {
                let value = cell(row.as_slice(), col_i);
                markdown.push_str(&format!("{:^width$}|", value, width = col_width));
            }
            markdown.push('\n');
        }

        Ok(markdown)
    }

    /// Write the table to a delimited file.
    ///
    /// Comments are written first, prefixed by `#`. Rows are written as is, so
    /// short rows stay short.
    ///
    /// ## Arguments
    ///
    /// * `path` - File path.
    /// * `delim` - Column delimiter.
    ///
    /// ## Examples
    ///
    /// ```
    /// use fastunifrac_table::Table;
    ///
    /// let mut table = Table::new();
    /// table.headers = vec!["1", "2", "3"];
    /// table.rows = vec![vec!["A", "B", "C"]];
    ///
    /// let dir = tempfile::tempdir()?;
    /// let path = dir.path().join("table.tsv");
    /// table.write(&path, '\t')?;
    ///
    /// assert_eq!(std::fs::read_to_string(&path)?, "1\t2\t3\nA\tB\tC\n");
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn write<P>(&self, path: &P, delim: char) -> Result<(), Report>
    where
        P: AsRef<Path> + Debug,
    {
        let delim = delim.to_string();

        let mut file =
            File::create(path).wrap_err_with(|| eyre!("Unable to create file: {path:?}"))?;

        for comment in &self.comments {
            writeln!(file, "#{comment}")
                .wrap_err_with(|| eyre!("Unable to write table comment: {comment}"))?;
        }

        // write headers
        let line = self.headers.iter().join(&delim);
        writeln!(file, "{line}").wrap_err_with(|| eyre!("Unable to write table headers: {line}"))?;

        // write regular rows
        self.rows.iter().try_for_each(|row| {
            let line = row.iter().join(&delim);
            writeln!(file, "{line}").wrap_err_with(|| eyre!("Unable to write table row: {line}"))
        })?;

        Ok(())
    }
}

impl Table<String> {
    /// Read a delimited file into a [`Table`].
    ///
    /// ## Arguments
    ///
    /// * `path` - File path.
    /// * `delim` - Column delimiter.
    /// * `comment` - Optional comment prefix. Lines starting with it are stored in [`Table::comments`].
    ///
    /// ## Examples
    ///
    /// ```
    /// use fastunifrac_table::Table;
    /// use std::io::Write;
    ///
    /// let mut file = tempfile::NamedTempFile::new()?;
    /// writeln!(file, "#Comment\n1\t2\t3\nA\tB\tC")?;
    /// let table = Table::read(&file.path(), '\t', Some('#'))?;
    ///
    /// assert_eq!(table.comments, ["Comment"]);
    /// assert_eq!(table.headers, ["1", "2", "3"]);
    /// assert_eq!(table.rows, [["A", "B", "C"]]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn read<P>(path: &P, delim: char, comment: Option<char>) -> Result<Self, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let file = File::open(path).wrap_err_with(|| eyre!("Failed to read file: {path:?}"))?;
        let mut table = Table::from_reader(BufReader::new(file), delim, comment)
            .wrap_err_with(|| eyre!("Failed to parse table: {path:?}"))?;
        table.path = Some(path.as_ref().to_path_buf());

        Ok(table)
    }

    /// Parse delimited lines from a reader into a [`Table`].
    ///
    /// Blank lines are skipped and the first non-comment line becomes the headers.
    ///
    /// ## Examples
    ///
    /// ```
    /// use fastunifrac_table::Table;
    ///
    /// let text = "\ta\tb\na\t0\t1\n\nb\t1\t0\n";
    /// let table = Table::from_reader(text.as_bytes(), '\t', None)?;
    ///
    /// assert_eq!(table.headers, ["", "a", "b"]);
    /// assert_eq!(table.rows.len(), 2);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn from_reader<R>(reader: R, delim: char, comment: Option<char>) -> Result<Self, Report>
    where
        R: BufRead,
    {
        let mut table = Table::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line.wrap_err_with(|| eyre!("Failed to read line {}.", i + 1))?;
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }

            match comment {
                Some(c) if line.starts_with(c) => {
                    table.comments.push(line[c.len_utf8()..].trim().to_string());
                }
                _ => {
                    let row = line.split(delim).map(String::from).collect_vec();
                    // if headers are empty, this is the first line, write headers
                    if table.headers.is_empty() {
                        table.headers = row;
                    } else {
                        table.rows.push(row);
                    }
                }
            }
        }

        Ok(table)
    }
}
