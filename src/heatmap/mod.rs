//! Discretize matrices of continuous values into heatmap buckets.
//!
//! A [`Heatmap`] pairs a [`Matrix`] with the [`ClassificationTable`] used to
//! turn its values into [`BucketId`]s:
//!
//! 1. Symmetric matrices are reduced with [`get_upper_triangle`].
//! 1. The table is fixed (ex. [`ClassificationTable::beta_significance`]) or
//!    computed from the data with [`generate_trans_values`].
//! 1. [`make_plot_data`] classifies every cell and [`PlotInfo`] describes the colour bar.
//!
//! ## Examples
//!
//! ```rust
//! use fastunifrac::heatmap::{get_upper_triangle, generate_trans_values, make_plot_data, PlotInfo, Value};
//!
//! let matrix: Vec<Vec<Value>> = [[0., 1., 2., 3.], [1., 0., 4., 5.], [2., 4., 0., 6.], [3., 5., 6., 0.]]
//!     .iter()
//!     .map(|row| row.iter().map(|v| Value::Number(*v)).collect())
//!     .collect();
//!
//! let upper = get_upper_triangle(&matrix);
//! let table = generate_trans_values(&upper)?;
//! let buckets = make_plot_data(&upper, &table)?;
//! let info = PlotInfo::new(&table);
//!
//! assert_eq!(buckets[0], [0, 1, 1, 2]);
//! assert_eq!(info.n_values, 5);
//! # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
//! ```

mod classification;
mod matrix;
mod plot_info;
mod quartiles;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use classification::{Bound, Bucket, BucketId, ClassificationTable, Entry, Interval, Matrix, Value};
#[doc(inline)]
pub use matrix::{get_upper_triangle, make_plot_data};
#[doc(inline)]
pub use plot_info::PlotInfo;
#[doc(inline)]
pub use quartiles::{compute_quartiles, generate_trans_values, make_quartiles, Quartiles, QUARTILE_MARGIN};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

/// Errors raised while discretizing a matrix.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HeatmapError {
    /// Fewer samples than quartiles can be computed from.
    #[error("Not enough values to compute quartiles: found {found}, at least 4 are required.")]
    InsufficientData { found: usize },

    /// The classification table has no bucket for missing values.
    #[error("The classification table has no bucket for missing values.")]
    Configuration,

    /// A number falls outside every interval of the classification table.
    #[error("Value {value} does not fall into any interval of the classification table.")]
    Classification { value: f64 },

    /// A pairwise p-value column that is neither raw (0) nor corrected (1).
    #[error("P-value index must be 0 (raw) or 1 (corrected), found: {0}.")]
    InvalidIndex(usize),
}

// ----------------------------------------------------------------------------
// Heatmap
// ----------------------------------------------------------------------------

/// Sample labels of the heatmap rows (`vertical`) and columns (`horizontal`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Headers {
    pub vertical: Vec<String>,
    pub horizontal: Vec<String>,
}

/// A matrix to plot, with its labels and the table that discretizes it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Heatmap {
    /// Plot name, also used to name output files.
    pub name: String,
    pub headers: Headers,
    pub matrix: Matrix,
    pub table: ClassificationTable,
    /// Title of the report table holding the plot.
    pub title: String,
}

/// The bucket grid and colour bar of a [`Heatmap`], as handed to a renderer.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlotData {
    pub buckets: Vec<Vec<BucketId>>,
    pub info: PlotInfo,
}

impl Heatmap {
    /// Classify the matrix and derive the colour bar.
    ///
    /// ```rust
    /// use fastunifrac::heatmap::{ClassificationTable, Headers, Heatmap, Value};
    ///
    /// let heatmap = Heatmap {
    ///     name: "Raw values".to_string(),
    ///     headers: Headers { vertical: vec!["s1".into()], horizontal: vec!["s1".into(), "s2".into()] },
    ///     matrix: vec![vec![Value::Missing, Value::Number(0.04)]],
    ///     table: ClassificationTable::beta_significance(),
    ///     title: "Test: Raw values".to_string(),
    /// };
    /// let plot = heatmap.plot_data()?;
    /// assert_eq!(plot.buckets, [[0, 3]]);
    /// assert_eq!(plot.info.n_values, 6);
    /// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
    /// ```
    pub fn plot_data(&self) -> Result<PlotData, HeatmapError> {
        let buckets = make_plot_data(&self.matrix, &self.table)?;
        let info = PlotInfo::new(&self.table);
        Ok(PlotData { buckets, info })
    }

    /// File-friendly version of the plot name (ex. `Raw values` => `raw_values`).
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}
