//! Colour bar information derived from a [`ClassificationTable`].

use crate::heatmap::ClassificationTable;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw the discrete colour bar of a heatmap.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PlotInfo {
    /// Number of distinct buckets, including the missing bucket. This is the colour map size.
    pub n_values: usize,
    /// Colour bar boundaries, one band of width 1 centered on every visible bucket.
    pub boundaries: Vec<f64>,
    /// Colour bar ticks, one per visible bucket (`1.0` to `n_values - 1`).
    pub ticks: Vec<f64>,
    /// Labels of the visible buckets, in bucket order.
    pub tick_labels: Vec<String>,
}

impl PlotInfo {
    /// Derive the colour bar from `table`.
    ///
    /// The bucket with the lowest id (the missing bucket, by convention `0`)
    /// counts towards `n_values` but gets no tick.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use fastunifrac::heatmap::{ClassificationTable, PlotInfo};
    ///
    /// let info = PlotInfo::new(&ClassificationTable::beta_significance());
    ///
    /// assert_eq!(info.n_values, 6);
    /// assert_eq!(info.ticks, [1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!(info.boundaries, [0.5, 1.5, 2.5, 3.5, 4.5, 5.5]);
    /// assert_eq!(info.tick_labels[0], "<0.001 / Highly significant");
    /// ```
    pub fn new(table: &ClassificationTable) -> Self {
        let buckets = table.buckets();
        let n_values = buckets.len();

        let ticks = (1..n_values).map(|i| i as f64).collect_vec();
        // discrete values are drawn in the center of their boundary band
        let boundaries = ticks
            .iter()
            .map(|t| t - 0.5)
            .chain(std::iter::once(n_values as f64 - 0.5))
            .collect_vec();
        let tick_labels = buckets.iter().skip(1).map(|b| b.label.clone()).collect_vec();

        PlotInfo { n_values, boundaries, ticks, tick_labels }
    }
}
