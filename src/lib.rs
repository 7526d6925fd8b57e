//! `fastunifrac` draws **heatmaps** of microbial community comparisons.
//!
//! ## Why fastunifrac?
//!
//! 1. `fastunifrac` _discretizes_ continuous matrices.
//!
//!    Values are classified into buckets by a [`ClassificationTable`] of
//!    left-open, right-closed intervals, either fixed (ex. p-value significance
//!    levels) or computed from the quartiles of the data.
//!
//! 1. `fastunifrac` _reports_ beta diversity results.
//!
//!    - A [distance matrix](distance_matrix) becomes one heatmap of its upper triangle.
//!    - [Pairwise beta significance](beta_significance) results become two
//!      heatmaps, one for the raw and one for the corrected p-values.
//!    - [Per-sample beta significance](each_sample) results become two
//!      coloured tables of p-values.
//!
//!    Heatmaps are written to a single html [report], where every cell names
//!    the two samples it compares, with their description from a QIIME
//!    [mapping] file.

pub mod beta_significance;
pub mod cli;
pub mod distance_matrix;
pub mod each_sample;
pub mod heatmap;
pub mod mapping;
pub mod report;

#[doc(inline)]
pub use crate::cli::{Cli, Verbosity};
#[doc(inline)]
pub use crate::heatmap::{ClassificationTable, Heatmap};
#[doc(inline)]
pub use crate::mapping::Mapping;
