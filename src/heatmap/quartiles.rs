//! Quartile binning of matrix values (Moore and McCabe method).

use crate::heatmap::{ClassificationTable, HeatmapError, Value};

use itertools::Itertools;
use log::{debug, warn};

/// Margin added around the minimum and maximum so both fall inside the outer intervals.
///
/// Beyond about `1e14` the margin is lost to rounding, and the bounds move to
/// the next representable value instead.
pub const QUARTILE_MARGIN: f64 = 0.01;

/// The lower quartile, median and upper quartile of a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quartiles {
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

/// Median of an already sorted, non-empty slice.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Lower bound of the first interval: `min - QUARTILE_MARGIN`, or the next
/// representable value below `min` when the subtraction rounds back to `min`.
fn below(min: f64) -> f64 {
    let lower = min - QUARTILE_MARGIN;
    if lower < min || !min.is_finite() {
        return lower;
    }
    // min is non-zero here, 0.0 - QUARTILE_MARGIN is always smaller
    match min > 0.0 {
        true => f64::from_bits(min.to_bits() - 1),
        false => f64::from_bits(min.to_bits() + 1),
    }
}

/// Upper bound of the last interval: `max + QUARTILE_MARGIN`, or the next
/// representable value above `max` when the addition rounds back to `max`.
fn above(max: f64) -> f64 {
    let upper = max + QUARTILE_MARGIN;
    if upper > max || !max.is_finite() {
        return upper;
    }
    match max > 0.0 {
        true => f64::from_bits(max.to_bits() + 1),
        false => f64::from_bits(max.to_bits() - 1),
    }
}

/// Compute the [`Quartiles`] of `samples`.
///
/// The median of the whole sample splits it into two halves, the lower and
/// upper quartiles are the medians of those halves. When the sample size is
/// odd, the middle value belongs to neither half.
///
/// Returns [`HeatmapError::InsufficientData`] for fewer than 4 samples.
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::heatmap::{compute_quartiles, Quartiles};
///
/// let quartiles = compute_quartiles(&[6.0, 1.0, 5.0, 2.0, 4.0, 3.0])?;
/// assert_eq!(quartiles, Quartiles { lower: 2.0, median: 3.5, upper: 5.0 });
///
/// let quartiles = compute_quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0])?;
/// assert_eq!(quartiles, Quartiles { lower: 1.5, median: 3.0, upper: 4.5 });
///
/// assert!(compute_quartiles(&[1.0, 2.0, 3.0]).is_err());
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
pub fn compute_quartiles(samples: &[f64]) -> Result<Quartiles, HeatmapError> {
    if samples.len() < 4 {
        return Err(HeatmapError::InsufficientData { found: samples.len() });
    }

    let sorted = samples.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect_vec();
    let n = sorted.len();
    let m = n / 2;

    let upper_half = match n % 2 {
        0 => &sorted[m..],
        _ => &sorted[m + 1..],
    };

    Ok(Quartiles { lower: median(&sorted[..m]), median: median(&sorted), upper: median(upper_half) })
}

/// Create the quartile [`ClassificationTable`] of the non-missing matrix values.
///
/// The table has four intervals and no missing bucket:
///
/// | Interval                   | Bucket | Label                      |
/// |----------------------------|--------|----------------------------|
/// | `(min - 0.01, lower]`      | 1      | `0-25% / Lower quartile`   |
/// | `(lower, median]`          | 2      | `25-50%`                   |
/// | `(median, upper]`          | 3      | `50-75%`                   |
/// | `(upper, max + 0.01]`      | 4      | `75-100% / Upper quartile` |
///
/// With fewer than 4 values the quartiles all fall back to `0`, which keeps
/// tiny matrices renderable but does not describe their distribution.
/// A matrix without any number returns [`HeatmapError::InsufficientData`].
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::heatmap::{make_quartiles, Value};
///
/// let matrix = vec![
///     vec![Value::Missing, Value::Number(1.0), Value::Number(2.0)],
///     vec![Value::Missing, Value::Missing, Value::Number(3.0), Value::Number(4.0)],
/// ];
/// let table = make_quartiles(&matrix)?;
/// assert_eq!(table.classify(Value::Number(1.0))?, 1);
/// assert_eq!(table.classify(Value::Number(4.0))?, 4);
/// assert!(table.missing().is_none());
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
pub fn make_quartiles(matrix: &[Vec<Value>]) -> Result<ClassificationTable, HeatmapError> {
    let data = matrix.iter().flatten().filter_map(Value::as_number).collect_vec();

    let (min, max) = match data.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        itertools::MinMaxResult::NoElements => {
            return Err(HeatmapError::InsufficientData { found: 0 })
        }
        itertools::MinMaxResult::OneElement(n) => (n, n),
        itertools::MinMaxResult::MinMax(min, max) => (min, max),
    };

    let quartiles = match compute_quartiles(&data) {
        Ok(quartiles) => quartiles,
        Err(e) => {
            warn!("{e} Falling back to zero quartiles.");
            Quartiles::default()
        }
    };
    debug!("Quartiles of {} values (min: {min}, max: {max}): {quartiles:?}", data.len());

    let table = ClassificationTable::new()
        .with_interval(below(min), quartiles.lower, 1, "0-25% / Lower quartile")
        .with_interval(quartiles.lower, quartiles.median, 2, "25-50%")
        .with_interval(quartiles.median, quartiles.upper, 3, "50-75%")
        .with_interval(quartiles.upper, above(max), 4, "75-100% / Upper quartile");

    Ok(table)
}

/// Create the quartile [`ClassificationTable`] with bucket `0` for missing values.
///
/// ```rust
/// use fastunifrac::heatmap::{generate_trans_values, Value};
///
/// let matrix = vec![vec![Value::Missing, Value::Number(1.0), Value::Number(2.0)]];
/// let table = generate_trans_values(&matrix)?;
/// assert_eq!(table.classify(Value::Missing)?, 0);
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
pub fn generate_trans_values(matrix: &[Vec<Value>]) -> Result<ClassificationTable, HeatmapError> {
    Ok(make_quartiles(matrix)?.with_missing(0, ""))
}
