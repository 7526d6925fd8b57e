//! Reshape matrices and map their values onto bucket grids.

use crate::heatmap::{BucketId, ClassificationTable, HeatmapError, Matrix, Value};

use itertools::Itertools;

/// Keep only the cells strictly above the diagonal, everything else becomes [`Value::Missing`].
///
/// Each row keeps its own length, so non-square and jagged matrices are allowed.
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::heatmap::{get_upper_triangle, Value};
///
/// let matrix: Vec<Vec<Value>> = vec![
///     vec![0.0.into(), 1.0.into(), 2.0.into()],
///     vec![1.0.into(), 0.0.into(), 4.0.into()],
///     vec![2.0.into(), 4.0.into(), 0.0.into()],
/// ];
/// let upper = get_upper_triangle(&matrix);
///
/// assert_eq!(upper[0], [Value::Missing, Value::Number(1.0), Value::Number(2.0)]);
/// assert_eq!(upper[1], [Value::Missing, Value::Missing, Value::Number(4.0)]);
/// assert_eq!(upper[2], [Value::Missing; 3]);
/// ```
pub fn get_upper_triangle(matrix: &[Vec<Value>]) -> Matrix {
    matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter().enumerate().map(|(j, v)| if j <= i { Value::Missing } else { *v }).collect_vec()
        })
        .collect_vec()
}

/// Classify every cell of `matrix` with `table`, keeping the shape of every row.
///
/// Stops at the first cell that cannot be classified.
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::heatmap::{make_plot_data, ClassificationTable, Value};
///
/// let table = ClassificationTable::beta_significance();
/// let matrix = vec![
///     vec![Value::Missing, Value::Number(0.01), Value::Number(0.0), Value::Number(0.02)],
///     vec![Value::Missing, Value::Missing, Value::Number(0.82)],
/// ];
///
/// let plot_data = make_plot_data(&matrix, &table)?;
/// assert_eq!(plot_data, vec![vec![0, 2, 1, 3], vec![0, 0, 5]]);
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
pub fn make_plot_data(
    matrix: &[Vec<Value>],
    table: &ClassificationTable,
) -> Result<Vec<Vec<BucketId>>, HeatmapError> {
    matrix
        .iter()
        .map(|row| row.iter().map(|v| table.classify(*v)).collect::<Result<Vec<_>, _>>())
        .collect()
}
