use crate::heatmap::*;

use color_eyre::eyre::{Report, Result};

fn to_matrix(rows: &[&[Option<f64>]]) -> Matrix {
    rows.iter().map(|row| row.iter().map(|v| Value::from(*v)).collect()).collect()
}

fn distance_matrix() -> Matrix {
    to_matrix(&[
        &[Some(0.), Some(1.), Some(2.), Some(3.)],
        &[Some(1.), Some(0.), Some(4.), Some(5.)],
        &[Some(2.), Some(4.), Some(0.), Some(6.)],
        &[Some(3.), Some(5.), Some(6.), Some(0.)],
    ])
}

fn upper_triangle() -> Matrix {
    to_matrix(&[
        &[None, Some(1.), Some(2.), Some(3.)],
        &[None, None, Some(4.), Some(5.)],
        &[None, None, None, Some(6.)],
        &[None, None, None, None],
    ])
}

/// Quartile-style table with an unbounded lowest interval.
fn quarter_table() -> ClassificationTable {
    ClassificationTable::new()
        .with_missing(0, "")
        .with_interval(Bound::Unbounded, 0.25, 1, "(0-25%)")
        .with_interval(0.25, 0.5, 2, "(25-50%)")
        .with_interval(0.5, 0.75, 3, "(50-75%)")
        .with_interval(0.75, 1.0, 4, "(75-100%)")
}

fn assert_close(observed: Bound, expected: f64) {
    match observed {
        Bound::Finite(n) => assert!((n - expected).abs() < 1e-9, "{n} != {expected}"),
        Bound::Unbounded => panic!("Expected a finite bound of {expected}"),
    }
}

// ----------------------------------------------------------------------------
// Classification

#[test]
fn classify_quarter_table() -> Result<(), Report> {
    let table = quarter_table();

    assert_eq!(table.classify(Value::Number(0.0))?, 1);
    assert_eq!(table.classify(Value::Number(0.15))?, 1);
    assert_eq!(table.classify(Value::Number(0.35))?, 2);
    assert_eq!(table.classify(Value::Number(0.65))?, 3);
    assert_eq!(table.classify(Value::Number(0.85))?, 4);
    assert_eq!(table.classify(Value::Missing)?, 0);
    Ok(())
}

#[test]
fn classify_edges_belong_to_closed_side() -> Result<(), Report> {
    let table = quarter_table();

    assert_eq!(table.classify(Value::Number(0.25))?, 1);
    assert_eq!(table.classify(Value::Number(0.5))?, 2);
    assert_eq!(table.classify(Value::Number(0.75))?, 3);
    assert_eq!(table.classify(Value::Number(1.0))?, 4);

    // every finite upper bound is owned by its own interval
    for entry in table.entries() {
        if let Bound::Finite(upper) = entry.interval.upper {
            assert_eq!(table.classify(Value::Number(upper))?, entry.bucket.id);
        }
    }
    Ok(())
}

#[test]
fn classify_matches_exactly_one_interval() -> Result<(), Report> {
    let table = ClassificationTable::beta_significance();
    let values = [-1.0, 0.0, 0.0005, 0.001, 0.005, 0.01, 0.03, 0.05, 0.07, 0.1, 0.5, 10.0];

    for value in values {
        let matching = table.entries().iter().filter(|e| e.interval.contains(value)).count();
        assert_eq!(matching, 1, "{value} matched {matching} intervals");

        let bucket = table.classify(Value::Number(value))?;
        let entry = table.entries().iter().find(|e| e.bucket.id == bucket).unwrap();
        assert!(entry.interval.contains(value));
    }
    Ok(())
}

#[test]
fn classify_missing_without_missing_bucket() {
    let table = ClassificationTable::new().with_interval(Bound::Unbounded, Bound::Unbounded, 1, "");
    assert_eq!(table.classify(Value::Missing), Err(HeatmapError::Configuration));
}

#[test]
fn classify_outside_every_interval() {
    let table = quarter_table();
    assert_eq!(
        table.classify(Value::Number(1.5)),
        Err(HeatmapError::Classification { value: 1.5 })
    );

    // bounded lowest interval does not own its lower edge
    let table = ClassificationTable::new().with_missing(0, "").with_interval(0.0, 0.25, 1, "");
    assert!(table.classify(Value::Number(0.0)).is_err());
}

#[test]
fn entries_sorted_by_lower_bound() {
    let table = ClassificationTable::new()
        .with_interval(0.1, Bound::Unbounded, 3, "high")
        .with_missing(0, "")
        .with_interval(0.01, 0.1, 2, "mid")
        .with_interval(Bound::Unbounded, 0.01, 1, "low");

    let ids: Vec<_> = table.entries().iter().map(|e| e.bucket.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(table.missing().map(|b| b.id), Some(0));
}

// ----------------------------------------------------------------------------
// Quartiles

#[test]
fn quartiles_even() -> Result<(), Report> {
    let observed = compute_quartiles(&[1., 2., 3., 4., 5., 6.])?;
    assert_eq!(observed, Quartiles { lower: 2., median: 3.5, upper: 5. });

    let observed = compute_quartiles(&[1., 2., 3., 4.])?;
    assert_eq!(observed, Quartiles { lower: 1.5, median: 2.5, upper: 3.5 });
    Ok(())
}

#[test]
fn quartiles_odd() -> Result<(), Report> {
    let observed = compute_quartiles(&[1., 2., 3., 4., 5.])?;
    assert_eq!(observed, Quartiles { lower: 1.5, median: 3., upper: 4.5 });
    Ok(())
}

#[test]
fn quartiles_insufficient_data() {
    assert_eq!(
        compute_quartiles(&[1., 2., 3.]),
        Err(HeatmapError::InsufficientData { found: 3 })
    );
    assert!(compute_quartiles(&[]).is_err());
}

#[test]
fn quartiles_ignore_order() -> Result<(), Report> {
    let sorted = [0.1, 0.2, 0.25, 0.4, 0.45, 0.6, 0.8, 0.9, 0.95];
    let shuffled = [0.6, 0.1, 0.95, 0.25, 0.8, 0.2, 0.45, 0.9, 0.4];
    assert_eq!(compute_quartiles(&sorted)?, compute_quartiles(&shuffled)?);
    Ok(())
}

#[test]
fn make_quartiles_upper_triangle() -> Result<(), Report> {
    let table = make_quartiles(&upper_triangle())?;
    assert!(table.missing().is_none());

    let entries = table.entries();
    assert_eq!(entries.len(), 4);

    let expected = [(0.99, 2.0, 1), (2.0, 3.5, 2), (3.5, 5.0, 3), (5.0, 6.01, 4)];
    for (entry, (lower, upper, id)) in entries.iter().zip(expected) {
        assert_close(entry.interval.lower, lower);
        assert_close(entry.interval.upper, upper);
        assert_eq!(entry.bucket.id, id);
    }
    assert_eq!(entries[0].bucket.label, "0-25% / Lower quartile");
    assert_eq!(entries[3].bucket.label, "75-100% / Upper quartile");
    Ok(())
}

#[test]
fn make_quartiles_few_values_fall_back_to_zero() -> Result<(), Report> {
    let matrix = to_matrix(&[&[None, Some(0.3)], &[None, None, Some(0.7)]]);
    let table = generate_trans_values(&matrix)?;

    assert_eq!(table.classify(Value::Number(0.3))?, 4);
    assert_eq!(table.classify(Value::Number(0.7))?, 4);
    assert_eq!(table.classify(Value::Missing)?, 0);
    Ok(())
}

#[test]
fn make_quartiles_large_magnitudes_keep_extremes_inside() -> Result<(), Report> {
    let matrix = to_matrix(&[&[Some(1e17), Some(1e17), Some(2e17), Some(3e17), Some(4e17)]]);
    let table = make_quartiles(&matrix)?;

    let entries = table.entries();
    let Bound::Finite(lower) = entries[0].interval.lower else {
        panic!("Expected a finite lower bound.");
    };
    let Bound::Finite(upper) = entries[3].interval.upper else {
        panic!("Expected a finite upper bound.");
    };
    assert!(lower < 1e17);
    assert!(upper > 4e17);

    assert_eq!(table.classify(Value::Number(1e17))?, 1);
    assert_eq!(table.classify(Value::Number(4e17))?, 4);
    let buckets = make_plot_data(&matrix, &table)?;
    assert_eq!(buckets, [[1, 1, 2, 3, 4]]);

    // negative extremes widen the other way
    let matrix = to_matrix(&[&[Some(-4e17), Some(-3e17), Some(-2e17), Some(-1e17)]]);
    let table = make_quartiles(&matrix)?;
    assert_eq!(table.classify(Value::Number(-4e17))?, 1);
    assert_eq!(table.classify(Value::Number(-1e17))?, 4);
    Ok(())
}

#[test]
fn make_quartiles_without_numbers() {
    let matrix = to_matrix(&[&[None, None], &[]]);
    assert_eq!(make_quartiles(&matrix), Err(HeatmapError::InsufficientData { found: 0 }));
}

// ----------------------------------------------------------------------------
// Matrix

#[test]
fn upper_triangle_square() {
    assert_eq!(get_upper_triangle(&distance_matrix()), upper_triangle());
}

#[test]
fn upper_triangle_keeps_row_lengths() {
    let matrix = to_matrix(&[&[Some(1.), Some(2.), Some(3.), Some(4.), Some(5.)], &[Some(1.)], &[]]);
    let observed = get_upper_triangle(&matrix);

    let expected = to_matrix(&[&[None, Some(2.), Some(3.), Some(4.), Some(5.)], &[None], &[]]);
    assert_eq!(observed, expected);
}

#[test]
fn plot_data_square_and_jagged() -> Result<(), Report> {
    let matrix = to_matrix(&[
        &[None, Some(0.2), Some(0.9), Some(0.4)],
        &[None, None, Some(0.8), Some(0.6)],
        &[None, None, None, Some(0.3)],
        &[None, None, None, None],
    ]);
    let observed = make_plot_data(&matrix, &quarter_table())?;
    assert_eq!(observed, [[0, 1, 4, 2], [0, 0, 4, 3], [0, 0, 0, 2], [0, 0, 0, 0]]);

    let jagged = to_matrix(&[&[None, Some(0.2)], &[Some(0.9), Some(0.6), None], &[]]);
    let observed = make_plot_data(&jagged, &quarter_table())?;
    assert_eq!(observed, vec![vec![0, 1], vec![4, 3, 0], vec![]]);
    Ok(())
}

#[test]
fn plot_data_propagates_classification_error() {
    let matrix = to_matrix(&[&[None, Some(0.2)], &[Some(7.0)]]);
    let result = make_plot_data(&matrix, &quarter_table());
    assert_eq!(result, Err(HeatmapError::Classification { value: 7.0 }));
}

// ----------------------------------------------------------------------------
// Plot Info

#[test]
fn plot_info_quarter_table() {
    let info = PlotInfo::new(&quarter_table());

    assert_eq!(info.n_values, 5);
    assert_eq!(info.boundaries, [0.5, 1.5, 2.5, 3.5, 4.5]);
    assert_eq!(info.ticks, [1.0, 2.0, 3.0, 4.0]);
    assert_eq!(info.tick_labels, ["(0-25%)", "(25-50%)", "(50-75%)", "(75-100%)"]);
}

#[test]
fn plot_info_counts_missing_bucket() -> Result<(), Report> {
    let table = generate_trans_values(&upper_triangle())?;
    let info = PlotInfo::new(&table);

    assert_eq!(info.n_values, 5);
    assert_eq!(info.tick_labels.len(), 4);
    assert_eq!(info.tick_labels[1], "25-50%");
    Ok(())
}

#[test]
fn legend_skips_missing_bucket() {
    let table = quarter_table();
    let labels: Vec<_> = table.legend().iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["(0-25%)", "(25-50%)", "(50-75%)", "(75-100%)"]);
}

#[test]
fn heatmap_slug() {
    let heatmap = Heatmap {
        name: "Corrected values".to_string(),
        headers: Headers::default(),
        matrix: Vec::new(),
        table: ClassificationTable::beta_significance(),
        title: String::new(),
    };
    assert_eq!(heatmap.slug(), "corrected_values");
}
