//! Classify continuous matrix values into discrete buckets with a [`ClassificationTable`].

use crate::heatmap::HeatmapError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Discrete identifier of a bucket, `0` is reserved for missing values by convention.
pub type BucketId = usize;

/// A matrix of [`Value`], rows may differ in length.
pub type Matrix = Vec<Vec<Value>>;

// ----------------------------------------------------------------------------
// Value
// ----------------------------------------------------------------------------

/// A matrix cell, either a number or a cell without a value.
///
/// `Missing` never compares equal to any number, including `0.0`.
///
/// ```rust
/// use fastunifrac::heatmap::Value;
///
/// assert_eq!(Value::from(Some(0.5)), Value::Number(0.5));
/// assert_eq!(Value::from(None::<f64>), Value::Missing);
/// assert_ne!(Value::Missing, Value::Number(0.0));
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Number(f64),
    Missing,
}

impl Value {
    /// Returns the number, or [`None`] if the value is missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Missing => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Option<f64>> for Value {
    fn from(n: Option<f64>) -> Self {
        n.map(Value::Number).unwrap_or(Value::Missing)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Missing => write!(f, ""),
        }
    }
}

// ----------------------------------------------------------------------------
// Interval
// ----------------------------------------------------------------------------

/// One side of an [`Interval`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum Bound {
    Unbounded,
    Finite(f64),
}

impl From<f64> for Bound {
    fn from(n: f64) -> Self {
        Bound::Finite(n)
    }
}

/// A left-open, right-closed interval `(lower, upper]`.
///
/// An unbounded lower side matches everything up to and including `upper`,
/// an unbounded upper side matches everything above `lower`.
///
/// ```rust
/// use fastunifrac::heatmap::{Bound, Interval};
///
/// let interval = Interval::new(0.25, 0.5);
/// assert!(!interval.contains(0.25));
/// assert!(interval.contains(0.5));
///
/// let lowest = Interval::new(Bound::Unbounded, 0.25);
/// assert!(lowest.contains(-100.0));
/// assert!(lowest.contains(0.25));
/// ```
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    pub fn new<L, U>(lower: L, upper: U) -> Self
    where
        L: Into<Bound>,
        U: Into<Bound>,
    {
        Interval { lower: lower.into(), upper: upper.into() }
    }

    /// Returns true if `value` falls inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        match (self.lower, self.upper) {
            (Bound::Unbounded, Bound::Unbounded) => true,
            (Bound::Unbounded, Bound::Finite(upper)) => value <= upper,
            (Bound::Finite(lower), Bound::Unbounded) => lower < value,
            (Bound::Finite(lower), Bound::Finite(upper)) => lower < value && value <= upper,
        }
    }

    /// Orders intervals by lower bound, then by upper bound.
    ///
    /// An unbounded lower side sorts before every number, an unbounded upper side after.
    pub fn cmp_bounds(&self, other: &Interval) -> Ordering {
        let lower = match (self.lower, other.lower) {
            (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
            (Bound::Unbounded, Bound::Finite(_)) => Ordering::Less,
            (Bound::Finite(_), Bound::Unbounded) => Ordering::Greater,
            (Bound::Finite(a), Bound::Finite(b)) => a.total_cmp(&b),
        };
        let upper = || match (self.upper, other.upper) {
            (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
            (Bound::Unbounded, Bound::Finite(_)) => Ordering::Greater,
            (Bound::Finite(_), Bound::Unbounded) => Ordering::Less,
            (Bound::Finite(a), Bound::Finite(b)) => a.total_cmp(&b),
        };
        lower.then_with(upper)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let side = |bound: Bound, infinity: &str| match bound {
            Bound::Unbounded => infinity.to_string(),
            Bound::Finite(n) => n.to_string(),
        };
        write!(f, "({}, {}]", side(self.lower, "-inf"), side(self.upper, "inf"))
    }
}

// ----------------------------------------------------------------------------
// Classification Table
// ----------------------------------------------------------------------------

/// A discrete bucket that values are classified into, with its legend label.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Bucket {
    pub id: BucketId,
    pub label: String,
}

/// An [`Interval`] and the [`Bucket`] its values are classified into.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Entry {
    pub interval: Interval,
    pub bucket: Bucket,
}

/// An ordered mapping from intervals to buckets, plus one bucket for missing values.
///
/// Entries are kept sorted with [`Interval::cmp_bounds`]. A well-formed table
/// partitions the number line with no gaps or overlaps, and its bucket ids
/// are contiguous starting at `0` (the missing bucket).
///
/// ## Examples
///
/// ```rust
/// use fastunifrac::heatmap::{Bound, ClassificationTable, Value};
///
/// let table = ClassificationTable::new()
///     .with_missing(0, "")
///     .with_interval(Bound::Unbounded, 0.25, 1, "0-25%")
///     .with_interval(0.25, 0.5, 2, "25-50%")
///     .with_interval(0.5, 0.75, 3, "50-75%")
///     .with_interval(0.75, 1.0, 4, "75-100%");
///
/// assert_eq!(table.classify(Value::Number(0.25))?, 1);
/// assert_eq!(table.classify(Value::Number(0.5))?, 2);
/// assert_eq!(table.classify(Value::Missing)?, 0);
/// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ClassificationTable {
    missing: Option<Bucket>,
    entries: Vec<Entry>,
}

impl ClassificationTable {
    /// Returns an empty [`ClassificationTable`], without a missing bucket.
    pub fn new() -> Self {
        ClassificationTable { missing: None, entries: Vec::new() }
    }

    /// Returns the table with a bucket assigned to missing values.
    pub fn with_missing(mut self, id: BucketId, label: &str) -> Self {
        self.missing = Some(Bucket { id, label: label.to_string() });
        self
    }

    /// Returns the table with a new interval entry, keeping entries sorted.
    pub fn with_interval<L, U>(mut self, lower: L, upper: U, id: BucketId, label: &str) -> Self
    where
        L: Into<Bound>,
        U: Into<Bound>,
    {
        let entry = Entry {
            interval: Interval::new(lower, upper),
            bucket: Bucket { id, label: label.to_string() },
        };
        self.entries.push(entry);
        self.entries.sort_by(|a, b| a.interval.cmp_bounds(&b.interval));
        self
    }

    /// Fixed table for pairwise beta significance p-values.
    ///
    /// ```rust
    /// use fastunifrac::heatmap::{ClassificationTable, Value};
    ///
    /// let table = ClassificationTable::beta_significance();
    /// assert_eq!(table.classify(Value::Number(0.0))?, 1);
    /// assert_eq!(table.classify(Value::Number(0.05))?, 3);
    /// assert_eq!(table.classify(Value::Number(0.82))?, 5);
    /// # Ok::<(), fastunifrac::heatmap::HeatmapError>(())
    /// ```
    pub fn beta_significance() -> Self {
        ClassificationTable::new()
            .with_missing(0, "")
            .with_interval(Bound::Unbounded, 0.001, 1, "<0.001 / Highly significant")
            .with_interval(0.001, 0.01, 2, "0.001-0.01 / Significant")
            .with_interval(0.01, 0.05, 3, "0.01-0.05 / Marginally significant")
            .with_interval(0.05, 0.1, 4, "0.05-0.1 / Suggestive")
            .with_interval(0.1, Bound::Unbounded, 5, ">0.1 / Not significant")
    }

    /// The bucket for missing values, if the table has one.
    pub fn missing(&self) -> Option<&Bucket> {
        self.missing.as_ref()
    }

    /// Interval entries, sorted by [`Interval::cmp_bounds`].
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Distinct buckets of the table (missing bucket included), sorted by id then label.
    pub fn buckets(&self) -> Vec<&Bucket> {
        self.missing
            .iter()
            .chain(self.entries.iter().map(|e| &e.bucket))
            .unique()
            .sorted_by(|a, b| a.id.cmp(&b.id).then_with(|| a.label.cmp(&b.label)))
            .collect()
    }

    /// Buckets shown in a legend: every bucket except the missing bucket, sorted by id.
    pub fn legend(&self) -> Vec<&Bucket> {
        self.buckets().into_iter().filter(|b| Some(*b) != self.missing.as_ref()).collect()
    }

    /// Classify a [`Value`] into a [`BucketId`].
    ///
    /// - [`Value::Missing`] returns the missing bucket, or [`HeatmapError::Configuration`] if the table has none.
    /// - [`Value::Number`] returns the bucket of the first interval containing it,
    ///   or [`HeatmapError::Classification`] if no interval does.
    ///
    /// ```rust
    /// use fastunifrac::heatmap::{ClassificationTable, HeatmapError, Value};
    ///
    /// let table = ClassificationTable::new().with_interval(0.0, 1.0, 1, "0-1");
    /// assert_eq!(table.classify(Value::Number(1.0))?, 1);
    /// assert_eq!(table.classify(Value::Missing), Err(HeatmapError::Configuration));
    /// assert!(table.classify(Value::Number(0.0)).is_err());
    /// # Ok::<(), HeatmapError>(())
    /// ```
    pub fn classify(&self, value: Value) -> Result<BucketId, HeatmapError> {
        match value {
            Value::Missing => {
                self.missing.as_ref().map(|b| b.id).ok_or(HeatmapError::Configuration)
            }
            Value::Number(n) => self
                .entries
                .iter()
                .find(|e| e.interval.contains(n))
                .map(|e| e.bucket.id)
                .ok_or(HeatmapError::Classification { value: n }),
        }
    }
}
