use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Granularity;

/// One bucket of a series: its period start and reduced value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketPoint {
    /// First day of the bucket (a Monday for weeks, the 1st for months).
    pub period_start: NaiveDate,
    /// Reduced value of the bucket.
    pub value: f64,
}

/// Buckets ordered by `period_start` ascending, at most one per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSeries {
    /// Granularity the buckets were built with.
    pub granularity: Granularity,
    /// Buckets in ascending period order.
    pub points: Vec<BucketPoint>,
}

impl BucketedSeries {
    /// Build a series from points that are already sorted and unique by period.
    #[must_use]
    pub const fn new(granularity: Granularity, points: Vec<BucketPoint>) -> Self {
        Self {
            granularity,
            points,
        }
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bucket values in period order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Bucket start dates in period order.
    #[must_use]
    pub fn periods(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.period_start).collect()
    }

    /// Value of the bucket starting at `period_start`, if present.
    #[must_use]
    pub fn get(&self, period_start: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&period_start, |p| p.period_start)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// First bucket start, or `None` if empty.
    #[must_use]
    pub fn first_period(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.period_start)
    }

    /// Last bucket start, or `None` if empty.
    #[must_use]
    pub fn last_period(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.period_start)
    }
}

/// A centered rolling-average value aligned with one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    /// Start date of the bucket the window is centered on.
    pub period_start: NaiveDate,
    /// Window mean, or `None` where the window runs past either edge.
    pub value: Option<f64>,
}

/// Centered moving average over a `BucketedSeries`.
///
/// Always the same length as the series it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingAverage {
    /// Odd window size.
    pub window: usize,
    /// One entry per source bucket.
    pub points: Vec<RollingPoint>,
}

impl RollingAverage {
    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values in period order, `None` at the edges.
    #[must_use]
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Population statistics over the bucket values of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of buckets.
    pub count: usize,
    /// Sum of values.
    pub total: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; mean of the two middle values for an even count.
    pub median: f64,
    /// Population standard deviation (denominator `n`).
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl SummaryStatistics {
    /// Lower and upper edge of the mean ± one standard deviation band.
    #[must_use]
    pub fn std_band(&self) -> (f64, f64) {
        (self.mean - self.std_dev, self.mean + self.std_dev)
    }
}
