//! Report envelopes produced by the orchestrator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Granularity, Reducer};

/// Highest bucket of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakReport {
    /// Start date of the bucket holding the maximum.
    pub period_start: NaiveDate,
    /// The maximum value.
    pub value: f64,
}

/// Per-series summary of an analysis run.
///
/// Statistics are population statistics over the bucket values (after any
/// differencing and zero-filling).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    /// Series label (group key or source label).
    pub label: String,
    /// Number of buckets.
    pub buckets: usize,
    /// First bucket start.
    pub first_period: NaiveDate,
    /// Last bucket start.
    pub last_period: NaiveDate,
    /// Sum of bucket values.
    pub total: f64,
    /// Mean bucket value.
    pub mean: f64,
    /// Median bucket value.
    pub median: f64,
    /// Population standard deviation of bucket values.
    pub std_dev: f64,
    /// Smallest bucket value.
    pub min: f64,
    /// Largest bucket value, with its period.
    pub peak: PeakReport,
}

/// Summary of a complete run, suitable for writing next to the chart as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Bucket granularity used.
    pub granularity: Granularity,
    /// Reducer used.
    pub reducer: Reducer,
    /// Rolling-average window, if a trend line was computed.
    pub rolling_window: Option<usize>,
    /// One entry per series, in presentation order.
    pub series: Vec<SeriesReport>,
}
