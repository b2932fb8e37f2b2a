//! tally-core
//!
//! Core types, traits, and utilities shared across the tally workspace.
//!
//! - `observation`: dated input values and the raw rows sources produce.
//! - `series`: bucketed series, rolling averages and summary statistics.
//! - `source`: the `ObservationSource` trait implemented by data sources.
//! - `timeseries`: calendar bucketing, differencing, rolling averages,
//!   statistics and alignment of several series.
//!
//! Everything here is synchronous and stateless: each function derives a new
//! immutable value from its inputs.
#![warn(missing_docs)]

/// Observations and source rows.
pub mod observation;
/// Bucketed series and values derived from them.
pub mod series;
/// The `ObservationSource` trait.
pub mod source;
/// Time-series utilities for bucketing and deriving statistics.
pub mod timeseries;
pub mod types;

pub use observation::{Observation, SourceFrame, SourceRow};
pub use series::{BucketPoint, BucketedSeries, RollingAverage, RollingPoint, SummaryStatistics};
pub use source::ObservationSource;
pub use timeseries::align::{AlignedSeries, align, spread};
pub use timeseries::bucket::{bucket, bucket_grouped, period_start};
pub use timeseries::fill::into_observations;
pub use timeseries::rolling::rolling_average;
pub use timeseries::stats::{peak, summary_statistics};
pub use timeseries::transform::{cumulative_sum, difference, zero_fill};
pub use types::*;
