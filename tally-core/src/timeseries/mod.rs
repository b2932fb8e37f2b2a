//! Time-series utilities used by the orchestrator.
//!
//! Modules include:
//! - `bucket`: group observations into weekly/monthly buckets and reduce them
//! - `transform`: period-over-period deltas, running totals and zero-filling
//! - `fill`: turn source rows with gaps into observations
//! - `rolling`: centered rolling average
//! - `stats`: population summary statistics and peak lookup
//! - `align`: outer-join several series on their periods
/// Outer alignment of labelled series and their spread.
pub mod align;
/// Calendar bucketing and per-bucket reduction.
pub mod bucket;
/// Gap handling for raw source rows.
pub mod fill;
/// Centered rolling average.
pub mod rolling;
/// Summary statistics over bucket values.
pub mod stats;
/// Differencing, cumulative sums and zero-filling.
pub mod transform;
