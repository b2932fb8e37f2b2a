//! Tally turns dated CSV series into calendar buckets, trends and charts.
//!
//! Overview
//! - Loads rows from one or more `ObservationSource`s (CSV files via
//!   `tally-csv`, fixtures via `tally-mock`).
//! - Resolves missing values, buckets observations by ISO week or calendar
//!   month, and reduces each bucket with `Sum`, `Last` or `Mean`.
//! - Optionally turns running totals into increments and fills empty periods.
//! - Derives a centered rolling average, population statistics and the peak
//!   bucket per series, and aligns every series on one period axis.
//! - Renders the result as a Plotly figure embedded in a standalone HTML page.
//!
//! Key behaviors
//! - Every step is synchronous and stateless; a run either yields a complete
//!   `Analysis` or the first error.
//! - Grouped sources (rows carrying a group key) produce one series per group,
//!   ordered by key.
//! - Outputs are written only after the whole analysis succeeded.
//!
//! Examples
//! Monthly confirmed cases with a 3-month trend line:
//! ```rust,no_run
//! use std::sync::Arc;
//! use tally::{ChartConfig, Granularity, Reducer, Tally, render};
//! use tally_csv::CsvSource;
//!
//! let mexico = CsvSource::new("mexico/weekly_cases.csv", "Weekly cases").label("Mexico");
//! let tally = Tally::builder()
//!     .with_source(Arc::new(mexico))
//!     .granularity(Granularity::Month)
//!     .reducer(Reducer::Sum)
//!     .rolling_window(Some(3))
//!     .build()?;
//! let analysis = tally.run()?;
//! render::write_html(&analysis, &ChartConfig::default(), "cases.html")?;
//! # Ok::<(), tally::TallyError>(())
//! ```
//!
//! Monthly increments of a cumulative series with gaps:
//! ```rust,no_run
//! use std::sync::Arc;
//! use tally::{FillPolicy, Reducer, Tally};
//! use tally_csv::CsvSource;
//!
//! let deaths = CsvSource::new("mexico/excess_deaths.csv", "Cumulative excess deaths (central estimate)");
//! let analysis = Tally::builder()
//!     .with_source(Arc::new(deaths))
//!     .fill_policy(FillPolicy::Forward)
//!     .reducer(Reducer::Last)
//!     .difference(true)
//!     .build()?
//!     .run()?;
//! println!("{}", analysis.series[0].stats.total);
//! # Ok::<(), tally::TallyError>(())
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
pub mod render;

pub use crate::core::{Analysis, SeriesAnalysis, Tally, TallyBuilder};

pub use tally_csv::CsvSource;

// Re-export core types for convenience
pub use tally_core::{
    AlignedSeries, AnalysisReport, BucketPoint, BucketedSeries, ChartConfig, FillPolicy,
    Granularity, Observation, ObservationSource, PeakReport, Reducer, RollingAverage,
    RollingPoint, SeriesReport, SourceFrame, SourceRow, SummaryStatistics, TallyConfig,
    TallyError, TraceStyle,
};
