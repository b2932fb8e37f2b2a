//! Tally-specific error, configuration and report types shared by every crate in the workspace.
#![warn(missing_docs)]

mod config;
pub mod error;
mod reports;

pub use config::{ChartConfig, FillPolicy, Granularity, Reducer, TallyConfig, TraceStyle};
pub use error::TallyError;
pub use reports::{AnalysisReport, PeakReport, SeriesReport};
