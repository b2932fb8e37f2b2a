//! Re-export of configuration, report and error types from `tally-types`.
// Consolidated re-exports so downstream crates can depend on `tally-core` only

pub use tally_types::{
    AnalysisReport, ChartConfig, FillPolicy, Granularity, PeakReport, Reducer, SeriesReport,
    TallyConfig, TallyError, TraceStyle,
};
