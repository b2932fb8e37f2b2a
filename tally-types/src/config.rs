//! Configuration types shared by the resampler, the orchestrator and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;

/// Calendar period used to bucket observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// ISO week, starting on Monday.
    Week,
    /// Calendar month, starting on the 1st.
    #[default]
    Month,
}

/// Aggregation applied to all values falling into one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    /// Sum of all values.
    #[default]
    Sum,
    /// Value of the chronologically last observation; ties resolved by input order.
    Last,
    /// Arithmetic mean.
    Mean,
}

/// How source rows with a missing value become observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    /// Drop rows without a value.
    #[default]
    Skip,
    /// Carry the last known value of the same group forward; leading gaps are dropped.
    Forward,
}

/// Visual style of the per-bucket value trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStyle {
    /// Vertical bars, overlaid when several series are shown.
    #[default]
    Bar,
    /// Filled area down to zero.
    Area,
    /// Line with markers.
    Line,
}

macro_rules! impl_keyword {
    ($ty:ident { $($variant:ident => $kw:literal),+ $(,)? }) => {
        impl $ty {
            /// Lowercase keyword used in config files and on the command line.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $kw,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TallyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($kw => Ok(Self::$variant),)+
                    other => Err(TallyError::InvalidArg(format!(
                        concat!("unknown ", stringify!($ty), " '{}'; expected one of: ", $($kw, " "),+),
                        other
                    ))),
                }
            }
        }
    };
}

impl_keyword!(Granularity { Week => "week", Month => "month" });
impl_keyword!(Reducer { Sum => "sum", Last => "last", Mean => "mean" });
impl_keyword!(FillPolicy { Skip => "skip", Forward => "forward" });
impl_keyword!(TraceStyle { Bar => "bar", Area => "area", Line => "line" });

/// Presentation options for the rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// Optional smaller line rendered under the title.
    pub subtitle: Option<String>,
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// Style of the per-bucket value traces.
    pub style: TraceStyle,
    /// Draw a dashed horizontal line at the mean.
    pub show_mean: bool,
    /// Draw a dotted horizontal line at the median.
    pub show_median: bool,
    /// Shade the band mean ± one standard deviation.
    pub show_std_band: bool,
    /// Annotate the highest bucket.
    pub annotate_peak: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Time series".to_string(),
            subtitle: None,
            x_title: "Period".to_string(),
            y_title: "Value".to_string(),
            style: TraceStyle::Bar,
            show_mean: false,
            show_median: false,
            show_std_band: false,
            annotate_peak: false,
        }
    }
}

/// Global configuration for a `Tally` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// Bucket granularity.
    pub granularity: Granularity,
    /// Reducer applied within each bucket.
    pub reducer: Reducer,
    /// Treatment of rows with missing values.
    pub fill_policy: FillPolicy,
    /// Convert a cumulative running total into per-bucket increments.
    pub difference: bool,
    /// Centered rolling-average window; `None` disables the trend line.
    pub rolling_window: Option<usize>,
    /// Insert zero-valued buckets for empty periods inside each series' range.
    pub zero_fill: bool,
    /// Replace each series by its running total (after differencing and zero-filling).
    pub cumulative: bool,
    /// Compute the spread (first minus second) between the first two series.
    pub spread: bool,
    /// Chart presentation.
    pub chart: ChartConfig,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            reducer: Reducer::Sum,
            fill_policy: FillPolicy::Skip,
            difference: false,
            rolling_window: Some(3),
            zero_fill: false,
            cumulative: false,
            spread: false,
            chart: ChartConfig::default(),
        }
    }
}
