use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tally::{
    CsvSource, FillPolicy, Granularity, ObservationSource, Reducer, TallyConfig, TallyError,
    TraceStyle,
};

/// Resample dated CSV series into weekly or monthly buckets and chart them.
#[derive(Parser, Debug, Clone)]
#[command(name = "tally", author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file to read; repeat for several series
    #[arg(long = "input", short = 'i', value_name = "CSV", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Series label for the input at the same position (defaults to the file stem)
    #[arg(long = "label", value_name = "NAME")]
    pub labels: Vec<String>,

    /// Literal name of the value column, e.g. "Weekly cases"
    #[arg(long, value_name = "COLUMN")]
    pub value_column: String,

    /// Literal name of the date column
    #[arg(long, value_name = "COLUMN", default_value = "Day")]
    pub date_column: String,

    /// Split each file into one series per distinct value of this column
    #[arg(long, value_name = "COLUMN")]
    pub group_column: Option<String>,

    /// Bucket size: week or month
    #[arg(long, value_name = "week|month")]
    pub granularity: Option<Granularity>,

    /// Bucket reducer: sum, last or mean
    #[arg(long, value_name = "sum|last|mean")]
    pub reducer: Option<Reducer>,

    /// Carry the last known value forward over empty cells
    #[arg(long)]
    pub forward_fill: bool,

    /// Turn a running total into per-bucket increments (first bucket becomes 0)
    #[arg(long)]
    pub difference: bool,

    /// Centered rolling-average window (positive, odd)
    #[arg(long, value_name = "N", conflicts_with = "no_rolling")]
    pub window: Option<usize>,

    /// Do not compute a rolling average
    #[arg(long)]
    pub no_rolling: bool,

    /// Insert zero-valued buckets for empty periods
    #[arg(long)]
    pub zero_fill: bool,

    /// Chart each series as a running total
    #[arg(long)]
    pub cumulative: bool,

    /// Chart the difference between the first two series
    #[arg(long)]
    pub spread: bool,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Smaller line under the title
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Y axis title
    #[arg(long, value_name = "TEXT")]
    pub y_title: Option<String>,

    /// Value trace style: bar, area or line
    #[arg(long, value_name = "bar|area|line")]
    pub style: Option<TraceStyle>,

    /// Draw mean and median reference lines
    #[arg(long)]
    pub reference_lines: bool,

    /// Shade mean ± one standard deviation
    #[arg(long)]
    pub std_band: bool,

    /// Annotate the highest bucket of each series
    #[arg(long)]
    pub annotate_peak: bool,

    /// JSON file with a full configuration; flags given here take precedence
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Also write a JSON summary of every series
    #[arg(long, value_name = "JSON")]
    pub report: Option<PathBuf>,

    /// HTML file to write the chart to
    #[arg(long, short = 'o', value_name = "HTML")]
    pub output: PathBuf,
}

impl Cli {
    /// Effective configuration: the `--config` file (or defaults) with flags applied on top.
    pub fn tally_config(&self) -> Result<TallyConfig, TallyError> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| TallyError::io(path.display().to_string(), e))?;
                serde_json::from_str(&text).map_err(|e| {
                    TallyError::InvalidArg(format!("config {}: {e}", path.display()))
                })?
            }
            None => TallyConfig::default(),
        };

        if let Some(g) = self.granularity {
            cfg.granularity = g;
        }
        if let Some(r) = self.reducer {
            cfg.reducer = r;
        }
        if self.forward_fill {
            cfg.fill_policy = FillPolicy::Forward;
        }
        cfg.difference |= self.difference;
        if self.no_rolling {
            cfg.rolling_window = None;
        } else if let Some(w) = self.window {
            cfg.rolling_window = Some(w);
        }
        cfg.zero_fill |= self.zero_fill;
        cfg.cumulative |= self.cumulative;
        cfg.spread |= self.spread;

        let chart = &mut cfg.chart;
        if let Some(title) = &self.title {
            chart.title.clone_from(title);
        }
        if let Some(subtitle) = &self.subtitle {
            chart.subtitle = Some(subtitle.clone());
        }
        if let Some(y_title) = &self.y_title {
            chart.y_title.clone_from(y_title);
        }
        if let Some(style) = self.style {
            chart.style = style;
        }
        chart.show_mean |= self.reference_lines;
        chart.show_median |= self.reference_lines;
        chart.show_std_band |= self.std_band;
        chart.annotate_peak |= self.annotate_peak;
        Ok(cfg)
    }

    /// One CSV source per `--input`, labelled positionally by `--label`.
    pub fn sources(&self) -> Result<Vec<Arc<dyn ObservationSource>>, TallyError> {
        if self.labels.len() > self.inputs.len() {
            return Err(TallyError::InvalidArg(format!(
                "{} labels given for {} inputs",
                self.labels.len(),
                self.inputs.len()
            )));
        }
        Ok(self
            .inputs
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let mut src = CsvSource::new(path, self.value_column.as_str())
                    .date_column(self.date_column.as_str());
                if let Some(group) = &self.group_column {
                    src = src.group_column(group.as_str());
                }
                if let Some(label) = self.labels.get(i) {
                    src = src.label(label.as_str());
                }
                Arc::new(src) as Arc<dyn ObservationSource>
            })
            .collect())
    }
}
