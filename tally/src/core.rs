use std::sync::Arc;

use tally_core::{
    AlignedSeries, BucketPoint, BucketedSeries, ChartConfig, FillPolicy, Granularity,
    ObservationSource, Reducer, RollingAverage, SourceFrame, SummaryStatistics, TallyConfig,
    TallyError, align, bucket, bucket_grouped, difference, into_observations, peak,
    cumulative_sum, rolling_average, spread, summary_statistics, zero_fill,
};
use tally_types::{AnalysisReport, PeakReport, SeriesReport};

/// Orchestrator that loads every registered source and derives its series.
pub struct Tally {
    pub(crate) sources: Vec<Arc<dyn ObservationSource>>,
    pub(crate) cfg: TallyConfig,
}

/// Builder for constructing a `Tally` run with custom configuration.
pub struct TallyBuilder {
    sources: Vec<Arc<dyn ObservationSource>>,
    cfg: TallyConfig,
}

impl Default for TallyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TallyBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults mirror `TallyConfig::default()`: monthly buckets, `Sum`
    /// reducer, rows without a value skipped, centered 3-bucket rolling
    /// average, no differencing, zero-filling, running total or spread.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: vec![],
            cfg: TallyConfig::default(),
        }
    }

    /// Register a data source.
    ///
    /// Sources are loaded in registration order, and their series keep that
    /// order in the resulting `Analysis`. The first two series feed the spread.
    #[must_use]
    pub fn with_source(mut self, s: Arc<dyn ObservationSource>) -> Self {
        self.sources.push(s);
        self
    }

    /// Replace the whole configuration, including chart options.
    ///
    /// Later setters still apply on top of it.
    #[must_use]
    pub fn config(mut self, cfg: TallyConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select the bucket granularity.
    #[must_use]
    pub const fn granularity(mut self, g: Granularity) -> Self {
        self.cfg.granularity = g;
        self
    }

    /// Select the reducer applied within each bucket.
    ///
    /// Use `Reducer::Last` together with [`difference`](Self::difference) for
    /// sources that report a running total.
    #[must_use]
    pub const fn reducer(mut self, r: Reducer) -> Self {
        self.cfg.reducer = r;
        self
    }

    /// Select how rows without a value are handled.
    #[must_use]
    pub const fn fill_policy(mut self, p: FillPolicy) -> Self {
        self.cfg.fill_policy = p;
        self
    }

    /// Convert each bucketed series into per-bucket increments.
    ///
    /// The first bucket of every series becomes 0.
    #[must_use]
    pub const fn difference(mut self, yes: bool) -> Self {
        self.cfg.difference = yes;
        self
    }

    /// Set the centered rolling-average window; `None` disables it.
    #[must_use]
    pub const fn rolling_window(mut self, window: Option<usize>) -> Self {
        self.cfg.rolling_window = window;
        self
    }

    /// Insert zero-valued buckets for empty periods inside each series.
    ///
    /// Applied after differencing, so filled gaps contribute an increment of 0.
    #[must_use]
    pub const fn zero_fill(mut self, yes: bool) -> Self {
        self.cfg.zero_fill = yes;
        self
    }

    /// Chart running totals instead of per-bucket values.
    ///
    /// Applied after differencing and zero-filling; the rolling average,
    /// statistics and peak then describe the running total.
    #[must_use]
    pub const fn cumulative(mut self, yes: bool) -> Self {
        self.cfg.cumulative = yes;
        self
    }

    /// Compute the spread between the first two series.
    #[must_use]
    pub const fn spread(mut self, yes: bool) -> Self {
        self.cfg.spread = yes;
        self
    }

    /// Set chart presentation options.
    #[must_use]
    pub fn chart(mut self, chart: ChartConfig) -> Self {
        self.cfg.chart = chart;
        self
    }

    /// Build the `Tally` orchestrator.
    ///
    /// # Errors
    /// - `InvalidArg` if no sources have been registered via [`with_source`](Self::with_source).
    /// - `InvalidWindow` if the rolling window is zero or even.
    pub fn build(self) -> Result<Tally, TallyError> {
        if self.sources.is_empty() {
            return Err(TallyError::InvalidArg(
                "no sources registered; add at least one via with_source(...)".to_string(),
            ));
        }
        if let Some(window) = self.cfg.rolling_window.filter(|w| *w == 0 || w % 2 == 0) {
            return Err(TallyError::InvalidWindow { window });
        }
        Ok(Tally {
            sources: self.sources,
            cfg: self.cfg,
        })
    }
}

/// Everything derived for one labelled series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAnalysis {
    /// Group key, or the source label for ungrouped sources.
    pub label: String,
    /// Bucketed values after differencing, zero-filling and, if enabled,
    /// accumulation into a running total.
    pub buckets: BucketedSeries,
    /// Centered rolling average, when a window is configured.
    pub rolling: Option<RollingAverage>,
    /// Population statistics over the bucket values.
    pub stats: SummaryStatistics,
    /// Earliest bucket holding the maximum value.
    pub peak: BucketPoint,
}

impl SeriesAnalysis {
    /// Summarize this series for a report.
    #[must_use]
    pub fn report(&self) -> SeriesReport {
        SeriesReport {
            label: self.label.clone(),
            buckets: self.stats.count,
            first_period: self.buckets.first_period().unwrap_or(self.peak.period_start),
            last_period: self.buckets.last_period().unwrap_or(self.peak.period_start),
            total: self.stats.total,
            mean: self.stats.mean,
            median: self.stats.median,
            std_dev: self.stats.std_dev,
            min: self.stats.min,
            peak: PeakReport {
                period_start: self.peak.period_start,
                value: self.peak.value,
            },
        }
    }
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Granularity every series was bucketed with.
    pub granularity: Granularity,
    /// Reducer used within buckets.
    pub reducer: Reducer,
    /// Rolling window used, if any.
    pub rolling_window: Option<usize>,
    /// Series in source registration order, groups ordered by key within a source.
    pub series: Vec<SeriesAnalysis>,
    /// All series outer-joined on one period axis, missing buckets as 0.
    pub aligned: AlignedSeries,
    /// First series minus second series, when requested.
    pub spread: Option<BucketedSeries>,
}

impl Analysis {
    /// Look up a series by label.
    #[must_use]
    pub fn find_series(&self, label: &str) -> Option<&SeriesAnalysis> {
        self.series.iter().find(|s| s.label == label)
    }

    /// Per-series summary suitable for JSON output.
    #[must_use]
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            granularity: self.granularity,
            reducer: self.reducer,
            rolling_window: self.rolling_window,
            series: self.series.iter().map(SeriesAnalysis::report).collect(),
        }
    }
}

impl Tally {
    /// Start building a new `Tally` run.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use tally::{Granularity, Tally};
    /// use tally_mock::MockSource;
    ///
    /// let analysis = Tally::builder()
    ///     .with_source(Arc::new(MockSource::weekly_cases("Mexico")))
    ///     .granularity(Granularity::Month)
    ///     .build()?
    ///     .run()?;
    /// assert_eq!(analysis.series[0].label, "Mexico");
    /// # Ok::<(), tally::TallyError>(())
    /// ```
    #[must_use]
    pub fn builder() -> TallyBuilder {
        TallyBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TallyConfig {
        &self.cfg
    }

    /// Load every source and derive all series.
    ///
    /// The run aborts on the first error; no partial `Analysis` is returned.
    ///
    /// # Errors
    /// - Any error returned by a source's `load`.
    /// - `EmptyInput` if a source yields no usable observation.
    /// - `MalformedInput` for non-finite values, or a grouped source with an
    ///   ungrouped row.
    /// - `InvalidArg` if two series share a label, or a spread is requested
    ///   with fewer than two series.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::core::run",
            skip(self),
            fields(
                sources = self.sources.len(),
                granularity = %self.cfg.granularity,
                reducer = %self.cfg.reducer,
            ),
        )
    )]
    pub fn run(&self) -> Result<Analysis, TallyError> {
        let mut series = Vec::new();
        for source in &self.sources {
            let frame = source.load()?;
            #[cfg(feature = "tracing")]
            tracing::debug!(source = source.name(), label = %frame.label, rows = frame.len(), "source loaded");
            series.extend(self.analyse_frame(&frame)?);
        }

        let columns: Vec<(&str, &BucketedSeries)> = series
            .iter()
            .map(|s| (s.label.as_str(), &s.buckets))
            .collect();
        let aligned = align(&columns)?;

        let spread = if self.cfg.spread {
            let [a, b, ..] = series.as_slice() else {
                return Err(TallyError::InvalidArg(format!(
                    "spread needs two series, found {}",
                    series.len()
                )));
            };
            Some(spread(&a.buckets, &b.buckets)?)
        } else {
            None
        };

        #[cfg(feature = "tracing")]
        tracing::info!(series = series.len(), periods = aligned.periods.len(), "analysis complete");

        Ok(Analysis {
            granularity: self.cfg.granularity,
            reducer: self.cfg.reducer,
            rolling_window: self.cfg.rolling_window,
            series,
            aligned,
            spread,
        })
    }

    fn analyse_frame(&self, frame: &SourceFrame) -> Result<Vec<SeriesAnalysis>, TallyError> {
        let observations = into_observations(frame, self.cfg.fill_policy);
        let grouped = observations.iter().any(|o| o.group_key.is_some());

        let bucketed: Vec<(String, BucketedSeries)> = if grouped {
            bucket_grouped(&observations, self.cfg.granularity, self.cfg.reducer)?
                .into_iter()
                .collect()
        } else {
            vec![(
                frame.label.clone(),
                bucket(&observations, self.cfg.granularity, self.cfg.reducer)?,
            )]
        };

        bucketed
            .into_iter()
            .map(|(label, buckets)| self.derive(label, buckets))
            .collect()
    }

    fn derive(&self, label: String, mut buckets: BucketedSeries) -> Result<SeriesAnalysis, TallyError> {
        if self.cfg.difference {
            buckets = difference(&buckets);
        }
        if self.cfg.zero_fill {
            buckets = zero_fill(&buckets);
        }
        if self.cfg.cumulative {
            buckets = cumulative_sum(&buckets);
        }
        let rolling = self
            .cfg
            .rolling_window
            .map(|w| rolling_average(&buckets, w))
            .transpose()?;
        let stats = summary_statistics(&buckets)?;
        let peak = peak(&buckets).ok_or(TallyError::EmptyInput)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%label, buckets = buckets.len(), total = stats.total, "series derived");

        Ok(SeriesAnalysis {
            label,
            buckets,
            rolling,
            stats,
            peak,
        })
    }
}
