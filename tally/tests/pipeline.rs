mod helpers;

use std::sync::Arc;

use helpers::*;
use tally::{FillPolicy, Granularity, Reducer, Tally, TallyConfig, TallyError};
use tally_mock::MockSource;

#[test]
fn monthly_cases_with_trend() {
    let analysis = Tally::builder()
        .with_source(weekly(MEXICO))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(analysis.granularity, Granularity::Month);
    let mx = analysis.find_series(MEXICO).unwrap();
    assert_eq!(mx.buckets.periods(), vec![d(2020, 3, 1), d(2020, 4, 1), d(2020, 5, 1)]);
    assert_eq!(mx.buckets.values(), vec![937.0, 11_607.0, 7_147.0]);

    let trend = mx.rolling.as_ref().unwrap();
    assert_eq!(trend.window, 3);
    let values = trend.values();
    assert_eq!(values[0], None);
    assert_close(values[1].unwrap(), 19_691.0 / 3.0);
    assert_eq!(values[2], None);

    assert_eq!(mx.peak.period_start, d(2020, 4, 1));
    assert_close(mx.stats.total, 19_691.0);
    assert!(analysis.spread.is_none());
}

#[test]
fn two_countries_align_and_spread() {
    let analysis = Tally::builder()
        .with_source(weekly(MEXICO))
        .with_source(weekly(PHILIPPINES))
        .spread(true)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let labels: Vec<&str> = analysis.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec![MEXICO, PHILIPPINES]);
    assert_eq!(analysis.aligned.column(PHILIPPINES).unwrap(), &[1_418.0, 6_589.0, 1_637.0]);
    assert_eq!(
        analysis.spread.as_ref().unwrap().values(),
        vec![-481.0, 5_018.0, 5_510.0]
    );
}

#[test]
fn grouped_source_splits_by_key_and_forward_fills() {
    let analysis = Tally::builder()
        .with_source(Arc::new(MockSource::weekly_cases_grouped()))
        .fill_policy(FillPolicy::Forward)
        .rolling_window(None)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(analysis.series.len(), 2);
    let ph = analysis.find_series(PHILIPPINES).unwrap();
    // the empty 2020-05-10 row repeats the 2020-05-03 value
    assert_eq!(ph.buckets.values(), vec![1_418.0, 6_589.0, 3_274.0]);
    assert!(ph.rolling.is_none());
}

#[test]
fn cumulative_deaths_become_monthly_increments() {
    let run = |policy| {
        Tally::builder()
            .with_source(deaths(MEXICO))
            .fill_policy(policy)
            .reducer(Reducer::Last)
            .difference(true)
            .build()
            .unwrap()
            .run()
            .unwrap()
    };

    let filled = run(FillPolicy::Forward);
    let mx = &filled.series[0];
    assert_eq!(mx.buckets.values(), vec![0.0, 2_290.0, 5_890.0, 0.0]);
    assert_eq!(mx.buckets.last_period(), Some(d(2020, 6, 1)));

    // without filling, June has no observation at all
    let skipped = run(FillPolicy::Skip);
    assert_eq!(skipped.series[0].buckets.values(), vec![0.0, 2_290.0, 5_890.0]);
}

#[test]
fn cumulative_charts_running_total() {
    let run = |cumulative| {
        Tally::builder()
            .with_source(weekly(MEXICO))
            .cumulative(cumulative)
            .build()
            .unwrap()
            .run()
            .unwrap()
    };

    let plain = run(false);
    let totals = run(true);
    let per_month = &plain.series[0];
    let running = &totals.series[0];

    assert_eq!(running.buckets.periods(), per_month.buckets.periods());
    let mut acc = 0.0;
    for (got, v) in running.buckets.values().into_iter().zip(per_month.buckets.values()) {
        acc += v;
        assert_close(got, acc);
    }
    assert_close(running.peak.value, per_month.stats.total);
    assert_eq!(running.peak.period_start, running.buckets.last_period().unwrap());
    assert_eq!(running.rolling.as_ref().unwrap().len(), running.buckets.len());
}

#[test]
fn weekly_zero_fill_is_contiguous() {
    let analysis = Tally::builder()
        .with_source(deaths(PHILIPPINES))
        .granularity(Granularity::Week)
        .zero_fill(true)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let ph = &analysis.series[0].buckets;
    assert_eq!(ph.first_period(), Some(d(2020, 3, 9)));
    assert_eq!(ph.last_period(), Some(d(2020, 5, 25)));
    assert_eq!(ph.len(), 12);
    assert_close(ph.values().iter().sum(), 1_850.0);
}

#[test]
fn config_replaces_defaults() {
    let cfg = TallyConfig {
        granularity: Granularity::Week,
        rolling_window: Some(5),
        ..TallyConfig::default()
    };
    let tally = Tally::builder().with_source(weekly(MEXICO)).config(cfg).build().unwrap();
    assert_eq!(tally.config().granularity, Granularity::Week);

    let analysis = tally.run().unwrap();
    let mx = &analysis.series[0];
    assert_eq!(mx.buckets.len(), 10);
    assert_eq!(mx.rolling.as_ref().unwrap().window, 5);
}

#[test]
fn report_summarizes_each_series() {
    let analysis = Tally::builder()
        .with_source(weekly(MEXICO))
        .with_source(weekly(PHILIPPINES))
        .build()
        .unwrap()
        .run()
        .unwrap();

    let report = analysis.report();
    assert_eq!(report.rolling_window, Some(3));
    assert_eq!(report.series.len(), 2);
    let mx = &report.series[0];
    assert_eq!(mx.label, MEXICO);
    assert_eq!(mx.buckets, 3);
    assert_eq!(mx.first_period, d(2020, 3, 1));
    assert_eq!(mx.last_period, d(2020, 5, 1));
    assert_eq!(mx.min, 937.0);
    assert_eq!(mx.median, 7_147.0);
    assert_eq!(mx.peak.value, 11_607.0);
}

#[test]
fn build_validates_sources_and_window() {
    assert!(matches!(Tally::builder().build(), Err(TallyError::InvalidArg(_))));
    assert!(matches!(
        Tally::builder().with_source(weekly(MEXICO)).rolling_window(Some(2)).build(),
        Err(TallyError::InvalidWindow { window: 2 })
    ));
    assert!(matches!(
        Tally::builder().with_source(weekly(MEXICO)).rolling_window(Some(0)).build(),
        Err(TallyError::InvalidWindow { window: 0 })
    ));
}

#[test]
fn run_fails_fast() {
    let failing = Tally::builder()
        .with_source(weekly(MEXICO))
        .with_source(Arc::new(MockSource::failing()))
        .build()
        .unwrap();
    assert!(matches!(failing.run(), Err(TallyError::Io { .. })));

    let duplicate = Tally::builder()
        .with_source(weekly(MEXICO))
        .with_source(weekly(MEXICO))
        .build()
        .unwrap();
    assert!(matches!(duplicate.run(), Err(TallyError::InvalidArg(_))));

    let lonely_spread = Tally::builder()
        .with_source(weekly(MEXICO))
        .spread(true)
        .build()
        .unwrap();
    assert!(matches!(lonely_spread.run(), Err(TallyError::InvalidArg(_))));
}
