mod helpers;

use std::fs;
use std::sync::Arc;

use helpers::*;
use tally::{ChartConfig, CsvSource, Reducer, Tally, TallyError, render};

const MEXICO_WEEKLY: &str = "Entity,Code,Day,Weekly cases\n\
Mexico,MEX,2020-01-01,10\n\
Mexico,MEX,2020-01-08,20\n\
Mexico,MEX,2020-01-15,30\n";

#[test]
fn csv_file_through_weekly_pipeline() {
    let dir = scratch_dir("csv-weekly");
    let path = dir.join("casos_semanales_mexico.csv");
    fs::write(&path, MEXICO_WEEKLY).unwrap();

    let analysis = Tally::builder()
        .with_source(Arc::new(CsvSource::new(&path, "Weekly cases")))
        .granularity(tally::Granularity::Week)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let s = &analysis.series[0];
    assert_eq!(s.label, "casos_semanales_mexico");
    assert_eq!(s.buckets.values(), vec![10.0, 20.0, 30.0]);
    assert_eq!(s.rolling.as_ref().unwrap().values(), vec![None, Some(20.0), None]);
}

#[test]
fn cumulative_csv_with_difference() {
    let dir = scratch_dir("csv-cumulative");
    let path = dir.join("deaths.csv");
    fs::write(
        &path,
        "Day,Cumulative excess deaths (central estimate)\n\
         2021-01-31,100\n2021-02-28,150\n2021-03-31,170\n",
    )
    .unwrap();

    let analysis = Tally::builder()
        .with_source(Arc::new(
            CsvSource::new(&path, "Cumulative excess deaths (central estimate)").label("Mexico"),
        ))
        .reducer(Reducer::Last)
        .difference(true)
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(analysis.series[0].buckets.values(), vec![0.0, 50.0, 20.0]);
}

#[test]
fn missing_column_writes_nothing() {
    let dir = scratch_dir("csv-missing");
    let path = dir.join("weekly.csv");
    fs::write(&path, MEXICO_WEEKLY).unwrap();
    let out = dir.join("chart.html");

    let result = Tally::builder()
        .with_source(Arc::new(CsvSource::new(&path, "Weekly deaths")))
        .build()
        .and_then(|t| t.run())
        .and_then(|a| render::write_html(&a, &ChartConfig::default(), &out));

    match result {
        Err(TallyError::MissingColumn { column, .. }) => assert_eq!(column, "Weekly deaths"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn unreadable_file_is_io_error() {
    let dir = scratch_dir("csv-absent");
    let err = Tally::builder()
        .with_source(Arc::new(CsvSource::new(dir.join("nope.csv"), "Weekly cases")))
        .build()
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, TallyError::Io { .. }));
}
