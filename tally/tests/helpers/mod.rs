// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tally::ObservationSource;
use tally_mock::MockSource;

pub const MEXICO: &str = "Mexico";
pub const PHILIPPINES: &str = "Philippines";

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn weekly(country: &str) -> Arc<dyn ObservationSource> {
    Arc::new(MockSource::weekly_cases(country))
}

pub fn deaths(country: &str) -> Arc<dyn ObservationSource> {
    Arc::new(MockSource::cumulative_deaths(country))
}

/// Fresh scratch directory under the system temp dir, unique per test name.
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tally-{test}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
