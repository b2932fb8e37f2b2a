use crate::timeseries::bucket::next_period;
use crate::{BucketPoint, BucketedSeries};

/// Period-over-period deltas.
///
/// `value[i] = series[i] - series[i-1]`; the first bucket has no predecessor
/// and is set to `0.0`. Used to turn a cumulative running total into
/// per-period increments.
///
/// ```
/// use tally_core::{difference, BucketPoint, BucketedSeries, Granularity};
/// use chrono::NaiveDate;
///
/// let p = |m: u32, v: f64| BucketPoint { period_start: NaiveDate::from_ymd_opt(2021, m, 1).unwrap(), value: v };
/// let cumulative = BucketedSeries::new(Granularity::Month, vec![p(1, 100.0), p(2, 150.0), p(3, 170.0)]);
/// assert_eq!(difference(&cumulative).values(), vec![0.0, 50.0, 20.0]);
/// ```
#[must_use]
pub fn difference(series: &BucketedSeries) -> BucketedSeries {
    let mut prev: Option<f64> = None;
    let points = series
        .points
        .iter()
        .map(|p| {
            let delta = prev.map_or(0.0, |before| p.value - before);
            prev = Some(p.value);
            BucketPoint {
                period_start: p.period_start,
                value: delta,
            }
        })
        .collect();
    BucketedSeries::new(series.granularity, points)
}

/// Running total of bucket values.
#[must_use]
pub fn cumulative_sum(series: &BucketedSeries) -> BucketedSeries {
    let mut acc = 0.0;
    let points = series
        .points
        .iter()
        .map(|p| {
            acc += p.value;
            BucketPoint {
                period_start: p.period_start,
                value: acc,
            }
        })
        .collect();
    BucketedSeries::new(series.granularity, points)
}

/// Insert a zero-valued bucket for every empty period between the first and
/// last bucket, so consecutive entries are exactly one period apart.
#[must_use]
pub fn zero_fill(series: &BucketedSeries) -> BucketedSeries {
    let (Some(first), Some(last)) = (series.first_period(), series.last_period()) else {
        return series.clone();
    };

    let mut out: Vec<BucketPoint> = Vec::with_capacity(series.len());
    let mut existing = series.points.iter().peekable();
    let mut cur = Some(first);
    while let Some(period) = cur.filter(|p| *p <= last) {
        let value = match existing.peek() {
            Some(p) if p.period_start == period => existing.next().map_or(0.0, |p| p.value),
            _ => 0.0,
        };
        out.push(BucketPoint {
            period_start: period,
            value,
        });
        cur = next_period(period, series.granularity);
    }
    BucketedSeries::new(series.granularity, out)
}
