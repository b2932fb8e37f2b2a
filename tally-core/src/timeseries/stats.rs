use crate::{BucketPoint, BucketedSeries, SummaryStatistics, TallyError};

/// Population summary statistics over the bucket values.
///
/// The standard deviation uses denominator `n`. These values are only used as
/// reference lines in charts.
///
/// ```
/// use tally_core::{summary_statistics, BucketPoint, BucketedSeries, Granularity};
/// use chrono::NaiveDate;
///
/// let p = |m: u32, v: f64| BucketPoint { period_start: NaiveDate::from_ymd_opt(2021, m, 1).unwrap(), value: v };
/// let s = BucketedSeries::new(Granularity::Month, vec![p(1, 2.0), p(2, 4.0), p(3, 4.0), p(4, 6.0)]);
/// let st = summary_statistics(&s).unwrap();
/// assert_eq!(st.mean, 4.0);
/// assert_eq!(st.median, 4.0);
/// assert!((st.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
///
/// # Errors
/// Returns `EmptyInput` for an empty series.
#[allow(clippy::cast_precision_loss)]
pub fn summary_statistics(series: &BucketedSeries) -> Result<SummaryStatistics, TallyError> {
    if series.is_empty() {
        return Err(TallyError::EmptyInput);
    }
    let mut values = series.values();
    let count = values.len();
    let n = count as f64;

    let total = compensated_sum(values.iter().copied());

    values.sort_by(f64::total_cmp);
    let (min, max) = (values[0], values[count - 1]);
    let mid = count / 2;
    let median = if count % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    };

    // a constant series is exact: no rounding may leak into mean or spread
    let (mean, std_dev) = if min == max {
        (min, 0.0)
    } else {
        // shift by the first value so the mean is computed from small deviations
        let pivot = values[0];
        let mean = pivot + compensated_sum(values.iter().map(|v| v - pivot)) / n;
        let variance = compensated_sum(values.iter().map(|v| (v - mean).powi(2))) / n;
        (mean, variance.sqrt())
    };

    Ok(SummaryStatistics {
        count,
        total,
        mean,
        median,
        std_dev,
        min,
        max,
    })
}

/// Neumaier-compensated summation.
fn compensated_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut carry = 0.0_f64;
    for v in values {
        let t = sum + v;
        if sum.abs() >= v.abs() {
            carry += (sum - t) + v;
        } else {
            carry += (v - t) + sum;
        }
        sum = t;
    }
    sum + carry
}

/// The bucket holding the largest value; the earliest one wins on ties.
#[must_use]
pub fn peak(series: &BucketedSeries) -> Option<BucketPoint> {
    series.points.iter().copied().reduce(|best, p| {
        if p.value > best.value { p } else { best }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Granularity;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> BucketedSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| BucketPoint {
                period_start: NaiveDate::from_ymd_opt(2021, u32::try_from(i + 1).unwrap(), 1)
                    .unwrap(),
                value: *v,
            })
            .collect();
        BucketedSeries::new(Granularity::Month, points)
    }

    #[test]
    fn odd_count_median_is_middle() {
        let st = summary_statistics(&series(&[9.0, 1.0, 5.0])).unwrap();
        assert_eq!(st.median, 5.0);
        assert_eq!(st.min, 1.0);
        assert_eq!(st.max, 9.0);
        assert_eq!(st.total, 15.0);
        assert_eq!(st.count, 3);
    }

    #[test]
    fn population_std_dev() {
        // values 2,4,4,4,5,5,7,9 have population sd exactly 2
        let st = summary_statistics(&series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])).unwrap();
        assert_eq!(st.mean, 5.0);
        assert_eq!(st.std_dev, 2.0);
        assert_eq!(st.std_band(), (3.0, 7.0));
    }

    #[test]
    fn constant_fractional_series_is_exact() {
        for v in [0.1, 1.0 / 3.0, -2.7, 1e-300, 1.5e300] {
            let st = summary_statistics(&series(&[v, v, v])).unwrap();
            assert_eq!(st.mean, v);
            assert_eq!(st.median, v);
            assert_eq!(st.std_dev, 0.0);
        }
    }

    #[test]
    fn compensated_sum_keeps_small_terms() {
        assert_eq!(compensated_sum([1e16, 1.0, -1e16].into_iter()), 1.0);
        let st = summary_statistics(&series(&[0.1, 0.2, 0.3])).unwrap();
        assert!((st.mean - 0.2).abs() < 1e-15);
    }

    #[test]
    fn empty_is_error() {
        assert_eq!(summary_statistics(&series(&[])), Err(TallyError::EmptyInput));
    }

    #[test]
    fn peak_prefers_earliest_maximum() {
        let s = series(&[3.0, 8.0, 2.0, 8.0]);
        let pk = peak(&s).unwrap();
        assert_eq!(pk.value, 8.0);
        assert_eq!(pk.period_start, NaiveDate::from_ymd_opt(2021, 2, 1).unwrap());
        assert!(peak(&series(&[])).is_none());
    }
}
