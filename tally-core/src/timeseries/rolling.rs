use crate::{BucketedSeries, RollingAverage, RollingPoint, TallyError};

/// Centered moving average with null-padded edges.
///
/// For each index `i` the window covers `[i - window/2, i + window/2]`. If the
/// whole window lies inside the series the output is the mean of that slice,
/// otherwise it is `None`. The output always has the same length as the input,
/// and `window = 1` reproduces the input values.
///
/// ```
/// use tally_core::{rolling_average, BucketPoint, BucketedSeries, Granularity};
/// use chrono::NaiveDate;
///
/// let p = |d: u32, v: f64| BucketPoint { period_start: NaiveDate::from_ymd_opt(2020, 1, d).unwrap(), value: v };
/// let s = BucketedSeries::new(Granularity::Week, vec![p(6, 10.0), p(13, 20.0), p(20, 30.0)]);
/// let avg = rolling_average(&s, 3).unwrap();
/// assert_eq!(avg.values(), vec![None, Some(20.0), None]);
/// ```
///
/// # Errors
/// Returns `InvalidWindow` if `window` is zero or even.
#[allow(clippy::cast_precision_loss)]
pub fn rolling_average(series: &BucketedSeries, window: usize) -> Result<RollingAverage, TallyError> {
    if window == 0 || window % 2 == 0 {
        return Err(TallyError::InvalidWindow { window });
    }
    let half = window / 2;
    let n = series.len();

    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let value = (i >= half && i + half < n).then(|| {
                let slice = &series.points[i - half..=i + half];
                slice.iter().map(|q| q.value).sum::<f64>() / window as f64
            });
            RollingPoint {
                period_start: p.period_start,
                value,
            }
        })
        .collect();

    Ok(RollingAverage { window, points })
}
