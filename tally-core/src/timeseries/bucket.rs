use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::{BucketPoint, BucketedSeries, Granularity, Observation, Reducer, TallyError};

/// Start of the bucket that contains `date`.
///
/// Weeks start on Monday; months start on the 1st.
///
/// ```
/// use tally_core::{period_start, Granularity};
/// use chrono::NaiveDate;
///
/// let wed = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// assert_eq!(period_start(wed, Granularity::Week), NaiveDate::from_ymd_opt(2019, 12, 30).unwrap());
/// assert_eq!(period_start(wed, Granularity::Month), wed);
/// ```
#[must_use]
pub fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Week => {
            let from_monday = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(from_monday)).unwrap_or(date)
        }
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Start of the bucket following the one that starts at `start`.
pub(crate) fn next_period(start: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Week => start.checked_add_days(Days::new(7)),
        Granularity::Month => start.checked_add_months(Months::new(1)),
    }
}

/// Running aggregate for the bucket currently being folded.
struct BucketAgg {
    sum: f64,
    count: usize,
    last: f64,
}

impl BucketAgg {
    const fn new(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            last: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.last = value;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, reducer: Reducer) -> f64 {
        match reducer {
            Reducer::Sum => self.sum,
            Reducer::Last => self.last,
            Reducer::Mean => self.sum / self.count as f64,
        }
    }
}

fn ensure_finite(o: &Observation) -> Result<(), TallyError> {
    if o.value.is_finite() {
        Ok(())
    } else {
        Err(TallyError::malformed(format!(
            "non-finite value {} at {}",
            o.value, o.timestamp
        )))
    }
}

/// Fold observations into buckets.
///
/// The sort is stable, so observations sharing a timestamp keep their input
/// order and `Last` picks the one that came last in the input.
fn bucket_by(
    mut observations: Vec<&Observation>,
    granularity: Granularity,
    reducer: Reducer,
) -> BucketedSeries {
    observations.sort_by_key(|o| o.timestamp);

    let mut out: Vec<BucketPoint> = Vec::new();
    let mut iter = observations.into_iter();
    let Some(first) = iter.next() else {
        return BucketedSeries::new(granularity, out);
    };
    let mut cur_bucket = period_start(first.timestamp, granularity);
    let mut agg = BucketAgg::new(first.value);

    for o in iter {
        let bucket = period_start(o.timestamp, granularity);
        if bucket == cur_bucket {
            agg.push(o.value);
        } else {
            out.push(BucketPoint {
                period_start: cur_bucket,
                value: agg.finish(reducer),
            });
            cur_bucket = bucket;
            agg = BucketAgg::new(o.value);
        }
    }
    out.push(BucketPoint {
        period_start: cur_bucket,
        value: agg.finish(reducer),
    });

    BucketedSeries::new(granularity, out)
}

/// Group observations into calendar buckets and reduce each bucket to a scalar.
///
/// - One output bucket per non-empty period, ordered by period start.
/// - `Sum` and `Mean` depend only on the multiset of observations.
/// - `Last` takes the chronologically last observation; ties on the same date
///   are resolved by input order. This assumes the input is already
///   forward-filled and is not validated.
///
/// ```
/// use tally_core::{bucket, Granularity, Observation, Reducer};
/// use chrono::NaiveDate;
///
/// let d = |m: u32, day: u32| NaiveDate::from_ymd_opt(2020, m, day).unwrap();
/// let obs = vec![
///     Observation::new(d(1, 1), 10.0),
///     Observation::new(d(1, 8), 20.0),
///     Observation::new(d(1, 15), 30.0),
/// ];
/// let weekly = bucket(&obs, Granularity::Week, Reducer::Sum).unwrap();
/// assert_eq!(weekly.values(), vec![10.0, 20.0, 30.0]);
/// ```
///
/// # Errors
/// - `EmptyInput` if `observations` is empty.
/// - `MalformedInput` if any value is NaN or infinite.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "tally_core::bucket",
        skip(observations),
        fields(observations = observations.len(), granularity = %granularity, reducer = %reducer),
    )
)]
pub fn bucket(
    observations: &[Observation],
    granularity: Granularity,
    reducer: Reducer,
) -> Result<BucketedSeries, TallyError> {
    if observations.is_empty() {
        return Err(TallyError::EmptyInput);
    }
    for o in observations {
        ensure_finite(o)?;
    }
    Ok(bucket_by(observations.iter().collect(), granularity, reducer))
}

/// Bucket each distinct `group_key` independently.
///
/// Returns one series per group, keyed and ordered by group key.
///
/// # Errors
/// - `EmptyInput` if `observations` is empty.
/// - `MalformedInput` if an observation has no group key or a non-finite value.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "tally_core::bucket_grouped",
        skip(observations),
        fields(observations = observations.len(), granularity = %granularity, reducer = %reducer),
    )
)]
pub fn bucket_grouped(
    observations: &[Observation],
    granularity: Granularity,
    reducer: Reducer,
) -> Result<BTreeMap<String, BucketedSeries>, TallyError> {
    if observations.is_empty() {
        return Err(TallyError::EmptyInput);
    }

    let mut groups: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for o in observations {
        ensure_finite(o)?;
        let Some(key) = o.group_key.as_deref() else {
            return Err(TallyError::malformed(format!(
                "observation at {} has no group key",
                o.timestamp
            )));
        };
        groups.entry(key).or_default().push(o);
    }

    Ok(groups
        .into_iter()
        .map(|(key, members)| {
            (
                key.to_string(),
                bucket_by(members, granularity, reducer),
            )
        })
        .collect())
}
