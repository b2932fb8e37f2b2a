use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BucketPoint, BucketedSeries, Granularity, TallyError};

/// Several labelled series sharing one period axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    /// Shared granularity.
    pub granularity: Granularity,
    /// Union of every input's periods, ascending.
    pub periods: Vec<NaiveDate>,
    /// One column per input, in input order; `columns[k].1.len() == periods.len()`.
    pub columns: Vec<(String, Vec<f64>)>,
}

impl AlignedSeries {
    /// Values of the column with the given label.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_slice())
    }
}

/// Outer-join labelled series on their period start.
///
/// - The period axis is the sorted union of all inputs' periods.
/// - A series with no bucket for a period contributes `0.0` there.
/// - Column order follows input order.
///
/// # Errors
/// - `EmptyInput` if `series` is empty.
/// - `InvalidArg` if the inputs do not share one granularity or a label repeats.
pub fn align(series: &[(&str, &BucketedSeries)]) -> Result<AlignedSeries, TallyError> {
    let Some((_, first)) = series.first() else {
        return Err(TallyError::EmptyInput);
    };
    let granularity = first.granularity;

    let mut labels: BTreeSet<&str> = BTreeSet::new();
    let mut periods: BTreeSet<NaiveDate> = BTreeSet::new();
    for (label, s) in series {
        if s.granularity != granularity {
            return Err(TallyError::InvalidArg(format!(
                "cannot align '{label}' ({}) with {granularity} series",
                s.granularity
            )));
        }
        if !labels.insert(*label) {
            return Err(TallyError::InvalidArg(format!(
                "duplicate series label '{label}'"
            )));
        }
        periods.extend(s.points.iter().map(|p| p.period_start));
    }
    let periods: Vec<NaiveDate> = periods.into_iter().collect();

    let columns = series
        .iter()
        .map(|(label, s)| {
            let values = periods.iter().map(|p| s.get(*p).unwrap_or(0.0)).collect();
            ((*label).to_string(), values)
        })
        .collect();

    Ok(AlignedSeries {
        granularity,
        periods,
        columns,
    })
}

/// Per-period difference `a - b` after outer alignment (missing buckets count as zero).
///
/// # Errors
/// Returns `InvalidArg` if the two series have different granularities.
pub fn spread(a: &BucketedSeries, b: &BucketedSeries) -> Result<BucketedSeries, TallyError> {
    let aligned = align(&[("a", a), ("b", b)])?;
    let (left, right) = (&aligned.columns[0].1, &aligned.columns[1].1);
    let points = aligned
        .periods
        .iter()
        .zip(left.iter().zip(right))
        .map(|(p, (x, y))| BucketPoint {
            period_start: *p,
            value: x - y,
        })
        .collect();
    Ok(BucketedSeries::new(aligned.granularity, points))
}
