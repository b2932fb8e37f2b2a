use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::TallyError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A single dated value, optionally tagged with a group key (e.g. a country).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation.
    pub timestamp: NaiveDate,
    /// Observed value.
    pub value: f64,
    /// Group the observation belongs to, if the input is grouped.
    pub group_key: Option<String>,
}

impl Observation {
    /// Build an ungrouped observation.
    #[must_use]
    pub const fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self {
            timestamp,
            value,
            group_key: None,
        }
    }

    /// Attach a group key.
    #[must_use]
    pub fn with_group(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(key.into());
        self
    }

    /// Build an observation from a textual date.
    ///
    /// # Errors
    /// Returns `MalformedInput` if the date cannot be parsed.
    pub fn parse(date: &str, value: f64, group_key: Option<String>) -> Result<Self, TallyError> {
        Ok(Self {
            timestamp: parse_date(date)?,
            value,
            group_key,
        })
    }
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS` and RFC 3339 timestamps; the time of day is dropped.
///
/// ```
/// use tally_core::observation::parse_date;
/// use chrono::NaiveDate;
///
/// let d = parse_date("2021-03-07T12:30:00Z").unwrap();
/// assert_eq!(d, NaiveDate::from_ymd_opt(2021, 3, 7).unwrap());
/// assert!(parse_date("07.03.2021").is_err());
/// ```
///
/// # Errors
/// Returns `MalformedInput` naming the offending text.
pub fn parse_date(raw: &str) -> Result<NaiveDate, TallyError> {
    let s = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    Err(TallyError::malformed(format!("unparseable date '{s}'")))
}

/// A raw row as produced by an `ObservationSource`, before gap handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    /// Calendar date of the row.
    pub timestamp: NaiveDate,
    /// Value, or `None` when the cell was empty.
    pub value: Option<f64>,
    /// Group the row belongs to, if the source is grouped.
    pub group_key: Option<String>,
}

/// Everything one source produced, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFrame {
    /// Label used for ungrouped rows of this source (e.g. "Mexico").
    pub label: String,
    /// Rows in the order they were read.
    pub rows: Vec<SourceRow>,
}

impl SourceFrame {
    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
