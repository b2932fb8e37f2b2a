//! CSV source for tally.
//!
//! Reads a file with a header row and looks columns up by their literal
//! names (e.g. `"Day"` and `"Weekly cases"`). Headers are compared after
//! trimming whitespace and a leading UTF-8 byte-order mark.
//!
//! ```rust,no_run
//! use tally_core::ObservationSource;
//! use tally_csv::CsvSource;
//!
//! let mexico = CsvSource::new("mexico/weekly_cases.csv", "Weekly cases").label("Mexico");
//! let frame = mexico.load()?;
//! println!("{} rows", frame.len());
//! # Ok::<(), tally_core::TallyError>(())
//! ```
#![warn(missing_docs)]

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tally_core::observation::parse_date;
use tally_core::{ObservationSource, SourceFrame, SourceRow, TallyError};

/// Default name of the date column.
pub const DEFAULT_DATE_COLUMN: &str = "Day";

/// An `ObservationSource` backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    label: Option<String>,
    date_column: String,
    value_column: String,
    group_column: Option<String>,
}

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    value: usize,
    group: Option<usize>,
}

impl CsvSource {
    /// Create a source reading `value_column` from the file at `path`.
    ///
    /// The date column defaults to [`DEFAULT_DATE_COLUMN`]; the label defaults
    /// to the file stem.
    pub fn new(path: impl Into<PathBuf>, value_column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            value_column: value_column.into(),
            group_column: None,
        }
    }

    /// Override the label used for this source's series.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Override the date column name.
    #[must_use]
    pub fn date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    /// Split rows into groups by the value of `column` (e.g. `"Country"`).
    #[must_use]
    pub fn group_column(mut self, column: impl Into<String>) -> Self {
        self.group_column = Some(column.into());
        self
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolved_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map_or_else(|| self.path.display().to_string(), |s| s.to_string_lossy().into_owned())
        })
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn resolve_columns(&self, headers: &StringRecord) -> Result<Columns, TallyError> {
        let map: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}'), idx))
            .collect();
        let find = |name: &str| {
            map.get(name.trim())
                .copied()
                .ok_or_else(|| TallyError::missing_column(name, self.origin()))
        };
        Ok(Columns {
            date: find(&self.date_column)?,
            value: find(&self.value_column)?,
            group: self.group_column.as_deref().map(find).transpose()?,
        })
    }

    /// Parse CSV content from any reader, as if it were this source's file.
    ///
    /// # Errors
    /// - `MissingColumn` if a configured column is absent from the header.
    /// - `MalformedInput` for unreadable records, dates or values; the message
    ///   names the offending line.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<SourceFrame, TallyError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| TallyError::malformed(format!("{}: unreadable header: {e}", self.origin())))?
            .clone();
        let cols = self.resolve_columns(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| match e.position() {
                Some(pos) => TallyError::malformed(format!("{}:{}: {e}", self.origin(), pos.line())),
                None => TallyError::malformed(format!("{}: {e}", self.origin())),
            })?;
            // the line a record starts on; quoted fields may span several
            let line = record.position().map_or(0, csv::Position::line);
            rows.push(self.parse_row(&record, &cols, line)?);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(source = %self.origin(), rows = rows.len(), "csv source read");

        Ok(SourceFrame {
            label: self.resolved_label(),
            rows,
        })
    }

    fn parse_row(&self, record: &StringRecord, cols: &Columns, line: u64) -> Result<SourceRow, TallyError> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let at = |e: TallyError| match e {
            TallyError::MalformedInput(msg) => {
                TallyError::malformed(format!("{}:{line}: {msg}", self.origin()))
            }
            other => other,
        };

        let timestamp = parse_date(cell(cols.date)).map_err(at)?;

        let raw_value = cell(cols.value);
        let value = if raw_value.is_empty() {
            None
        } else {
            let v: f64 = raw_value.parse().map_err(|_| {
                at(TallyError::malformed(format!(
                    "non-numeric value '{raw_value}' in column '{}'",
                    self.value_column
                )))
            })?;
            Some(v)
        };

        let group_key = match cols.group {
            Some(idx) => {
                let key = cell(idx);
                if key.is_empty() {
                    return Err(at(TallyError::malformed("empty group key")));
                }
                Some(key.to_string())
            }
            None => None,
        };

        Ok(SourceRow {
            timestamp,
            value,
            group_key,
        })
    }
}

impl ObservationSource for CsvSource {
    fn name(&self) -> &str {
        "tally-csv"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally_csv::load",
            skip(self),
            fields(path = %self.path.display(), value_column = %self.value_column),
        )
    )]
    fn load(&self) -> Result<SourceFrame, TallyError> {
        let file = File::open(&self.path).map_err(|e| TallyError::io(self.origin(), e))?;
        self.read_from(file)
    }
}
