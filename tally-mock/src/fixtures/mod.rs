pub mod deaths;
pub mod weekly;

use tally_core::observation::parse_date;
use tally_core::{SourceRow, TallyError};

pub fn rows(data: &[(&str, Option<f64>)], group: Option<&str>) -> Result<Vec<SourceRow>, TallyError> {
    data.iter()
        .map(|(date, value)| {
            Ok(SourceRow {
                timestamp: parse_date(date)?,
                value: *value,
                group_key: group.map(str::to_string),
            })
        })
        .collect()
}
