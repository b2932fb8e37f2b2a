use std::collections::HashMap;

use crate::{FillPolicy, Observation, SourceFrame};

/// Convert source rows into observations, resolving empty values per `policy`.
///
/// - `Skip` drops rows without a value.
/// - `Forward` carries the last seen value of the same group forward, in row
///   order. Rows before the first value of their group are dropped. Rows are
///   not re-sorted first; the source is expected to list each group
///   chronologically.
#[must_use]
pub fn into_observations(frame: &SourceFrame, policy: FillPolicy) -> Vec<Observation> {
    match policy {
        FillPolicy::Skip => frame
            .rows
            .iter()
            .filter_map(|r| {
                r.value.map(|value| Observation {
                    timestamp: r.timestamp,
                    value,
                    group_key: r.group_key.clone(),
                })
            })
            .collect(),
        FillPolicy::Forward => {
            let mut last_seen: HashMap<Option<&str>, f64> = HashMap::new();
            let mut out = Vec::with_capacity(frame.len());
            for r in &frame.rows {
                let key = r.group_key.as_deref();
                let value = match r.value {
                    Some(v) => {
                        last_seen.insert(key, v);
                        v
                    }
                    None => match last_seen.get(&key) {
                        Some(v) => *v,
                        None => continue,
                    },
                };
                out.push(Observation {
                    timestamp: r.timestamp,
                    value,
                    group_key: r.group_key.clone(),
                });
            }
            out
        }
    }
}
