use std::collections::HashSet;

use crate::record::Record;

/// Keeps the first record seen for each link, preserving encounter order.
pub fn dedup_by_link(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.course_link.clone()))
        .collect()
}
