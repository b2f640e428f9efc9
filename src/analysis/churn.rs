use super::fill_months;
use crate::model::{ChurnBucket, CommitRecord};
use crate::util::YearMonth;
use std::collections::BTreeMap;

/// Inserted and deleted lines per calendar month, on one shared month axis.
pub fn monthly_churn(records: &[CommitRecord]) -> Vec<ChurnBucket> {
    let mut buckets: BTreeMap<YearMonth, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(YearMonth::of(&record.timestamp)).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(record.insertions);
        entry.1 = entry.1.saturating_add(record.deletions);
    }

    fill_months(&buckets)
        .into_iter()
        .map(|(month, (insertions, deletions))| ChurnBucket {
            month: month.key(),
            insertions,
            deletions,
        })
        .collect()
}
