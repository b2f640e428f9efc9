use super::fill_months;
use crate::model::{CommitRecord, MonthlyCount};
use crate::util::YearMonth;
use std::collections::BTreeMap;

/// Commits per calendar month, oldest month first.
pub fn monthly_activity(records: &[CommitRecord]) -> Vec<MonthlyCount> {
    count_by_month(records.iter())
}

pub(crate) fn count_by_month<'a>(records: impl Iterator<Item = &'a CommitRecord>) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(YearMonth::of(&record.timestamp)).or_insert(0) += 1;
    }

    fill_months(&buckets)
        .into_iter()
        .map(|(month, commits)| MonthlyCount {
            month: month.key(),
            commits,
        })
        .collect()
}
