//! Aggregate views over a loaded commit table.
//!
//! Every view is a pure function of the record slice; none depends on
//! another's output and none relies on row order.

pub mod activity;
pub mod churn;
pub mod contributors;
pub mod fixes;
pub mod growth;
pub mod terms;

pub use activity::monthly_activity;
pub use churn::monthly_churn;
pub use contributors::{top_by_commits, top_by_lines, TOP_CONTRIBUTORS};
pub use fixes::{fix_trend, FixClassifier, FIX_KEYWORDS};
pub use growth::size_growth;
pub use terms::{term_frequency, STOPWORDS};

use crate::artifact;
use crate::error::{Degradation, Result};
use crate::model::{CommitRecord, Report};
use crate::util::{month_range, YearMonth};
use std::collections::BTreeMap;
use std::path::Path;

/// Load the commit table at `path` and compute every view.
pub fn analyze(path: &Path) -> Result<Report> {
    let table = artifact::read_table(path)?;
    if table.skipped > 0 {
        tracing::warn!("{} rows of {} could not be read", table.skipped, path.display());
    }
    Ok(aggregate(&table.records))
}

pub fn aggregate(records: &[CommitRecord]) -> Report {
    if records.is_empty() {
        Degradation::EmptyResult { view: "commit table" }.emit();
    }

    let report = Report {
        total_commits: records.len(),
        first_commit: records.iter().map(|r| r.timestamp).min(),
        last_commit: records.iter().map(|r| r.timestamp).max(),
        monthly_activity: monthly_activity(records),
        top_by_commits: top_by_commits(records),
        top_by_lines: top_by_lines(records),
        monthly_churn: monthly_churn(records),
        size_growth: size_growth(records),
        fix_trend: fix_trend(records),
        term_frequency: term_frequency(records),
    };

    if !records.is_empty() && report.fix_trend.is_none() {
        Degradation::EmptyResult { view: "fix trend" }.emit();
    }

    report
}

/// Expand sparse month buckets into a continuous axis from the first to the
/// last populated month, filling gaps with `T::default()`.
pub(crate) fn fill_months<T: Default + Clone>(buckets: &BTreeMap<YearMonth, T>) -> Vec<(YearMonth, T)> {
    let (Some((&first, _)), Some((&last, _))) = (buckets.first_key_value(), buckets.last_key_value()) else {
        return Vec::new();
    };
    month_range(first, last)
        .map(|m| (m, buckets.get(&m).cloned().unwrap_or_default()))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::commit;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_table_degrades_every_view() {
        let report = aggregate(&[]);
        assert_eq!(report.total_commits, 0);
        assert!(report.first_commit.is_none());
        assert!(report.monthly_activity.is_empty());
        assert!(report.top_by_commits.is_empty());
        assert!(report.top_by_lines.is_empty());
        assert!(report.monthly_churn.is_empty());
        assert!(report.size_growth.is_empty());
        assert!(report.fix_trend.is_none());
        assert!(report.term_frequency.is_empty());
    }

    #[test]
    fn views_do_not_depend_on_row_order() {
        let rows = vec![
            commit("Dev A", "2024-01-01", 100, 50, "feat: login"),
            commit("Dev B", "2024-02-01", 200, 50, "fix: bug"),
            commit("Dev A", "2024-03-01", 300, 50, "docs: update"),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();

        let forward = aggregate(&rows);
        let backward = aggregate(&reversed);
        assert_eq!(forward.monthly_activity, backward.monthly_activity);
        assert_eq!(forward.monthly_churn, backward.monthly_churn);
        assert_eq!(forward.size_growth, backward.size_growth);
        assert_eq!(forward.fix_trend, backward.fix_trend);
        assert_eq!(
            forward.first_commit.map(|t| t.to_string()),
            Some("2024-01-01 00:00:00".to_string())
        );
    }

    #[test]
    fn fill_months_zero_fills_gaps() {
        let mut buckets = BTreeMap::new();
        buckets.insert(YearMonth { year: 2024, month: 1 }, 2u64);
        buckets.insert(YearMonth { year: 2024, month: 4 }, 1u64);
        let filled: Vec<u64> = fill_months(&buckets).into_iter().map(|(_, v)| v).collect();
        assert_eq!(filled, vec![2, 0, 0, 1]);
    }
}
