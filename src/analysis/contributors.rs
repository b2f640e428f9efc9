use crate::model::{CommitRecord, ContributorRank};
use std::collections::HashMap;

pub const TOP_CONTRIBUTORS: usize = 10;

/// Authors with the most commits. Names are matched exactly.
pub fn top_by_commits(records: &[CommitRecord]) -> Vec<ContributorRank> {
    rank_authors(records, |_| 1, TOP_CONTRIBUTORS)
}

/// Authors with the largest sum of insertions plus deletions.
pub fn top_by_lines(records: &[CommitRecord]) -> Vec<ContributorRank> {
    rank_authors(records, CommitRecord::total_changes, TOP_CONTRIBUTORS)
}

/// Group by author, accumulate `metric`, and keep the `limit` largest.
///
/// Groups keep the order in which each author first appears, and the sort is
/// stable, so equal totals stay in first-seen order.
pub fn rank_authors<F>(records: &[CommitRecord], metric: F, limit: usize) -> Vec<ContributorRank>
where
    F: Fn(&CommitRecord) -> u64,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranks: Vec<ContributorRank> = Vec::new();

    for record in records {
        let value = metric(record);
        match index.get(record.author_name.as_str()) {
            Some(&i) => ranks[i].value = ranks[i].value.saturating_add(value),
            None => {
                index.insert(record.author_name.as_str(), ranks.len());
                ranks.push(ContributorRank {
                    author: record.author_name.clone(),
                    value,
                });
            }
        }
    }

    ranks.sort_by(|a, b| b.value.cmp(&a.value));
    ranks.truncate(limit);
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::commit;
    use pretty_assertions::assert_eq;

    fn names(ranks: &[ContributorRank]) -> Vec<&str> {
        ranks.iter().map(|r| r.author.as_str()).collect()
    }

    #[test]
    fn rankings_can_disagree() {
        let mut rows = Vec::new();
        for day in 1..=5 {
            rows.push(commit("Tiny", &format!("2024-01-0{day}"), 1, 0, "typo"));
        }
        rows.push(commit("Huge", "2024-01-06", 5000, 1000, "import vendor"));

        let by_commits = top_by_commits(&rows);
        let by_lines = top_by_lines(&rows);

        assert_eq!(names(&by_commits), ["Tiny", "Huge"]);
        assert_eq!(by_commits[0].value, 5);
        assert_eq!(names(&by_lines), ["Huge", "Tiny"]);
        assert_eq!(by_lines[0].value, 6000);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let rows = vec![
            commit("zed", "2024-01-01", 1, 1, "a"),
            commit("amy", "2024-01-02", 1, 1, "b"),
            commit("mia", "2024-01-03", 1, 1, "c"),
        ];
        assert_eq!(names(&top_by_commits(&rows)), ["zed", "amy", "mia"]);
        assert_eq!(names(&top_by_lines(&rows)), ["zed", "amy", "mia"]);
    }

    #[test]
    fn keeps_at_most_ten_sorted_descending() {
        let mut rows = Vec::new();
        for author in 0..15u64 {
            for n in 0..=author {
                rows.push(commit(&format!("dev{author}"), "2024-01-01", n, 0, "w"));
            }
        }
        let ranks = top_by_commits(&rows);
        assert_eq!(ranks.len(), 10);
        assert!(ranks.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(ranks[0].author, "dev14");
    }

    #[test]
    fn near_identical_names_are_distinct() {
        let rows = vec![
            commit("Alice", "2024-01-01", 1, 0, "a"),
            commit("alice", "2024-01-02", 1, 0, "b"),
            commit("Alice ", "2024-01-03", 1, 0, "c"),
        ];
        assert_eq!(top_by_commits(&rows).len(), 3);
    }
}
