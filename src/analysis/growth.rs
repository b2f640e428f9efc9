use crate::model::{CommitRecord, GrowthPoint};
use crate::util::day_range;
use chrono::NaiveDateTime;

/// Approximate code size over time: net growth replayed in chronological
/// order, one value per day with gaps carried forward.
pub fn size_growth(records: &[CommitRecord]) -> Vec<GrowthPoint> {
    let ordered = chronological(records);
    let totals = running_totals(&ordered);
    forward_fill_daily(&totals)
}

/// Records sorted by timestamp. Equal timestamps keep their input order.
pub fn chronological(records: &[CommitRecord]) -> Vec<&CommitRecord> {
    let mut ordered: Vec<&CommitRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);
    ordered
}

/// Prefix sums of net growth, paired with the timestamp they were reached at.
pub fn running_totals(ordered: &[&CommitRecord]) -> Vec<(NaiveDateTime, i64)> {
    ordered
        .iter()
        .scan(0i64, |total, record| {
            *total = total.saturating_add(record.net_growth());
            Some((record.timestamp, *total))
        })
        .collect()
}

/// One point per day from the first to the last observation. Each day holds
/// the last total reached on or before it. `points` must be sorted.
pub fn forward_fill_daily(points: &[(NaiveDateTime, i64)]) -> Vec<GrowthPoint> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut next = 0usize;
    let mut current = first.1;

    for day in day_range(first.0.date(), last.0.date()) {
        while next < points.len() && points[next].0.date() <= day {
            current = points[next].1;
            next += 1;
        }
        series.push(GrowthPoint {
            day,
            cumulative: current,
        });
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::commit;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn replays_history_in_time_order() {
        // listed out of order on purpose
        let rows = vec![
            commit("a", "2024-01-03 09:00:00", 50, 0, "c"),
            commit("a", "2024-01-01 09:00:00", 100, 0, "a"),
            commit("a", "2024-01-02 09:00:00", 0, 30, "b"),
        ];
        let series = size_growth(&rows);
        let values: Vec<i64> = series.iter().map(|p| p.cumulative).collect();
        assert_eq!(values, vec![100, 70, 120]);
        assert_eq!(series.last().unwrap().day, day(3));
    }

    #[test]
    fn gaps_carry_last_value_forward() {
        let rows = vec![
            commit("a", "2024-01-01 10:00:00", 100, 0, "a"),
            commit("a", "2024-01-05 10:00:00", 10, 60, "b"),
        ];
        let series = size_growth(&rows);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], GrowthPoint { day: day(1), cumulative: 100 });
        assert_eq!(series[3], GrowthPoint { day: day(4), cumulative: 100 });
        assert_eq!(series[4], GrowthPoint { day: day(5), cumulative: 50 });
    }

    #[test]
    fn same_day_commits_report_end_of_day_total() {
        let rows = vec![
            commit("a", "2024-01-01 08:00:00", 10, 0, "a"),
            commit("a", "2024-01-01 18:00:00", 0, 4, "b"),
        ];
        assert_eq!(size_growth(&rows), vec![GrowthPoint { day: day(1), cumulative: 6 }]);
    }

    #[test]
    fn running_totals_can_go_negative() {
        let rows = vec![commit("a", "2024-01-01", 0, 5, "a"), commit("a", "2024-01-02", 1, 0, "b")];
        let ordered = chronological(&rows);
        let totals: Vec<i64> = running_totals(&ordered).into_iter().map(|(_, t)| t).collect();
        assert_eq!(totals, vec![-5, -4]);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let rows = vec![
            commit("a", "2024-01-01", u64::MAX, 0, "a"),
            commit("a", "2024-01-02", u64::MAX, 0, "b"),
        ];
        let ordered = chronological(&rows);
        let totals: Vec<i64> = running_totals(&ordered).into_iter().map(|(_, t)| t).collect();
        assert_eq!(totals, vec![i64::MAX, i64::MAX]);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        assert!(size_growth(&[]).is_empty());
    }
}
