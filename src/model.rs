use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Column order of the commit table. Serialization follows the field order
/// of [`CommitRecord`], which must stay in sync with this list.
pub const ARTIFACT_COLUMNS: [&str; 8] = [
    "id",
    "author_name",
    "author_email",
    "timestamp",
    "message",
    "insertions",
    "deletions",
    "lines_changed",
];

/// One row of the commit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    #[serde(with = "naive_timestamp")]
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub insertions: u64,
    pub deletions: u64,
    pub lines_changed: u64,
}

impl CommitRecord {
    /// Saturating: table counts are not range-checked on load.
    pub fn total_changes(&self) -> u64 {
        self.insertions.saturating_add(self.deletions)
    }

    pub fn net_growth(&self) -> i64 {
        let ins = i64::try_from(self.insertions).unwrap_or(i64::MAX);
        let del = i64::try_from(self.deletions).unwrap_or(i64::MAX);
        ins.saturating_sub(del)
    }
}

/// Line statistics for a single commit, as reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub insertions: u64,
    pub deletions: u64,
}

impl LineStats {
    pub fn lines(&self) -> u64 {
        self.insertions.saturating_add(self.deletions)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRank {
    pub author: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnBucket {
    pub month: String,
    pub insertions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub day: NaiveDate,
    pub cumulative: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

/// Everything the aggregator derives from one commit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_commits: usize,
    pub first_commit: Option<NaiveDateTime>,
    pub last_commit: Option<NaiveDateTime>,
    pub monthly_activity: Vec<MonthlyCount>,
    pub top_by_commits: Vec<ContributorRank>,
    pub top_by_lines: Vec<ContributorRank>,
    pub monthly_churn: Vec<ChurnBucket>,
    pub size_growth: Vec<GrowthPoint>,
    pub fix_trend: Option<Vec<MonthlyCount>>,
    pub term_frequency: Vec<TermCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub artifact: String,
    pub report: Report,
}

/// Envelope written for each view, in the same shape as [`ReportOutput`].
#[derive(Serialize)]
pub struct ViewOutput<'a, T: Serialize> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub slot: u8,
    pub name: &'a str,
    pub data: &'a T,
}

pub mod naive_timestamp {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    pub fn parse(input: &str) -> Option<NaiveDateTime> {
        let input = input.trim();
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, FORMAT) {
            return Some(ts);
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
            return Some(ts);
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}
