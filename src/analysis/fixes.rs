use super::activity::count_by_month;
use crate::model::{CommitRecord, MonthlyCount};

/// Terms that mark a commit as a defect fix, English and Chinese.
/// Stored lowercase; matched as substrings.
pub const FIX_KEYWORDS: &[&str] = &[
    "fix", "bug", "issue", "crash", "error", "solve", "修复", "解决", "问题", "报错",
];

/// Case-insensitive keyword classifier for commit messages.
#[derive(Debug, Clone)]
pub struct FixClassifier {
    keywords: Vec<String>,
}

impl FixClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords.into_iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn is_fix(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for FixClassifier {
    fn default() -> Self {
        Self::new(FIX_KEYWORDS)
    }
}

/// Fix commits per calendar month, or `None` when no commit qualifies.
pub fn fix_trend(records: &[CommitRecord]) -> Option<Vec<MonthlyCount>> {
    let classifier = FixClassifier::default();
    let months = count_by_month(records.iter().filter(|r| classifier.is_fix(&r.message)));
    (!months.is_empty()).then_some(months)
}
