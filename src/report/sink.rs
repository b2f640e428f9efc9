use crate::error::Result;
use crate::model::{ChurnBucket, ContributorRank, GrowthPoint, MonthlyCount, Report, TermCount};
use serde::Serialize;

/// The seven output slots, numbered in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSlot {
    MonthlyActivity,
    TopByCommits,
    TopByLines,
    MonthlyChurn,
    SizeGrowth,
    FixTrend,
    TermFrequency,
}

impl ViewSlot {
    pub const ALL: [ViewSlot; 7] = [
        ViewSlot::MonthlyActivity,
        ViewSlot::TopByCommits,
        ViewSlot::TopByLines,
        ViewSlot::MonthlyChurn,
        ViewSlot::SizeGrowth,
        ViewSlot::FixTrend,
        ViewSlot::TermFrequency,
    ];

    pub fn number(self) -> u8 {
        match self {
            ViewSlot::MonthlyActivity => 1,
            ViewSlot::TopByCommits => 2,
            ViewSlot::TopByLines => 3,
            ViewSlot::MonthlyChurn => 4,
            ViewSlot::SizeGrowth => 5,
            ViewSlot::FixTrend => 6,
            ViewSlot::TermFrequency => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewSlot::MonthlyActivity => "monthly_activity",
            ViewSlot::TopByCommits => "top_contributors_by_commits",
            ViewSlot::TopByLines => "top_contributors_by_lines",
            ViewSlot::MonthlyChurn => "monthly_churn",
            ViewSlot::SizeGrowth => "size_growth",
            ViewSlot::FixTrend => "fix_trend",
            ViewSlot::TermFrequency => "term_frequency",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewSlot::MonthlyActivity => "Monthly Commit Activity",
            ViewSlot::TopByCommits => "Top Contributors by Commits",
            ViewSlot::TopByLines => "Top Contributors by Lines Changed",
            ViewSlot::MonthlyChurn => "Monthly Code Churn",
            ViewSlot::SizeGrowth => "Cumulative Code Size",
            ViewSlot::FixTrend => "Defect Fix Trend",
            ViewSlot::TermFrequency => "Commit Message Terms",
        }
    }

    /// Stem for files written for this slot, e.g. `4_monthly_churn`.
    pub fn file_stem(self) -> String {
        format!("{}_{}", self.number(), self.name())
    }
}

/// Borrowed data of a single view.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ViewData<'a> {
    Monthly(&'a [MonthlyCount]),
    Ranking(&'a [ContributorRank]),
    Churn(&'a [ChurnBucket]),
    Growth(&'a [GrowthPoint]),
    /// `None` when no commit qualified.
    MaybeMonthly(Option<&'a [MonthlyCount]>),
    Terms(&'a [TermCount]),
}

impl ViewData<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            ViewData::Monthly(v) => v.is_empty(),
            ViewData::Ranking(v) => v.is_empty(),
            ViewData::Churn(v) => v.is_empty(),
            ViewData::Growth(v) => v.is_empty(),
            ViewData::MaybeMonthly(v) => v.map_or(true, |v| v.is_empty()),
            ViewData::Terms(v) => v.is_empty(),
        }
    }
}

pub fn view_data(report: &Report, slot: ViewSlot) -> ViewData<'_> {
    match slot {
        ViewSlot::MonthlyActivity => ViewData::Monthly(&report.monthly_activity),
        ViewSlot::TopByCommits => ViewData::Ranking(&report.top_by_commits),
        ViewSlot::TopByLines => ViewData::Ranking(&report.top_by_lines),
        ViewSlot::MonthlyChurn => ViewData::Churn(&report.monthly_churn),
        ViewSlot::SizeGrowth => ViewData::Growth(&report.size_growth),
        ViewSlot::FixTrend => ViewData::MaybeMonthly(report.fix_trend.as_deref()),
        ViewSlot::TermFrequency => ViewData::Terms(&report.term_frequency),
    }
}

/// Receiver for rendered views. Implementations decide how a view looks;
/// they only get its slot and data.
pub trait ViewSink {
    fn emit(&mut self, slot: ViewSlot, data: ViewData<'_>) -> Result<()>;
}

/// Hand every view to `sink`. A failing view is logged and skipped so the
/// remaining views are still emitted. Returns the number of failures.
pub fn emit_all(report: &Report, sink: &mut dyn ViewSink) -> usize {
    let mut failures = 0;
    for slot in ViewSlot::ALL {
        if let Err(e) = sink.emit(slot, view_data(report, slot)) {
            tracing::warn!("failed to render view {}: {e}", slot.file_stem());
            failures += 1;
        }
    }
    failures
}
