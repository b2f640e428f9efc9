use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Calendar month bucket, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Every month from `first` to `last`, both inclusive.
pub fn month_range(first: YearMonth, last: YearMonth) -> impl Iterator<Item = YearMonth> {
    std::iter::successors(Some(first), move |m| {
        let next = m.succ();
        (next <= last).then_some(next)
    })
    .take_while(move |m| *m <= last)
}

/// Every day from `first` to `last`, both inclusive.
pub fn day_range(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |d| *d <= last)
}
