use chrono::{Datelike, NaiveDate};

use crate::models::SummaryCounters;
use crate::timestamp::Timestamped;

/// The dashboard's counter cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Total,
    ThisMonth,
    ThisYear,
}

impl CounterKind {
    pub const ALL: [CounterKind; 3] = [
        CounterKind::Total,
        CounterKind::ThisMonth,
        CounterKind::ThisYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CounterKind::Total => "Total",
            CounterKind::ThisMonth => "This Month",
            CounterKind::ThisYear => "This Year",
        }
    }

    pub fn value(self, counters: &SummaryCounters) -> usize {
        match self {
            CounterKind::Total => counters.total,
            CounterKind::ThisMonth => counters.this_month,
            CounterKind::ThisYear => counters.this_year,
        }
    }
}

fn count_matching<R: Timestamped>(records: &[R], keep: impl Fn(NaiveDate) -> bool) -> usize {
    records
        .iter()
        .filter_map(|record| record.timestamp().ok())
        .filter(|date| keep(*date))
        .count()
}

pub fn count_total<R: Timestamped>(records: &[R]) -> usize {
    count_matching(records, |_| true)
}

pub fn count_this_month<R: Timestamped>(records: &[R], reference_now: NaiveDate) -> usize {
    count_matching(records, |date| {
        date.year() == reference_now.year() && date.month() == reference_now.month()
    })
}

pub fn count_this_year<R: Timestamped>(records: &[R], reference_now: NaiveDate) -> usize {
    count_matching(records, |date| date.year() == reference_now.year())
}

pub fn summarize<R: Timestamped>(records: &[R], reference_now: NaiveDate) -> SummaryCounters {
    SummaryCounters {
        total: count_total(records),
        this_month: count_this_month(records, reference_now),
        this_year: count_this_year(records, reference_now),
    }
}
