use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::intensity::IntensityLevel;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const WEEKS_PER_MONTH: usize = 4;

/// A raw incident as delivered by the record source.
///
/// Only `timestamp` is read by the engine; `attributes` rides along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub timestamp: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl IncidentRecord {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            attributes: BTreeMap::new(),
        }
    }
}

/// Canonical (year, month, week-of-month) bucket identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    /// Zero-based month, 0 = January.
    pub month: u32,
    pub week_of_month: u32,
}

impl WeekKey {
    pub fn month_abbrev(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month % 12) as usize]
    }

    pub fn label(&self) -> String {
        format!("{} W{}", self.month_abbrev(), self.week_of_month)
    }
}

/// One Sunday..Saturday week intersecting a target year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    /// Year of the Wednesday the week is labeled by.
    pub year: i32,
    pub month: u32,
    pub week_of_month: u32,
}

impl WeekSpan {
    pub fn key(&self) -> WeekKey {
        WeekKey {
            year: self.year,
            month: self.month,
            week_of_month: self.week_of_month,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn date_range(&self) -> String {
        format!(
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub label: String,
    pub count: usize,
    pub full_label: String,
    pub date_range: String,
    pub is_placeholder: bool,
    pub intensity: IntensityLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRow {
    pub month: String,
    pub weeks: [WeekBucket; WEEKS_PER_MONTH],
}

impl MonthRow {
    pub fn total(&self) -> usize {
        self.weeks.iter().map(|week| week.count).sum()
    }
}

/// Twelve months of exactly four week buckets, in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub months: Vec<MonthRow>,
}

impl MonthGrid {
    pub fn get(&self, month: &str) -> Option<&[WeekBucket; WEEKS_PER_MONTH]> {
        self.months
            .iter()
            .find(|row| row.month == month)
            .map(|row| &row.weeks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthRow> {
        self.months.iter()
    }

    pub fn buckets(&self) -> impl Iterator<Item = &WeekBucket> {
        self.months.iter().flat_map(|row| row.weeks.iter())
    }

    pub fn total(&self) -> usize {
        self.months.iter().map(MonthRow::total).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.months.len() * WEEKS_PER_MONTH
    }

    /// Jan..Jun and Jul..Dec, the two rows of the heatmap layout.
    pub fn halves(&self) -> (&[MonthRow], &[MonthRow]) {
        self.months.split_at(self.months.len() / 2)
    }
}

/// Per-call diagnostics: where every input record ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    pub total: usize,
    pub counted: usize,
    pub out_of_year: usize,
    pub unparseable: usize,
    /// In the target year but labeled onto a week the skeleton does not hold.
    pub unmatched: usize,
    /// Counted into a week that reshaping dropped from the grid.
    pub truncated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub grid: MonthGrid,
    pub stats: AggregationStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounters {
    pub total: usize,
    pub this_month: usize,
    pub this_year: usize,
}
