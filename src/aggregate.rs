//! Folding dated records into the fixed 12x4 month grid.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;

use crate::calendar::{grid_weeks, week_key};
use crate::error::CalendarError;
use crate::intensity::classify;
use crate::models::{
    Aggregation, AggregationStats, MonthGrid, MonthRow, WeekBucket, WeekKey, WeekSpan,
    MONTH_ABBREVIATIONS, WEEKS_PER_MONTH,
};
use crate::timestamp::Timestamped;

/// How a month's real weeks are normalized to exactly four slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReshapePolicy {
    Exact,
    /// Keep the first four weeks, discard `dropped` trailing ones.
    Truncate { dropped: usize },
    /// Append `missing` placeholder buckets.
    Pad { missing: usize },
}

impl ReshapePolicy {
    pub fn for_len(real_weeks: usize) -> Self {
        match real_weeks.cmp(&WEEKS_PER_MONTH) {
            std::cmp::Ordering::Equal => ReshapePolicy::Exact,
            std::cmp::Ordering::Greater => ReshapePolicy::Truncate {
                dropped: real_weeks - WEEKS_PER_MONTH,
            },
            std::cmp::Ordering::Less => ReshapePolicy::Pad {
                missing: WEEKS_PER_MONTH - real_weeks,
            },
        }
    }
}

pub fn aggregate<R: Timestamped>(records: &[R], year: i32) -> Result<MonthGrid, CalendarError> {
    aggregate_with_stats(records, year).map(|aggregation| aggregation.grid)
}

pub fn aggregate_with_stats<R: Timestamped>(
    records: &[R],
    year: i32,
) -> Result<Aggregation, CalendarError> {
    let weeks = grid_weeks(year)?;
    let mut counts: BTreeMap<WeekKey, usize> = weeks.iter().map(|week| (week.key(), 0)).collect();
    let mut stats = AggregationStats {
        total: records.len(),
        ..AggregationStats::default()
    };

    for (index, record) in records.iter().enumerate() {
        let date = match record.timestamp() {
            Ok(date) => date,
            Err(err) => {
                debug!(index, error = %err, "skipping record with unusable timestamp");
                stats.unparseable += 1;
                continue;
            }
        };

        if date.year() != year {
            stats.out_of_year += 1;
            continue;
        }

        let key = week_key(date);
        match counts.get_mut(&key) {
            Some(count) => {
                *count += 1;
                stats.counted += 1;
            }
            None => {
                debug!(index, %date, label = %key.label(), "record labeled outside the week skeleton");
                stats.unmatched += 1;
            }
        }
    }

    let mut months = Vec::with_capacity(MONTH_ABBREVIATIONS.len());
    for (month, abbrev) in MONTH_ABBREVIATIONS.iter().enumerate() {
        let mut month_weeks: Vec<&WeekSpan> = weeks
            .iter()
            .filter(|week| week.month as usize == month)
            .collect();
        month_weeks.sort_by_key(|week| week.week_of_month);

        let real: Vec<WeekBucket> = month_weeks
            .iter()
            .map(|week| real_bucket(week, counts.get(&week.key()).copied().unwrap_or(0)))
            .collect();

        let (row, dropped_events) = reshape(abbrev, real);
        stats.truncated += dropped_events;
        months.push(row);
    }

    let grid = MonthGrid { year, months };
    assert_eq!(
        grid.bucket_count(),
        MONTH_ABBREVIATIONS.len() * WEEKS_PER_MONTH,
        "month grid lost its fixed shape"
    );
    assert_eq!(
        grid.total(),
        stats.counted - stats.truncated,
        "month grid total disagrees with counted records"
    );

    Ok(Aggregation { grid, stats })
}

/// Normalize one month to four buckets; returns the row and the event
/// count carried by any truncated weeks.
pub fn reshape(month: &str, mut real: Vec<WeekBucket>) -> (MonthRow, usize) {
    let mut dropped_events = 0;

    match ReshapePolicy::for_len(real.len()) {
        ReshapePolicy::Exact => {}
        ReshapePolicy::Truncate { dropped } => {
            dropped_events = real
                .drain(WEEKS_PER_MONTH..)
                .map(|bucket| bucket.count)
                .sum();
            debug!(month, dropped, dropped_events, "truncated month to four weeks");
        }
        ReshapePolicy::Pad { missing } => {
            let next = real
                .last()
                .and_then(|bucket| week_number(&bucket.label))
                .map(|n| n + 1)
                .unwrap_or(1);
            for offset in 0..missing {
                real.push(placeholder_bucket(month, next + offset as u32));
            }
        }
    }

    let weeks: [WeekBucket; WEEKS_PER_MONTH] = match real.try_into() {
        Ok(weeks) => weeks,
        Err(real) => panic!(
            "reshaped {month} to {} buckets instead of {WEEKS_PER_MONTH}",
            real.len()
        ),
    };

    (
        MonthRow {
            month: month.to_string(),
            weeks,
        },
        dropped_events,
    )
}

fn real_bucket(week: &WeekSpan, count: usize) -> WeekBucket {
    WeekBucket {
        label: format!("W{}", week.week_of_month),
        count,
        full_label: week.label.clone(),
        date_range: week.date_range(),
        is_placeholder: false,
        intensity: classify(count),
    }
}

fn placeholder_bucket(month: &str, week_number: u32) -> WeekBucket {
    WeekBucket {
        label: format!("W{week_number}"),
        count: 0,
        full_label: format!("{month} W{week_number}"),
        date_range: "No data".to_string(),
        is_placeholder: true,
        intensity: classify(0),
    }
}

fn week_number(label: &str) -> Option<u32> {
    label.strip_prefix('W')?.parse().ok()
}
